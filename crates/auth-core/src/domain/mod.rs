//! # Auth Core - Domain Module

pub mod session;

pub use session::Session;
