//! Domain services

pub mod session_store;

pub use session_store::{SessionSettings, SessionStore, MIN_BASE_DURATION};
