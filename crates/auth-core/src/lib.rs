//! # Auth Core
//! 
//! Session entity, session lifecycle service, and the key-value store port it
//! depends on.

pub mod context;
pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

pub use context::RequestContext;
pub use domain::Session;
pub use error::{SessionError, StoreError};
pub use repositories::KeyValueStore;
pub use services::{SessionSettings, SessionStore};
