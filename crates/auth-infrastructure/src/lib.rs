//! # Auth Infrastructure
//! 
//! Key-value store adapters (Redis and in-memory) for the session store.

pub mod cache;
pub mod error;

pub use cache::{MemoryStore, RedisStore};
pub use error::InfraError;
