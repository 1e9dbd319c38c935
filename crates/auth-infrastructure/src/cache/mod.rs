//! Key-value store adapters (Redis and in-memory)

pub mod connection;
pub mod memory_store;
pub mod redis_store;

pub use connection::{connect, create_pool, ping};
pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

use std::time::Duration;

/// Whole-second TTL as stored by Redis `EX`: rounded up, never below one second.
pub(crate) fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}
