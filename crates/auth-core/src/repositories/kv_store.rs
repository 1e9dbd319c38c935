//! Key-value store trait (port)

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

/// External TTL-capable key-value service holding encoded session records.
///
/// Each call is atomic on its own; no multi-call transactions are offered.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value at `key`, or [`StoreError::NotFound`] when absent or evicted.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Write `value` at `key`; the store may evict it once `ttl` elapses.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError>;

    /// Remove `key`, returning how many keys were deleted. Absent keys yield 0.
    async fn delete(&self, key: &str) -> Result<u64, StoreError>;
}
