//! In-memory key-value store with lazy TTL eviction

use std::time::{Duration, Instant};

use async_trait::async_trait;
use auth_core::{KeyValueStore, StoreError};
use dashmap::DashMap;

use super::ttl_seconds;

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// [`KeyValueStore`] kept in process memory.
///
/// TTLs are rounded the same way as [`RedisStore`](super::RedisStore), so
/// lifecycle behaviour matches a Redis deployment.
#[derive(Default)]
pub struct MemoryStore {
    map: DashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let now = Instant::now();
        let entry = self.map.get(key).ok_or(StoreError::NotFound)?;
        if entry.is_expired(now) {
            drop(entry);
            self.map.remove_if(key, |_, e| e.is_expired(now));
            return Err(StoreError::NotFound);
        }
        Ok(entry.value.clone())
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds(ttl));
        self.map.insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        Ok(u64::from(self.map.remove(key).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_operations() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store
            .set("k", b"v".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k").await.unwrap(), b"v".to_vec());

        assert_eq!(store.delete("k").await.unwrap(), 1);
        assert_eq!(store.delete("k").await.unwrap(), 0);
        assert!(matches!(store.get("k").await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let store = MemoryStore::new();
        store.set("k", b"a".to_vec(), Duration::from_secs(60)).await.unwrap();
        store.set("k", b"b".to_vec(), Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k").await.unwrap(), b"b".to_vec());
    }

    #[tokio::test]
    async fn test_expired_entry_evicted_on_read() {
        let store = MemoryStore::new();
        store.map.insert(
            "old".to_string(),
            Entry {
                value: b"v".to_vec(),
                expires_at: Instant::now(),
            },
        );
        assert!(matches!(store.get("old").await, Err(StoreError::NotFound)));
        assert!(store.is_empty());
    }
}
