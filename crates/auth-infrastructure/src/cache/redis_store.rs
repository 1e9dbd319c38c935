//! Redis-backed key-value store

use std::time::Duration;

use async_trait::async_trait;
use auth_core::{KeyValueStore, StoreError};
use deadpool_redis::{redis::cmd, Connection, Pool};

use super::ttl_seconds;
use crate::error::{from_pool_error, from_redis_error};

/// [`KeyValueStore`] over a pooled Redis connection.
#[derive(Clone)]
pub struct RedisStore {
    pool: Pool,
}

impl RedisStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<Connection, StoreError> {
        self.pool.get().await.map_err(from_pool_error)
    }
}

/// A nil reply to `GET` means the key is absent or already expired.
fn value_or_not_found(value: Option<Vec<u8>>) -> Result<Vec<u8>, StoreError> {
    value.ok_or(StoreError::NotFound)
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let mut conn = self.conn().await?;
        let value: Option<Vec<u8>> = cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(from_redis_error)?;
        value_or_not_found(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let _: () = cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl_seconds(ttl))
            .query_async(&mut conn)
            .await
            .map_err(from_redis_error)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.conn().await?;
        cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(from_redis_error)
    }
}
