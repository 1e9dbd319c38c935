//! Redis connection pool

use std::time::Duration;

use auth_core::StoreError;
use auth_shared::config::RedisSettings;
use deadpool_redis::{redis::cmd, Config, CreatePoolError, Pool, PoolConfig, Runtime, Timeouts};
use tracing::{error, info};

use crate::error::{from_pool_error, from_redis_error, InfraError};

pub fn create_pool(settings: &RedisSettings) -> Result<Pool, CreatePoolError> {
    let timeout = Duration::from_millis(settings.connect_timeout_ms);
    let mut timeouts = Timeouts::default();
    timeouts.wait = Some(timeout);
    timeouts.create = Some(timeout);
    timeouts.recycle = Some(timeout);

    let mut pool_config = PoolConfig::new(settings.max_connections as usize);
    pool_config.timeouts = timeouts;

    let mut config = Config::from_url(settings.connection_url());
    config.pool = Some(pool_config);
    config.create_pool(Some(Runtime::Tokio1))
}

/// Round-trips a `PING` through a pooled connection.
pub async fn ping(pool: &Pool) -> Result<(), StoreError> {
    let mut conn = pool.get().await.map_err(from_pool_error)?;
    let _: String = cmd("PING")
        .query_async(&mut conn)
        .await
        .map_err(from_redis_error)?;
    Ok(())
}

/// Creates the pool and verifies the server answers before handing it out.
pub async fn connect(settings: &RedisSettings) -> Result<Pool, InfraError> {
    info!(host = %settings.host, port = settings.port, db = settings.db, "Connecting to redis");
    let pool = create_pool(settings)?;
    if let Err(e) = ping(&pool).await {
        error!(error = %e, "Failed to connect to redis");
        return Err(InfraError::FailedToConnectRedis(e));
    }
    info!("Redis connection established");
    Ok(pool)
}
