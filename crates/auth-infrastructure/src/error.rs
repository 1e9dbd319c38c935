//! Infrastructure errors

use auth_core::StoreError;
use deadpool_redis::{redis::RedisError, CreatePoolError, PoolError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Failed to create redis pool: {0}")]
    CreatePool(#[from] CreatePoolError),

    #[error("Failed to connect to redis: {0}")]
    FailedToConnectRedis(#[source] StoreError),
}

/// Converts a Redis command error into a store error.
pub fn from_redis_error(err: RedisError) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout
    } else if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
        StoreError::Connection(err.to_string())
    } else {
        StoreError::Backend(err.to_string())
    }
}

/// Converts a pool checkout error into a store error.
pub fn from_pool_error(err: PoolError) -> StoreError {
    match err {
        PoolError::Timeout(_) => StoreError::Timeout,
        other => StoreError::Connection(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadpool_redis::redis::ErrorKind;
    use deadpool_redis::TimeoutType;
    use std::io;

    #[test]
    fn test_refused_connection_maps_to_connection() {
        let err = RedisError::from(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        match from_redis_error(err) {
            StoreError::Connection(msg) => assert!(msg.contains("refused")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_server_reply_maps_to_backend() {
        let err = RedisError::from((ErrorKind::ResponseError, "READONLY"));
        match from_redis_error(err) {
            StoreError::Backend(msg) => assert!(msg.contains("READONLY")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_io_timeout_maps_to_timeout() {
        let err = RedisError::from(io::Error::new(io::ErrorKind::TimedOut, "timed out"));
        assert!(matches!(from_redis_error(err), StoreError::Timeout));
    }

    #[test]
    fn test_pool_wait_timeout_maps_to_timeout() {
        let err = PoolError::Timeout(TimeoutType::Wait);
        assert!(matches!(from_pool_error(err), StoreError::Timeout));
        assert!(matches!(
            from_pool_error(PoolError::Closed),
            StoreError::Connection(_)
        ));
    }
}
