//! Session and key-value store errors

use thiserror::Error;

/// Failures reported by a [`KeyValueStore`](crate::repositories::KeyValueStore) adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Key not found")]
    NotFound,

    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation timed out")]
    Timeout,

    #[error("Store operation cancelled")]
    Cancelled,

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Session lifecycle errors, typed by kind so callers can map them to outcomes.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,

    #[error("Session is expired")]
    Expired,

    #[error("Failed to encode session: {0}")]
    EncodingFailure(#[source] serde_json::Error),

    #[error("Failed to decode session: {0}")]
    DecodingFailure(#[source] serde_json::Error),

    #[error("Failed to read session from store: {0}")]
    StoreReadFailure(#[source] StoreError),

    #[error("Failed to write session to store: {0}")]
    StoreWriteFailure(#[source] StoreError),

    #[error("Failed to delete session from store: {0}")]
    StoreDeleteFailure(#[source] StoreError),
}

impl SessionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }

    /// Transport failures may succeed on a later attempt; nothing else will.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StoreReadFailure(_) | Self::StoreWriteFailure(_) | Self::StoreDeleteFailure(_)
        )
    }
}
