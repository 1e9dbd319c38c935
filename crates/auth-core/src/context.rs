//! Per-request cancellation and deadline handling

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::StoreError;

/// Caller-supplied context bounding every store round-trip of an operation.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context driven by an external cancellation token.
    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self {
            cancellation,
            deadline: None,
        }
    }

    /// Fail store calls that are still running `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Drive a store call to completion unless the context is cancelled or
    /// its deadline passes first. `call` is not invoked at all when the
    /// context is already cancelled or past its deadline.
    pub async fn run<T, F, Fut>(&self, call: F) -> Result<T, StoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        if self.is_cancelled() {
            return Err(StoreError::Cancelled);
        }

        match self.deadline {
            Some(deadline) => {
                if deadline <= Instant::now() {
                    return Err(StoreError::Timeout);
                }
                tokio::select! {
                    biased;
                    _ = self.cancellation.cancelled() => Err(StoreError::Cancelled),
                    result = tokio::time::timeout_at(deadline, call()) => {
                        result.unwrap_or_else(|_| Err(StoreError::Timeout))
                    }
                }
            }
            None => {
                tokio::select! {
                    biased;
                    _ = self.cancellation.cancelled() => Err(StoreError::Cancelled),
                    result = call() => result,
                }
            }
        }
    }
}
