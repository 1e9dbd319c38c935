// ============================================================================
// Auth Core - Session Store
// File: crates/auth-core/src/services/session_store.rs
// ============================================================================
//! Session lifecycle: create, check, and extend sessions kept in a TTL store

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use auth_shared::config::SessionConfig;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, info_span, warn, Instrument, Span};

use crate::context::RequestContext;
use crate::domain::Session;
use crate::error::{SessionError, StoreError};
use crate::repositories::KeyValueStore;

/// Smallest base duration accepted; keeps `end_time > start_time`.
pub const MIN_BASE_DURATION: Duration = Duration::from_millis(1);

/// Store-wide session settings.
#[derive(Clone)]
pub struct SessionSettings {
    base_duration: Duration,
    token_secret: String,
}

impl SessionSettings {
    /// Durations shorter than [`MIN_BASE_DURATION`] are raised to it.
    pub fn new(base_duration: Duration) -> Self {
        Self {
            base_duration: base_duration.max(MIN_BASE_DURATION),
            token_secret: String::new(),
        }
    }

    pub fn with_token_secret(mut self, token_secret: impl Into<String>) -> Self {
        self.token_secret = token_secret.into();
        self
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(Duration::from_secs(config.base_duration_secs))
            .with_token_secret(config.token_secret.clone())
    }

    /// Validity window applied on creation and reapplied on extension.
    pub fn base_duration(&self) -> Duration {
        self.base_duration
    }

    /// Not consumed by any lifecycle operation.
    pub fn token_secret(&self) -> &str {
        &self.token_secret
    }
}

impl fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSettings")
            .field("base_duration", &self.base_duration)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

/// Owns the session lifecycle and is the only writer of session records.
pub struct SessionStore<S: KeyValueStore> {
    store: Arc<S>,
    settings: SessionSettings,
    span: Span,
}

impl<S: KeyValueStore> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            settings: self.settings.clone(),
            span: self.span.clone(),
        }
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: Arc<S>, settings: SessionSettings) -> Self {
        Self {
            store,
            settings,
            span: info_span!("session_store"),
        }
    }

    /// Record every lifecycle event under `span` instead of the default one.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Create a session for `user_id` valid for the base duration.
    /// Returns the new session id.
    pub async fn create_session(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<String, SessionError> {
        async {
            let now = Utc::now();
            let session = Session::new(user_id, now, self.settings.base_duration);
            self.save(ctx, &session, now).await?;
            info!(session_id = %session.id, "Session created");
            Ok(session.id)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Return the live session stored at `session_id`.
    ///
    /// A record past its `end_time` is deleted and reported as
    /// [`SessionError::Expired`]; a failing delete is reported instead.
    pub async fn check_session(
        &self,
        ctx: &RequestContext,
        session_id: &str,
    ) -> Result<Session, SessionError> {
        async {
            let session = self.fetch(ctx, session_id).await?;

            if session.is_expired_at(Utc::now()) {
                ctx.run(|| self.store.delete(session_id)).await.map_err(|e| {
                    error!(session_id, error = %e, "Failed delete session from store");
                    SessionError::StoreDeleteFailure(e)
                })?;
                info!(session_id, "Expired session removed");
                return Err(SessionError::Expired);
            }

            Ok(session)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Move the session's `end_time` to now + base duration and reset the store TTL.
    ///
    /// The logical expiry of the current record is not re-checked.
    pub async fn extend_session(
        &self,
        ctx: &RequestContext,
        session_id: &str,
    ) -> Result<(), SessionError> {
        async {
            let mut session = self.fetch(ctx, session_id).await?;
            let now = Utc::now();
            session.extend(now, self.settings.base_duration);

            if let Err(e) = self.save(ctx, &session, now).await {
                error!(session_id, error = %e, "Failed update session end time");
                return Err(e);
            }

            info!(session_id, end_time = %session.end_time, "Session extended");
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }

    /// Write `session` with a store TTL equal to its validity left at `now`.
    async fn save(
        &self,
        ctx: &RequestContext,
        session: &Session,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let data = session.encode().map_err(|e| {
            error!(session_id = %session.id, error = %e, "Failed encode session");
            SessionError::EncodingFailure(e)
        })?;

        let ttl = session.remaining_at(now).max(MIN_BASE_DURATION);
        ctx.run(|| self.store.set(&session.id, data, ttl))
            .await
            .map_err(|e| {
                error!(session_id = %session.id, error = %e, "Failed save session to store");
                SessionError::StoreWriteFailure(e)
            })?;

        debug!(session_id = %session.id, "Session saved to store");
        Ok(())
    }

    async fn fetch(&self, ctx: &RequestContext, session_id: &str) -> Result<Session, SessionError> {
        let data = match ctx.run(|| self.store.get(session_id)).await {
            Ok(data) => data,
            Err(StoreError::NotFound) => {
                warn!(session_id, "Session not found in store");
                return Err(SessionError::NotFound);
            }
            Err(e) => {
                error!(session_id, error = %e, "Failed get session from store");
                return Err(SessionError::StoreReadFailure(e));
            }
        };

        let session = Session::decode(&data).map_err(|e| {
            error!(session_id, error = %e, "Failed decode session");
            SessionError::DecodingFailure(e)
        })?;

        debug!(session_id, "Session fetched from store");
        Ok(session)
    }
}
