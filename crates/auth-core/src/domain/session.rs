//! Session domain entity

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A time-bounded authorization record for one user.
///
/// The serde field tags match the records written by the previous
/// implementation of this service, so existing entries stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "UserID")]
    pub user_id: String,

    #[serde(rename = "StartTime")]
    pub start_time: DateTime<Utc>,

    #[serde(rename = "EndTime")]
    pub end_time: DateTime<Utc>,
}

impl Session {
    /// Start a new session at `now` with a fresh random identifier.
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            start_time: now,
            end_time: valid_until(now, duration),
        }
    }

    /// True once `now` is strictly past `end_time`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.end_time
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.end_time - now).to_std().unwrap_or(Duration::ZERO)
    }

    /// Push `end_time` to `now + duration`. `start_time` is never touched.
    pub fn extend(&mut self, now: DateTime<Utc>, duration: Duration) {
        self.end_time = valid_until(now, duration);
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

fn valid_until(now: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(duration)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let now = Utc::now();
        let session = Session::new("alice", now, Duration::from_secs(600));
        assert_eq!(session.user_id, "alice");
        assert_eq!(session.start_time, now);
        assert_eq!(session.end_time, now + TimeDelta::seconds(600));
        assert!(Uuid::parse_str(&session.id).is_ok());
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let session = Session::new("bob", now, Duration::from_millis(1));
        assert!(!session.is_expired_at(now));
        assert!(!session.is_expired_at(session.end_time));
        assert!(session.is_expired_at(session.end_time + TimeDelta::nanoseconds(1)));
        assert_eq!(
            session.remaining_at(session.end_time + TimeDelta::seconds(1)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_extend_keeps_start_time() {
        let start = Utc::now() - TimeDelta::minutes(5);
        let mut session = Session::new("carol", start, Duration::from_secs(60));
        let now = Utc::now();
        session.extend(now, Duration::from_secs(900));
        assert_eq!(session.start_time, start);
        assert_eq!(session.end_time, now + TimeDelta::seconds(900));
        assert_eq!(session.remaining_at(now), Duration::from_secs(900));
    }

    #[test]
    fn test_record_roundtrip_keeps_sub_second_precision() {
        let now = Utc::now();
        let session = Session::new("dave", now, Duration::from_nanos(1_500_000_123));
        let bytes = session.encode().unwrap();
        let decoded = Session::decode(&bytes).unwrap();
        assert_eq!(decoded, session);
    }

    #[test]
    fn test_record_field_tags() {
        let json = r#"{
            "ID": "0b8f8c1e-2f7e-4a8e-9d3c-1f2a3b4c5d6e",
            "UserID": "42",
            "StartTime": "2024-03-01T10:00:00.123456789+03:00",
            "EndTime": "2024-03-01T10:10:00.123456789+03:00"
        }"#;
        let session = Session::decode(json.as_bytes()).unwrap();
        assert_eq!(session.user_id, "42");
        assert_eq!(session.end_time - session.start_time, TimeDelta::minutes(10));

        let value: serde_json::Value = serde_json::from_slice(&session.encode().unwrap()).unwrap();
        for tag in ["ID", "UserID", "StartTime", "EndTime"] {
            assert!(value.get(tag).is_some(), "missing field {}", tag);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(Session::decode(b"not json").is_err());
        assert!(Session::decode(br#"{"ID":"x","UserID":"y"}"#).is_err());
    }

    #[test]
    fn test_huge_duration_saturates() {
        let now = Utc::now();
        let session = Session::new("erin", now, Duration::MAX);
        assert_eq!(session.end_time, DateTime::<Utc>::MAX_UTC);
    }
}
