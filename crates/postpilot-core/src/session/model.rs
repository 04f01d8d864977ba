//! Session domain model.

use crate::user::User;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime of a session created by the development bypass login.
pub const DEV_SESSION_TTL: Duration = Duration::hours(1);

/// Lifetime of a session created by a regular login or signup.
pub const STANDARD_SESSION_TTL: Duration = Duration::hours(8);

/// A persisted, time-bounded authenticated session.
///
/// Stored under the `user` key as `{"user": {...}, "expiry": <ms>, "isTemp": bool}`.
/// `expiry` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub expiry: i64,
    /// Marks a short-lived development session.
    #[serde(default)]
    pub is_temp: bool,
}

impl Session {
    /// Creates a session for `user` that expires `ttl` after `now`.
    pub fn new(user: User, now: DateTime<Utc>, ttl: Duration, is_temp: bool) -> Self {
        Self {
            user,
            expiry: (now + ttl).timestamp_millis(),
            is_temp,
        }
    }

    /// Creates a regular eight-hour session.
    pub fn standard(user: User, now: DateTime<Utc>) -> Self {
        Self::new(user, now, STANDARD_SESSION_TTL, false)
    }

    /// Creates a one-hour development session.
    pub fn development(user: User, now: DateTime<Utc>) -> Self {
        Self::new(user, now, DEV_SESSION_TTL, true)
    }

    /// Returns true while `now` is strictly before the expiry instant.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() < self.expiry
    }

    /// The expiry as a UTC timestamp, if it is representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.expiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user() -> User {
        User::new("user_1", "Demo User", "demo@example.com")
    }

    #[test]
    fn test_development_session_lasts_one_hour() {
        let now = Utc.with_ymd_and_hms(2025, 11, 2, 10, 0, 0).unwrap();
        let session = Session::development(user(), now);

        assert!(session.is_temp);
        assert!(session.is_valid_at(now + Duration::minutes(59)));
        assert!(!session.is_valid_at(now + Duration::hours(1)));
    }

    #[test]
    fn test_standard_session_lasts_eight_hours() {
        let now = Utc.with_ymd_and_hms(2025, 11, 2, 10, 0, 0).unwrap();
        let session = Session::standard(user(), now);

        assert!(!session.is_temp);
        assert!(session.is_valid_at(now + Duration::hours(7)));
        assert!(!session.is_valid_at(now + Duration::hours(8)));
        assert_eq!(session.expires_at(), Some(now + STANDARD_SESSION_TTL));
    }

    #[test]
    fn test_persisted_shape() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let session = Session::development(user(), now);
        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["isTemp"], serde_json::json!(true));
        assert_eq!(json["user"]["id"], serde_json::json!("user_1"));
        assert_eq!(json["expiry"], serde_json::json!(now.timestamp_millis() + 3_600_000));
    }

    #[test]
    fn test_missing_temp_flag_defaults_to_normal_session() {
        let raw = r#"{"user":{"id":"u","name":"n","email":"e"},"expiry":1}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert!(!session.is_temp);
    }
}
