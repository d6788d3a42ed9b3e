//! Session entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated session (Entity)
///
/// Bundles the tokens and identity returned by the auth backend. Absence
/// of a session (logged out) is modelled as `Option<Session>` throughout;
/// the value itself is replaced wholesale on every refresh or sign-out,
/// never mutated field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: String,
    email: String,
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the access token has passed its expiry instant
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_expiring_in(seconds: i64) -> Session {
        Session::new(
            "user-1",
            "mati@example.com",
            "access",
            "refresh",
            Utc::now() + Duration::seconds(seconds),
        )
    }

    #[test]
    fn test_fresh_session_is_not_expired() {
        assert!(!session_expiring_in(3600).is_expired());
    }

    #[test]
    fn test_past_expiry_is_expired() {
        assert!(session_expiring_in(-1).is_expired());
    }

    #[test]
    fn test_session_roundtrips_through_json() {
        let session = session_expiring_in(3600);
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
