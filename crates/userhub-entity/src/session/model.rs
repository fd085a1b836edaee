//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A live user session.
///
/// Sessions are created on login and destroyed on logout, lazy expiry,
/// or user deletion. A session row is never updated in place: presence
/// in the store means valid-until-expiry, absence means invalid.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Surrogate identifier assigned by the store.
    pub id: i64,
    /// The user this session authenticates.
    pub user_id: Uuid,
    /// Opaque lookup token; unique across all live sessions.
    pub token: String,
    /// Absolute expiry instant.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the expiry instant has passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Data required to create a new session; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    /// The user this session authenticates.
    pub user_id: Uuid,
    /// Opaque lookup token.
    pub token: String,
    /// Absolute expiry instant.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_is_inclusive_of_the_boundary() {
        let session = Session {
            id: 1,
            user_id: Uuid::new_v4(),
            token: "t".to_string(),
            expires_at: Utc::now() - Duration::seconds(1),
        };
        assert!(session.is_expired());

        let session = Session {
            expires_at: Utc::now() + Duration::hours(1),
            ..session
        };
        assert!(!session.is_expired());
    }
}
