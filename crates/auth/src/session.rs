use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brasa_core::{SessionId, UserId};

/// Credential handle issued by the auth provider on sign-in.
///
/// The provider owns the lifecycle (creation, expiry, destruction); this is a
/// local cache of the handle, valid for the lifetime of the controller that
/// holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Identity reference; keys the 1:1 profile record.
    pub user_id: UserId,
    /// Opaque bearer token for subsequent calls.
    pub token: String,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_is_inclusive_at_the_deadline() {
        let now = Utc::now();
        let session = Session {
            id: SessionId::new(),
            user_id: UserId::new(),
            token: "tok".to_string(),
            started_at: now,
            expires_at: now + Duration::minutes(30),
        };

        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::minutes(30)));
        assert!(session.is_expired(now + Duration::hours(1)));
    }
}
