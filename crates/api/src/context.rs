use brasa_auth::{Profile, Session};
use brasa_core::UserId;

/// Authenticated session for a request. Present on all protected routes.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session: Session,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user_id(&self) -> UserId {
        self.session.user_id
    }

    pub fn token(&self) -> &str {
        &self.session.token
    }
}

/// Resolved profile for a request's identity.
///
/// Absent when the profile record is missing or its fetch failed; the role
/// gate turns that into a retryable response rather than an admission.
#[derive(Debug, Clone)]
pub struct ProfileContext {
    profile: Option<Profile>,
}

impl ProfileContext {
    pub fn new(profile: Option<Profile>) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn into_profile(self) -> Option<Profile> {
        self.profile
    }
}
