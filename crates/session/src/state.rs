//! Shared session state snapshot.

use brasa_auth::{Profile, Session};
use brasa_core::UserId;

/// The state every routing decision is derived from.
///
/// Only the session controller writes this; the redirect policy and the route
/// gate read it. `loading` is true from construction until the provider's
/// first session resolution arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub profile: Option<Profile>,
    pub loading: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session: None,
            profile: None,
            loading: true,
        }
    }

    pub fn identity(&self) -> Option<UserId> {
        self.session.as_ref().map(|s| s.user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
