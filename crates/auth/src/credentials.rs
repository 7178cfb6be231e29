use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Email/password pair for sign-in and sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Local pre-flight checks mirroring the provider's own rules, so obvious
    /// mistakes fail before a network round-trip.
    pub fn validate(&self) -> Result<(), AuthError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }
        if self.password.chars().count() < 6 {
            return Err(AuthError::WeakPassword);
        }
        Ok(())
    }

    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}
