//! In-process stand-in for the hosted auth service.
//!
//! Accounts, sessions and the change-notification stream live in memory;
//! registration seeds the profile record exactly the way the hosted service
//! does. The `current` session mirrors the provider-side notion of "the
//! session this client holds", which is what [`AuthProvider::current_session`]
//! reports and what the storefront API's bearer lookups resolve against.

use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex, RwLock};

use chrono::{Duration, Utc};
use uuid::Uuid;

use brasa_auth::{
    AuthError, AuthEvent, AuthProvider, AuthSubscription, Credentials, ProfileSeed, Session,
    SignUpOutcome,
};
use brasa_core::{SessionId, UserId};

use crate::stores::InMemoryProfileDirectory;

/// Sign-in failures tolerated per email before the provider rate-limits.
const MAX_FAILED_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone)]
struct Account {
    user_id: UserId,
    password: String,
    confirmed: bool,
}

pub struct InMemoryAuthProvider {
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<String, Session>>,
    current: RwLock<Option<Session>>,
    listeners: Mutex<Vec<mpsc::Sender<AuthEvent>>>,
    failed_attempts: Mutex<HashMap<String, u32>>,
    profiles: Arc<InMemoryProfileDirectory>,
    registration_enabled: RwLock<bool>,
    require_confirmation: bool,
    session_ttl: Duration,
}

impl InMemoryAuthProvider {
    pub fn new(profiles: Arc<InMemoryProfileDirectory>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
            listeners: Mutex::new(Vec::new()),
            failed_attempts: Mutex::new(HashMap::new()),
            profiles,
            registration_enabled: RwLock::new(true),
            require_confirmation: false,
            session_ttl: Duration::hours(8),
        }
    }

    /// Same provider, but sign-ups stay pending until the email is confirmed.
    pub fn with_email_confirmation(profiles: Arc<InMemoryProfileDirectory>) -> Self {
        Self {
            require_confirmation: true,
            ..Self::new(profiles)
        }
    }

    pub fn set_registration_enabled(&self, enabled: bool) {
        if let Ok(mut flag) = self.registration_enabled.write() {
            *flag = enabled;
        }
    }

    /// Provision a confirmed account with an explicit role. Used by seeding
    /// and tests; the storefront only ever registers general users.
    pub fn register_with_role(
        &self,
        credentials: &Credentials,
        seed: ProfileSeed,
        rol: &str,
    ) -> Result<UserId, AuthError> {
        credentials.validate()?;
        let email = credentials.normalized_email();

        let user_id = self.create_account(&email, &credentials.password, true)?;
        self.profiles
            .insert(seed.into_profile(user_id, Utc::now()))
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        self.profiles
            .set_role(user_id, rol)
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        Ok(user_id)
    }

    /// Bearer-token resolution for the storefront API. Expired sessions are
    /// dropped on lookup.
    pub fn session_for_token(&self, token: &str) -> Option<Session> {
        let session = self.sessions.read().ok()?.get(token).cloned()?;
        if session.is_expired(Utc::now()) {
            tracing::debug!(user_id = %session.user_id, "session expired, dropping");
            if let Ok(mut sessions) = self.sessions.write() {
                sessions.remove(token);
            }
            return None;
        }
        Some(session)
    }

    /// Destroy the session behind a bearer token (API logout).
    pub fn revoke_token(&self, token: &str) -> bool {
        let removed = self
            .sessions
            .write()
            .ok()
            .and_then(|mut sessions| sessions.remove(token));
        if removed.is_none() {
            return false;
        }

        let was_current = self
            .current
            .read()
            .ok()
            .and_then(|c| c.as_ref().map(|s| s.token == token))
            .unwrap_or(false);
        if was_current {
            if let Ok(mut current) = self.current.write() {
                *current = None;
            }
            self.emit(AuthEvent::SignedOut);
        }
        true
    }

    fn create_account(
        &self,
        email: &str,
        password: &str,
        confirmed: bool,
    ) -> Result<UserId, AuthError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| AuthError::Provider("account store poisoned".to_string()))?;
        if accounts.contains_key(email) {
            return Err(AuthError::AlreadyRegistered);
        }
        let user_id = UserId::new();
        accounts.insert(
            email.to_string(),
            Account {
                user_id,
                password: password.to_string(),
                confirmed,
            },
        );
        Ok(user_id)
    }

    fn issue_session(&self, user_id: UserId) -> Session {
        let now = Utc::now();
        let session = Session {
            id: SessionId::new(),
            user_id,
            token: Uuid::now_v7().simple().to_string(),
            started_at: now,
            expires_at: now + self.session_ttl,
        };
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(session.token.clone(), session.clone());
        }
        if let Ok(mut current) = self.current.write() {
            *current = Some(session.clone());
        }
        session
    }

    fn emit(&self, event: AuthEvent) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }

    fn bump_failed_attempts(&self, email: &str) -> u32 {
        let mut attempts = match self.failed_attempts.lock() {
            Ok(a) => a,
            Err(_) => return 0,
        };
        let count = attempts.entry(email.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}

impl AuthProvider for InMemoryAuthProvider {
    fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let current = self
            .current
            .read()
            .map_err(|_| AuthError::Provider("session store poisoned".to_string()))?;
        let session = current.clone().filter(|s| !s.is_expired(Utc::now()));
        Ok(session)
    }

    fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let email = credentials.normalized_email();

        let attempts = self
            .failed_attempts
            .lock()
            .ok()
            .and_then(|a| a.get(&email).copied())
            .unwrap_or(0);
        if attempts >= MAX_FAILED_ATTEMPTS {
            return Err(AuthError::RateLimited);
        }

        let account = self
            .accounts
            .read()
            .map_err(|_| AuthError::Provider("account store poisoned".to_string()))?
            .get(&email)
            .cloned();

        let Some(account) = account else {
            self.bump_failed_attempts(&email);
            return Err(AuthError::InvalidCredentials);
        };
        if account.password != credentials.password {
            self.bump_failed_attempts(&email);
            return Err(AuthError::InvalidCredentials);
        }
        if !account.confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }

        if let Ok(mut attempts) = self.failed_attempts.lock() {
            attempts.remove(&email);
        }

        let session = self.issue_session(account.user_id);
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    fn sign_up(
        &self,
        credentials: &Credentials,
        seed: &ProfileSeed,
    ) -> Result<SignUpOutcome, AuthError> {
        credentials.validate()?;
        seed.validate()
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let enabled = self
            .registration_enabled
            .read()
            .map(|flag| *flag)
            .unwrap_or(true);
        if !enabled {
            return Err(AuthError::RegistrationDisabled);
        }

        let email = credentials.normalized_email();
        let confirmed = !self.require_confirmation;
        let user_id = self.create_account(&email, &credentials.password, confirmed)?;

        self.profiles
            .insert(seed.clone().into_profile(user_id, Utc::now()))
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        if !confirmed {
            tracing::info!(%user_id, "sign-up pending email confirmation");
            return Ok(SignUpOutcome::ConfirmationPending);
        }

        let session = self.issue_session(user_id);
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(SignUpOutcome::SignedIn(session))
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        let taken = self
            .current
            .write()
            .map_err(|_| AuthError::Provider("session store poisoned".to_string()))?
            .take();

        if let Some(session) = taken {
            if let Ok(mut sessions) = self.sessions.write() {
                sessions.remove(&session.token);
            }
            self.emit(AuthEvent::SignedOut);
        }
        Ok(())
    }

    fn subscribe(&self) -> AuthSubscription {
        let (tx, rx) = mpsc::channel();
        // First resolution for this subscriber: whatever is held right now.
        let current = self.current.read().ok().and_then(|c| c.clone());
        let _ = tx.send(AuthEvent::InitialSession(current));
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(tx);
        }
        AuthSubscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_feed::ChangeFeed;
    use brasa_auth::{DocumentType, ProfileStore};

    fn seed() -> ProfileSeed {
        ProfileSeed {
            nombre: "Jorge".to_string(),
            apellido: "Pinto".to_string(),
            tipo_documento: DocumentType::Cc,
            cedula: "1090777888".to_string(),
            telefono: Some("3014445566".to_string()),
            direccion: None,
            departamento: Some("Santander".to_string()),
            pais: Some("Colombia".to_string()),
        }
    }

    fn provider() -> (Arc<InMemoryProfileDirectory>, InMemoryAuthProvider) {
        let profiles = Arc::new(InMemoryProfileDirectory::new(ChangeFeed::default()));
        let auth = InMemoryAuthProvider::new(profiles.clone());
        (profiles, auth)
    }

    #[test]
    fn sign_up_creates_account_profile_and_session() {
        let (profiles, auth) = provider();
        let creds = Credentials::new("jorge@example.com", "secreto");

        let outcome = auth.sign_up(&creds, &seed()).unwrap();
        let SignUpOutcome::SignedIn(session) = outcome else {
            panic!("expected immediate session");
        };

        let profile = profiles
            .profile_by_identity(session.user_id)
            .unwrap()
            .unwrap();
        assert_eq!(profile.rol, "usuario");
        assert!(auth.session_for_token(&session.token).is_some());
    }

    #[test]
    fn duplicate_registration_is_classified() {
        let (_profiles, auth) = provider();
        let creds = Credentials::new("jorge@example.com", "secreto");

        auth.sign_up(&creds, &seed()).unwrap();
        let result = auth.sign_up(&creds, &seed());
        assert!(matches!(result, Err(AuthError::AlreadyRegistered)));
    }

    #[test]
    fn wrong_password_then_rate_limit() {
        let (_profiles, auth) = provider();
        auth.sign_up(&Credentials::new("jorge@example.com", "secreto"), &seed())
            .unwrap();

        let bad = Credentials::new("jorge@example.com", "equivocada");
        for _ in 0..MAX_FAILED_ATTEMPTS {
            assert!(matches!(
                auth.sign_in(&bad),
                Err(AuthError::InvalidCredentials)
            ));
        }
        assert!(matches!(auth.sign_in(&bad), Err(AuthError::RateLimited)));
    }

    #[test]
    fn successful_sign_in_resets_the_failure_counter() {
        let (_profiles, auth) = provider();
        let good = Credentials::new("jorge@example.com", "secreto");
        auth.sign_up(&good, &seed()).unwrap();

        let bad = Credentials::new("jorge@example.com", "equivocada");
        for _ in 0..3 {
            let _ = auth.sign_in(&bad);
        }
        assert!(auth.sign_in(&good).is_ok());
        assert!(matches!(
            auth.sign_in(&bad),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn confirmation_gate_blocks_sign_in_until_confirmed() {
        let profiles = Arc::new(InMemoryProfileDirectory::new(ChangeFeed::default()));
        let auth = InMemoryAuthProvider::with_email_confirmation(profiles);
        let creds = Credentials::new("jorge@example.com", "secreto");

        let outcome = auth.sign_up(&creds, &seed()).unwrap();
        assert_eq!(outcome, SignUpOutcome::ConfirmationPending);
        assert!(matches!(
            auth.sign_in(&creds),
            Err(AuthError::EmailNotConfirmed)
        ));
    }

    #[test]
    fn disabled_registration_is_classified() {
        let (_profiles, auth) = provider();
        auth.set_registration_enabled(false);

        let result = auth.sign_up(&Credentials::new("jorge@example.com", "secreto"), &seed());
        assert!(matches!(result, Err(AuthError::RegistrationDisabled)));
    }

    #[test]
    fn subscription_sees_initial_then_sign_in_and_out() {
        let (_profiles, auth) = provider();
        let subscription = auth.subscribe();

        assert_eq!(
            subscription.try_recv().unwrap(),
            AuthEvent::InitialSession(None)
        );

        let creds = Credentials::new("jorge@example.com", "secreto");
        auth.sign_up(&creds, &seed()).unwrap();
        assert!(matches!(
            subscription.try_recv().unwrap(),
            AuthEvent::SignedIn(_)
        ));

        auth.sign_out().unwrap();
        assert_eq!(subscription.try_recv().unwrap(), AuthEvent::SignedOut);
    }

    #[test]
    fn revoking_a_token_destroys_the_session() {
        let (_profiles, auth) = provider();
        let creds = Credentials::new("jorge@example.com", "secreto");
        let SignUpOutcome::SignedIn(session) = auth.sign_up(&creds, &seed()).unwrap() else {
            panic!("expected session");
        };

        assert!(auth.revoke_token(&session.token));
        assert!(auth.session_for_token(&session.token).is_none());
        assert!(!auth.revoke_token(&session.token), "already revoked");
    }
}
