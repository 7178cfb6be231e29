//! Collaborator contracts for the hosted auth service and profile table.
//!
//! The application never implements authentication itself; it issues calls
//! against these contracts and reacts to the change-notification stream.

use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use brasa_core::UserId;

use crate::{AuthError, Credentials, Profile, ProfileSeed, ProfileStoreError, Session};

/// Session-change notification emitted by the auth provider.
///
/// Only these three kinds participate in routing; providers may emit other
/// internal transitions but must not surface them here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// First resolution after subscribing: the session that was already
    /// present (e.g. restored from a stored token), or none.
    InitialSession(Option<Session>),
    SignedIn(Session),
    SignedOut,
}

/// A subscription to the provider's session-change stream.
///
/// Events are delivered in emission order. Dropping the subscription
/// unsubscribes; providers drop disconnected senders on their next publish.
#[derive(Debug)]
pub struct AuthSubscription {
    receiver: Receiver<AuthEvent>,
}

impl AuthSubscription {
    pub fn new(receiver: Receiver<AuthEvent>) -> Self {
        Self { receiver }
    }

    /// Drain a pending event without blocking.
    pub fn try_recv(&self) -> Result<AuthEvent, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for an event.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<AuthEvent, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Result of a sign-up call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Account created and signed in immediately.
    SignedIn(Session),
    /// Account created; the provider requires email confirmation first.
    ConfirmationPending,
}

/// The hosted auth service.
pub trait AuthProvider {
    /// The session currently held by the provider, if any.
    fn current_session(&self) -> Result<Option<Session>, AuthError>;

    fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Registers the account and seeds the profile record. Whether a session
    /// is issued immediately depends on the provider's confirmation policy.
    fn sign_up(
        &self,
        credentials: &Credentials,
        seed: &ProfileSeed,
    ) -> Result<SignUpOutcome, AuthError>;

    fn sign_out(&self) -> Result<(), AuthError>;

    /// Subscribe to session-change notifications.
    fn subscribe(&self) -> AuthSubscription;
}

/// Single-record profile lookup.
///
/// A missing record is `Ok(None)`, distinct from a transport error. Callers
/// in the session machinery degrade both to "no profile", but the contract
/// keeps them apart for stricter consumers.
pub trait ProfileStore {
    fn profile_by_identity(&self, id: UserId) -> Result<Option<Profile>, ProfileStoreError>;
}
