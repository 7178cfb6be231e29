//! `brasa-auth` — identity and authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. It defines the
//! records owned by the hosted auth service (sessions), the application-side
//! profile record, and the collaborator contracts the session state machine
//! depends on.

pub mod credentials;
pub mod error;
pub mod profile;
pub mod provider;
pub mod role;
pub mod session;

pub use credentials::Credentials;
pub use error::{AuthError, ProfileStoreError};
pub use profile::{AccountStatus, DocumentType, Profile, ProfileSeed};
pub use provider::{AuthEvent, AuthProvider, AuthSubscription, ProfileStore, SignUpOutcome};
pub use role::Role;
pub use session::Session;
