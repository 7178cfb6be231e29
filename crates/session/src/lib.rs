//! `brasa-session` — session/role resolution and route guarding.
//!
//! This crate is the navigation brain of the storefront: it owns the cached
//! session, resolves the profile behind it, and decides, at most once per
//! signed-in identity, where the user should be sent. It is single-threaded
//! and callback-driven; all IO happens behind the collaborator contracts in
//! `brasa-auth` and the [`Navigator`]/[`Notifier`]/[`Scheduler`] traits here.
//!
//! Structure:
//! - [`controller`]: the stateful [`SessionController`] (session store +
//!   profile resolver + redirect guard wired together)
//! - [`redirect`]: the pure redirect policy
//! - [`gate`]: per-view role gate, re-validated on every render
//! - [`routes`]: the route table the policies operate on
//! - [`scheduler`]: cancellable deferred tasks (grace period, settle delay)

pub mod controller;
pub mod gate;
pub mod navigator;
pub mod notifier;
pub mod redirect;
pub mod resolver;
pub mod routes;
pub mod scheduler;
pub mod state;

pub use controller::{SessionController, PROFILE_GRACE_PERIOD, REDIRECT_SETTLE_DELAY};
pub use gate::{GateDecision, LoadingKind};
pub use navigator::{NavState, Navigator, ViewErrorKind};
pub use notifier::{Notification, Notifier, Severity};
pub use redirect::RedirectIntent;
pub use resolver::{ProfileFetchTicket, ProfileResolver};
pub use scheduler::{DeferredTask, ManualScheduler, Scheduler, TimerToken};
pub use state::SessionState;
