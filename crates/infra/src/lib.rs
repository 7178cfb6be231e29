//! `brasa-infra` — process-local implementations of every repository and
//! provider contract.
//!
//! The hosted backend owns durable storage; these stores are the in-process
//! working set the API serves from, and double as the dev/test backends. All
//! of them publish to the [`ChangeFeed`] so dashboards can refresh live.

pub mod auth_provider;
pub mod change_feed;
pub mod consent;
pub mod memory;
pub mod scheduler;
pub mod seed;
pub mod stores;

pub use auth_provider::InMemoryAuthProvider;
pub use change_feed::{ChangeFeed, ChangeOp, TableChange};
pub use consent::{ConsentDecision, ConsentRecord, InMemoryConsentLog};
pub use memory::Table;
pub use scheduler::TokioScheduler;
pub use stores::{
    InMemoryCartStore, InMemoryCouponRepository, InMemoryJobRepository,
    InMemoryProductRepository, InMemoryProfileDirectory, InMemoryQuoteRepository,
};
