//! `brasa-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod price;

pub use error::{DomainError, DomainResult};
pub use id::{ConsentId, CouponId, JobId, ProductId, QuoteId, SessionId, UserId};
pub use price::Price;
