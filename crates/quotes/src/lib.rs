//! `brasa-quotes` — quote requests and contracted jobs.
//!
//! There is no checkout: a cart becomes a quote request, which the workshop
//! answers and may eventually contract. Contracting creates the 1:1 job
//! record used for follow-up.

pub mod job;
pub mod quote;
pub mod repository;

pub use job::Job;
pub use quote::{QuoteDraft, QuoteItem, QuoteRequest, QuoteStatus};
pub use repository::{JobRepository, QuoteRepository};
