use brasa_core::{DomainResult, QuoteId, UserId};

use crate::{Job, QuoteRequest, QuoteStatus};

/// Quote persistence contract.
pub trait QuoteRepository: Send + Sync {
    fn insert(&self, quote: QuoteRequest) -> DomainResult<()>;

    fn update(&self, quote: QuoteRequest) -> DomainResult<()>;

    fn get(&self, id: &QuoteId) -> Option<QuoteRequest>;

    /// All quotes, newest first (admin view).
    fn list_newest_first(&self) -> Vec<QuoteRequest>;

    /// One user's quotes, newest first (client/user dashboards).
    fn list_for_user(&self, usuario_id: UserId) -> Vec<QuoteRequest>;

    fn count(&self) -> usize;

    fn count_with_status(&self, estado: QuoteStatus) -> usize;
}

/// Contracted-job persistence contract.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: Job) -> DomainResult<()>;

    fn get_by_quote(&self, cotizacion_id: &QuoteId) -> Option<Job>;

    fn list_newest_first(&self) -> Vec<Job>;

    fn count(&self) -> usize;
}
