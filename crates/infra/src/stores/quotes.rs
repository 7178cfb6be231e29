use brasa_core::{DomainError, DomainResult, QuoteId, UserId};
use brasa_quotes::{Job, JobRepository, QuoteRepository, QuoteRequest, QuoteStatus};

use crate::change_feed::{ChangeFeed, ChangeOp};
use crate::memory::Table;

pub struct InMemoryQuoteRepository {
    table: Table<QuoteId, QuoteRequest>,
    feed: ChangeFeed,
}

impl InMemoryQuoteRepository {
    pub fn new(feed: ChangeFeed) -> Self {
        Self {
            table: Table::new(),
            feed,
        }
    }
}

impl QuoteRepository for InMemoryQuoteRepository {
    fn insert(&self, quote: QuoteRequest) -> DomainResult<()> {
        let id = quote.id;
        self.table.upsert(id, quote);
        self.feed.publish("cotizaciones", ChangeOp::Created, id);
        Ok(())
    }

    fn update(&self, quote: QuoteRequest) -> DomainResult<()> {
        if !self.table.contains(&quote.id) {
            return Err(DomainError::NotFound);
        }
        let id = quote.id;
        self.table.upsert(id, quote);
        self.feed.publish("cotizaciones", ChangeOp::Updated, id);
        Ok(())
    }

    fn get(&self, id: &QuoteId) -> Option<QuoteRequest> {
        self.table.get(id)
    }

    fn list_newest_first(&self) -> Vec<QuoteRequest> {
        let mut quotes = self.table.values();
        quotes.sort_by(|a, b| b.fecha_solicitud.cmp(&a.fecha_solicitud));
        quotes
    }

    fn list_for_user(&self, usuario_id: UserId) -> Vec<QuoteRequest> {
        let mut quotes: Vec<_> = self
            .table
            .values()
            .into_iter()
            .filter(|q| q.usuario_id == usuario_id)
            .collect();
        quotes.sort_by(|a, b| b.fecha_solicitud.cmp(&a.fecha_solicitud));
        quotes
    }

    fn count(&self) -> usize {
        self.table.len()
    }

    fn count_with_status(&self, estado: QuoteStatus) -> usize {
        self.table
            .values()
            .into_iter()
            .filter(|q| q.estado == estado)
            .count()
    }
}

pub struct InMemoryJobRepository {
    table: Table<brasa_core::JobId, Job>,
    feed: ChangeFeed,
}

impl InMemoryJobRepository {
    pub fn new(feed: ChangeFeed) -> Self {
        Self {
            table: Table::new(),
            feed,
        }
    }
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, job: Job) -> DomainResult<()> {
        if self.get_by_quote(&job.cotizacion_id).is_some() {
            return Err(DomainError::invariant(
                "la cotización ya tiene un trabajo asignado",
            ));
        }
        let id = job.id;
        self.table.upsert(id, job);
        self.feed.publish("trabajos", ChangeOp::Created, id);
        Ok(())
    }

    fn get_by_quote(&self, cotizacion_id: &QuoteId) -> Option<Job> {
        self.table.find(|j| j.cotizacion_id == *cotizacion_id)
    }

    fn list_newest_first(&self) -> Vec<Job> {
        let mut jobs = self.table.values();
        jobs.sort_by(|a, b| b.fecha_asignacion.cmp(&a.fecha_asignacion));
        jobs
    }

    fn count(&self) -> usize {
        self.table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brasa_core::ProductId;
    use brasa_quotes::{QuoteDraft, QuoteItem};
    use chrono::Utc;

    fn quote_for(usuario_id: UserId) -> QuoteRequest {
        QuoteRequest::submit(
            QuoteId::new(),
            usuario_id,
            QuoteDraft {
                direccion_envio: "Av. 0 #10-20".to_string(),
                departamento: "Antioquia".to_string(),
                comentarios_adicionales: None,
            },
            vec![QuoteItem {
                producto_id: ProductId::new(),
                cantidad: 1,
            }],
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn user_listing_filters_by_owner() {
        let repo = InMemoryQuoteRepository::new(ChangeFeed::default());
        let alice = UserId::new();
        let bob = UserId::new();

        repo.insert(quote_for(alice)).unwrap();
        repo.insert(quote_for(alice)).unwrap();
        repo.insert(quote_for(bob)).unwrap();

        assert_eq!(repo.list_for_user(alice).len(), 2);
        assert_eq!(repo.list_for_user(bob).len(), 1);
        assert_eq!(repo.count(), 3);
    }

    #[test]
    fn status_counting_tracks_updates() {
        let repo = InMemoryQuoteRepository::new(ChangeFeed::default());
        let mut quote = quote_for(UserId::new());
        repo.insert(quote.clone()).unwrap();

        assert_eq!(repo.count_with_status(QuoteStatus::TrabajoContratado), 0);

        quote
            .set_status(QuoteStatus::TrabajoContratado, Utc::now())
            .unwrap();
        repo.update(quote).unwrap();

        assert_eq!(repo.count_with_status(QuoteStatus::TrabajoContratado), 1);
    }

    #[test]
    fn one_job_per_quote() {
        let jobs = InMemoryJobRepository::new(ChangeFeed::default());
        let quote_id = QuoteId::new();

        jobs.insert(Job::assign(quote_id, None, Utc::now())).unwrap();
        let duplicate = Job::assign(quote_id, Some("segundo".to_string()), Utc::now());
        assert!(jobs.insert(duplicate).is_err());
        assert_eq!(jobs.count(), 1);
    }
}
