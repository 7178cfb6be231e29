use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brasa_core::{JobId, QuoteId};

/// A contracted job, created when a quote reaches `trabajo-contratado`.
/// Exactly one per quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub cotizacion_id: QuoteId,
    pub fecha_asignacion: DateTime<Utc>,
    pub observaciones: Option<String>,
}

impl Job {
    pub fn assign(
        cotizacion_id: QuoteId,
        observaciones: Option<String>,
        now: DateTime<Utc>,
    ) -> Job {
        Job {
            id: JobId::new(),
            cotizacion_id,
            fecha_asignacion: now,
            observaciones,
        }
    }
}
