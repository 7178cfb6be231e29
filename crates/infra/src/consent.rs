//! Cookie-consent log ("consentimientos_cookies" table).
//!
//! Append-only: each banner decision is recorded with enough request context
//! to answer later audits. A recorded decision for a session hash is what
//! suppresses the banner on subsequent visits.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brasa_core::ConsentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentDecision {
    Aceptado,
    Rechazado,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub id: ConsentId,
    pub decision: ConsentDecision,
    pub ip_usuario: String,
    pub user_agent: Option<String>,
    pub sesion_hash: Option<String>,
    pub fecha_hora: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct InMemoryConsentLog {
    records: RwLock<Vec<ConsentRecord>>,
}

impl InMemoryConsentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &self,
        decision: ConsentDecision,
        ip_usuario: String,
        user_agent: Option<String>,
        sesion_hash: Option<String>,
        now: DateTime<Utc>,
    ) -> ConsentRecord {
        let record = ConsentRecord {
            id: ConsentId::new(),
            decision,
            ip_usuario,
            user_agent,
            sesion_hash,
            fecha_hora: now,
        };
        if let Ok(mut records) = self.records.write() {
            records.push(record.clone());
        }
        record
    }

    /// Most recent decision recorded under a session hash, if any.
    pub fn latest_for_session(&self, sesion_hash: &str) -> Option<ConsentRecord> {
        let records = self.records.read().ok()?;
        records
            .iter()
            .rev()
            .find(|r| r.sesion_hash.as_deref() == Some(sesion_hash))
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }
}
