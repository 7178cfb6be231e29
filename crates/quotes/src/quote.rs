use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brasa_core::{DomainError, DomainResult, ProductId, QuoteId, UserId};

/// Lifecycle of a quote request.
///
/// Transitions only move forward (pendiente → hecha → contratada, skipping
/// allowed); `TrabajoContratado` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuoteStatus {
    #[default]
    #[serde(rename = "cotizacion-pendiente")]
    CotizacionPendiente,
    #[serde(rename = "cotizacion-hecha")]
    CotizacionHecha,
    #[serde(rename = "trabajo-contratado")]
    TrabajoContratado,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::CotizacionPendiente => "cotizacion-pendiente",
            QuoteStatus::CotizacionHecha => "cotizacion-hecha",
            QuoteStatus::TrabajoContratado => "trabajo-contratado",
        }
    }

    pub fn parse(raw: &str) -> Option<QuoteStatus> {
        match raw {
            "cotizacion-pendiente" => Some(QuoteStatus::CotizacionPendiente),
            "cotizacion-hecha" => Some(QuoteStatus::CotizacionHecha),
            "trabajo-contratado" => Some(QuoteStatus::TrabajoContratado),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            QuoteStatus::CotizacionPendiente => 0,
            QuoteStatus::CotizacionHecha => 1,
            QuoteStatus::TrabajoContratado => 2,
        }
    }

    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        next.rank() > self.rank()
    }
}

impl core::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cart line captured into the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub producto_id: ProductId,
    pub cantidad: u32,
}

/// Fields captured by the quote form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDraft {
    pub direccion_envio: String,
    pub departamento: String,
    pub comentarios_adicionales: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub id: QuoteId,
    pub usuario_id: UserId,
    pub direccion_envio: String,
    pub departamento: String,
    pub comentarios_adicionales: Option<String>,
    pub estado: QuoteStatus,
    pub fecha_solicitud: DateTime<Utc>,
    pub fecha_actualizacion: Option<DateTime<Utc>>,
    pub items: Vec<QuoteItem>,
}

impl QuoteRequest {
    /// Submit a quote request from a cart snapshot.
    pub fn submit(
        id: QuoteId,
        usuario_id: UserId,
        draft: QuoteDraft,
        items: Vec<QuoteItem>,
        now: DateTime<Utc>,
    ) -> DomainResult<QuoteRequest> {
        if draft.direccion_envio.trim().is_empty() {
            return Err(DomainError::validation(
                "la dirección de entrega es requerida",
            ));
        }
        if draft.departamento.trim().is_empty() {
            return Err(DomainError::validation("el departamento es requerido"));
        }
        if items.is_empty() {
            return Err(DomainError::validation(
                "la cotización debe incluir al menos un producto",
            ));
        }
        if items.iter().any(|i| i.cantidad == 0) {
            return Err(DomainError::validation(
                "las cantidades deben ser al menos 1",
            ));
        }

        Ok(QuoteRequest {
            id,
            usuario_id,
            direccion_envio: draft.direccion_envio.trim().to_string(),
            departamento: draft.departamento.trim().to_string(),
            comentarios_adicionales: draft.comentarios_adicionales,
            estado: QuoteStatus::CotizacionPendiente,
            fecha_solicitud: now,
            fecha_actualizacion: None,
            items,
        })
    }

    /// Move the quote along its lifecycle. Backward moves and repeats are
    /// rejected; the contracted state is terminal.
    pub fn set_status(&mut self, next: QuoteStatus, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.estado.can_transition_to(next) {
            return Err(DomainError::invariant(format!(
                "transición de estado inválida: {} → {}",
                self.estado, next
            )));
        }
        self.estado = next;
        self.fecha_actualizacion = Some(now);
        Ok(())
    }

    pub fn is_contracted(&self) -> bool {
        self.estado == QuoteStatus::TrabajoContratado
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuoteDraft {
        QuoteDraft {
            direccion_envio: "Calle 12 #4-56, barrio Centro".to_string(),
            departamento: "Norte de Santander".to_string(),
            comentarios_adicionales: None,
        }
    }

    fn items() -> Vec<QuoteItem> {
        vec![QuoteItem {
            producto_id: ProductId::new(),
            cantidad: 2,
        }]
    }

    #[test]
    fn submit_starts_pending() {
        let quote =
            QuoteRequest::submit(QuoteId::new(), UserId::new(), draft(), items(), Utc::now())
                .unwrap();
        assert_eq!(quote.estado, QuoteStatus::CotizacionPendiente);
        assert!(quote.fecha_actualizacion.is_none());
    }

    #[test]
    fn submit_requires_address_department_and_items() {
        let mut d = draft();
        d.direccion_envio = " ".to_string();
        assert!(QuoteRequest::submit(QuoteId::new(), UserId::new(), d, items(), Utc::now()).is_err());

        let mut d = draft();
        d.departamento = String::new();
        assert!(QuoteRequest::submit(QuoteId::new(), UserId::new(), d, items(), Utc::now()).is_err());

        assert!(
            QuoteRequest::submit(QuoteId::new(), UserId::new(), draft(), vec![], Utc::now())
                .is_err()
        );
    }

    #[test]
    fn zero_quantity_items_are_rejected() {
        let bad = vec![QuoteItem {
            producto_id: ProductId::new(),
            cantidad: 0,
        }];
        assert!(QuoteRequest::submit(QuoteId::new(), UserId::new(), draft(), bad, Utc::now()).is_err());
    }

    #[test]
    fn status_moves_forward_only() {
        let mut quote =
            QuoteRequest::submit(QuoteId::new(), UserId::new(), draft(), items(), Utc::now())
                .unwrap();

        quote.set_status(QuoteStatus::CotizacionHecha, Utc::now()).unwrap();
        assert!(quote
            .set_status(QuoteStatus::CotizacionPendiente, Utc::now())
            .is_err());

        quote
            .set_status(QuoteStatus::TrabajoContratado, Utc::now())
            .unwrap();
        assert!(quote.is_contracted());
    }

    #[test]
    fn contracted_is_terminal() {
        let mut quote =
            QuoteRequest::submit(QuoteId::new(), UserId::new(), draft(), items(), Utc::now())
                .unwrap();
        quote
            .set_status(QuoteStatus::TrabajoContratado, Utc::now())
            .unwrap();

        for next in [
            QuoteStatus::CotizacionPendiente,
            QuoteStatus::CotizacionHecha,
            QuoteStatus::TrabajoContratado,
        ] {
            assert!(quote.set_status(next, Utc::now()).is_err());
        }
    }

    #[test]
    fn pending_may_skip_straight_to_contracted() {
        let mut quote =
            QuoteRequest::submit(QuoteId::new(), UserId::new(), draft(), items(), Utc::now())
                .unwrap();
        assert!(quote
            .set_status(QuoteStatus::TrabajoContratado, Utc::now())
            .is_ok());
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [
            QuoteStatus::CotizacionPendiente,
            QuoteStatus::CotizacionHecha,
            QuoteStatus::TrabajoContratado,
        ] {
            assert_eq!(QuoteStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(QuoteStatus::parse("archivada"), None);
    }
}
