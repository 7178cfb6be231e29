use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use brasa_core::{CouponId, DomainError, DomainResult, Price, UserId};

/// How a coupon's `valor` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// `valor` is a percentage of the subtotal (1–100).
    Porcentaje,
    /// `valor` is a fixed amount in cents.
    Fijo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    #[default]
    Activo,
    Inactivo,
}

/// Why a code cannot be redeemed right now.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CouponError {
    #[error("coupon is inactive")]
    Inactive,

    #[error("coupon is not valid yet")]
    NotYetValid,

    #[error("coupon has expired")]
    Expired,

    #[error("coupon has no uses remaining")]
    Exhausted,
}

/// A discount coupon record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    /// Stored uppercased; lookups normalize the same way.
    pub codigo: String,
    pub descripcion: Option<String>,
    pub tipo_descuento: DiscountKind,
    pub valor: u64,
    pub fecha_inicio: DateTime<Utc>,
    pub fecha_vencimiento: DateTime<Utc>,
    pub cantidad_maxima_usos: u32,
    pub cantidad_usos_actuales: u32,
    pub estado: CouponStatus,
    pub creado_por: UserId,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: Option<DateTime<Utc>>,
}

/// Admin form fields for create/edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponDraft {
    pub codigo: String,
    pub descripcion: Option<String>,
    pub tipo_descuento: DiscountKind,
    pub valor: u64,
    pub fecha_inicio: DateTime<Utc>,
    pub fecha_vencimiento: DateTime<Utc>,
    pub cantidad_maxima_usos: u32,
    pub estado: CouponStatus,
}

impl CouponDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.codigo.trim().is_empty() {
            return Err(DomainError::validation("el código es requerido"));
        }
        if self.valor == 0 {
            return Err(DomainError::validation("el valor debe ser mayor a 0"));
        }
        if self.tipo_descuento == DiscountKind::Porcentaje && self.valor > 100 {
            return Err(DomainError::validation(
                "un descuento porcentual no puede superar 100",
            ));
        }
        if self.fecha_vencimiento <= self.fecha_inicio {
            return Err(DomainError::validation(
                "la fecha de vencimiento debe ser posterior a la de inicio",
            ));
        }
        if self.cantidad_maxima_usos == 0 {
            return Err(DomainError::validation(
                "la cantidad máxima de usos debe ser al menos 1",
            ));
        }
        Ok(())
    }

    pub fn normalized_code(&self) -> String {
        self.codigo.trim().to_uppercase()
    }
}

impl Coupon {
    pub fn create(
        id: CouponId,
        draft: CouponDraft,
        creado_por: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Coupon> {
        draft.validate()?;
        Ok(Coupon {
            id,
            codigo: draft.normalized_code(),
            descripcion: draft.descripcion,
            tipo_descuento: draft.tipo_descuento,
            valor: draft.valor,
            fecha_inicio: draft.fecha_inicio,
            fecha_vencimiento: draft.fecha_vencimiento,
            cantidad_maxima_usos: draft.cantidad_maxima_usos,
            cantidad_usos_actuales: 0,
            estado: draft.estado,
            creado_por,
            fecha_creacion: now,
            fecha_actualizacion: None,
        })
    }

    pub fn apply_update(&mut self, draft: CouponDraft, now: DateTime<Utc>) -> DomainResult<()> {
        draft.validate()?;
        self.codigo = draft.normalized_code();
        self.descripcion = draft.descripcion;
        self.tipo_descuento = draft.tipo_descuento;
        self.valor = draft.valor;
        self.fecha_inicio = draft.fecha_inicio;
        self.fecha_vencimiento = draft.fecha_vencimiento;
        self.cantidad_maxima_usos = draft.cantidad_maxima_usos;
        self.estado = draft.estado;
        self.fecha_actualizacion = Some(now);
        Ok(())
    }

    pub fn toggle_status(&mut self, now: DateTime<Utc>) {
        self.estado = match self.estado {
            CouponStatus::Activo => CouponStatus::Inactivo,
            CouponStatus::Inactivo => CouponStatus::Activo,
        };
        self.fecha_actualizacion = Some(now);
    }

    pub fn uses_remaining(&self) -> u32 {
        self.cantidad_maxima_usos
            .saturating_sub(self.cantidad_usos_actuales)
    }

    /// Can this coupon be redeemed at `now`?
    pub fn validate_for_redeem(&self, now: DateTime<Utc>) -> Result<(), CouponError> {
        if self.estado != CouponStatus::Activo {
            return Err(CouponError::Inactive);
        }
        if now < self.fecha_inicio {
            return Err(CouponError::NotYetValid);
        }
        if now >= self.fecha_vencimiento {
            return Err(CouponError::Expired);
        }
        if self.uses_remaining() == 0 {
            return Err(CouponError::Exhausted);
        }
        Ok(())
    }

    /// Consume one use. Validates first; the use count only moves on success.
    pub fn redeem(&mut self, now: DateTime<Utc>) -> Result<(), CouponError> {
        self.validate_for_redeem(now)?;
        self.cantidad_usos_actuales += 1;
        self.fecha_actualizacion = Some(now);
        Ok(())
    }

    /// The discount this coupon takes off a subtotal. Never exceeds the
    /// subtotal itself.
    pub fn discount_on(&self, subtotal: Price) -> Price {
        match self.tipo_descuento {
            DiscountKind::Porcentaje => subtotal.percent(self.valor as u32),
            DiscountKind::Fijo => Price::from_cents(self.valor).min(subtotal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft(now: DateTime<Utc>) -> CouponDraft {
        CouponDraft {
            codigo: "arte10".to_string(),
            descripcion: Some("Descuento de lanzamiento".to_string()),
            tipo_descuento: DiscountKind::Porcentaje,
            valor: 10,
            fecha_inicio: now - Duration::days(1),
            fecha_vencimiento: now + Duration::days(30),
            cantidad_maxima_usos: 3,
            estado: CouponStatus::Activo,
        }
    }

    fn coupon(now: DateTime<Utc>) -> Coupon {
        Coupon::create(CouponId::new(), draft(now), UserId::new(), now).unwrap()
    }

    #[test]
    fn codes_are_stored_uppercased() {
        let now = Utc::now();
        assert_eq!(coupon(now).codigo, "ARTE10");
    }

    #[test]
    fn percentage_over_100_is_rejected() {
        let now = Utc::now();
        let mut d = draft(now);
        d.valor = 120;
        assert!(d.validate().is_err());

        d.tipo_descuento = DiscountKind::Fijo;
        assert!(d.validate().is_ok(), "fixed amounts have no 100 cap");
    }

    #[test]
    fn expiry_must_follow_start() {
        let now = Utc::now();
        let mut d = draft(now);
        d.fecha_vencimiento = d.fecha_inicio;
        assert!(d.validate().is_err());
    }

    #[test]
    fn redeem_window_is_enforced() {
        let now = Utc::now();
        let c = coupon(now);

        assert!(c.validate_for_redeem(now).is_ok());
        assert_eq!(
            c.validate_for_redeem(now - Duration::days(2)),
            Err(CouponError::NotYetValid)
        );
        assert_eq!(
            c.validate_for_redeem(now + Duration::days(31)),
            Err(CouponError::Expired)
        );
    }

    #[test]
    fn inactive_coupons_never_redeem() {
        let now = Utc::now();
        let mut c = coupon(now);
        c.toggle_status(now);
        assert_eq!(c.validate_for_redeem(now), Err(CouponError::Inactive));
    }

    #[test]
    fn redemption_exhausts_after_max_uses() {
        let now = Utc::now();
        let mut c = coupon(now);

        for _ in 0..3 {
            c.redeem(now).unwrap();
        }
        assert_eq!(c.uses_remaining(), 0);
        assert_eq!(c.redeem(now), Err(CouponError::Exhausted));
        assert_eq!(c.cantidad_usos_actuales, 3, "failed redeem must not count");
    }

    #[test]
    fn percentage_discount_applies_to_subtotal() {
        let now = Utc::now();
        let c = coupon(now);
        assert_eq!(
            c.discount_on(Price::from_cents(200_000)),
            Price::from_cents(20_000)
        );
    }

    #[test]
    fn fixed_discount_is_clamped_to_subtotal() {
        let now = Utc::now();
        let mut d = draft(now);
        d.tipo_descuento = DiscountKind::Fijo;
        d.valor = 50_000;
        let c = Coupon::create(CouponId::new(), d, UserId::new(), now).unwrap();

        assert_eq!(
            c.discount_on(Price::from_cents(80_000)),
            Price::from_cents(50_000)
        );
        assert_eq!(
            c.discount_on(Price::from_cents(30_000)),
            Price::from_cents(30_000)
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The discount never exceeds the subtotal, for either kind.
            #[test]
            fn discount_never_exceeds_subtotal(
                subtotal_cents in 0u64..100_000_000,
                valor in 1u64..1_000_000,
                fixed in any::<bool>(),
            ) {
                let now = Utc::now();
                let kind = if fixed { DiscountKind::Fijo } else { DiscountKind::Porcentaje };
                let valor = if fixed { valor } else { valor % 100 + 1 };
                let d = CouponDraft {
                    codigo: "PROMO".to_string(),
                    descripcion: None,
                    tipo_descuento: kind,
                    valor,
                    fecha_inicio: now,
                    fecha_vencimiento: now + Duration::days(1),
                    cantidad_maxima_usos: 1,
                    estado: CouponStatus::Activo,
                };
                let c = Coupon::create(CouponId::new(), d, UserId::new(), now).unwrap();
                let subtotal = Price::from_cents(subtotal_cents);
                prop_assert!(c.discount_on(subtotal) <= subtotal);
            }
        }
    }
}
