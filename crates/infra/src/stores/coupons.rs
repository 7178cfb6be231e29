use brasa_core::{CouponId, DomainError, DomainResult};
use brasa_coupons::{Coupon, CouponRepository};

use crate::change_feed::{ChangeFeed, ChangeOp};
use crate::memory::Table;

pub struct InMemoryCouponRepository {
    table: Table<CouponId, Coupon>,
    feed: ChangeFeed,
}

impl InMemoryCouponRepository {
    pub fn new(feed: ChangeFeed) -> Self {
        Self {
            table: Table::new(),
            feed,
        }
    }
}

impl CouponRepository for InMemoryCouponRepository {
    fn insert(&self, coupon: Coupon) -> DomainResult<()> {
        if self.find_by_code(&coupon.codigo).is_some() {
            return Err(DomainError::invariant("el código de cupón ya existe"));
        }
        let id = coupon.id;
        self.table.upsert(id, coupon);
        self.feed.publish("cupones_descuento", ChangeOp::Created, id);
        Ok(())
    }

    fn update(&self, coupon: Coupon) -> DomainResult<()> {
        if !self.table.contains(&coupon.id) {
            return Err(DomainError::NotFound);
        }
        // Renaming onto another coupon's code is a conflict.
        if let Some(other) = self.find_by_code(&coupon.codigo) {
            if other.id != coupon.id {
                return Err(DomainError::invariant("el código de cupón ya existe"));
            }
        }
        let id = coupon.id;
        self.table.upsert(id, coupon);
        self.feed.publish("cupones_descuento", ChangeOp::Updated, id);
        Ok(())
    }

    fn delete(&self, id: &CouponId) -> DomainResult<()> {
        self.table.remove(id).ok_or(DomainError::NotFound)?;
        self.feed.publish("cupones_descuento", ChangeOp::Deleted, id);
        Ok(())
    }

    fn get(&self, id: &CouponId) -> Option<Coupon> {
        self.table.get(id)
    }

    fn find_by_code(&self, codigo: &str) -> Option<Coupon> {
        let normalized = codigo.trim().to_uppercase();
        self.table.find(|c| c.codigo == normalized)
    }

    fn list_newest_first(&self) -> Vec<Coupon> {
        let mut coupons = self.table.values();
        coupons.sort_by(|a, b| b.fecha_creacion.cmp(&a.fecha_creacion));
        coupons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brasa_core::UserId;
    use brasa_coupons::{CouponDraft, CouponStatus, DiscountKind};
    use chrono::{Duration, Utc};

    fn coupon(codigo: &str) -> Coupon {
        let now = Utc::now();
        Coupon::create(
            CouponId::new(),
            CouponDraft {
                codigo: codigo.to_string(),
                descripcion: None,
                tipo_descuento: DiscountKind::Porcentaje,
                valor: 10,
                fecha_inicio: now,
                fecha_vencimiento: now + Duration::days(30),
                cantidad_maxima_usos: 10,
                estado: CouponStatus::Activo,
            },
            UserId::new(),
            now,
        )
        .unwrap()
    }

    #[test]
    fn code_lookup_is_case_insensitive() {
        let repo = InMemoryCouponRepository::new(ChangeFeed::default());
        repo.insert(coupon("arte10")).unwrap();

        assert!(repo.find_by_code("ARTE10").is_some());
        assert!(repo.find_by_code(" arte10 ").is_some());
        assert!(repo.find_by_code("PROMO15").is_none());
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let repo = InMemoryCouponRepository::new(ChangeFeed::default());
        repo.insert(coupon("ARTE10")).unwrap();
        assert!(repo.insert(coupon("arte10")).is_err());
    }

    #[test]
    fn update_may_keep_its_own_code() {
        let repo = InMemoryCouponRepository::new(ChangeFeed::default());
        let mut c = coupon("ARTE10");
        repo.insert(c.clone()).unwrap();

        c.valor = 20;
        assert!(repo.update(c).is_ok());
    }
}
