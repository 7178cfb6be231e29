use brasa_core::{CouponId, DomainResult};

use crate::Coupon;

/// Coupon persistence contract. Lookups by code expect the normalized
/// (uppercased) form.
pub trait CouponRepository: Send + Sync {
    fn insert(&self, coupon: Coupon) -> DomainResult<()>;

    fn update(&self, coupon: Coupon) -> DomainResult<()>;

    fn delete(&self, id: &CouponId) -> DomainResult<()>;

    fn get(&self, id: &CouponId) -> Option<Coupon>;

    fn find_by_code(&self, codigo: &str) -> Option<Coupon>;

    fn list_newest_first(&self) -> Vec<Coupon>;
}
