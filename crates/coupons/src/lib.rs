//! `brasa-coupons` — discount coupons.
//!
//! Coupons are created from the admin back-office and redeemed against cart
//! subtotals. Validity is time-boxed and use-limited; every rejection reason
//! is a distinct error so the storefront can explain itself.

pub mod coupon;
pub mod repository;

pub use coupon::{Coupon, CouponDraft, CouponError, CouponStatus, DiscountKind};
pub use repository::CouponRepository;
