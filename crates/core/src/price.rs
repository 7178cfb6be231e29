//! Monetary amounts.
//!
//! Prices are stored in the smallest currency unit (cents) to keep cart and
//! coupon arithmetic exact. Display formatting renders the major unit.

use serde::{Deserialize, Serialize};

/// An amount of money in cents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply by a line quantity (saturating; carts never hold amounts near
    /// the u64 range in practice).
    pub fn times(&self, quantity: u32) -> Price {
        Price(self.0.saturating_mul(u64::from(quantity)))
    }

    pub fn add(&self, other: Price) -> Price {
        Price(self.0.saturating_add(other.0))
    }

    /// Subtract, flooring at zero. Discounts never drive a total negative.
    pub fn minus(&self, other: Price) -> Price {
        Price(self.0.saturating_sub(other.0))
    }

    /// Integer percentage of this amount, truncated toward zero.
    pub fn percent(&self, pct: u32) -> Price {
        Price(self.0.saturating_mul(u64::from(pct)) / 100)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}
