//! `brasa-cart` — shopping cart arithmetic and storage contract.
//!
//! Carts hold product snapshots with quantities plus at most one applied
//! discount code. Quote-only products ride along for the quote request but
//! never count toward the subtotal.

pub mod cart;
pub mod storage;

pub use cart::{AppliedDiscount, Cart, CartLine, CartTotals};
pub use storage::CartStorage;
