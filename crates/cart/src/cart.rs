use serde::{Deserialize, Serialize};

use brasa_catalog::Product;
use brasa_core::{Price, ProductId};
use brasa_coupons::{Coupon, DiscountKind};

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub cantidad: u32,
}

/// A discount code accepted for this cart.
///
/// The kind and value are snapshotted at application time; the coupon's use
/// count is consumed when the quote is submitted, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub codigo: String,
    pub tipo_descuento: DiscountKind,
    pub valor: u64,
}

impl AppliedDiscount {
    pub fn from_coupon(coupon: &Coupon) -> Self {
        Self {
            codigo: coupon.codigo.clone(),
            tipo_descuento: coupon.tipo_descuento,
            valor: coupon.valor,
        }
    }

    fn amount_on(&self, subtotal: Price) -> Price {
        match self.tipo_descuento {
            DiscountKind::Porcentaje => subtotal.percent(self.valor as u32),
            DiscountKind::Fijo => Price::from_cents(self.valor).min(subtotal),
        }
    }
}

/// Computed cart summary, as shown next to the line list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub total_items: u32,
    pub priced_lines: usize,
    pub quote_only_lines: usize,
    pub subtotal: Price,
    pub descuento: Price,
    pub total: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    pub discount: Option<AppliedDiscount>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `cantidad` units, merging with an existing line for the same
    /// product.
    pub fn add(&mut self, product: Product, cantidad: u32) {
        if cantidad == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.cantidad = line.cantidad.saturating_add(cantidad);
            // Refresh the snapshot; the catalog copy is authoritative.
            line.product = product;
        } else {
            self.lines.push(CartLine { product, cantidad });
        }
    }

    /// Set a line's quantity. Anything below 1 removes the line, matching
    /// the storefront's minus-button behavior.
    pub fn update_quantity(&mut self, product_id: ProductId, cantidad: u32) {
        if cantidad < 1 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.cantidad = cantidad;
        }
    }

    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = None;
    }

    pub fn apply_discount(&mut self, discount: AppliedDiscount) {
        self.discount = Some(discount);
    }

    pub fn remove_discount(&mut self) {
        self.discount = None;
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.cantidad).sum()
    }

    pub fn has_quote_only_items(&self) -> bool {
        self.lines.iter().any(|l| l.product.is_quote_only())
    }

    /// Subtotal over priced lines; quote-only lines contribute nothing.
    pub fn subtotal(&self) -> Price {
        self.lines
            .iter()
            .filter(|l| !l.product.is_quote_only())
            .filter_map(|l| l.product.precio.map(|p| p.times(l.cantidad)))
            .fold(Price::ZERO, |acc, p| acc.add(p))
    }

    pub fn totals(&self) -> CartTotals {
        let subtotal = self.subtotal();
        let descuento = self
            .discount
            .as_ref()
            .map(|d| d.amount_on(subtotal))
            .unwrap_or(Price::ZERO);

        CartTotals {
            total_items: self.total_items(),
            priced_lines: self
                .lines
                .iter()
                .filter(|l| !l.product.is_quote_only())
                .count(),
            quote_only_lines: self
                .lines
                .iter()
                .filter(|l| l.product.is_quote_only())
                .count(),
            subtotal,
            descuento,
            total: subtotal.minus(descuento),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brasa_catalog::ProductDraft;
    use brasa_core::UserId;
    use chrono::Utc;

    fn priced_product(nombre: &str, cents: u64) -> Product {
        Product::create(
            ProductId::new(),
            ProductDraft {
                nombre: nombre.to_string(),
                codigo_referencia: format!("AE-{cents}"),
                descripcion: None,
                materiales: None,
                tamano: None,
                capacidad: None,
                foto_url: None,
                precio: Some(Price::from_cents(cents)),
                preguntar_cotizacion: false,
            },
            UserId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    fn quote_only_product(nombre: &str) -> Product {
        Product::create(
            ProductId::new(),
            ProductDraft {
                nombre: nombre.to_string(),
                codigo_referencia: "AE-COT".to_string(),
                descripcion: None,
                materiales: None,
                tamano: None,
                capacidad: None,
                foto_url: None,
                precio: None,
                preguntar_cotizacion: true,
            },
            UserId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn adding_same_product_merges_lines() {
        let mut cart = Cart::new();
        let product = priced_product("Estufa", 100_00);

        cart.add(product.clone(), 1);
        cart.add(product, 2);

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn quantity_below_one_removes_the_line() {
        let mut cart = Cart::new();
        let product = priced_product("Estufa", 100_00);
        let id = product.id;
        cart.add(product, 2);

        cart.update_quantity(id, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn subtotal_skips_quote_only_lines() {
        let mut cart = Cart::new();
        cart.add(priced_product("Estufa", 150_000_00), 2);
        cart.add(quote_only_product("Horno a medida"), 1);

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Price::from_cents(300_000_00));
        assert_eq!(totals.priced_lines, 1);
        assert_eq!(totals.quote_only_lines, 1);
        assert_eq!(totals.total_items, 3);
        assert!(cart.has_quote_only_items());
    }

    #[test]
    fn percentage_discount_reduces_total() {
        let mut cart = Cart::new();
        cart.add(priced_product("Estufa", 200_000_00), 1);
        cart.apply_discount(AppliedDiscount {
            codigo: "ARTE10".to_string(),
            tipo_descuento: DiscountKind::Porcentaje,
            valor: 10,
        });

        let totals = cart.totals();
        assert_eq!(totals.descuento, Price::from_cents(20_000_00));
        assert_eq!(totals.total, Price::from_cents(180_000_00));
    }

    #[test]
    fn removing_discount_restores_full_subtotal() {
        let mut cart = Cart::new();
        cart.add(priced_product("Estufa", 50_000_00), 1);
        cart.apply_discount(AppliedDiscount {
            codigo: "PROMO15".to_string(),
            tipo_descuento: DiscountKind::Porcentaje,
            valor: 15,
        });
        cart.remove_discount();

        let totals = cart.totals();
        assert_eq!(totals.descuento, Price::ZERO);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn fixed_discount_never_drives_total_negative() {
        let mut cart = Cart::new();
        cart.add(priced_product("Parrilla", 30_000), 1);
        cart.apply_discount(AppliedDiscount {
            codigo: "FIJO".to_string(),
            tipo_descuento: DiscountKind::Fijo,
            valor: 1_000_000,
        });

        let totals = cart.totals();
        assert_eq!(totals.descuento, totals.subtotal);
        assert_eq!(totals.total, Price::ZERO);
    }

    #[test]
    fn clear_drops_lines_and_discount() {
        let mut cart = Cart::new();
        cart.add(priced_product("Estufa", 100_00), 1);
        cart.apply_discount(AppliedDiscount {
            codigo: "ARTE10".to_string(),
            tipo_descuento: DiscountKind::Porcentaje,
            valor: 10,
        });

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.discount.is_none());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Total is always subtotal minus discount and never underflows.
            #[test]
            fn totals_are_consistent(
                cents in proptest::collection::vec(1u64..1_000_000, 0..6),
                quantities in proptest::collection::vec(1u32..10, 0..6),
                pct in 0u64..100,
            ) {
                let mut cart = Cart::new();
                for (c, q) in cents.iter().zip(quantities.iter()) {
                    cart.add(priced_product("P", *c), *q);
                }
                if pct > 0 {
                    cart.apply_discount(AppliedDiscount {
                        codigo: "X".to_string(),
                        tipo_descuento: DiscountKind::Porcentaje,
                        valor: pct,
                    });
                }

                let totals = cart.totals();
                prop_assert!(totals.descuento <= totals.subtotal);
                prop_assert_eq!(totals.total, totals.subtotal.minus(totals.descuento));
            }
        }
    }
}
