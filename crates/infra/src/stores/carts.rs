use brasa_cart::{Cart, CartStorage};
use brasa_core::UserId;

use crate::memory::Table;

/// Per-user cart storage. Carts are ephemeral working state, so they do not
/// publish to the change feed.
pub struct InMemoryCartStore {
    table: Table<UserId, Cart>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryCartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStorage for InMemoryCartStore {
    fn load(&self, user_id: UserId) -> Cart {
        self.table.get(&user_id).unwrap_or_default()
    }

    fn save(&self, user_id: UserId, cart: &Cart) {
        self.table.upsert(user_id, cart.clone());
    }

    fn clear(&self, user_id: UserId) {
        self.table.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brasa_catalog::{Product, ProductDraft};
    use brasa_core::{Price, ProductId};
    use chrono::Utc;

    #[test]
    fn missing_cart_loads_empty() {
        let store = InMemoryCartStore::new();
        assert!(store.load(UserId::new()).is_empty());
    }

    #[test]
    fn save_and_clear_roundtrip() {
        let store = InMemoryCartStore::new();
        let user_id = UserId::new();

        let product = Product::create(
            ProductId::new(),
            ProductDraft {
                nombre: "Estufa".to_string(),
                codigo_referencia: "AE-002".to_string(),
                descripcion: None,
                materiales: None,
                tamano: None,
                capacidad: None,
                foto_url: None,
                precio: Some(Price::from_cents(99_000_00)),
                preguntar_cotizacion: false,
            },
            UserId::new(),
            Utc::now(),
        )
        .unwrap();

        let mut cart = Cart::new();
        cart.add(product, 2);
        store.save(user_id, &cart);

        assert_eq!(store.load(user_id).total_items(), 2);

        store.clear(user_id);
        assert!(store.load(user_id).is_empty());
    }
}
