use brasa_core::UserId;

use crate::Cart;

/// Per-user cart persistence.
///
/// Browser clients keep the cart in local storage; server deployments key it
/// by user instead. A missing cart loads as empty.
pub trait CartStorage: Send + Sync {
    fn load(&self, user_id: UserId) -> Cart;

    fn save(&self, user_id: UserId, cart: &Cart);

    fn clear(&self, user_id: UserId);
}
