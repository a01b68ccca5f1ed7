// In-memory cart state, one cart per register.
//
// Carts are deliberately not persisted: an abandoned cart at shift end is
// worthless, while till sessions and sales always live server-side. The map
// is behind a Mutex because handlers run concurrently; operations hold the
// lock only for the closure body.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::modules::pos::models::Cart;

#[derive(Debug, Default)]
pub struct CartStore {
    carts: Mutex<HashMap<String, Cart>>,
}

impl CartStore {
    pub fn new() -> Self {
        CartStore {
            carts: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` with mutable access to the register's cart, creating an empty
    /// cart on first touch.
    pub fn with_cart_mut<F, R>(&self, register_id: &str, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut carts = self.carts.lock().expect("cart store mutex poisoned");
        let cart = carts.entry(register_id.to_string()).or_default();
        f(cart)
    }

    /// Run `f` with read access to the register's cart
    pub fn with_cart<F, R>(&self, register_id: &str, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let mut carts = self.carts.lock().expect("cart store mutex poisoned");
        let cart = carts.entry(register_id.to_string()).or_default();
        f(cart)
    }

    /// Drop the register's cart entirely (after a finalized sale)
    pub fn take(&self, register_id: &str) -> Cart {
        let mut carts = self.carts.lock().expect("cart store mutex poisoned");
        carts.remove(register_id).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::models::Product;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product() -> Product {
        Product {
            id: "p-1".to_string(),
            code: "PARA-500".to_string(),
            name: "Paracetamol 500mg".to_string(),
            unit_price: Decimal::from(450),
            stock_quantity: 10,
            min_stock: 0,
            requires_prescription: false,
            category_id: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_carts_are_per_register() {
        let store = CartStore::new();
        let p = product();

        store
            .with_cart_mut("caixa-1", |cart| cart.add_item(&p, 2))
            .unwrap();

        assert_eq!(store.with_cart("caixa-1", |c| c.items.len()), 1);
        assert_eq!(store.with_cart("caixa-2", |c| c.items.len()), 0);
    }

    #[test]
    fn test_take_clears_the_register() {
        let store = CartStore::new();
        let p = product();

        store
            .with_cart_mut("caixa-1", |cart| cart.add_item(&p, 1))
            .unwrap();

        let taken = store.take("caixa-1");
        assert_eq!(taken.items.len(), 1);
        assert!(store.with_cart("caixa-1", |c| c.is_empty()));
    }
}
