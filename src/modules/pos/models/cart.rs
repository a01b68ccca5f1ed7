// The register cart: in-memory line items for the sale being rung up.
//
// Nothing here touches persisted stock; quantities are validated against the
// stock snapshot the caller provides, and the authoritative check happens
// again inside the sale-recording transaction. Totals are derived on demand,
// never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::currency;
use crate::core::{AppError, Result};
use crate::modules::catalog::models::Product;

/// One product line in the register cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    /// Code, name and price frozen when the line was added
    pub product_code: String,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl CartItem {
    fn from_product(product: &Product, quantity: i32) -> Self {
        CartItem {
            product_id: product.id.clone(),
            product_code: product.code.clone(),
            product_name: product.name.clone(),
            unit_price: product.unit_price,
            quantity,
        }
    }

    /// Line total: quantity × unit price
    pub fn line_total(&self) -> Decimal {
        currency::round_kz(self.unit_price * Decimal::from(self.quantity))
    }
}

/// The in-progress sale for one register
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Add a product, merging into an existing line. The combined quantity is
    /// capped by the product's current stock.
    pub fn add_item(&mut self, product: &Product, quantity: i32) -> Result<()> {
        if quantity <= 0 {
            return Err(AppError::validation("Quantity must be positive"));
        }

        let current = self
            .items
            .iter()
            .find(|i| i.product_id == product.id)
            .map(|i| i.quantity)
            .unwrap_or(0);

        let requested = current + quantity;
        if requested > product.stock_quantity {
            return Err(AppError::InsufficientStock {
                product: product.code.clone(),
                requested: requested as u32,
                available: product.stock_quantity.max(0) as u32,
            });
        }

        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => item.quantity = requested,
            None => self.items.push(CartItem::from_product(product, quantity)),
        }

        Ok(())
    }

    /// Set a line's quantity. Zero or less removes the line.
    pub fn set_quantity(&mut self, product: &Product, quantity: i32) -> Result<()> {
        if quantity <= 0 {
            return self.remove_item(&product.id);
        }

        if quantity > product.stock_quantity {
            return Err(AppError::InsufficientStock {
                product: product.code.clone(),
                requested: quantity as u32,
                available: product.stock_quantity.max(0) as u32,
            });
        }

        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(AppError::not_found(format!(
                "Product '{}' is not in the cart",
                product.code
            ))),
        }
    }

    pub fn remove_item(&mut self, product_id: &str) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == before {
            return Err(AppError::not_found(format!(
                "Product '{}' is not in the cart",
                product_id
            )));
        }

        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals, before tax
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// IVA at the fixed 14% rate
    pub fn tax(&self) -> Decimal {
        currency::iva_amount(self.subtotal())
    }

    pub fn total(&self) -> Decimal {
        self.subtotal() + self.tax()
    }
}

/// Cart snapshot for API responses
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            items: cart.items.clone(),
            subtotal: cart.subtotal(),
            tax: cart.tax(),
            total: cart.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, price: i64, stock: i32) -> Product {
        Product {
            id: id.to_string(),
            code: format!("P-{}", id),
            name: format!("Product {}", id),
            unit_price: Decimal::from(price),
            stock_quantity: stock,
            min_stock: 0,
            requires_prescription: false,
            category_id: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_item_merges_lines() {
        let mut cart = Cart::new();
        let p = product("1", 450, 10);

        cart.add_item(&p, 2).unwrap();
        cart.add_item(&p, 3).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.subtotal(), Decimal::from(2250));
    }

    #[test]
    fn test_add_item_respects_stock() {
        let mut cart = Cart::new();
        let p = product("1", 450, 4);

        cart.add_item(&p, 3).unwrap();
        let err = cart.add_item(&p, 2).unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock { .. }));
        // Rejected add left the cart untouched
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        let p = product("1", 450, 10);

        cart.add_item(&p, 2).unwrap();
        cart.set_quantity(&p, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_validates_stock() {
        let mut cart = Cart::new();
        let p = product("1", 450, 5);

        cart.add_item(&p, 2).unwrap();
        assert!(cart.set_quantity(&p, 6).is_err());
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_tax_and_total() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 7300, 10), 1).unwrap();

        // 7300 × 0.14 = 1022
        assert_eq!(cart.subtotal(), Decimal::from(7300));
        assert_eq!(cart.tax(), Decimal::from(1022));
        assert_eq!(cart.total(), Decimal::from(8322));
    }

    #[test]
    fn test_remove_unknown_item() {
        let mut cart = Cart::new();
        assert!(cart.remove_item("missing").is_err());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100, 10), 1).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }
}
