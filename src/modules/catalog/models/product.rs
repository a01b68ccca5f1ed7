// Product and category models.
//
// A product is anything the pharmacy shelves: medicines (optionally
// prescription-bound), parapharmacy and consumables. Stock is tracked in whole
// units and may never go negative; the decrement happens only when a sale is
// recorded, guarded at the storage layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::currency;
use crate::core::{AppError, Result};

/// A shelvable product
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Unique product ID (UUID)
    pub id: String,

    /// Business code printed on labels and receipts (unique)
    pub code: String,

    pub name: String,

    /// Unit price in Kwanza
    pub unit_price: Decimal,

    /// Units currently on the shelf
    pub stock_quantity: i32,

    /// Reorder threshold for the low-stock report
    pub min_stock: i32,

    /// Dispensing requires a prescription record at the counter
    pub requires_prescription: bool,

    pub category_id: Option<String>,

    /// Soft delete flag; inactive products stay referenced by old sales
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a validated product from a creation request
    pub fn new(request: CreateProductRequest) -> Result<Self> {
        validate_code(&request.code)?;
        validate_name(&request.name)?;
        validate_price(request.unit_price)?;
        validate_stock(request.stock_quantity, "stock_quantity")?;
        validate_stock(request.min_stock, "min_stock")?;

        let now = Utc::now();

        Ok(Product {
            id: Uuid::new_v4().to_string(),
            code: request.code.trim().to_string(),
            name: request.name.trim().to_string(),
            unit_price: currency::round_kz(request.unit_price),
            stock_quantity: request.stock_quantity,
            min_stock: request.min_stock,
            requires_prescription: request.requires_prescription,
            category_id: request.category_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// True when the shelf holds at least `quantity` units
    pub fn can_supply(&self, quantity: i32) -> bool {
        quantity > 0 && self.stock_quantity >= quantity
    }

    /// True when the product should appear on the low-stock report
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock
    }
}

/// A product grouping (analgesics, antibiotics, dermocosmetics, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub code: String,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default)]
    pub min_stock: i32,
    #[serde(default)]
    pub requires_prescription: bool,
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub unit_price: Option<Decimal>,
    pub min_stock: Option<i32>,
    pub requires_prescription: Option<bool>,
    pub category_id: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.unit_price {
            validate_price(price)?;
        }
        if let Some(min_stock) = self.min_stock {
            validate_stock(min_stock, "min_stock")?;
        }
        Ok(())
    }
}

/// Manual stock correction: goods received, breakage, expiry write-off
#[derive(Debug, Clone, Deserialize)]
pub struct StockAdjustmentRequest {
    /// Positive receives stock, negative writes it off
    pub delta: i32,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

fn validate_code(code: &str) -> Result<()> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::validation("Product code cannot be empty"));
    }
    if code.len() > 32 {
        return Err(AppError::validation(
            "Product code cannot exceed 32 characters",
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Product name cannot be empty"));
    }
    if name.len() > 200 {
        return Err(AppError::validation(
            "Product name cannot exceed 200 characters",
        ));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<()> {
    currency::validate_amount(price)
        .map_err(|e| AppError::validation(format!("unit_price: {}", e)))?;
    if price == Decimal::ZERO {
        return Err(AppError::validation("unit_price must be greater than zero"));
    }
    Ok(())
}

fn validate_stock(value: i32, field: &str) -> Result<()> {
    if value < 0 {
        return Err(AppError::validation(format!("{} cannot be negative", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateProductRequest {
        CreateProductRequest {
            code: "PARA-500".to_string(),
            name: "Paracetamol 500mg".to_string(),
            unit_price: Decimal::from(450),
            stock_quantity: 120,
            min_stock: 20,
            requires_prescription: false,
            category_id: None,
        }
    }

    #[test]
    fn test_product_creation_valid() {
        let product = Product::new(request()).unwrap();
        assert_eq!(product.code, "PARA-500");
        assert!(product.is_active);
        assert!(product.can_supply(120));
        assert!(!product.can_supply(121));
        assert!(!product.is_low_stock());
    }

    #[test]
    fn test_product_rejects_zero_price() {
        let mut req = request();
        req.unit_price = Decimal::ZERO;
        assert!(Product::new(req).is_err());
    }

    #[test]
    fn test_product_rejects_negative_stock() {
        let mut req = request();
        req.stock_quantity = -1;
        assert!(Product::new(req).is_err());
    }

    #[test]
    fn test_product_rejects_blank_code() {
        let mut req = request();
        req.code = "   ".to_string();
        assert!(Product::new(req).is_err());
    }

    #[test]
    fn test_low_stock_boundary() {
        let mut product = Product::new(request()).unwrap();
        product.stock_quantity = 20;
        assert!(product.is_low_stock());
        product.stock_quantity = 21;
        assert!(!product.is_low_stock());
    }

    #[test]
    fn test_can_supply_rejects_non_positive_quantity() {
        let product = Product::new(request()).unwrap();
        assert!(!product.can_supply(0));
        assert!(!product.can_supply(-3));
    }
}
