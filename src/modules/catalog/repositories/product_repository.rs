// MySQL persistence for products and categories.
//
// Sale-time stock decrements live in the sale repository's transaction; the
// write-off guard here uses the same conditional-UPDATE shape so no path can
// take stock below zero.

use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::{Category, Product};

/// Repository for product database operations
pub struct ProductRepository {
    pool: MySqlPool,
}

impl ProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, code, name, unit_price, stock_quantity, min_stock,
                requires_prescription, category_id, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.code)
        .bind(&product.name)
        .bind(product.unit_price)
        .bind(product.stock_quantity)
        .bind(product.min_stock)
        .bind(product.requires_prescription)
        .bind(&product.category_id)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "Product with code '{}' already exists",
                        product.code
                    ));
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, code, name, unit_price, stock_quantity, min_stock,
                   requires_prescription, category_id, is_active, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, code, name, unit_price, stock_quantity, min_stock,
                   requires_prescription, category_id, is_active, created_at, updated_at
            FROM products
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// List active products, optionally filtered by category
    pub async fn list(
        &self,
        category_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>> {
        let limit = limit.clamp(1, 100);

        let products = match category_id {
            Some(category) => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, code, name, unit_price, stock_quantity, min_stock,
                           requires_prescription, category_id, is_active, created_at, updated_at
                    FROM products
                    WHERE is_active = TRUE AND category_id = ?
                    ORDER BY name
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(category)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, code, name, unit_price, stock_quantity, min_stock,
                           requires_prescription, category_id, is_active, created_at, updated_at
                    FROM products
                    WHERE is_active = TRUE
                    ORDER BY name
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(products)
    }

    /// Products at or below their reorder threshold
    pub async fn list_low_stock(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, code, name, unit_price, stock_quantity, min_stock,
                   requires_prescription, category_id, is_active, created_at, updated_at
            FROM products
            WHERE is_active = TRUE AND stock_quantity <= min_stock
            ORDER BY stock_quantity ASC, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn update(&self, product: &Product) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, unit_price = ?, min_stock = ?, requires_prescription = ?,
                category_id = ?, is_active = ?, updated_at = NOW(6)
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(product.unit_price)
        .bind(product.min_stock)
        .bind(product.requires_prescription)
        .bind(&product.category_id)
        .bind(product.is_active)
        .bind(&product.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Product with id '{}' not found",
                product.id
            )));
        }

        Ok(())
    }

    /// Manual stock correction. Negative deltas are guarded the same way the
    /// sale decrement is, so a write-off can never push stock below zero.
    pub async fn adjust_stock(&self, id: &str, delta: i32) -> Result<Product> {
        let result = if delta >= 0 {
            sqlx::query(
                r#"
                UPDATE products
                SET stock_quantity = stock_quantity + ?, updated_at = NOW(6)
                WHERE id = ?
                "#,
            )
            .bind(delta)
            .bind(id)
            .execute(&self.pool)
            .await?
        } else {
            sqlx::query(
                r#"
                UPDATE products
                SET stock_quantity = stock_quantity - ?, updated_at = NOW(6)
                WHERE id = ? AND stock_quantity >= ?
                "#,
            )
            .bind(-delta)
            .bind(id)
            .bind(-delta)
            .execute(&self.pool)
            .await?
        };

        if result.rows_affected() == 0 {
            // Either the product is missing or the write-off exceeds stock
            return match self.find_by_id(id).await? {
                Some(product) => Err(AppError::InsufficientStock {
                    product: product.code,
                    requested: (-delta) as u32,
                    available: product.stock_quantity.max(0) as u32,
                }),
                None => Err(AppError::not_found(format!(
                    "Product with id '{}' not found",
                    id
                ))),
            };
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product with id '{}' not found", id)))
    }

    // Categories

    pub async fn create_category(&self, name: &str) -> Result<Category> {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
        };

        sqlx::query("INSERT INTO categories (id, name) VALUES (?, ?)")
            .bind(&category.id)
            .bind(&category.name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::validation(format!(
                            "Category '{}' already exists",
                            category.name
                        ));
                    }
                }
                AppError::Database(e)
            })?;

        Ok(category)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }
}
