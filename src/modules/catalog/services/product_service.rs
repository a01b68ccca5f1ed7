use tracing::info;

use crate::core::currency;
use crate::core::{AppError, Result};
use crate::modules::catalog::models::{
    Category, CreateProductRequest, Product, StockAdjustmentRequest, UpdateProductRequest,
};
use crate::modules::catalog::repositories::ProductRepository;

/// Business rules around the product catalog
pub struct ProductService {
    product_repo: ProductRepository,
}

impl ProductService {
    pub fn new(product_repo: ProductRepository) -> Self {
        Self { product_repo }
    }

    pub async fn create_product(&self, request: CreateProductRequest) -> Result<Product> {
        let product = Product::new(request)?;

        self.product_repo.create(&product).await?;

        info!(
            product_id = %product.id,
            code = %product.code,
            "Product created"
        );

        Ok(product)
    }

    pub async fn get_product(&self, id: &str) -> Result<Product> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product with id '{}' not found", id)))
    }

    pub async fn list_products(
        &self,
        category_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>> {
        self.product_repo.list(category_id, limit, offset).await
    }

    pub async fn list_low_stock(&self) -> Result<Vec<Product>> {
        self.product_repo.list_low_stock().await
    }

    pub async fn update_product(&self, id: &str, request: UpdateProductRequest) -> Result<Product> {
        request.validate()?;

        let mut product = self.get_product(id).await?;

        if let Some(name) = request.name {
            product.name = name.trim().to_string();
        }
        if let Some(price) = request.unit_price {
            product.unit_price = currency::round_kz(price);
        }
        if let Some(min_stock) = request.min_stock {
            product.min_stock = min_stock;
        }
        if let Some(flag) = request.requires_prescription {
            product.requires_prescription = flag;
        }
        if let Some(category_id) = request.category_id {
            product.category_id = Some(category_id);
        }
        if let Some(active) = request.is_active {
            product.is_active = active;
        }

        self.product_repo.update(&product).await?;

        Ok(product)
    }

    pub async fn adjust_stock(
        &self,
        id: &str,
        request: StockAdjustmentRequest,
    ) -> Result<Product> {
        if request.delta == 0 {
            return Err(AppError::validation("Stock adjustment delta cannot be zero"));
        }
        if request.reason.trim().is_empty() {
            return Err(AppError::validation("Stock adjustment requires a reason"));
        }

        let product = self.product_repo.adjust_stock(id, request.delta).await?;

        info!(
            product_id = %product.id,
            delta = request.delta,
            reason = %request.reason,
            stock_quantity = product.stock_quantity,
            "Stock adjusted"
        );

        Ok(product)
    }

    pub async fn create_category(&self, name: &str) -> Result<Category> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Category name cannot be empty"));
        }

        self.product_repo.create_category(name).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.product_repo.list_categories().await
    }
}
