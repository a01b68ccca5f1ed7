use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::RequestContext;
use crate::modules::catalog::models::{
    CreateCategoryRequest, CreateProductRequest, StockAdjustmentRequest, UpdateProductRequest,
};
use crate::modules::catalog::services::ProductService;

/// Query parameters for listing products
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub category_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// POST /catalog/products
pub async fn create_product(
    service: web::Data<Arc<ProductService>>,
    ctx: RequestContext,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_admin()?;

    let product = service.create_product(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(product))
}

/// GET /catalog/products
pub async fn list_products(
    service: web::Data<Arc<ProductService>>,
    ctx: RequestContext,
    query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let products = service
        .list_products(query.category_id.as_deref(), query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(products))
}

/// GET /catalog/products/low-stock
pub async fn list_low_stock(
    service: web::Data<Arc<ProductService>>,
    ctx: RequestContext,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let products = service.list_low_stock().await?;

    Ok(HttpResponse::Ok().json(products))
}

/// GET /catalog/products/{id}
pub async fn get_product(
    service: web::Data<Arc<ProductService>>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let product = service.get_product(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(product))
}

/// PUT /catalog/products/{id}
pub async fn update_product(
    service: web::Data<Arc<ProductService>>,
    ctx: RequestContext,
    path: web::Path<String>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_admin()?;

    let product = service
        .update_product(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(product))
}

/// POST /catalog/products/{id}/stock-adjustments
pub async fn adjust_stock(
    service: web::Data<Arc<ProductService>>,
    ctx: RequestContext,
    path: web::Path<String>,
    request: web::Json<StockAdjustmentRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_admin()?;

    let product = service
        .adjust_stock(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(product))
}

/// POST /catalog/categories
pub async fn create_category(
    service: web::Data<Arc<ProductService>>,
    ctx: RequestContext,
    request: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_admin()?;

    let category = service.create_category(&request.into_inner().name).await?;

    Ok(HttpResponse::Created().json(category))
}

/// GET /catalog/categories
pub async fn list_categories(
    service: web::Data<Arc<ProductService>>,
    ctx: RequestContext,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let categories = service.list_categories().await?;

    Ok(HttpResponse::Ok().json(categories))
}

/// Configure catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/catalog")
            .route("/products", web::post().to(create_product))
            .route("/products", web::get().to(list_products))
            .route("/products/low-stock", web::get().to(list_low_stock))
            .route("/products/{id}", web::get().to(get_product))
            .route("/products/{id}", web::put().to(update_product))
            .route(
                "/products/{id}/stock-adjustments",
                web::post().to(adjust_stock),
            )
            .route("/categories", web::post().to(create_category))
            .route("/categories", web::get().to(list_categories)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit() {
        assert_eq!(default_limit(), 50);
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ListProductsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 50);
        assert_eq!(query.offset, 0);
        assert!(query.category_id.is_none());
    }
}
