use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::RequestContext;
use crate::modules::orders::models::{CheckoutRequest, OrderStatus, UpdateOrderStatusRequest};
use crate::modules::orders::services::OrderService;

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub status: Option<OrderStatus>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /orders (back office)
pub async fn list_orders(
    service: web::Data<Arc<OrderService>>,
    ctx: RequestContext,
    query: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let orders = service
        .list_orders(query.status, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(orders))
}

/// GET /orders/{id} (back office)
pub async fn get_order(
    service: web::Data<Arc<OrderService>>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let order = service.get_order(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(order))
}

/// POST /orders/{id}/status (back office)
pub async fn update_status(
    service: web::Data<Arc<OrderService>>,
    ctx: RequestContext,
    path: web::Path<String>,
    request: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let order = service
        .update_status(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// POST /storefront/orders — checkout
pub async fn checkout(
    service: web::Data<Arc<OrderService>>,
    ctx: RequestContext,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_customer()?;

    let order = service.checkout(&ctx.subject_id, request.into_inner()).await?;

    Ok(HttpResponse::Created().json(order))
}

/// GET /storefront/orders — the caller's own orders
pub async fn list_own_orders(
    service: web::Data<Arc<OrderService>>,
    ctx: RequestContext,
    query: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
    ctx.require_customer()?;

    let orders = service
        .list_customer_orders(&ctx.subject_id, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(orders))
}

/// POST /storefront/orders/{id}/cancel
pub async fn cancel_order(
    service: web::Data<Arc<OrderService>>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ctx.require_customer()?;

    let order = service
        .cancel_order(&path.into_inner(), &ctx.subject_id)
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// Back-office order routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(list_orders))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}/status", web::post().to(update_status)),
    );
}

/// Storefront order routes
pub fn configure_storefront(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/storefront/orders")
            .route("", web::post().to(checkout))
            .route("", web::get().to(list_own_orders))
            .route("/{id}/cancel", web::post().to(cancel_order)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_parses_status() {
        let query: ListOrdersQuery =
            serde_json::from_str(r#"{"status": "preparing"}"#).unwrap();
        assert_eq!(query.status, Some(OrderStatus::Preparing));
        assert_eq!(query.limit, 50);
    }
}
