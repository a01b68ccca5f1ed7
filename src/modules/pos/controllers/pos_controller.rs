use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::config::CompanyConfig;
use crate::core::error::AppError;
use crate::core::RequestContext;
use crate::modules::pos::models::{
    CloseTillRequest, FinalizeSaleRequest, OpenTillRequest, SaleReceipt,
};
use crate::modules::pos::services::{SaleService, TillService};

#[derive(Debug, Deserialize)]
pub struct RegisterQuery {
    pub register_id: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub register_id: String,
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct SetCartQuantityRequest {
    pub register_id: String,
    pub quantity: i32,
}

/// POST /pos/till/open
pub async fn open_till(
    service: web::Data<Arc<TillService>>,
    ctx: RequestContext,
    request: web::Json<OpenTillRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let request = request.into_inner();
    let session = service
        .open(&ctx, &request.register_id, request.opening_amount)
        .await?;

    Ok(HttpResponse::Created().json(session))
}

/// GET /pos/till/current?register_id=
pub async fn current_till(
    service: web::Data<Arc<TillService>>,
    ctx: RequestContext,
    query: web::Query<RegisterQuery>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let session = service.current(&query.register_id).await?;

    match session {
        Some(session) => Ok(HttpResponse::Ok().json(session)),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

/// POST /pos/till/close
pub async fn close_till(
    service: web::Data<Arc<TillService>>,
    ctx: RequestContext,
    request: web::Json<CloseTillRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let request = request.into_inner();
    let session = service
        .close(&request.register_id, request.counted_amount)
        .await?;

    Ok(HttpResponse::Ok().json(session))
}

/// GET /pos/till/history
pub async fn till_history(
    service: web::Data<Arc<TillService>>,
    ctx: RequestContext,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let sessions = service.closing_history(query.limit, query.offset).await?;

    Ok(HttpResponse::Ok().json(sessions))
}

/// GET /pos/cart?register_id=
pub async fn get_cart(
    service: web::Data<Arc<SaleService>>,
    ctx: RequestContext,
    query: web::Query<RegisterQuery>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    Ok(HttpResponse::Ok().json(service.cart_view(&query.register_id)))
}

/// POST /pos/cart/items
pub async fn add_cart_item(
    service: web::Data<Arc<SaleService>>,
    ctx: RequestContext,
    request: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let request = request.into_inner();
    let cart = service
        .add_to_cart(&request.register_id, &request.product_id, request.quantity)
        .await?;

    Ok(HttpResponse::Ok().json(cart))
}

/// PUT /pos/cart/items/{product_id}
pub async fn set_cart_quantity(
    service: web::Data<Arc<SaleService>>,
    ctx: RequestContext,
    path: web::Path<String>,
    request: web::Json<SetCartQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let request = request.into_inner();
    let cart = service
        .set_cart_quantity(&request.register_id, &path.into_inner(), request.quantity)
        .await?;

    Ok(HttpResponse::Ok().json(cart))
}

/// DELETE /pos/cart/items/{product_id}?register_id=
pub async fn remove_cart_item(
    service: web::Data<Arc<SaleService>>,
    ctx: RequestContext,
    path: web::Path<String>,
    query: web::Query<RegisterQuery>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let cart = service.remove_from_cart(&query.register_id, &path.into_inner())?;

    Ok(HttpResponse::Ok().json(cart))
}

/// DELETE /pos/cart?register_id=
pub async fn clear_cart(
    service: web::Data<Arc<SaleService>>,
    ctx: RequestContext,
    query: web::Query<RegisterQuery>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    service.clear_cart(&query.register_id);

    Ok(HttpResponse::NoContent().finish())
}

/// POST /pos/sales — finalize the register's cart
pub async fn finalize_sale(
    service: web::Data<Arc<SaleService>>,
    ctx: RequestContext,
    request: web::Json<FinalizeSaleRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let sale = service.finalize(&ctx, request.into_inner()).await?;

    Ok(HttpResponse::Created().json(sale))
}

/// GET /pos/sales/{id}
pub async fn get_sale(
    service: web::Data<Arc<SaleService>>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let sale = service.get_sale(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(sale))
}

/// GET /pos/sales/{id}/receipt — the receipt document for the renderer
pub async fn sale_receipt(
    service: web::Data<Arc<SaleService>>,
    company: web::Data<CompanyConfig>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let sale = service.get_sale(&path.into_inner()).await?;
    let receipt = SaleReceipt::build(&sale, &company);

    Ok(HttpResponse::Ok().json(receipt))
}

/// Configure POS routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pos")
            .route("/till/open", web::post().to(open_till))
            .route("/till/current", web::get().to(current_till))
            .route("/till/close", web::post().to(close_till))
            .route("/till/history", web::get().to(till_history))
            .route("/cart", web::get().to(get_cart))
            .route("/cart", web::delete().to(clear_cart))
            .route("/cart/items", web::post().to(add_cart_item))
            .route("/cart/items/{product_id}", web::put().to(set_cart_quantity))
            .route(
                "/cart/items/{product_id}",
                web::delete().to(remove_cart_item),
            )
            .route("/sales", web::post().to(finalize_sale))
            .route("/sales/{id}", web::get().to(get_sale))
            .route("/sales/{id}/receipt", web::get().to(sale_receipt)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_cart_item_defaults_quantity() {
        let request: AddCartItemRequest = serde_json::from_str(
            r#"{"register_id": "caixa-1", "product_id": "p-1"}"#,
        )
        .unwrap();
        assert_eq!(request.quantity, 1);
    }
}
