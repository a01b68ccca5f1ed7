use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::RequestContext;
use crate::modules::customers::models::{
    CreateCustomerRequest, CustomerLoginRequest, UpdateCustomerRequest,
};
use crate::modules::customers::services::CustomerService;

#[derive(Debug, Deserialize)]
pub struct ListCustomersQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// POST /customers (back office)
pub async fn create_customer(
    service: web::Data<Arc<CustomerService>>,
    ctx: RequestContext,
    request: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let customer = service.create_customer(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(customer))
}

/// GET /customers (back office)
pub async fn list_customers(
    service: web::Data<Arc<CustomerService>>,
    ctx: RequestContext,
    query: web::Query<ListCustomersQuery>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let customers = service.list_customers(query.limit, query.offset).await?;

    Ok(HttpResponse::Ok().json(customers))
}

/// GET /customers/{id} (back office)
pub async fn get_customer(
    service: web::Data<Arc<CustomerService>>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let customer = service.get_customer(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(customer))
}

/// PUT /customers/{id} (back office)
pub async fn update_customer(
    service: web::Data<Arc<CustomerService>>,
    ctx: RequestContext,
    path: web::Path<String>,
    request: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let customer = service
        .update_customer(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(customer))
}

/// POST /storefront/auth/login
pub async fn storefront_login(
    service: web::Data<Arc<CustomerService>>,
    request: web::Json<CustomerLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.login(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /storefront/profile — the caller's own record
pub async fn storefront_profile(
    service: web::Data<Arc<CustomerService>>,
    ctx: RequestContext,
) -> Result<HttpResponse, AppError> {
    ctx.require_customer()?;

    let customer = service.get_customer(&ctx.subject_id).await?;

    Ok(HttpResponse::Ok().json(customer))
}

/// PUT /storefront/profile
pub async fn storefront_update_profile(
    service: web::Data<Arc<CustomerService>>,
    ctx: RequestContext,
    request: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_customer()?;

    let mut update = request.into_inner();
    // Customers cannot deactivate themselves from the profile form
    update.is_active = None;

    let customer = service.update_customer(&ctx.subject_id, update).await?;

    Ok(HttpResponse::Ok().json(customer))
}

/// Back-office customer routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::post().to(create_customer))
            .route("", web::get().to(list_customers))
            .route("/{id}", web::get().to(get_customer))
            .route("/{id}", web::put().to(update_customer)),
    );
}

/// Storefront-facing customer routes
pub fn configure_storefront(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/storefront")
            .route("/auth/login", web::post().to(storefront_login))
            .route("/profile", web::get().to(storefront_profile))
            .route("/profile", web::put().to(storefront_update_profile)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListCustomersQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 50);
        assert_eq!(query.offset, 0);
    }
}
