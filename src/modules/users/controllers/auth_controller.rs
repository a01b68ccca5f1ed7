use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::error::AppError;
use crate::modules::users::models::LoginRequest;
use crate::modules::users::services::AuthService;

/// POST /auth/login
pub async fn login(
    service: web::Data<Arc<AuthService>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.login(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// POST /auth/logout
pub async fn logout(
    service: web::Data<Arc<AuthService>>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token = req
        .headers()
        .get("X-Auth-Token")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing X-Auth-Token header"))?;

    service.logout(token).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout)),
    );
}
