use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::RequestContext;
use crate::modules::users::models::{CreateUserRequest, UpdateUserRequest};
use crate::modules::users::services::UserService;

/// POST /users
pub async fn create_user(
    service: web::Data<Arc<UserService>>,
    ctx: RequestContext,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_admin()?;

    let user = service.create_user(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(user))
}

/// GET /users
pub async fn list_users(
    service: web::Data<Arc<UserService>>,
    ctx: RequestContext,
) -> Result<HttpResponse, AppError> {
    ctx.require_admin()?;

    let users = service.list_users().await?;

    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/{id}
pub async fn get_user(
    service: web::Data<Arc<UserService>>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ctx.require_admin()?;

    let user = service.get_user(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// PUT /users/{id}
pub async fn update_user(
    service: web::Data<Arc<UserService>>,
    ctx: RequestContext,
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.require_admin()?;

    let user = service
        .update_user(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Configure user management routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::post().to(create_user))
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user)),
    );
}
