use std::future::{ready, Ready};
use std::rc::Rc;
use std::str::FromStr;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use sha2::{Digest, Sha256};
use sqlx::MySqlPool;

use crate::core::{AppError, Principal, RequestContext};

/// Endpoints reachable without a session token
const PUBLIC_PATHS: &[&str] = &["/", "/health", "/auth/login", "/storefront/auth/login"];

/// Session-token authentication middleware.
///
/// Resolves the `X-Auth-Token` header to a row in `auth_sessions` (tokens are
/// stored as SHA-256 digests, never in the clear) and injects a
/// [`RequestContext`] into request extensions for handler extraction.
pub struct SessionAuth {
    pool: MySqlPool,
}

impl SessionAuth {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            pool: self.pool.clone(),
        }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    pool: MySqlPool,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let pool = self.pool.clone();

        Box::pin(async move {
            if PUBLIC_PATHS.contains(&req.path()) {
                return svc.call(req).await;
            }

            let token = req
                .headers()
                .get("X-Auth-Token")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing X-Auth-Token header")))?;

            let ctx = resolve_session(&pool, token).await.map_err(Error::from)?;

            req.extensions_mut().insert(ctx);

            svc.call(req).await
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    subject_id: String,
    display_name: String,
    role: String,
}

async fn resolve_session(pool: &MySqlPool, token: &str) -> crate::core::Result<RequestContext> {
    let digest = token_digest(token);

    let row = sqlx::query_as::<_, SessionRow>(
        r#"
        SELECT subject_id, display_name, role
        FROM auth_sessions
        WHERE token_digest = ? AND expires_at > NOW(6)
        LIMIT 1
        "#,
    )
    .bind(&digest)
    .fetch_optional(pool)
    .await
    .map_err(AppError::Database)?
    .ok_or_else(|| AppError::unauthorized("Invalid or expired session token"))?;

    let principal = Principal::from_str(&row.role)
        .map_err(|e| AppError::internal(format!("Invalid role in session store: {}", e)))?;

    Ok(RequestContext {
        subject_id: row.subject_id,
        display_name: row.display_name,
        principal,
    })
}

/// SHA-256 hex digest of a session token. The digest is what gets persisted;
/// the raw token exists only in the login response and the client header.
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
