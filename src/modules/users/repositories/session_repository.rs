// Server-side session storage shared by staff and customer logins.
//
// Only the SHA-256 digest of a token is persisted; the raw token is returned
// once from login and never stored.

use chrono::{DateTime, Duration, Utc};
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Principal, Result};
use crate::middleware::token_digest;

/// A freshly issued session: the raw token plus its expiry
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct SessionRepository {
    pool: MySqlPool,
}

impl SessionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Issue a new session for a principal and persist its digest
    pub async fn create_session(
        &self,
        subject_id: &str,
        display_name: &str,
        principal: Principal,
        ttl_hours: i64,
    ) -> Result<IssuedSession> {
        // Two UUIDs back to back: 64 hex chars of opaque token
        let token = format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        );
        let expires_at = Utc::now() + Duration::hours(ttl_hours);

        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                id, token_digest, subject_id, display_name, role, expires_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, NOW(6))
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(token_digest(&token))
        .bind(subject_id)
        .bind(display_name)
        .bind(principal.as_str())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(IssuedSession { token, expires_at })
    }

    /// Revoke a session by its raw token. Revoking an unknown token is a no-op.
    pub async fn revoke(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE token_digest = ?")
            .bind(token_digest(token))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Drop expired rows; called opportunistically from login
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= NOW(6)")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
