use argon2::{Argon2, PasswordHash, PasswordVerifier};
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::users::models::{LoginRequest, LoginResponse};
use crate::modules::users::repositories::{SessionRepository, UserRepository};

/// Staff login and session lifecycle
pub struct AuthService {
    user_repo: UserRepository,
    session_repo: SessionRepository,
    session_ttl_hours: i64,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        session_repo: SessionRepository,
        session_ttl_hours: i64,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_ttl_hours,
        }
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        // Housekeeping piggy-backed on login traffic
        let _ = self.session_repo.purge_expired().await;

        let user = self
            .user_repo
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        if !user.is_active {
            warn!(username = %user.username, "Login attempt on inactive account");
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let principal = user.principal()?;

        let session = self
            .session_repo
            .create_session(&user.id, &user.display_name, principal, self.session_ttl_hours)
            .await?;

        info!(username = %user.username, role = %user.role, "Staff login");

        Ok(LoginResponse {
            token: session.token,
            display_name: user.display_name,
            role: principal,
            expires_at: session.expires_at,
        })
    }

    /// Revoke the presented session token
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.session_repo.revoke(token).await
    }
}

/// Hash a password with Argon2 and a random salt
pub fn hash_password(password: &str) -> Result<String> {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored Argon2 hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "balcao-2026";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }
}
