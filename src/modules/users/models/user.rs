use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Principal, Result};

/// A back-office account: admin, pharmacist or cashier
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaffUser {
    pub id: String,
    pub username: String,
    pub display_name: String,
    /// Stored as the principal string ("admin" | "pharmacist" | "cashier")
    pub role: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StaffUser {
    pub fn new(request: &CreateUserRequest, password_hash: String) -> Result<Self> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }
        if username.len() > 64 {
            return Err(AppError::validation("Username cannot exceed 64 characters"));
        }
        if request.display_name.trim().is_empty() {
            return Err(AppError::validation("Display name cannot be empty"));
        }
        if !request.role.is_staff() {
            return Err(AppError::validation(
                "Staff accounts must have a staff role",
            ));
        }

        let now = Utc::now();

        Ok(StaffUser {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            display_name: request.display_name.trim().to_string(),
            role: request.role.as_str().to_string(),
            password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn principal(&self) -> Result<Principal> {
        self.role
            .parse()
            .map_err(|e: String| AppError::internal(format!("Invalid role in user store: {}", e)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: String,
    pub role: Principal,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    pub role: Option<Principal>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Opaque bearer token for the X-Auth-Token header
    pub token: String,
    pub display_name: String,
    pub role: Principal,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: Principal) -> CreateUserRequest {
        CreateUserRequest {
            username: "mjose".to_string(),
            display_name: "Maria José".to_string(),
            role,
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_staff_user_roles() {
        for role in [Principal::Admin, Principal::Pharmacist, Principal::Cashier] {
            let user = StaffUser::new(&request(role), "hash".to_string()).unwrap();
            assert_eq!(user.principal().unwrap(), role);
        }
    }

    #[test]
    fn test_customer_role_rejected() {
        assert!(StaffUser::new(&request(Principal::Customer), "hash".to_string()).is_err());
    }

    #[test]
    fn test_blank_username_rejected() {
        let mut req = request(Principal::Cashier);
        req.username = "  ".to_string();
        assert!(StaffUser::new(&req, "hash".to_string()).is_err());
    }
}
