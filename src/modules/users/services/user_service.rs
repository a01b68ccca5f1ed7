use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::users::models::{CreateUserRequest, StaffUser, UpdateUserRequest};
use crate::modules::users::repositories::UserRepository;
use crate::modules::users::services::auth_service::hash_password;

/// Admin management of back-office accounts
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<StaffUser> {
        if request.password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let user = StaffUser::new(&request, password_hash)?;

        self.user_repo.create(&user).await?;

        info!(username = %user.username, role = %user.role, "Staff user created");

        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<StaffUser>> {
        self.user_repo.list().await
    }

    pub async fn get_user(&self, id: &str) -> Result<StaffUser> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id '{}' not found", id)))
    }

    pub async fn update_user(&self, id: &str, request: UpdateUserRequest) -> Result<StaffUser> {
        let mut user = self.get_user(id).await?;

        if let Some(display_name) = request.display_name {
            if display_name.trim().is_empty() {
                return Err(AppError::validation("Display name cannot be empty"));
            }
            user.display_name = display_name.trim().to_string();
        }
        if let Some(role) = request.role {
            if !role.is_staff() {
                return Err(AppError::validation(
                    "Staff accounts must have a staff role",
                ));
            }
            user.role = role.as_str().to_string();
        }
        if let Some(active) = request.is_active {
            user.is_active = active;
        }
        if let Some(password) = request.password {
            if password.len() < 8 {
                return Err(AppError::validation(
                    "Password must be at least 8 characters",
                ));
            }
            user.password_hash = hash_password(&password)?;
        }

        self.user_repo.update(&user).await?;

        Ok(user)
    }
}
