use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::users::models::StaffUser;

pub struct UserRepository {
    pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &StaffUser) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO staff_users (
                id, username, display_name, role, password_hash, is_active,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.display_name)
        .bind(&user.role)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "User '{}' already exists",
                        user.username
                    ));
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<StaffUser>> {
        let user = sqlx::query_as::<_, StaffUser>(
            r#"
            SELECT id, username, display_name, role, password_hash, is_active,
                   created_at, updated_at
            FROM staff_users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<StaffUser>> {
        let user = sqlx::query_as::<_, StaffUser>(
            r#"
            SELECT id, username, display_name, role, password_hash, is_active,
                   created_at, updated_at
            FROM staff_users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<StaffUser>> {
        let users = sqlx::query_as::<_, StaffUser>(
            r#"
            SELECT id, username, display_name, role, password_hash, is_active,
                   created_at, updated_at
            FROM staff_users
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn update(&self, user: &StaffUser) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE staff_users
            SET display_name = ?, role = ?, password_hash = ?, is_active = ?,
                updated_at = NOW(6)
            WHERE id = ?
            "#,
        )
        .bind(&user.display_name)
        .bind(&user.role)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(&user.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "User with id '{}' not found",
                user.id
            )));
        }

        Ok(())
    }
}
