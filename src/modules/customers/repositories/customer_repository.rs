use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::customers::models::Customer;

pub struct CustomerRepository {
    pool: MySqlPool,
}

impl CustomerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                id, name, email, phone, street, city, password_hash, is_active,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.street)
        .bind(&customer.city)
        .bind(&customer.password_hash)
        .bind(customer.is_active)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "Customer with email '{}' already exists",
                        customer.email
                    ));
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone, street, city, password_hash, is_active,
                   created_at, updated_at
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone, street, city, password_hash, is_active,
                   created_at, updated_at
            FROM customers
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Customer>> {
        let limit = limit.clamp(1, 100);

        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone, street, city, password_hash, is_active,
                   created_at, updated_at
            FROM customers
            ORDER BY name
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn update(&self, customer: &Customer) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = ?, phone = ?, street = ?, city = ?, is_active = ?,
                updated_at = NOW(6)
            WHERE id = ?
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.street)
        .bind(&customer.city)
        .bind(customer.is_active)
        .bind(&customer.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Customer with id '{}' not found",
                customer.id
            )));
        }

        Ok(())
    }
}
