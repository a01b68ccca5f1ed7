use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// A storefront customer: contact details plus delivery address
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    /// Set only for accounts that can log into the storefront
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(request: &CreateCustomerRequest, password_hash: Option<String>) -> Result<Self> {
        if request.name.trim().is_empty() {
            return Err(AppError::validation("Customer name cannot be empty"));
        }
        validate_email(&request.email)?;

        let now = Utc::now();

        Ok(Customer {
            id: Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            phone: request.phone.clone(),
            street: request.street.clone(),
            city: request.city.clone(),
            password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    /// Optional storefront password; omit for counter-only customer records
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerLoginRequest {
    pub email: String,
    pub password: String,
}

fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::validation("Email cannot be empty"));
    }
    // Shape check only; deliverability is the mail system's problem
    let valid = email.contains('@')
        && !email.starts_with('@')
        && !email.ends_with('@')
        && !email.contains(char::is_whitespace);
    if !valid {
        return Err(AppError::validation(format!("Invalid email: {}", email)));
    }
    Ok(())
}
