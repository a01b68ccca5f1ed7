use tracing::info;

use crate::core::{AppError, Principal, Result};
use crate::modules::customers::models::{
    CreateCustomerRequest, Customer, CustomerLoginRequest, UpdateCustomerRequest,
};
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::users::models::LoginResponse;
use crate::modules::users::repositories::SessionRepository;
use crate::modules::users::services::{hash_password, verify_password};

/// Customer profiles and storefront authentication
pub struct CustomerService {
    customer_repo: CustomerRepository,
    session_repo: SessionRepository,
    session_ttl_hours: i64,
}

impl CustomerService {
    pub fn new(
        customer_repo: CustomerRepository,
        session_repo: SessionRepository,
        session_ttl_hours: i64,
    ) -> Self {
        Self {
            customer_repo,
            session_repo,
            session_ttl_hours,
        }
    }

    pub async fn create_customer(&self, request: CreateCustomerRequest) -> Result<Customer> {
        let password_hash = match &request.password {
            Some(password) => {
                if password.len() < 8 {
                    return Err(AppError::validation(
                        "Password must be at least 8 characters",
                    ));
                }
                Some(hash_password(password)?)
            }
            None => None,
        };

        let customer = Customer::new(&request, password_hash)?;

        self.customer_repo.create(&customer).await?;

        info!(customer_id = %customer.id, "Customer created");

        Ok(customer)
    }

    pub async fn get_customer(&self, id: &str) -> Result<Customer> {
        self.customer_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer with id '{}' not found", id)))
    }

    pub async fn list_customers(&self, limit: i64, offset: i64) -> Result<Vec<Customer>> {
        self.customer_repo.list(limit, offset).await
    }

    pub async fn update_customer(
        &self,
        id: &str,
        request: UpdateCustomerRequest,
    ) -> Result<Customer> {
        let mut customer = self.get_customer(id).await?;

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Customer name cannot be empty"));
            }
            customer.name = name.trim().to_string();
        }
        if let Some(phone) = request.phone {
            customer.phone = Some(phone);
        }
        if let Some(street) = request.street {
            customer.street = Some(street);
        }
        if let Some(city) = request.city {
            customer.city = Some(city);
        }
        if let Some(active) = request.is_active {
            customer.is_active = active;
        }

        self.customer_repo.update(&customer).await?;

        Ok(customer)
    }

    /// Storefront login: email + password against an account-enabled customer
    pub async fn login(&self, request: CustomerLoginRequest) -> Result<LoginResponse> {
        let customer = self
            .customer_repo
            .find_by_email(&request.email.trim().to_lowercase())
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !customer.is_active {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let hash = customer
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&request.password, hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let session = self
            .session_repo
            .create_session(
                &customer.id,
                &customer.name,
                Principal::Customer,
                self.session_ttl_hours,
            )
            .await?;

        info!(customer_id = %customer.id, "Customer login");

        Ok(LoginResponse {
            token: session.token,
            display_name: customer.name,
            role: Principal::Customer,
            expires_at: session.expires_at,
        })
    }
}
