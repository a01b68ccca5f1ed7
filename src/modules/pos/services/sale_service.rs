use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, RequestContext, Result};
use crate::modules::catalog::repositories::ProductRepository;
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::pos::models::{
    validate_payment, CartView, FinalizeSaleRequest, PaymentMethod, Sale, SaleLine,
};
use crate::modules::pos::repositories::SaleRepository;
use crate::modules::pos::services::{CartStore, TillService};

/// Cart operations and sale finalization for the register
pub struct SaleService {
    cart_store: Arc<CartStore>,
    sale_repo: SaleRepository,
    product_repo: ProductRepository,
    customer_repo: CustomerRepository,
    till_service: Arc<TillService>,
}

impl SaleService {
    pub fn new(
        cart_store: Arc<CartStore>,
        sale_repo: SaleRepository,
        product_repo: ProductRepository,
        customer_repo: CustomerRepository,
        till_service: Arc<TillService>,
    ) -> Self {
        Self {
            cart_store,
            sale_repo,
            product_repo,
            customer_repo,
            till_service,
        }
    }

    /// Add a product to the register's cart. Requires an open till session;
    /// the quantity is checked against current stock, though the binding
    /// check happens again when the sale is recorded.
    pub async fn add_to_cart(
        &self,
        register_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<CartView> {
        self.till_service.require_open(register_id).await?;

        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product '{}' not found", product_id)))?;

        if !product.is_active {
            return Err(AppError::validation(format!(
                "Product '{}' is not available",
                product.code
            )));
        }

        self.cart_store
            .with_cart_mut(register_id, |cart| cart.add_item(&product, quantity))?;

        Ok(self.cart_view(register_id))
    }

    /// Set a cart line's quantity; zero removes the line
    pub async fn set_cart_quantity(
        &self,
        register_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<CartView> {
        self.till_service.require_open(register_id).await?;

        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product '{}' not found", product_id)))?;

        self.cart_store
            .with_cart_mut(register_id, |cart| cart.set_quantity(&product, quantity))?;

        Ok(self.cart_view(register_id))
    }

    pub fn remove_from_cart(&self, register_id: &str, product_id: &str) -> Result<CartView> {
        self.cart_store
            .with_cart_mut(register_id, |cart| cart.remove_item(product_id))?;

        Ok(self.cart_view(register_id))
    }

    pub fn clear_cart(&self, register_id: &str) {
        self.cart_store.with_cart_mut(register_id, |cart| cart.clear());
    }

    pub fn cart_view(&self, register_id: &str) -> CartView {
        self.cart_store.with_cart(register_id, |cart| CartView::from(cart))
    }

    /// Record the register's cart as a sale.
    ///
    /// Preconditions: non-empty cart, open till session, valid payment
    /// fields. Stock is re-validated inside the recording transaction; the
    /// cart is cleared only after the sale has been persisted.
    pub async fn finalize(
        &self,
        ctx: &RequestContext,
        request: FinalizeSaleRequest,
    ) -> Result<Sale> {
        let session = self.till_service.require_open(&request.register_id).await?;

        let cart = self
            .cart_store
            .with_cart(&request.register_id, |cart| cart.clone());

        if cart.is_empty() {
            return Err(AppError::validation("Cart is empty"));
        }

        let subtotal = cart.subtotal();
        let tax = cart.tax();
        let total = cart.total();

        let change_amount = validate_payment(
            request.payment_method,
            request.payment_reference.as_deref(),
            request.amount_received,
            total,
        )?;

        let customer_name = match &request.customer_id {
            Some(customer_id) => {
                let customer = self
                    .customer_repo
                    .find_by_id(customer_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found(format!("Customer '{}' not found", customer_id))
                    })?;
                Some(customer.name)
            }
            None => None,
        };

        let sale_id = Uuid::new_v4().to_string();
        let lines = cart
            .items
            .iter()
            .map(|item| SaleLine {
                id: Uuid::new_v4().to_string(),
                sale_id: sale_id.clone(),
                product_id: item.product_id.clone(),
                product_code: item.product_code.clone(),
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total(),
            })
            .collect();

        let sale = Sale {
            id: sale_id,
            // Allocated by the repository inside the recording transaction
            number: String::new(),
            session_id: session.id.clone(),
            cashier_name: ctx.display_name.clone(),
            customer_id: request.customer_id.clone(),
            customer_name,
            subtotal,
            tax,
            total,
            payment_method: request.payment_method,
            payment_reference: request
                .payment_reference
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            // Tendered cash is only meaningful for cash sales
            amount_received: match request.payment_method {
                PaymentMethod::Cash => request.amount_received,
                _ => None,
            },
            change_amount,
            created_at: Utc::now(),
            lines,
        };

        let recorded = self.sale_repo.record(&sale).await?;

        // Only after the transaction committed
        self.cart_store.take(&request.register_id);

        info!(
            sale_id = %recorded.id,
            number = %recorded.number,
            session_id = %recorded.session_id,
            method = %recorded.payment_method,
            "Sale finalized"
        );

        Ok(recorded)
    }

    pub async fn get_sale(&self, id: &str) -> Result<Sale> {
        self.sale_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale '{}' not found", id)))
    }
}
