use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::core::currency;
use crate::core::{AppError, Result};
use crate::modules::catalog::repositories::ProductRepository;
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::orders::models::{
    CheckoutRequest, Order, OrderItem, OrderStatus, UpdateOrderStatusRequest,
};
use crate::modules::orders::repositories::OrderRepository;

/// Checkout and fulfilment rules
pub struct OrderService {
    order_repo: OrderRepository,
    product_repo: ProductRepository,
    customer_repo: CustomerRepository,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        product_repo: ProductRepository,
        customer_repo: CustomerRepository,
    ) -> Self {
        Self {
            order_repo,
            product_repo,
            customer_repo,
        }
    }

    /// Create a pending order from the storefront basket.
    ///
    /// Stock is checked for availability here but decremented only when the
    /// goods leave the shelf, at POS sale recording.
    pub async fn checkout(&self, customer_id: &str, request: CheckoutRequest) -> Result<Order> {
        if request.items.is_empty() {
            return Err(AppError::validation("Order must have at least one item"));
        }

        let customer = self
            .customer_repo
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found"))?;

        let mut items = Vec::with_capacity(request.items.len());
        let mut subtotal = Decimal::ZERO;
        let order_id = Uuid::new_v4().to_string();

        for line in &request.items {
            if line.quantity <= 0 {
                return Err(AppError::validation("Item quantity must be positive"));
            }

            let product = self
                .product_repo
                .find_by_id(&line.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!("Product '{}' not found", line.product_id))
                })?;

            if !product.is_active {
                return Err(AppError::validation(format!(
                    "Product '{}' is not available",
                    product.code
                )));
            }

            if !product.can_supply(line.quantity) {
                return Err(AppError::InsufficientStock {
                    product: product.code.clone(),
                    requested: line.quantity as u32,
                    available: product.stock_quantity.max(0) as u32,
                });
            }

            let line_total =
                currency::round_kz(product.unit_price * Decimal::from(line.quantity));
            subtotal += line_total;

            items.push(OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                product_id: product.id.clone(),
                product_code: product.code.clone(),
                product_name: product.name.clone(),
                quantity: line.quantity,
                unit_price: product.unit_price,
                line_total,
            });
        }

        let tax = currency::iva_amount(subtotal);
        let now = Utc::now();

        let order = Order {
            id: order_id,
            // Allocated by the repository inside the insert transaction
            number: String::new(),
            customer_id: customer.id.clone(),
            status: OrderStatus::Pending,
            delivery_street: request.delivery_street.or(customer.street),
            delivery_city: request.delivery_city.or(customer.city),
            subtotal,
            tax,
            total: subtotal + tax,
            created_at: now,
            updated_at: now,
            items,
        };

        let order = self.order_repo.create(&order).await?;

        info!(
            order_id = %order.id,
            number = %order.number,
            total = %order.total,
            "Order created"
        );

        Ok(order)
    }

    pub async fn get_order(&self, id: &str) -> Result<Order> {
        self.order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order with id '{}' not found", id)))
    }

    /// Back-office listing
    pub async fn list_orders(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>> {
        self.order_repo.list(None, status, limit, offset).await
    }

    /// Storefront listing scoped to the caller
    pub async fn list_customer_orders(
        &self,
        customer_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>> {
        self.order_repo
            .list(Some(customer_id), None, limit, offset)
            .await
    }

    /// Staff advance an order along the fulfilment chain
    pub async fn update_status(
        &self,
        id: &str,
        request: UpdateOrderStatusRequest,
    ) -> Result<Order> {
        let mut order = self.get_order(id).await?;
        let from = order.status;

        order.transition_to(request.status)?;

        self.order_repo
            .update_status(id, from, request.status)
            .await?;

        info!(
            order_id = %order.id,
            from = %from,
            to = %request.status,
            "Order status updated"
        );

        Ok(order)
    }

    /// Customer cancels their own order; only pending/confirmed qualify
    pub async fn cancel_order(&self, id: &str, customer_id: &str) -> Result<Order> {
        let mut order = self.get_order(id).await?;

        if order.customer_id != customer_id {
            // Do not leak other customers' order ids
            return Err(AppError::not_found(format!(
                "Order with id '{}' not found",
                id
            )));
        }

        let from = order.status;
        order.transition_to(OrderStatus::Cancelled)?;

        self.order_repo
            .update_status(id, from, OrderStatus::Cancelled)
            .await?;

        info!(order_id = %order.id, "Order cancelled by customer");

        Ok(order)
    }
}
