// MySQL persistence for orders.
//
// Order numbers come from a per-table sequence read under lock inside the
// creation transaction. Status updates are conditional on the current status
// so two concurrent staff actions cannot both apply.

use sqlx::{MySqlPool, Row};

use crate::core::{AppError, Result};
use crate::modules::orders::models::{Order, OrderItem, OrderStatus};

pub struct OrderRepository {
    pool: MySqlPool,
}

impl OrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert an order with its items, allocating the display number
    pub async fn create(&self, order: &Order) -> Result<Order> {
        let mut tx = self.pool.begin().await?;

        let seq: i64 = sqlx::query("SELECT COALESCE(MAX(seq), 0) + 1 AS seq FROM orders FOR UPDATE")
            .fetch_one(&mut *tx)
            .await?
            .try_get("seq")?;

        let number = format!("ENC-{:06}", seq);

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, seq, number, customer_id, status, delivery_street, delivery_city,
                subtotal, tax, total, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&order.id)
        .bind(seq)
        .bind(&number)
        .bind(&order.customer_id)
        .bind(order.status)
        .bind(&order.delivery_street)
        .bind(&order.delivery_city)
        .bind(order.subtotal)
        .bind(order.tax)
        .bind(order.total)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, product_code, product_name,
                    quantity, unit_price, line_total
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&order.id)
            .bind(&item.product_id)
            .bind(&item.product_code)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.line_total)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let mut created = order.clone();
        created.number = number;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, number, customer_id, status, delivery_street, delivery_city,
                   subtotal, tax, total, created_at, updated_at
            FROM orders
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut order) = order else {
            return Ok(None);
        };

        order.items = self.items_for(id).await?;

        Ok(Some(order))
    }

    async fn items_for(&self, order_id: &str) -> Result<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, product_code, product_name,
                   quantity, unit_price, line_total
            FROM order_items
            WHERE order_id = ?
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// List orders, newest first, optionally scoped to a customer or status
    pub async fn list(
        &self,
        customer_id: Option<&str>,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>> {
        let limit = limit.clamp(1, 100);

        // Without line items for list views
        let orders = match (customer_id, status) {
            (Some(customer), Some(status)) => {
                sqlx::query_as::<_, Order>(
                    r#"
                    SELECT id, number, customer_id, status, delivery_street, delivery_city,
                           subtotal, tax, total, created_at, updated_at
                    FROM orders
                    WHERE customer_id = ? AND status = ?
                    ORDER BY created_at DESC
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(customer)
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            (Some(customer), None) => {
                sqlx::query_as::<_, Order>(
                    r#"
                    SELECT id, number, customer_id, status, delivery_street, delivery_city,
                           subtotal, tax, total, created_at, updated_at
                    FROM orders
                    WHERE customer_id = ?
                    ORDER BY created_at DESC
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(customer)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(status)) => {
                sqlx::query_as::<_, Order>(
                    r#"
                    SELECT id, number, customer_id, status, delivery_street, delivery_city,
                           subtotal, tax, total, created_at, updated_at
                    FROM orders
                    WHERE status = ?
                    ORDER BY created_at DESC
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            (None, None) => {
                sqlx::query_as::<_, Order>(
                    r#"
                    SELECT id, number, customer_id, status, delivery_street, delivery_city,
                           subtotal, tax, total, created_at, updated_at
                    FROM orders
                    ORDER BY created_at DESC
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(orders)
    }

    /// Compare-and-set status update; fails when the row moved underneath us
    pub async fn update_status(
        &self,
        id: &str,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = ?, updated_at = NOW(6)
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(to)
        .bind(id)
        .bind(from)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(format!(
                "Order '{}' is no longer in status {}",
                id, from
            )));
        }

        Ok(())
    }
}
