// MySQL persistence for sales.
//
// Recording is one transaction: conditional stock decrement per line (the
// cart's earlier check is advisory only), sequence allocation, sale and line
// inserts. Any failed decrement aborts the whole sale; stock is never
// partially taken.

use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::pos::models::{Sale, SaleLine};

pub struct SaleRepository {
    pool: MySqlPool,
}

/// Aggregates for one till session, recomputed from the sale rows
#[derive(Debug, Clone, Copy)]
pub struct SessionTotals {
    pub sale_count: i64,
    pub sales_total: Decimal,
}

impl SaleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Persist a finalized sale, decrementing stock for every line.
    ///
    /// The passed sale carries an empty `number`; the display number is
    /// allocated here, inside the transaction, and returned on the result.
    pub async fn record(&self, sale: &Sale) -> Result<Sale> {
        let mut tx = self.pool.begin().await?;

        // Stock leaves the shelf line by line; a single failure rolls
        // everything back via the dropped transaction.
        for line in &sale.lines {
            let updated = sqlx::query(
                r#"
                UPDATE products
                SET stock_quantity = stock_quantity - ?, updated_at = NOW(6)
                WHERE id = ? AND stock_quantity >= ?
                "#,
            )
            .bind(line.quantity)
            .bind(&line.product_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                let row = sqlx::query(
                    "SELECT code, stock_quantity FROM products WHERE id = ?",
                )
                .bind(&line.product_id)
                .fetch_optional(&mut *tx)
                .await?;

                return Err(match row {
                    Some(row) => AppError::InsufficientStock {
                        product: row.try_get("code")?,
                        requested: line.quantity as u32,
                        available: row.try_get::<i32, _>("stock_quantity")?.max(0) as u32,
                    },
                    None => AppError::not_found(format!(
                        "Product '{}' not found",
                        line.product_id
                    )),
                });
            }
        }

        let seq: i64 = sqlx::query("SELECT COALESCE(MAX(seq), 0) + 1 AS seq FROM sales FOR UPDATE")
            .fetch_one(&mut *tx)
            .await?
            .try_get("seq")?;

        let number = format!("VD-{:06}", seq);

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, seq, number, session_id, cashier_name, customer_id, customer_name,
                subtotal, tax, total, payment_method, payment_reference,
                amount_received, change_amount, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&sale.id)
        .bind(seq)
        .bind(&number)
        .bind(&sale.session_id)
        .bind(&sale.cashier_name)
        .bind(&sale.customer_id)
        .bind(&sale.customer_name)
        .bind(sale.subtotal)
        .bind(sale.tax)
        .bind(sale.total)
        .bind(sale.payment_method)
        .bind(&sale.payment_reference)
        .bind(sale.amount_received)
        .bind(sale.change_amount)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        for line in &sale.lines {
            sqlx::query(
                r#"
                INSERT INTO sale_lines (
                    id, sale_id, product_id, product_code, product_name,
                    quantity, unit_price, line_total
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&line.id)
            .bind(&sale.id)
            .bind(&line.product_id)
            .bind(&line.product_code)
            .bind(&line.product_name)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(line.line_total)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(sale_id = %sale.id, number = %number, total = %sale.total, "Sale recorded");

        let mut recorded = sale.clone();
        recorded.number = number;

        Ok(recorded)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, number, session_id, cashier_name, customer_id, customer_name,
                   subtotal, tax, total, payment_method, payment_reference,
                   amount_received, change_amount, created_at
            FROM sales
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut sale) = sale else {
            return Ok(None);
        };

        sale.lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT id, sale_id, product_id, product_code, product_name,
                   quantity, unit_price, line_total
            FROM sale_lines
            WHERE sale_id = ?
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(sale))
    }

    /// All sales attributed to a till session, oldest first (report order)
    pub async fn list_for_session(&self, session_id: &str) -> Result<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, number, session_id, cashier_name, customer_id, customer_name,
                   subtotal, tax, total, payment_method, payment_reference,
                   amount_received, change_amount, created_at
            FROM sales
            WHERE session_id = ?
            ORDER BY created_at
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Count and sum of the session's sales, recomputed from the rows
    pub async fn session_totals(&self, session_id: &str) -> Result<SessionTotals> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS sale_count, COALESCE(SUM(total), 0) AS sales_total
            FROM sales
            WHERE session_id = ?
            "#,
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(SessionTotals {
            sale_count: row.try_get("sale_count")?,
            sales_total: row.try_get("sales_total")?,
        })
    }
}
