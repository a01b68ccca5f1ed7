// Bulk reads backing the SAF-T export. Unlike the paginated back-office
// listings, the export walks the full customer and product tables for the
// master files, and every sale in the requested period.

use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::customers::models::Customer;
use crate::modules::catalog::models::Product;
use crate::modules::pos::models::Sale;

pub struct ExportRepository {
    pool: MySqlPool,
}

impl ExportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn all_customers(&self) -> Result<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone, street, city, password_hash, is_active,
                   created_at, updated_at
            FROM customers
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn all_products(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, code, name, unit_price, stock_quantity, min_stock,
                   requires_prescription, category_id, is_active, created_at, updated_at
            FROM products
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Sales with `start <= date(created_at) <= end`, oldest first
    pub async fn sales_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Sale>> {
        let start_at = Utc.from_utc_datetime(&start.and_hms_opt(0, 0, 0).expect("midnight"));
        let end_at = Utc.from_utc_datetime(
            &(end + chrono::Duration::days(1))
                .and_hms_opt(0, 0, 0)
                .expect("midnight"),
        );

        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, number, session_id, cashier_name, customer_id, customer_name,
                   subtotal, tax, total, payment_method, payment_reference,
                   amount_received, change_amount, created_at
            FROM sales
            WHERE created_at >= ? AND created_at < ?
            ORDER BY created_at
            "#,
        )
        .bind(start_at)
        .bind(end_at)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}
