// Aggregate queries over persisted sales.
//
// Behind a trait so the summary arithmetic in the service can be exercised
// against an in-memory store in tests; the MySQL implementation is the one
// wired at startup.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};

use crate::core::Result;

/// Count and gross revenue over a date range
#[derive(Debug, Clone, Copy)]
pub struct RangeTotals {
    pub sale_count: i64,
    pub total_revenue: Decimal,
}

/// Units and revenue for one product over a date range
#[derive(Debug, Clone)]
pub struct TopProductRow {
    pub product_code: String,
    pub product_name: String,
    pub quantity_sold: i64,
    pub revenue: Decimal,
}

#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Totals for sales with `start <= date(created_at) <= end`
    async fn range_totals(&self, start: NaiveDate, end: NaiveDate) -> Result<RangeTotals>;

    /// Best sellers by quantity, descending, at most `limit` rows
    async fn top_products(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: i64,
    ) -> Result<Vec<TopProductRow>>;
}

pub struct MySqlSalesStore {
    pool: MySqlPool,
}

impl MySqlSalesStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Inclusive date range as half-open UTC instants
fn range_bounds(
    start: NaiveDate,
    end: NaiveDate,
) -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    let start_at = Utc.from_utc_datetime(&start.and_hms_opt(0, 0, 0).expect("midnight"));
    let end_at = Utc.from_utc_datetime(
        &(end + chrono::Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .expect("midnight"),
    );
    (start_at, end_at)
}

#[async_trait]
impl SalesStore for MySqlSalesStore {
    async fn range_totals(&self, start: NaiveDate, end: NaiveDate) -> Result<RangeTotals> {
        let (start_at, end_at) = range_bounds(start, end);

        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS sale_count, COALESCE(SUM(total), 0) AS total_revenue
            FROM sales
            WHERE created_at >= ? AND created_at < ?
            "#,
        )
        .bind(start_at)
        .bind(end_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(RangeTotals {
            sale_count: row.try_get("sale_count")?,
            total_revenue: row.try_get("total_revenue")?,
        })
    }

    async fn top_products(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: i64,
    ) -> Result<Vec<TopProductRow>> {
        let (start_at, end_at) = range_bounds(start, end);
        let limit = limit.clamp(1, 50);

        let rows = sqlx::query(
            r#"
            SELECT sl.product_code, sl.product_name,
                   CAST(SUM(sl.quantity) AS SIGNED) AS quantity_sold,
                   COALESCE(SUM(sl.line_total), 0) AS revenue
            FROM sale_lines sl
            INNER JOIN sales s ON s.id = sl.sale_id
            WHERE s.created_at >= ? AND s.created_at < ?
            GROUP BY sl.product_code, sl.product_name
            ORDER BY quantity_sold DESC, revenue DESC
            LIMIT ?
            "#,
        )
        .bind(start_at)
        .bind(end_at)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut products = Vec::with_capacity(rows.len());
        for row in rows {
            products.push(TopProductRow {
                product_code: row.try_get("product_code")?,
                product_name: row.try_get("product_name")?,
                quantity_sold: row.try_get("quantity_sold")?,
                revenue: row.try_get("revenue")?,
            });
        }

        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds_are_half_open() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();

        let (start_at, end_at) = range_bounds(start, end);
        assert_eq!(start_at.to_rfc3339(), "2026-03-01T00:00:00+00:00");
        assert_eq!(end_at.to_rfc3339(), "2026-04-01T00:00:00+00:00");
    }
}
