use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::core::currency;
use crate::core::{AppError, Result};
use crate::modules::pos::repositories::{SaleRepository, TillRepository};
use crate::modules::reports::models::{ClosingReport, SalesSummary, TopProduct};
use crate::modules::reports::repositories::SalesStore;

/// Closing reports and ranged sales summaries
pub struct ReportService {
    till_repo: TillRepository,
    sale_repo: SaleRepository,
    sales_store: Arc<dyn SalesStore>,
    max_range_days: i64,
}

impl ReportService {
    pub fn new(
        till_repo: TillRepository,
        sale_repo: SaleRepository,
        sales_store: Arc<dyn SalesStore>,
        max_range_days: i64,
    ) -> Self {
        Self {
            till_repo,
            sale_repo,
            sales_store,
            max_range_days,
        }
    }

    /// The closing report for a till session, closed or in progress.
    /// Reading is all this does; reprints cannot mutate the session.
    pub async fn closing_report(&self, session_id: &str) -> Result<ClosingReport> {
        let session = self
            .till_repo
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Till session '{}' not found", session_id))
            })?;

        let sales = self.sale_repo.list_for_session(session_id).await?;

        Ok(ClosingReport::generate(&session, &sales))
    }

    /// Sales statistics over an inclusive date range
    pub async fn summarize(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        top_limit: i64,
    ) -> Result<SalesSummary> {
        self.validate_date_range(start_date, end_date)?;

        let totals = self.sales_store.range_totals(start_date, end_date).await?;

        let average = if totals.sale_count > 0 {
            currency::round_kz(totals.total_revenue / Decimal::from(totals.sale_count))
        } else {
            Decimal::ZERO
        };

        let top_products = self
            .sales_store
            .top_products(start_date, end_date, top_limit)
            .await?
            .into_iter()
            .map(|row| TopProduct {
                product_code: row.product_code,
                product_name: row.product_name,
                quantity_sold: row.quantity_sold,
                revenue: row.revenue,
                revenue_display: currency::format_kz(row.revenue),
            })
            .collect();

        let summary = SalesSummary::new(
            start_date,
            end_date,
            totals.sale_count,
            totals.total_revenue,
            average,
            top_products,
        );

        if summary.is_empty() {
            warn!(
                start = %start_date,
                end = %end_date,
                "Empty sales summary generated"
            );
        } else {
            info!(
                start = %start_date,
                end = %end_date,
                sale_count = summary.sale_count,
                "Sales summary generated"
            );
        }

        Ok(summary)
    }

    /// Range sanity: ordered, not in the future, bounded length
    pub fn validate_date_range(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
        if start_date > end_date {
            return Err(AppError::validation(
                "start_date must be before or equal to end_date",
            ));
        }

        let today = chrono::Utc::now().date_naive();
        if end_date > today {
            return Err(AppError::validation(format!(
                "end_date cannot be in the future (today is {})",
                today
            )));
        }

        let days = (end_date - start_date).num_days();
        if days > self.max_range_days {
            return Err(AppError::validation(format!(
                "Date range too large: {} days (maximum {} days)",
                days, self.max_range_days
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::reports::repositories::{RangeTotals, TopProductRow};
    use async_trait::async_trait;

    struct FixedStore {
        totals: RangeTotals,
        top: Vec<TopProductRow>,
    }

    #[async_trait]
    impl SalesStore for FixedStore {
        async fn range_totals(&self, _start: NaiveDate, _end: NaiveDate) -> Result<RangeTotals> {
            Ok(self.totals)
        }

        async fn top_products(
            &self,
            _start: NaiveDate,
            _end: NaiveDate,
            limit: i64,
        ) -> Result<Vec<TopProductRow>> {
            Ok(self.top.iter().take(limit as usize).cloned().collect())
        }
    }

    fn service(store: FixedStore) -> ReportService {
        // The SQL-backed repositories are not touched by summarize tests
        let pool = sqlx::mysql::MySqlPoolOptions::new().connect_lazy("mysql://test@localhost/test")
            .expect("lazy pool");
        ReportService::new(
            TillRepository::new(pool.clone()),
            SaleRepository::new(pool),
            Arc::new(store),
            365,
        )
    }

    #[tokio::test]
    async fn test_summarize_average() {
        let store = FixedStore {
            totals: RangeTotals {
                sale_count: 4,
                total_revenue: Decimal::from(10000),
            },
            top: vec![TopProductRow {
                product_code: "PARA-500".into(),
                product_name: "Paracetamol 500mg".into(),
                quantity_sold: 12,
                revenue: Decimal::from(5400),
            }],
        };

        let service = service(store);
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();

        let summary = service.summarize(start, end, 5).await.unwrap();
        assert_eq!(summary.sale_count, 4);
        assert_eq!(summary.average_sale_value, Decimal::from(2500));
        assert_eq!(summary.top_products.len(), 1);
    }

    #[tokio::test]
    async fn test_summarize_empty_range() {
        let store = FixedStore {
            totals: RangeTotals {
                sale_count: 0,
                total_revenue: Decimal::ZERO,
            },
            top: vec![],
        };

        let service = service(store);
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();

        let summary = service.summarize(start, end, 5).await.unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.average_sale_value, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_date_range_validation() {
        let store = FixedStore {
            totals: RangeTotals {
                sale_count: 0,
                total_revenue: Decimal::ZERO,
            },
            top: vec![],
        };
        let service = service(store);

        let start = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(service.validate_date_range(start, end).is_err());

        // end in the future
        let far_future = NaiveDate::from_ymd_opt(2127, 1, 1).unwrap();
        assert!(service.validate_date_range(start, far_future).is_err());

        // range longer than the configured bound
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert!(service.validate_date_range(start, end).is_err());
    }
}
