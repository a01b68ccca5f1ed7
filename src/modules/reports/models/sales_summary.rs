use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::currency::format_kz;

/// A best-seller entry: units moved and the revenue they brought in
#[derive(Debug, Clone, Serialize)]
pub struct TopProduct {
    pub product_code: String,
    pub product_name: String,
    pub quantity_sold: i64,
    pub revenue: Decimal,
    pub revenue_display: String,
}

/// Ranged sales statistics for the back-office dashboard
#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub sale_count: i64,
    pub total_revenue: Decimal,
    pub total_revenue_display: String,
    pub average_sale_value: Decimal,
    pub average_sale_value_display: String,
    pub top_products: Vec<TopProduct>,
}

impl SalesSummary {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        sale_count: i64,
        total_revenue: Decimal,
        average_sale_value: Decimal,
        top_products: Vec<TopProduct>,
    ) -> Self {
        SalesSummary {
            start_date,
            end_date,
            sale_count,
            total_revenue,
            total_revenue_display: format_kz(total_revenue),
            average_sale_value,
            average_sale_value_display: format_kz(average_sale_value),
            top_products,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sale_count == 0
    }
}
