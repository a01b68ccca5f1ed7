// Closing report document model.
//
// `generate` is a pure function from a till session and its sales to the
// printable document; nothing is mutated, so reprinting a closed session any
// number of times yields identical figures. Closed sessions render from the
// figures stored at close time — the stored numbers are the record, not a
// fresh recomputation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::currency::format_kz;
use crate::modules::pos::models::{Sale, TillSession, TillStatus, COUNTER_SALE_LABEL};

/// One sale row on the closing report
#[derive(Debug, Clone, Serialize)]
pub struct ClosingReportRow {
    pub sale_number: String,
    pub sold_at: DateTime<Utc>,
    /// Customer name or the counter-sale label
    pub customer: String,
    pub payment_method: String,
    pub total: Decimal,
    pub total_display: String,
}

/// The totals block at the foot of the report
#[derive(Debug, Clone, Serialize)]
pub struct ClosingSummary {
    pub sale_count: usize,
    pub sales_total: Decimal,
    pub sales_total_display: String,
    pub expected_amount: Decimal,
    pub expected_amount_display: String,
    /// Present once the session is closed
    pub counted_amount: Option<Decimal>,
    pub counted_amount_display: Option<String>,
    pub difference: Option<Decimal>,
    pub difference_display: Option<String>,
}

/// The full closing (or in-progress) report for one till session
#[derive(Debug, Clone, Serialize)]
pub struct ClosingReport {
    pub session_id: String,
    pub register_id: String,
    pub cashier_name: String,
    pub status: TillStatus,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub opening_amount: Decimal,
    pub opening_amount_display: String,
    pub rows: Vec<ClosingReportRow>,
    pub summary: ClosingSummary,
}

impl ClosingReport {
    /// Build the report from a session and its attributed sales
    pub fn generate(session: &TillSession, sales: &[Sale]) -> Self {
        let rows: Vec<ClosingReportRow> = sales
            .iter()
            .map(|sale| ClosingReportRow {
                sale_number: sale.number.clone(),
                sold_at: sale.created_at,
                customer: sale
                    .customer_name
                    .clone()
                    .unwrap_or_else(|| COUNTER_SALE_LABEL.to_string()),
                payment_method: sale.payment_method.label().to_string(),
                total: sale.total,
                total_display: format_kz(sale.total),
            })
            .collect();

        let sales_total: Decimal = sales.iter().map(|s| s.total).sum();

        // Closed sessions report their stored figures; an in-progress
        // preview derives the expectation from what has been sold so far.
        let expected = session
            .expected_amount
            .unwrap_or(session.opening_amount + sales_total);

        let summary = ClosingSummary {
            sale_count: rows.len(),
            sales_total,
            sales_total_display: format_kz(sales_total),
            expected_amount: expected,
            expected_amount_display: format_kz(expected),
            counted_amount: session.counted_amount,
            counted_amount_display: session.counted_amount.map(format_kz),
            difference: session.difference,
            difference_display: session.difference.map(format_kz),
        };

        ClosingReport {
            session_id: session.id.clone(),
            register_id: session.register_id.clone(),
            cashier_name: session.cashier_name.clone(),
            status: session.status,
            opened_at: session.opened_at,
            closed_at: session.closed_at,
            opening_amount: session.opening_amount,
            opening_amount_display: format_kz(session.opening_amount),
            rows,
            summary,
        }
    }
}
