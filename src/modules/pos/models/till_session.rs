// Till session model: one bookkeeping period per register, bounded by an
// opening float and a closing count.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Session lifecycle; closed sessions are immutable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(10)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TillStatus {
    Open,
    Closed,
}

/// A cash-register session
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TillSession {
    pub id: String,
    pub register_id: String,
    /// Who opened the till, as shown on the closing report
    pub cashier_name: String,
    pub opened_by: String,
    pub status: TillStatus,
    pub opening_amount: Decimal,
    pub opened_at: DateTime<Utc>,
    /// Set at close, immutable afterwards
    pub counted_amount: Option<Decimal>,
    pub expected_amount: Option<Decimal>,
    pub difference: Option<Decimal>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl TillSession {
    pub fn is_open(&self) -> bool {
        self.status == TillStatus::Open
    }
}

/// Closing arithmetic, kept pure so it is testable without a store:
/// expected = opening + sales, difference = counted − expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub expected: Decimal,
    pub difference: Decimal,
}

impl Reconciliation {
    pub fn compute(opening: Decimal, sales_total: Decimal, counted: Decimal) -> Self {
        let expected = opening + sales_total;
        Reconciliation {
            expected,
            difference: counted - expected,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenTillRequest {
    pub register_id: String,
    pub opening_amount: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloseTillRequest {
    pub register_id: String,
    pub counted_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconciliation_identity() {
        // opening 5000, sales [3000, 2000], counted 10200
        let r = Reconciliation::compute(
            Decimal::from(5000),
            Decimal::from(3000) + Decimal::from(2000),
            Decimal::from(10200),
        );
        assert_eq!(r.expected, Decimal::from(10000));
        assert_eq!(r.difference, Decimal::from(200));
    }

    #[test]
    fn test_reconciliation_shortfall() {
        let r = Reconciliation::compute(
            Decimal::from(5000),
            Decimal::from(5000),
            Decimal::from(9800),
        );
        assert_eq!(r.difference, Decimal::from(-200));
    }

    #[test]
    fn test_reconciliation_no_sales() {
        let r = Reconciliation::compute(Decimal::from(5000), Decimal::ZERO, Decimal::from(5000));
        assert_eq!(r.expected, Decimal::from(5000));
        assert_eq!(r.difference, Decimal::ZERO);
    }
}
