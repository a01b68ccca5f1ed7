// Sale model and payment validation.
//
// A sale freezes everything at recording time: product codes and names,
// unit prices, totals, the payment breakdown and the till session it belongs
// to. The closing report and SAF-T export read these rows verbatim.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// Accepted tender types at the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    MobileMoney,
}

impl PaymentMethod {
    /// Display label for receipts and reports
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Numerário",
            PaymentMethod::Card => "Multicaixa",
            PaymentMethod::Transfer => "Transferência",
            PaymentMethod::MobileMoney => "Unitel Money",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::MobileMoney => "mobile_money",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "transfer" => Ok(PaymentMethod::Transfer),
            "mobile_money" => Ok(PaymentMethod::MobileMoney),
            _ => Err(format!("Invalid payment method: {}", s)),
        }
    }
}

/// A recorded sale
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sale {
    pub id: String,
    /// Sequential display number, e.g. `VD-000318`
    pub number: String,
    pub session_id: String,
    pub cashier_name: String,
    pub customer_id: Option<String>,
    /// Customer name frozen at sale time; `None` renders as "counter sale"
    pub customer_name: Option<String>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    /// Terminal/transfer reference, required for non-cash tender
    pub payment_reference: Option<String>,
    /// Cash only: what the customer handed over
    pub amount_received: Option<Decimal>,
    /// Cash only: received − total
    pub change_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    /// Joined from sale_lines; absent in list views
    #[sqlx(skip)]
    #[serde(default)]
    pub lines: Vec<SaleLine>,
}

/// One product line within a recorded sale
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SaleLine {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    pub product_code: String,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinalizeSaleRequest {
    pub register_id: String,
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
    pub amount_received: Option<Decimal>,
    pub customer_id: Option<String>,
}

/// Validate the payment fields against the sale total.
///
/// Returns the change amount for cash sales, `None` otherwise. Rejected
/// combinations: cash with `received < total`, non-cash without a reference.
pub fn validate_payment(
    method: PaymentMethod,
    reference: Option<&str>,
    amount_received: Option<Decimal>,
    total: Decimal,
) -> Result<Option<Decimal>> {
    match method {
        PaymentMethod::Cash => {
            let received = amount_received.ok_or_else(|| {
                AppError::validation("Cash sales require the amount received")
            })?;
            if received < total {
                return Err(AppError::validation(format!(
                    "Amount received {} is less than the total {}",
                    received, total
                )));
            }
            Ok(Some(received - total))
        }
        PaymentMethod::Card | PaymentMethod::Transfer | PaymentMethod::MobileMoney => {
            match reference {
                Some(r) if !r.trim().is_empty() => Ok(None),
                _ => Err(AppError::validation(format!(
                    "Payment method '{}' requires a payment reference",
                    method
                ))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cash_change() {
        // total 8322, received 10000 → change 1678
        let change = validate_payment(
            PaymentMethod::Cash,
            None,
            Some(Decimal::from(10000)),
            Decimal::from(8322),
        )
        .unwrap();
        assert_eq!(change, Some(Decimal::from(1678)));
    }

    #[test]
    fn test_cash_exact() {
        let change = validate_payment(
            PaymentMethod::Cash,
            None,
            Some(Decimal::from(8322)),
            Decimal::from(8322),
        )
        .unwrap();
        assert_eq!(change, Some(Decimal::ZERO));
    }

    #[test]
    fn test_cash_underpayment_rejected() {
        let result = validate_payment(
            PaymentMethod::Cash,
            None,
            Some(Decimal::from(8000)),
            Decimal::from(8322),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cash_missing_amount_rejected() {
        assert!(validate_payment(PaymentMethod::Cash, None, None, Decimal::from(100)).is_err());
    }

    #[test]
    fn test_non_cash_requires_reference() {
        for method in [
            PaymentMethod::Card,
            PaymentMethod::Transfer,
            PaymentMethod::MobileMoney,
        ] {
            assert!(validate_payment(method, None, None, Decimal::from(100)).is_err());
            assert!(validate_payment(method, Some("  "), None, Decimal::from(100)).is_err());
            let change =
                validate_payment(method, Some("REF-001"), None, Decimal::from(100)).unwrap();
            assert_eq!(change, None);
        }
    }

    #[test]
    fn test_payment_method_round_trip() {
        use std::str::FromStr;
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::Card,
            PaymentMethod::Transfer,
            PaymentMethod::MobileMoney,
        ] {
            assert_eq!(PaymentMethod::from_str(method.as_str()).unwrap(), method);
            assert!(!method.label().is_empty());
        }
        assert!(PaymentMethod::from_str("cheque").is_err());
    }
}
