// Closing report generation: figures from stored data, reprint stability.

use botica::modules::pos::models::{
    PaymentMethod, Sale, TillSession, TillStatus, COUNTER_SALE_LABEL,
};
use botica::modules::reports::models::ClosingReport;
use chrono::Utc;
use rust_decimal::Decimal;

fn sale(number: &str, total: i64, customer: Option<&str>, method: PaymentMethod) -> Sale {
    Sale {
        id: format!("s-{}", number),
        number: number.to_string(),
        session_id: "t-1".to_string(),
        cashier_name: "Maria".to_string(),
        customer_id: customer.map(|_| "c-1".to_string()),
        customer_name: customer.map(|c| c.to_string()),
        subtotal: Decimal::from(total),
        tax: Decimal::ZERO,
        total: Decimal::from(total),
        payment_method: method,
        payment_reference: None,
        amount_received: None,
        change_amount: None,
        created_at: Utc::now(),
        lines: vec![],
    }
}

fn closed_session() -> TillSession {
    TillSession {
        id: "t-1".to_string(),
        register_id: "caixa-1".to_string(),
        cashier_name: "Maria".to_string(),
        opened_by: "u-1".to_string(),
        status: TillStatus::Closed,
        opening_amount: Decimal::from(5000),
        opened_at: Utc::now(),
        counted_amount: Some(Decimal::from(10200)),
        expected_amount: Some(Decimal::from(10000)),
        difference: Some(Decimal::from(200)),
        closed_at: Some(Utc::now()),
    }
}

#[test]
fn test_summary_block_worked_example() {
    let sales = vec![
        sale("VD-000001", 3000, None, PaymentMethod::Cash),
        sale("VD-000002", 2000, Some("João Baptista"), PaymentMethod::Card),
    ];

    let report = ClosingReport::generate(&closed_session(), &sales);

    assert_eq!(report.summary.sale_count, 2);
    assert_eq!(report.summary.sales_total, Decimal::from(5000));
    assert_eq!(report.summary.expected_amount, Decimal::from(10000));
    assert_eq!(report.summary.counted_amount, Some(Decimal::from(10200)));
    assert_eq!(report.summary.difference, Some(Decimal::from(200)));
}

#[test]
fn test_rows_carry_customer_and_method_labels() {
    let sales = vec![
        sale("VD-000001", 3000, None, PaymentMethod::Cash),
        sale("VD-000002", 2000, Some("João Baptista"), PaymentMethod::Card),
    ];

    let report = ClosingReport::generate(&closed_session(), &sales);

    assert_eq!(report.rows[0].customer, COUNTER_SALE_LABEL);
    assert_eq!(report.rows[1].customer, "João Baptista");
    assert_eq!(report.rows[0].payment_method, "Numerário");
    assert_eq!(report.rows[1].payment_method, "Multicaixa");
}

#[test]
fn test_reprint_produces_identical_document() {
    let session = closed_session();
    let sales = vec![sale("VD-000001", 3000, None, PaymentMethod::Cash)];

    let first = serde_json::to_value(ClosingReport::generate(&session, &sales)).unwrap();
    let second = serde_json::to_value(ClosingReport::generate(&session, &sales)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_empty_session_report() {
    let mut session = closed_session();
    session.counted_amount = Some(Decimal::from(5000));
    session.expected_amount = Some(Decimal::from(5000));
    session.difference = Some(Decimal::ZERO);

    let report = ClosingReport::generate(&session, &[]);

    assert_eq!(report.summary.sale_count, 0);
    assert_eq!(report.summary.sales_total, Decimal::ZERO);
    assert_eq!(report.summary.difference, Some(Decimal::ZERO));
}
