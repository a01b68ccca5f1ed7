// Payment field validation: cash sufficiency and change, references for
// non-cash tender.

use botica::modules::pos::models::{validate_payment, PaymentMethod};
use proptest::prelude::*;
use rust_decimal::Decimal;

#[test]
fn test_change_worked_example() {
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
fn test_non_cash_never_produces_change() {
    for method in [
        PaymentMethod::Card,
        PaymentMethod::Transfer,
        PaymentMethod::MobileMoney,
    ] {
        let change = validate_payment(
            method,
            Some("TPA-20260131-01"),
            Some(Decimal::from(99999)),
            Decimal::from(500),
        )
        .unwrap();
        assert_eq!(change, None);
    }
}

proptest! {
    /// Cash: accepted iff received >= total, and then change = received − total
    #[test]
    fn prop_cash_acceptance(
        total_cents in 1i64..=50_000_000,
        received_cents in 0i64..=100_000_000,
    ) {
        let total = Decimal::new(total_cents, 2);
        let received = Decimal::new(received_cents, 2);

        let result = validate_payment(PaymentMethod::Cash, None, Some(received), total);

        if received_cents >= total_cents {
            let change = result.unwrap().unwrap();
            prop_assert_eq!(change, received - total);
            prop_assert!(change >= Decimal::ZERO);
        } else {
            prop_assert!(result.is_err());
        }
    }

    /// Non-cash: accepted iff the reference is non-blank
    #[test]
    fn prop_reference_requirement(reference in "[ A-Za-z0-9-]{0,16}") {
        let total = Decimal::from(1000);
        let result = validate_payment(
            PaymentMethod::Card,
            Some(reference.as_str()),
            None,
            total,
        );

        prop_assert_eq!(result.is_ok(), !reference.trim().is_empty());
    }
}
