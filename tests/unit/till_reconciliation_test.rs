// Reconciliation identity: expected = opening + sales, difference = counted − expected.

use botica::modules::pos::models::Reconciliation;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_worked_example() {
    // opening 5000, sales [3000, 2000], counted 10200 → expected 10000, difference 200
    let sales_total = dec!(3000) + dec!(2000);
    let r = Reconciliation::compute(dec!(5000), sales_total, dec!(10200));

    assert_eq!(r.expected, dec!(10000));
    assert_eq!(r.difference, dec!(200));
}

#[test]
fn test_exact_count_has_zero_difference() {
    let r = Reconciliation::compute(dec!(2500.00), dec!(7500.00), dec!(10000.00));
    assert_eq!(r.difference, Decimal::ZERO);
}

#[test]
fn test_difference_keeps_cent_precision() {
    let r = Reconciliation::compute(dec!(5000.00), dec!(4999.50), dec!(9999.25));
    assert_eq!(r.expected, dec!(9999.50));
    assert_eq!(r.difference, dec!(-0.25));
}

proptest! {
    /// expected − opening always equals the sales total
    #[test]
    fn prop_expected_identity(
        opening_cents in 0i64..=100_000_000,
        sales_cents in 0i64..=100_000_000,
        counted_cents in 0i64..=200_000_000,
    ) {
        let opening = Decimal::new(opening_cents, 2);
        let sales = Decimal::new(sales_cents, 2);
        let counted = Decimal::new(counted_cents, 2);

        let r = Reconciliation::compute(opening, sales, counted);

        prop_assert_eq!(r.expected - opening, sales);
        prop_assert_eq!(counted - r.difference, r.expected);
    }

    /// Difference is negative exactly when the drawer is short
    #[test]
    fn prop_difference_sign(
        opening_cents in 0i64..=10_000_000,
        sales_cents in 0i64..=10_000_000,
        counted_cents in 0i64..=30_000_000,
    ) {
        let r = Reconciliation::compute(
            Decimal::new(opening_cents, 2),
            Decimal::new(sales_cents, 2),
            Decimal::new(counted_cents, 2),
        );

        prop_assert_eq!(r.difference < Decimal::ZERO, counted_cents < opening_cents + sales_cents);
    }
}
