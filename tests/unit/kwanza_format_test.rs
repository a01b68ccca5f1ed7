// Kwanza locale formatting: `Kz` prefix, dot-grouped thousands, comma decimals.

use botica::core::currency::{format_kz, iva_amount, round_kz, validate_amount};
use proptest::prelude::*;
use rust_decimal::Decimal;

#[test]
fn test_grouping() {
    assert_eq!(format_kz(Decimal::ZERO), "Kz 0,00");
    assert_eq!(format_kz(Decimal::from(7)), "Kz 7,00");
    assert_eq!(format_kz(Decimal::from(450)), "Kz 450,00");
    assert_eq!(format_kz(Decimal::from(8322)), "Kz 8.322,00");
    assert_eq!(format_kz(Decimal::from(123456)), "Kz 123.456,00");
    assert_eq!(format_kz(Decimal::new(123456789, 2)), "Kz 1.234.567,89");
}

#[test]
fn test_negative_amounts() {
    assert_eq!(format_kz(Decimal::from(-200)), "-Kz 200,00");
    assert_eq!(format_kz(Decimal::new(-1050, 2)), "-Kz 10,50");
}

#[test]
fn test_rounding_to_scale() {
    assert_eq!(format_kz(Decimal::new(10225, 3)), "Kz 10,22");
    assert_eq!(round_kz(Decimal::new(10235, 3)), Decimal::new(1024, 2));
}

#[test]
fn test_validate_amount() {
    assert!(validate_amount(Decimal::from(100)).is_ok());
    assert!(validate_amount(Decimal::new(10050, 2)).is_ok());
    assert!(validate_amount(Decimal::from(-1)).is_err());
    assert!(validate_amount(Decimal::new(10001, 3)).is_err());
}

#[test]
fn test_iva_worked_example() {
    assert_eq!(iva_amount(Decimal::from(7300)), Decimal::from(1022));
}

proptest! {
    /// Formatted output always carries the Kz prefix and a two-digit
    /// decimal part separated by a comma
    #[test]
    fn prop_format_shape(cents in -1_000_000_000i64..=1_000_000_000) {
        let formatted = format_kz(Decimal::new(cents, 2));

        let body = formatted.strip_prefix('-').unwrap_or(&formatted);
        prop_assert!(body.starts_with("Kz "));

        let (_, decimals) = body.rsplit_once(',').expect("decimal separator");
        prop_assert_eq!(decimals.len(), 2);
        prop_assert!(decimals.chars().all(|c| c.is_ascii_digit()));
    }

    /// Grouped digits reassemble into the absolute integer part
    #[test]
    fn prop_grouping_reversible(cents in 0i64..=1_000_000_000) {
        let amount = Decimal::new(cents, 2);
        let formatted = format_kz(amount);
        let body = formatted.strip_prefix("Kz ").unwrap();
        let (units, _) = body.rsplit_once(',').unwrap();

        let reassembled: String = units.chars().filter(|c| *c != '.').collect();
        prop_assert_eq!(reassembled, (cents / 100).to_string());
    }
}
