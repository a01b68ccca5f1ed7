use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Decimal places for Angolan Kwanza amounts
pub const KWANZA_SCALE: u32 = 2;

/// IVA (value-added tax) rate applied to every sale: 14%
pub fn iva_rate() -> Decimal {
    Decimal::new(14, 2)
}

/// Rounds an amount to Kwanza scale (banker's rounding, 2 decimal places)
pub fn round_kz(amount: Decimal) -> Decimal {
    amount.round_dp(KWANZA_SCALE)
}

/// Computes the IVA amount for a subtotal, rounded to Kwanza scale
pub fn iva_amount(subtotal: Decimal) -> Decimal {
    round_kz(subtotal * iva_rate())
}

/// Validates that an amount is usable as money: non-negative with at most
/// two decimal places
pub fn validate_amount(amount: Decimal) -> Result<(), String> {
    if amount < Decimal::ZERO {
        return Err("amount cannot be negative".to_string());
    }

    if amount.scale() > KWANZA_SCALE {
        return Err(format!(
            "amounts must have at most {} decimal places, got {}",
            KWANZA_SCALE,
            amount.scale()
        ));
    }

    Ok(())
}

/// Formats an amount in the Kwanza display locale: `Kz` prefix, `.` as the
/// thousands separator, `,` as the decimal separator.
///
/// This lives at the document-model boundary only; computation and storage
/// always use plain `Decimal` values.
pub fn format_kz(amount: Decimal) -> String {
    let rounded = round_kz(amount);
    let negative = rounded.is_sign_negative();
    let abs = rounded.abs();

    let units = abs.trunc();
    let cents = ((abs - units) * Decimal::from(100))
        .to_u32()
        .unwrap_or(0);

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}Kz {},{:02}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iva_amount_matches_fixed_rate() {
        // 7300 × 0.14 = 1022
        assert_eq!(iva_amount(Decimal::from(7300)), Decimal::from(1022));
    }

    #[test]
    fn test_round_kz() {
        assert_eq!(round_kz(Decimal::new(102212, 3)), Decimal::new(10221, 2));
        // 10.225 rounds half-to-even to 10.22
        assert_eq!(round_kz(Decimal::new(10225, 3)), Decimal::new(1022, 2));
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Decimal::from(5000)).is_ok());
        assert!(validate_amount(Decimal::new(102250, 2)).is_ok());
        assert!(validate_amount(Decimal::from(-1)).is_err());
        assert!(validate_amount(Decimal::new(1001, 3)).is_err());
    }

    #[test]
    fn test_format_kz_grouping() {
        assert_eq!(format_kz(Decimal::from(8322)), "Kz 8.322,00");
        assert_eq!(format_kz(Decimal::new(123456750, 2)), "Kz 1.234.567,50");
        assert_eq!(format_kz(Decimal::ZERO), "Kz 0,00");
        assert_eq!(format_kz(Decimal::from(150)), "Kz 150,00");
    }

    #[test]
    fn test_format_kz_negative_difference() {
        assert_eq!(format_kz(Decimal::from(-200)), "-Kz 200,00");
    }
}
