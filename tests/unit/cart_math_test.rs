// Property-based tests for cart arithmetic: line totals, the fixed 14% IVA,
// and the subtotal/tax/total identity.

use botica::core::currency;
use botica::modules::catalog::models::Product;
use botica::modules::pos::models::Cart;
use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn product(id: &str, price_cents: i64, stock: i32) -> Product {
    Product {
        id: id.to_string(),
        code: format!("P-{}", id),
        name: format!("Product {}", id),
        unit_price: Decimal::new(price_cents, 2),
        stock_quantity: stock,
        min_stock: 0,
        requires_prescription: false,
        category_id: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_worked_example_totals() {
    // subtotal 7300 → tax 1022 → total 8322
    let mut cart = Cart::new();
    cart.add_item(&product("1", 730_000, 10), 1).unwrap();

    assert_eq!(cart.subtotal(), Decimal::from(7300));
    assert_eq!(cart.tax(), Decimal::from(1022));
    assert_eq!(cart.total(), Decimal::from(8322));
}

#[test]
fn test_empty_cart_is_all_zero() {
    let cart = Cart::new();
    assert_eq!(cart.subtotal(), Decimal::ZERO);
    assert_eq!(cart.tax(), Decimal::ZERO);
    assert_eq!(cart.total(), Decimal::ZERO);
}

proptest! {
    /// Subtotal is the sum of quantity × unit price over all lines
    #[test]
    fn prop_subtotal_is_sum_of_line_totals(
        price_cents in 1i64..=5_000_000,
        qty_a in 1i32..=50,
        qty_b in 1i32..=50,
    ) {
        let a = product("a", price_cents, 1000);
        let b = product("b", price_cents * 2, 1000);

        let mut cart = Cart::new();
        cart.add_item(&a, qty_a).unwrap();
        cart.add_item(&b, qty_b).unwrap();

        let expected = currency::round_kz(a.unit_price * Decimal::from(qty_a))
            + currency::round_kz(b.unit_price * Decimal::from(qty_b));
        prop_assert_eq!(cart.subtotal(), expected);
    }

    /// tax = round₂(subtotal × 0.14) and total = subtotal + tax
    #[test]
    fn prop_tax_identity(price_cents in 1i64..=5_000_000, qty in 1i32..=100) {
        let p = product("a", price_cents, 1000);

        let mut cart = Cart::new();
        cart.add_item(&p, qty).unwrap();

        let subtotal = cart.subtotal();
        prop_assert_eq!(cart.tax(), currency::round_kz(subtotal * Decimal::new(14, 2)));
        prop_assert_eq!(cart.total(), subtotal + cart.tax());
    }

    /// Adding then removing a line restores the previous totals
    #[test]
    fn prop_remove_restores_subtotal(
        price_cents in 1i64..=1_000_000,
        qty in 1i32..=20,
    ) {
        let a = product("a", price_cents, 1000);
        let b = product("b", 999, 1000);

        let mut cart = Cart::new();
        cart.add_item(&a, qty).unwrap();
        let before = cart.subtotal();

        cart.add_item(&b, 3).unwrap();
        cart.remove_item(&b.id).unwrap();

        prop_assert_eq!(cart.subtotal(), before);
    }

    /// The stock ceiling holds no matter how adds are split up
    #[test]
    fn prop_stock_ceiling(stock in 1i32..=30, first in 1i32..=30, second in 1i32..=30) {
        let p = product("a", 1000, stock);
        let mut cart = Cart::new();

        let first_ok = cart.add_item(&p, first).is_ok();
        prop_assert_eq!(first_ok, first <= stock);

        if first_ok {
            let second_ok = cart.add_item(&p, second).is_ok();
            prop_assert_eq!(second_ok, first + second <= stock);
        }

        let in_cart = cart.items.first().map(|i| i.quantity).unwrap_or(0);
        prop_assert!(in_cart <= stock);
    }
}
