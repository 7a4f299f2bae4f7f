// Property-based tests for the line-item calculator
//
// Properties tested:
// 1. No computed amount is ever negative, whatever the inputs
// 2. Same input, same output
// 3. An exempt row never carries IVA, and its ICO is unaffected
// 4. Every amount has at most 2 decimal places
// 5. line_total = taxable_base + IVA + ICO exactly

use facturador::compute_line_item;
use facturador::invoices::{LineItem, LineItemResult};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn arb_line_item() -> impl Strategy<Value = LineItem> {
    (
        1i64..=100_000,        // quantity in hundredths
        0i64..=1_000_000_000,  // unit price in cents
        0i64..=10_000,         // discount in hundredths of a percent
        0i64..=3_000,          // IVA in hundredths of a percent
        0i64..=2_000,          // ICO in hundredths of a percent
        any::<bool>(),
    )
        .prop_map(|(quantity, price, discount, iva, ico, exempt)| {
            LineItem::new(cents(quantity), cents(price))
                .with_discount(cents(discount))
                .with_tax(cents(iva))
                .with_secondary_tax(cents(ico))
                .exempt(exempt)
        })
}

fn amounts(result: &LineItemResult) -> [Decimal; 5] {
    [
        result.discount_amount,
        result.taxable_base,
        result.primary_tax_amount,
        result.secondary_tax_amount,
        result.line_total,
    ]
}

proptest! {
    #[test]
    fn test_amounts_are_never_negative(item in arb_line_item()) {
        let result = compute_line_item(&item);
        for amount in amounts(&result) {
            prop_assert!(amount >= Decimal::ZERO, "negative amount {} for {:?}", amount, item);
        }
    }

    #[test]
    fn test_garbage_inputs_never_negative(
        quantity in -1_000_000i64..=1_000_000,
        price in -1_000_000i64..=1_000_000,
        discount in -500i64..=500,
        iva in -100i64..=100,
    ) {
        let item = LineItem::new(Decimal::from(quantity), Decimal::from(price))
            .with_discount(Decimal::from(discount))
            .with_tax(Decimal::from(iva));
        let result = compute_line_item(&item);
        for amount in amounts(&result) {
            prop_assert!(amount >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_calculation_is_deterministic(item in arb_line_item()) {
        prop_assert_eq!(compute_line_item(&item), compute_line_item(&item));
    }

    #[test]
    fn test_exempt_rows_carry_no_iva(item in arb_line_item()) {
        let exempt = compute_line_item(&item.clone().exempt(true));
        let taxed = compute_line_item(&item.exempt(false));

        prop_assert_eq!(exempt.primary_tax_amount, Decimal::ZERO);
        prop_assert_eq!(exempt.secondary_tax_amount, taxed.secondary_tax_amount);
        prop_assert_eq!(exempt.taxable_base, taxed.taxable_base);
    }

    #[test]
    fn test_amounts_are_cent_rounded(item in arb_line_item()) {
        let result = compute_line_item(&item);
        for amount in amounts(&result) {
            prop_assert!(amount.scale() <= 2, "{} has more than 2 decimals", amount);
        }
    }

    #[test]
    fn test_line_total_is_sum_of_parts(item in arb_line_item()) {
        let result = compute_line_item(&item);
        prop_assert_eq!(
            result.line_total,
            result.taxable_base + result.primary_tax_amount + result.secondary_tax_amount
        );
    }

    #[test]
    fn test_discount_never_exceeds_gross(item in arb_line_item()) {
        let result = compute_line_item(&item);
        let gross = item.quantity * item.unit_price;
        // The discount is a rounded share of gross, so it can exceed it by at most half a cent
        prop_assert!(result.discount_amount <= gross + dec!(0.005));
    }
}

#[test]
fn test_discounted_row() {
    let item = LineItem::new(dec!(2), dec!(100000))
        .with_discount(dec!(10))
        .with_tax(dec!(19));
    let result = compute_line_item(&item);

    assert_eq!(result.discount_amount, dec!(20000));
    assert_eq!(result.taxable_base, dec!(180000));
    assert_eq!(result.primary_tax_amount, dec!(34200));
    assert_eq!(result.secondary_tax_amount, Decimal::ZERO);
    assert_eq!(result.line_total, dec!(214200));
}

#[test]
fn test_discounted_exempt_row() {
    let item = LineItem::new(dec!(2), dec!(100000))
        .with_discount(dec!(10))
        .with_tax(dec!(19))
        .exempt(true);
    let result = compute_line_item(&item);

    assert_eq!(result.primary_tax_amount, Decimal::ZERO);
    assert_eq!(result.line_total, dec!(180000));
}

#[test]
fn test_free_row_is_zero() {
    let result = compute_line_item(&LineItem::new(dec!(1), Decimal::ZERO));
    assert_eq!(result, LineItemResult::default());
}

#[test]
fn test_zero_quantity_is_zero() {
    let result = compute_line_item(&LineItem::new(Decimal::ZERO, dec!(5000)));
    assert_eq!(result, LineItemResult::default());
}

#[test]
fn test_rounding_at_each_step() {
    let item = LineItem::new(dec!(3), dec!(333.33)).with_tax(dec!(19));
    let result = compute_line_item(&item);

    assert_eq!(result.taxable_base, dec!(999.99));
    // 999.99 * 0.19 = 189.9981
    assert_eq!(result.primary_tax_amount, dec!(190.00));
    assert_eq!(result.line_total, dec!(1189.99));
}

#[test]
fn test_half_cent_rounds_up() {
    // 0.05 * 10% = 0.005
    let item = LineItem::new(dec!(1), dec!(0.05))
        .with_discount(Decimal::ZERO)
        .with_tax(dec!(10));
    let result = compute_line_item(&item);
    assert_eq!(result.primary_tax_amount, dec!(0.01));
}

#[test]
fn test_ico_on_discounted_base() {
    let item = LineItem::new(dec!(4), dec!(25000))
        .with_discount(dec!(5))
        .with_tax(dec!(19))
        .with_secondary_tax(dec!(8));
    let result = compute_line_item(&item);

    assert_eq!(result.discount_amount, dec!(5000));
    assert_eq!(result.taxable_base, dec!(95000));
    assert_eq!(result.primary_tax_amount, dec!(18050));
    assert_eq!(result.secondary_tax_amount, dec!(7600));
    assert_eq!(result.line_total, dec!(120650));
}
