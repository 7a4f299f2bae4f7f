// Property-based tests for document aggregation
//
// Properties tested:
// 1. Splitting the rows into two groups and combining the group totals gives
//    the same totals as aggregating everything at once
// 2. Row order does not change the totals
// 3. The grand total never subtracts the discount a second time

use facturador::invoices::{DocumentTotals, LineItem, LineItemResult};
use facturador::{compute_document_totals, compute_line_item};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn arb_line() -> impl Strategy<Value = LineItemResult> {
    (
        1i64..=50_000,
        0i64..=50_000_000,
        0i64..=100,
        prop_oneof![Just(0i64), Just(5), Just(19)],
        prop_oneof![Just(0i64), Just(4), Just(8)],
        any::<bool>(),
    )
        .prop_map(|(quantity, price, discount, iva, ico, exempt)| {
            compute_line_item(
                &LineItem::new(Decimal::new(quantity, 2), Decimal::new(price, 2))
                    .with_discount(Decimal::from(discount))
                    .with_tax(Decimal::from(iva))
                    .with_secondary_tax(Decimal::from(ico))
                    .exempt(exempt),
            )
        })
}

proptest! {
    #[test]
    fn test_aggregation_is_additive(
        lines in prop::collection::vec(arb_line(), 0..20),
        split in 0usize..20,
    ) {
        let split = split.min(lines.len());
        let (first, second) = lines.split_at(split);

        let whole = compute_document_totals(&lines);
        let combined = compute_document_totals(first)
            .combine(&compute_document_totals(second))
            .expect("sums stay in range");

        prop_assert_eq!(whole, combined);
    }

    #[test]
    fn test_order_independent(lines in prop::collection::vec(arb_line(), 0..20)) {
        let mut reversed = lines.clone();
        reversed.reverse();
        prop_assert_eq!(compute_document_totals(&lines), compute_document_totals(&reversed));
    }

    #[test]
    fn test_grand_total_matches_line_totals(lines in prop::collection::vec(arb_line(), 0..20)) {
        let totals = compute_document_totals(&lines);
        let sum_of_lines: Decimal = lines.iter().map(|line| line.line_total).sum();

        prop_assert_eq!(
            totals.grand_total,
            totals.subtotal + totals.total_primary_tax + totals.total_secondary_tax
        );
        prop_assert_eq!(totals.grand_total, sum_of_lines);
    }
}

#[test]
fn test_two_row_document() {
    let first = LineItemResult {
        discount_amount: Decimal::ZERO,
        taxable_base: dec!(180000),
        primary_tax_amount: dec!(34200),
        secondary_tax_amount: Decimal::ZERO,
        line_total: dec!(214200),
    };
    let second = LineItemResult {
        discount_amount: Decimal::ZERO,
        taxable_base: dec!(50000),
        primary_tax_amount: dec!(9500),
        secondary_tax_amount: Decimal::ZERO,
        line_total: dec!(59500),
    };

    let totals = compute_document_totals(&[first, second]);
    assert_eq!(totals.subtotal, dec!(230000));
    assert_eq!(totals.total_primary_tax, dec!(43700));
    assert_eq!(totals.grand_total, dec!(273700));
}

#[test]
fn test_empty_document() {
    assert_eq!(compute_document_totals(&[]), DocumentTotals::default());
}

#[test]
fn test_discount_counted_once() {
    let row = compute_line_item(
        &LineItem::new(dec!(2), dec!(100000))
            .with_discount(dec!(10))
            .with_tax(dec!(19)),
    );
    let totals = compute_document_totals(&[row]);

    assert_eq!(totals.total_discount, dec!(20000));
    assert_eq!(totals.subtotal, dec!(180000));
    assert_eq!(totals.grand_total, dec!(214200));
}

#[test]
fn test_duplicate_rows_sum() {
    let row = compute_line_item(&LineItem::new(dec!(3), dec!(333.33)));
    let totals = compute_document_totals(&[row, row]);

    assert_eq!(totals.subtotal, dec!(1999.98));
    assert_eq!(totals.total_primary_tax, dec!(380.00));
    assert_eq!(totals.grand_total, dec!(2379.98));
}
