use rust_decimal::Decimal;

use crate::core::numeric::{clamp, non_negative};
use crate::core::round2;
use crate::modules::invoices::models::{LineItem, LineItemResult};

/// Computes the amounts of one row.
///
/// Each step is rounded to cents before the next one uses it:
///
/// ```text
/// gross      = quantity * unit_price
/// discount   = round2(gross * discount% / 100)
/// base       = round2(gross - discount)
/// iva        = exempt ? 0 : round2(base * iva% / 100)
/// ico        = round2(base * ico% / 100)
/// line_total = round2(base + iva + ico)
/// ```
///
/// Never fails. Negative inputs count as zero, the discount is capped at 100%,
/// and a row whose arithmetic leaves the decimal range yields an all-zero result.
pub fn compute_line_item(item: &LineItem) -> LineItemResult {
    match try_compute(item) {
        Some(result) => result,
        None => {
            tracing::warn!(
                quantity = %item.quantity,
                unit_price = %item.unit_price,
                "Line item amounts overflow, treating row as zero"
            );
            LineItemResult::default()
        }
    }
}

fn percent_of(amount: Decimal, percent: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(percent)?
        .checked_div(Decimal::ONE_HUNDRED)
        .map(round2)
}

fn try_compute(item: &LineItem) -> Option<LineItemResult> {
    let quantity = non_negative(item.quantity);
    let unit_price = non_negative(item.unit_price);
    let discount_percent = clamp(item.discount_percent, Decimal::ZERO, Decimal::ONE_HUNDRED);
    let tax_percent = non_negative(item.tax_percent);
    let secondary_tax_percent = non_negative(item.secondary_tax_percent);

    let gross = quantity.checked_mul(unit_price)?;
    let discount_amount = percent_of(gross, discount_percent)?;
    // A fully discounted sub-cent gross can round the discount above it
    let taxable_base = non_negative(round2(gross.checked_sub(discount_amount)?));

    let primary_tax_amount = if item.is_tax_exempt {
        Decimal::ZERO
    } else {
        percent_of(taxable_base, tax_percent)?
    };
    let secondary_tax_amount = percent_of(taxable_base, secondary_tax_percent)?;

    let line_total = round2(
        taxable_base
            .checked_add(primary_tax_amount)?
            .checked_add(secondary_tax_amount)?,
    );

    Some(LineItemResult {
        discount_amount,
        taxable_base,
        primary_tax_amount,
        secondary_tax_amount,
        line_total,
    })
}
