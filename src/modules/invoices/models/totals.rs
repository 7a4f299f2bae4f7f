use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::LineItemResult;
use crate::core::{round2, Currency};

/// Document-level sums over the included rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Sum of taxable bases (discount already netted out)
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub subtotal: Decimal,

    /// Informational; never subtracted from the grand total
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_discount: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_primary_tax: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_secondary_tax: Decimal,

    /// subtotal + total_primary_tax + total_secondary_tax, rounded to cents
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub grand_total: Decimal,
}

impl DocumentTotals {
    /// Adds one row's amounts. `None` when the running sums leave the decimal range.
    pub(crate) fn checked_add_line(&self, line: &LineItemResult) -> Option<Self> {
        Self::from_sums(
            self.subtotal.checked_add(line.taxable_base)?,
            self.total_discount.checked_add(line.discount_amount)?,
            self.total_primary_tax.checked_add(line.primary_tax_amount)?,
            self.total_secondary_tax.checked_add(line.secondary_tax_amount)?,
        )
    }

    fn from_sums(
        subtotal: Decimal,
        total_discount: Decimal,
        total_primary_tax: Decimal,
        total_secondary_tax: Decimal,
    ) -> Option<Self> {
        let grand_total = round2(
            subtotal
                .checked_add(total_primary_tax)?
                .checked_add(total_secondary_tax)?,
        );

        Some(Self {
            subtotal,
            total_discount,
            total_primary_tax,
            total_secondary_tax,
            grand_total,
        })
    }

    /// Field-wise sum of two partial totals, e.g. totals of two groups of rows.
    ///
    /// Returns `None` if a sum overflows.
    pub fn combine(&self, other: &Self) -> Option<Self> {
        Self::from_sums(
            self.subtotal.checked_add(other.subtotal)?,
            self.total_discount.checked_add(other.total_discount)?,
            self.total_primary_tax.checked_add(other.total_primary_tax)?,
            self.total_secondary_tax.checked_add(other.total_secondary_tax)?,
        )
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Display strings for the totals panel
    pub fn formatted(&self, currency: Currency) -> FormattedTotals {
        FormattedTotals {
            subtotal: currency.format_amount(self.subtotal),
            total_discount: currency.format_amount(self.total_discount),
            total_primary_tax: currency.format_amount(self.total_primary_tax),
            total_secondary_tax: currency.format_amount(self.total_secondary_tax),
            grand_total: currency.format_amount(self.grand_total),
        }
    }
}

/// Per-row results (in row order) plus the document totals derived from them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentCalculation {
    pub lines: Vec<LineItemResult>,
    pub totals: DocumentTotals,
}

/// Locale-formatted totals; presentation only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub total_discount: String,
    pub total_primary_tax: String,
    pub total_secondary_tax: String,
    pub grand_total: String,
}
