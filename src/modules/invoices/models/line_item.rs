// LineItem model: the calculator's input row and its computed result.
//
// A line item is edited transiently (every keystroke re-runs the calculator);
// the result is written back onto the row for display and for the outbound
// payload. Nothing here is persisted by this crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::numeric::deserialize_lenient;

/// IVA percentage applied when a row does not say otherwise
pub const DEFAULT_TAX_PERCENT: u32 = 19;

pub(crate) fn default_tax_percent() -> Decimal {
    Decimal::from(DEFAULT_TAX_PERCENT)
}

/// Inputs of one invoice or credit-note row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub quantity: Decimal,

    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub unit_price: Decimal,

    /// 0-100
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub discount_percent: Decimal,

    /// Primary (IVA) rate
    #[serde(default = "default_tax_percent", deserialize_with = "deserialize_lenient")]
    pub tax_percent: Decimal,

    /// Secondary (ICO) rate, charged on the same base as IVA
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub secondary_tax_percent: Decimal,

    /// Forces IVA to zero. ICO is still charged.
    #[serde(default)]
    pub is_tax_exempt: bool,
}

impl LineItem {
    /// A row with no discount, the default IVA rate and no ICO
    pub fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            discount_percent: Decimal::ZERO,
            tax_percent: default_tax_percent(),
            secondary_tax_percent: Decimal::ZERO,
            is_tax_exempt: false,
        }
    }

    pub fn with_discount(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }

    pub fn with_tax(mut self, percent: Decimal) -> Self {
        self.tax_percent = percent;
        self
    }

    pub fn with_secondary_tax(mut self, percent: Decimal) -> Self {
        self.secondary_tax_percent = percent;
        self
    }

    pub fn exempt(mut self, is_tax_exempt: bool) -> Self {
        self.is_tax_exempt = is_tax_exempt;
        self
    }
}

/// Computed amounts of one row, each rounded to cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemResult {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub discount_amount: Decimal,

    /// Gross minus discount; the base both taxes are computed on
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub taxable_base: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub primary_tax_amount: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub secondary_tax_amount: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub line_total: Decimal,
}
