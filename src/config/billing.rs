use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::core::{AppError, Currency, Result};

/// Defaults applied when a row or product leaves a field out
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// IVA percentage used when a product does not carry its own
    pub default_tax_percent: Decimal,
    /// ICO percentage used when a product applies ICO without a rate
    pub default_secondary_tax_percent: Decimal,
    pub currency: Currency,
    /// Minimum length of a credit note's correction reason
    pub credit_note_min_reason_length: usize,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            default_tax_percent: Decimal::from(19),
            default_secondary_tax_percent: Decimal::ZERO,
            currency: Currency::COP,
            credit_note_min_reason_length: 10,
        }
    }
}

impl BillingConfig {
    /// Build from a variable lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_tax_percent = match lookup("DEFAULT_IVA_PERCENT") {
            Some(raw) => Decimal::from_str(raw.trim())
                .map_err(|_| AppError::configuration("Invalid DEFAULT_IVA_PERCENT"))?,
            None => defaults.default_tax_percent,
        };

        let default_secondary_tax_percent = match lookup("DEFAULT_ICO_PERCENT") {
            Some(raw) => Decimal::from_str(raw.trim())
                .map_err(|_| AppError::configuration("Invalid DEFAULT_ICO_PERCENT"))?,
            None => defaults.default_secondary_tax_percent,
        };

        let currency = match lookup("CURRENCY") {
            Some(raw) => raw.parse().map_err(AppError::Configuration)?,
            None => defaults.currency,
        };

        let credit_note_min_reason_length = match lookup("CREDIT_NOTE_MIN_REASON_LENGTH") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::configuration("Invalid CREDIT_NOTE_MIN_REASON_LENGTH")
            })?,
            None => defaults.credit_note_min_reason_length,
        };

        Ok(Self {
            default_tax_percent,
            default_secondary_tax_percent,
            currency,
            credit_note_min_reason_length,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_tax_percent < Decimal::ZERO
            || self.default_tax_percent > Decimal::ONE_HUNDRED
        {
            return Err(AppError::configuration(
                "DEFAULT_IVA_PERCENT must be between 0 and 100",
            ));
        }

        if self.default_secondary_tax_percent < Decimal::ZERO {
            return Err(AppError::configuration(
                "DEFAULT_ICO_PERCENT cannot be negative",
            ));
        }

        if self.credit_note_min_reason_length == 0 {
            return Err(AppError::configuration(
                "CREDIT_NOTE_MIN_REASON_LENGTH must be greater than 0",
            ));
        }

        Ok(())
    }
}
