//! Parse-and-default-to-zero boundary for numeric form fields.
//!
//! Drafts arrive from forms where a field may hold a number, a numeric string,
//! an empty string or nothing at all. Everything that is not a readable number
//! becomes zero here, so the calculator only ever sees `Decimal`s.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Parses a user-typed number, returning zero for anything unreadable.
///
/// Accepts surrounding whitespace, a comma decimal separator when no dot is
/// present (`"12,5"`), and scientific notation (`"1e3"`).
pub fn parse_lenient(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .unwrap_or(Decimal::ZERO)
}

/// Coerces an arbitrary JSON value into a decimal.
///
/// Numbers keep their exact textual value, strings go through
/// [`parse_lenient`], and every other kind of value is zero.
pub fn coerce(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_lenient(&n.to_string()),
        Value::String(s) => parse_lenient(s),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => Decimal::ZERO,
    }
}

/// Serde adapter: `#[serde(deserialize_with = "deserialize_lenient")]`
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce(&value))
}

/// Like [`deserialize_lenient`], but an explicit `null` stays `None`
pub fn deserialize_lenient_option<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(coerce(&other)),
    })
}

/// Clamps a value into `[min, max]`
pub fn clamp(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    value.max(min).min(max)
}

/// Negative values become zero
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
