use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fractional digits carried by every computed monetary value
pub const MONEY_SCALE: u32 = 2;

/// Rounds to cents, exact halves away from zero (0.005 -> 0.01, -0.005 -> -0.01)
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Supported currencies with their display rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Colombian Peso (shown without decimals)
    #[default]
    COP,
    /// US Dollar (2 decimal places)
    USD,
}

impl Currency {
    /// Returns the internal decimal scale for this currency.
    /// Both currencies compute in cents even when COP is displayed whole.
    pub fn scale(&self) -> u32 {
        MONEY_SCALE
    }

    /// Fraction digits shown to the user
    /// - COP: 0
    /// - USD: 2
    pub fn display_scale(&self) -> u32 {
        match self {
            Currency::COP => 0,
            Currency::USD => 2,
        }
    }

    /// Rounds a decimal value to the internal scale for this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale(), RoundingStrategy::MidpointAwayFromZero)
    }

    fn symbol(&self) -> &'static str {
        match self {
            Currency::COP => "$",
            Currency::USD => "US$",
        }
    }

    /// (thousands, decimal) separators
    fn separators(&self) -> (char, char) {
        match self {
            Currency::COP => ('.', ','),
            Currency::USD => (',', '.'),
        }
    }

    /// Formats an amount for display, e.g. `$ 214.200` for COP.
    ///
    /// Presentation only: the returned string must never be parsed back into a
    /// calculation input.
    pub fn format_amount(&self, amount: Decimal) -> String {
        let scale = self.display_scale();
        let rounded =
            amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        let (group_sep, decimal_sep) = self.separators();

        let digits = format!("{:.width$}", rounded.abs(), width = scale as usize);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(group_sep);
            }
            grouped.push(ch);
        }
        if let Some(frac) = frac_part {
            grouped.push(decimal_sep);
            grouped.push_str(frac);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{} {}", sign, self.symbol(), grouped)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::COP => write!(f, "COP"),
            Currency::USD => write!(f, "USD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "COP" => Ok(Currency::COP),
            "USD" => Ok(Currency::USD),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}
