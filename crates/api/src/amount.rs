//! Amount fields as they arrive from forms.
//!
//! Amounts may be sent as JSON numbers or as text in Swedish notation
//! (`"1 250,00"`). Text goes through [`parse_amount`], so blank or
//! unparsable text becomes zero.

use bokforing_shared::types::{format_amount, parse_amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(Decimal),
}

impl RawAmount {
    fn into_decimal(self) -> Decimal {
        match self {
            Self::Text(text) => parse_amount(&text),
            Self::Number(number) => number,
        }
    }
}

/// Deserializes a required amount.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    RawAmount::deserialize(deserializer).map(RawAmount::into_decimal)
}

/// Deserializes an amount where `null` means zero.
pub fn deserialize_amount_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawAmount>::deserialize(deserializer)
        .map(|raw| raw.map_or(Decimal::ZERO, RawAmount::into_decimal))
}

/// Display text for an amount column; zero renders as an empty cell.
#[must_use]
pub fn display_amount(amount: Decimal) -> String {
    if amount.is_zero() {
        String::new()
    } else {
        format_amount(amount)
    }
}
