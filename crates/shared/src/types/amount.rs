//! Amount normalization between Swedish display notation and decimals.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` internally and only become text at the
//! UI boundary, where the locale uses a space as thousands separator and a
//! comma as decimal separator (`"1 234,50"`).

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Number of decimal places for posted amounts (öre).
pub const AMOUNT_DECIMALS: u32 = 2;

/// Rounds an amount to two decimal places, half away from zero.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Parses a locale-formatted amount.
///
/// All whitespace (including non-breaking spaces used as thousands
/// separators) is removed and the first comma becomes the decimal point.
/// Blank or unparsable text yields zero: an empty form field means
/// "no value", never an error.
///
/// ```
/// use bokforing_shared::types::parse_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_amount("1 234,50"), dec!(1234.50));
/// assert_eq!(parse_amount("abc"), dec!(0));
/// ```
#[must_use]
pub fn parse_amount(text: &str) -> Decimal {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    let cleaned = cleaned.replacen(',', ".", 1);
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Formats an amount with exactly two decimals, a comma as decimal
/// separator and a space between every group of three integer digits.
///
/// ```
/// use bokforing_shared::types::format_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(dec!(1234.5)), "1 234,50");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_amount(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut magnitude = rounded.abs();
    magnitude.rescale(AMOUNT_DECIMALS);
    let text = magnitude.to_string();
    let (integer_part, fraction_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::with_capacity(text.len() + integer_part.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    let len = integer_part.len();
    for (i, digit) in integer_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(digit);
    }
    out.push(',');
    out.push_str(fraction_part);
    out
}

/// Formats an optional amount; a missing value renders as an empty string.
#[must_use]
pub fn format_optional_amount(amount: Option<Decimal>) -> String {
    amount.map(format_amount).unwrap_or_default()
}
