//! Property-based tests for amount parsing and formatting.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::amount::{format_amount, parse_amount, round_amount};

/// Strategy for amounts with up to four decimals, positive and negative.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000_000i64..100_000_000_000i64).prop_map(|units| Decimal::new(units, 4))
}

/// Strategy for amounts already at öre precision.
fn cent_amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000_000i64..10_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Parsing the formatted text gives back the amount rounded to öre.
    #[test]
    fn prop_format_then_parse_rounds(amount in any_amount()) {
        prop_assert_eq!(parse_amount(&format_amount(amount)), round_amount(amount));
    }

    /// Amounts with two decimals survive formatting unchanged.
    #[test]
    fn prop_cent_amounts_round_trip(amount in cent_amount()) {
        prop_assert_eq!(parse_amount(&format_amount(amount)), amount);
    }

    /// Formatted text always ends with a comma and exactly two digits.
    #[test]
    fn prop_format_has_two_decimals(amount in any_amount()) {
        let text = format_amount(amount);
        let (_, fraction) = text.rsplit_once(',').expect("comma separator");
        prop_assert_eq!(fraction.len(), 2);
        prop_assert!(!text.contains('.'));
    }
}
