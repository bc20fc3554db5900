//! Property-based tests for VAT splitting.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::rate::VatRate;
use super::split::split_vat;
use crate::ledger::FlowDirection;

fn gross_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn rate_strategy() -> impl Strategy<Value = VatRate> {
    prop_oneof![
        Just(VatRate::Standard),
        Just(VatRate::Reduced),
        Just(VatRate::Low),
        (0i64..=50i64).prop_map(|p| VatRate::Other(Decimal::from(p))),
    ]
}

fn direction_strategy() -> impl Strategy<Value = FlowDirection> {
    prop_oneof![Just(FlowDirection::Incoming), Just(FlowDirection::Outgoing)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// VAT and base always add back up to the gross amount.
    #[test]
    fn prop_split_is_exact(
        amount in gross_amount(),
        rate in rate_strategy(),
        direction in direction_strategy(),
    ) {
        let split = split_vat(amount, rate, direction).unwrap();
        prop_assert_eq!(split.vat_amount + split.base_amount, amount);
        prop_assert!(split.vat_amount >= Decimal::ZERO);
        prop_assert!(split.base_amount >= Decimal::ZERO);
        prop_assert!(split.vat_amount.scale() <= 2);
    }

    /// The account depends only on direction and tier.
    #[test]
    fn prop_account_matches_direction(
        amount in gross_amount(),
        rate in rate_strategy(),
    ) {
        let incoming = split_vat(amount, rate, FlowDirection::Incoming).unwrap();
        let outgoing = split_vat(amount, rate, FlowDirection::Outgoing).unwrap();
        prop_assert!(incoming.vat_account.as_str().starts_with("264"));
        prop_assert!(outgoing.vat_account.as_str().starts_with("261"));
        prop_assert_eq!(incoming.vat_amount, outgoing.vat_amount);
    }
}
