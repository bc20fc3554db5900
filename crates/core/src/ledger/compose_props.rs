//! Property-based tests for default entry composition.

use bokforing_shared::types::AccountCode;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::compose::compose_default_entries;
use super::entry::EntryType;
use super::types::{FlowDirection, TransactionContext};
use super::validation::validate;
use crate::vat::VatRate;

/// Strategy for non-negative öre amounts up to 1,000,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Non-negative amounts anywhere in the decimal range, mixed with ordinary ones.
fn any_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        amount(),
        (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
            .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale)),
        Just(Decimal::MAX),
    ]
}

fn direction_strategy() -> impl Strategy<Value = FlowDirection> {
    prop_oneof![Just(FlowDirection::Incoming), Just(FlowDirection::Outgoing)]
}

fn account_strategy() -> impl Strategy<Value = Option<AccountCode>> {
    prop_oneof![
        Just(None),
        Just(Some(AccountCode::from_static("5410"))),
        Just(Some(AccountCode::from_static("6991"))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Consistent amounts (gross = net + tax) always compose a balanced draft.
    #[test]
    fn prop_consistent_amounts_balance(
        net in amount(),
        tax in amount(),
        direction in direction_strategy(),
        account in account_strategy(),
    ) {
        prop_assume!(net > Decimal::ZERO);
        let ctx = TransactionContext {
            gross: net + tax,
            net,
            tax,
            suggested_account: account,
            direction,
            ..TransactionContext::default()
        };
        let lines = compose_default_entries(&ctx);
        let summary = validate(&lines);
        prop_assert_eq!(summary.total_debit, summary.total_credit);
        prop_assert!(summary.balanced);
    }

    /// Reverse charge always balances when gross and tax are present.
    #[test]
    fn prop_reverse_charge_balances(gross in amount(), tax in amount()) {
        let ctx = TransactionContext::purchase(gross, Decimal::ZERO, tax).with_reverse_charge();
        let lines = compose_default_entries(&ctx);
        let summary = validate(&lines);
        prop_assert_eq!(summary.diff, Decimal::ZERO);
        prop_assert!(lines.len() <= 4);
    }

    /// No composed line ever carries a zero or negative amount.
    #[test]
    fn prop_no_zero_lines(
        gross in amount(),
        net in amount(),
        tax in amount(),
        reverse_charge in any::<bool>(),
        direction in direction_strategy(),
    ) {
        let ctx = TransactionContext {
            gross,
            net,
            tax,
            direction,
            reverse_charge,
            ..TransactionContext::default()
        };
        for line in compose_default_entries(&ctx) {
            prop_assert!(line.side().is_some());
            prop_assert!(!line.has_negative_amount());
        }
    }

    /// Gross-only input with an explicit rate is split into a balanced draft.
    #[test]
    fn prop_gross_only_split_balances(
        gross in amount(),
        rate in prop_oneof![Just(VatRate::Standard), Just(VatRate::Reduced), Just(VatRate::Low)],
        direction in direction_strategy(),
    ) {
        prop_assume!(gross > Decimal::ZERO);
        let ctx = TransactionContext {
            gross,
            direction,
            vat_rate: Some(rate),
            ..TransactionContext::default()
        };
        let lines = compose_default_entries(&ctx);
        prop_assert!(validate(&lines).balanced);

        let settlement = lines.last().expect("settlement line");
        let expected_side = match direction {
            FlowDirection::Incoming => EntryType::Credit,
            FlowDirection::Outgoing => EntryType::Debit,
        };
        prop_assert_eq!(settlement.side(), Some(expected_side));
    }

    /// Out-of-range inputs never panic, never produce negative lines, and
    /// any balanced result is balanced within one öre.
    #[test]
    fn prop_extreme_inputs_checked(
        gross in any_amount(),
        net in any_amount(),
        tax in any_amount(),
        reverse_charge in any::<bool>(),
        direction in direction_strategy(),
        rate in prop_oneof![Just(None), Just(Some(VatRate::Standard)), Just(Some(VatRate::Low))],
    ) {
        let ctx = TransactionContext {
            gross,
            net,
            tax,
            direction,
            reverse_charge,
            vat_rate: rate,
            ..TransactionContext::default()
        };
        let lines = compose_default_entries(&ctx);
        for line in &lines {
            prop_assert!(!line.has_negative_amount());
        }
        let summary = validate(&lines);
        if summary.balanced {
            prop_assert!(summary.diff.abs() < Decimal::new(1, 2));
        }
    }
}
