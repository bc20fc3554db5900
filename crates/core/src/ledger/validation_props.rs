//! Property-based tests for balance validation.

use bokforing_shared::types::AccountCode;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::{EntryType, LedgerLine};
use super::types::VoucherDraft;
use super::validation::{BalancePolicy, validate};
use super::LedgerError;

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    // Generate amounts from 0.01 to 1,000,000.00
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Non-negative amounts anywhere in the decimal range, at any scale.
fn large_amount() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale))
}

fn any_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![positive_amount(), large_amount(), Just(Decimal::MAX)]
}

fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

fn make_line(side: EntryType, amount: Decimal) -> LedgerLine {
    LedgerLine::new(AccountCode::from_static("1930"), side, amount)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Mirrored lines always balance and are postable.
    #[test]
    fn prop_mirrored_lines_balance(amounts in prop::collection::vec(positive_amount(), 1..8)) {
        let mut lines = Vec::new();
        for amount in &amounts {
            lines.push(make_line(EntryType::Debit, *amount));
        }
        let total: Decimal = amounts.iter().sum();
        lines.push(make_line(EntryType::Credit, total));

        let summary = validate(&lines);
        prop_assert_eq!(summary.total_debit, total);
        prop_assert_eq!(summary.diff, Decimal::ZERO);
        prop_assert!(summary.balanced);

        let policy = BalancePolicy::default();
        let draft = VoucherDraft::from_lines(lines, &policy);
        prop_assert!(draft.ensure_postable(&policy).is_ok());
    }

    /// Any difference of at least one öre is out of balance.
    #[test]
    fn prop_any_cent_difference_rejected(
        amount in positive_amount(),
        offset in positive_amount(),
    ) {
        let lines = vec![
            make_line(EntryType::Debit, amount + offset),
            make_line(EntryType::Credit, amount),
        ];
        let summary = validate(&lines);
        prop_assert_eq!(summary.diff, offset);
        prop_assert!(!summary.balanced);

        let policy = BalancePolicy::default();
        let draft = VoucherDraft::from_lines(lines, &policy);
        prop_assert!(
            matches!(draft.ensure_postable(&policy), Err(LedgerError::OutOfBalance { .. })),
            "difference should be refused"
        );
    }

    /// A single line is never postable.
    #[test]
    fn prop_single_line_incomplete(side in entry_type_strategy(), amount in positive_amount()) {
        let policy = BalancePolicy::default();
        let draft = VoucherDraft::from_lines(vec![make_line(side, amount)], &policy);
        prop_assert!(!draft.balanced);
        prop_assert_eq!(
            draft.ensure_postable(&policy),
            Err(LedgerError::IncompleteVoucher { lines: 1, required: 2 })
        );
    }

    /// Totals do not depend on line order.
    #[test]
    fn prop_order_independent(
        amounts in prop::collection::vec((entry_type_strategy(), positive_amount()), 0..10),
    ) {
        let lines: Vec<LedgerLine> = amounts.iter().map(|(s, a)| make_line(*s, *a)).collect();
        let mut reversed = lines.clone();
        reversed.reverse();
        prop_assert_eq!(validate(&lines), validate(&reversed));
    }

    /// Extreme amounts never panic, and a balanced verdict always means the
    /// exact difference is inside the tolerance.
    #[test]
    fn prop_extreme_amounts_checked(
        amounts in prop::collection::vec((entry_type_strategy(), any_amount()), 0..6),
    ) {
        let lines: Vec<LedgerLine> = amounts.iter().map(|(s, a)| make_line(*s, *a)).collect();
        let policy = BalancePolicy::default();
        let summary = validate(&lines);
        if summary.balanced {
            let exact = summary.total_debit.checked_sub(summary.total_credit);
            prop_assert_eq!(exact, Some(summary.diff));
            prop_assert!(summary.diff.abs() < policy.tolerance);
        }
        let draft = VoucherDraft::from_lines(lines, &policy);
        let postable = draft.balanced && draft.postable_lines().count() >= policy.min_lines;
        prop_assert_eq!(draft.ensure_postable(&policy).is_ok(), postable);
    }

    /// One large debit mirrored by an equal credit balances whenever it is
    /// non-zero after rounding.
    #[test]
    fn prop_large_mirror_balances(amount in large_amount()) {
        let lines = vec![
            make_line(EntryType::Debit, amount),
            make_line(EntryType::Credit, amount),
        ];
        let summary = validate(&lines);
        prop_assert_eq!(summary.diff, Decimal::ZERO);
        prop_assert_eq!(summary.balanced, summary.total_debit > Decimal::ZERO);
    }
}
