//! Balance validation for voucher drafts.

use bokforing_shared::LedgerConfig;
use bokforing_shared::types::round_amount;
use rust_decimal::Decimal;
use serde::Serialize;

use super::entry::LedgerLine;

/// When a set of lines counts as balanced and postable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancePolicy {
    /// `|debit - credit|` must be strictly below this value.
    pub tolerance: Decimal,
    /// Reject drafts with a zero debit total.
    pub require_positive_total: bool,
    /// Minimum number of non-zero lines for posting.
    pub min_lines: usize,
}

impl Default for BalancePolicy {
    fn default() -> Self {
        Self {
            tolerance: Decimal::new(1, 2),
            require_positive_total: true,
            min_lines: 2,
        }
    }
}

impl From<&LedgerConfig> for BalancePolicy {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            tolerance: config.balance_tolerance,
            require_positive_total: config.require_positive_total,
            min_lines: config.min_lines,
        }
    }
}

/// Totals of a set of ledger lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSummary {
    /// Sum of all debit amounts.
    pub total_debit: Decimal,
    /// Sum of all credit amounts.
    pub total_credit: Decimal,
    /// `total_debit - total_credit`.
    pub diff: Decimal,
    /// Whether the lines may be posted as they stand.
    pub balanced: bool,
}

/// Validates lines with the default policy (tolerance 0.01, positive total).
#[must_use]
pub fn validate(lines: &[LedgerLine]) -> BalanceSummary {
    validate_with(lines, &BalancePolicy::default())
}

/// Sums debit and credit columns and decides whether they balance.
///
/// Each addend is rounded to öre before summing. An all-zero draft is never
/// balanced when the policy requires a positive total, even though its
/// difference is zero. Totals beyond the decimal range saturate and the
/// draft is reported as not balanced.
#[must_use]
pub fn validate_with(lines: &[LedgerLine], policy: &BalancePolicy) -> BalanceSummary {
    let (total_debit, debit_overflow) = column_total(lines.iter().map(|l| l.debit));
    let (total_credit, credit_overflow) = column_total(lines.iter().map(|l| l.credit));
    let (diff, diff_overflow) = match total_debit.checked_sub(total_credit) {
        Some(diff) => (diff, false),
        None => (total_debit.saturating_sub(total_credit), true),
    };
    let overflowed = debit_overflow || credit_overflow || diff_overflow;

    let within_tolerance = diff.abs() < policy.tolerance;
    let has_total = !policy.require_positive_total || total_debit > Decimal::ZERO;

    BalanceSummary {
        total_debit,
        total_credit,
        diff,
        balanced: !overflowed && within_tolerance && has_total,
    }
}

/// Sums rounded amounts; the flag is set when the sum left the decimal range.
fn column_total(amounts: impl Iterator<Item = Decimal>) -> (Decimal, bool) {
    amounts
        .map(round_amount)
        .fold((Decimal::ZERO, false), |(total, overflowed), amount| {
            match total.checked_add(amount) {
                Some(sum) => (sum, overflowed),
                None => (total.saturating_add(amount), true),
            }
        })
}
