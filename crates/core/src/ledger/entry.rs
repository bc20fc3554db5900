//! Ledger line domain types.

use bokforing_shared::types::{AccountCode, round_amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a ledger line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit (debet): increases assets/expenses, decreases liabilities/equity/revenue.
    Debit,
    /// Credit (kredit): decreases assets/expenses, increases liabilities/equity/revenue.
    Credit,
}

impl EntryType {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// A single line of a voucher.
///
/// Serialized with the field names the bookkeeping API expects:
/// `{"konto": "1930", "debet": "100.00", "kredit": "0"}`.
///
/// Both amounts are expected to be non-negative and at most one of them
/// non-zero, but neither is enforced here; see
/// [`VoucherDraft::ensure_postable`](super::VoucherDraft::ensure_postable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// The account affected by this line.
    #[serde(rename = "konto")]
    pub account: AccountCode,
    /// Debit amount.
    #[serde(rename = "debet", default)]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(rename = "kredit", default)]
    pub credit: Decimal,
}

impl LedgerLine {
    /// Creates a line with the amount on the given side, rounded to öre.
    #[must_use]
    pub fn new(account: AccountCode, side: EntryType, amount: Decimal) -> Self {
        let mut amount = round_amount(amount);
        amount.rescale(2);
        match side {
            EntryType::Debit => Self {
                account,
                debit: amount,
                credit: Decimal::ZERO,
            },
            EntryType::Credit => Self {
                account,
                debit: Decimal::ZERO,
                credit: amount,
            },
        }
    }

    /// Creates a debit line.
    #[must_use]
    pub fn debit(account: AccountCode, amount: Decimal) -> Self {
        Self::new(account, EntryType::Debit, amount)
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account: AccountCode, amount: Decimal) -> Self {
        Self::new(account, EntryType::Credit, amount)
    }

    /// Returns true if both amounts are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }

    /// Returns true if either amount is negative.
    #[must_use]
    pub fn has_negative_amount(&self) -> bool {
        (self.debit.is_sign_negative() && !self.debit.is_zero())
            || (self.credit.is_sign_negative() && !self.credit.is_zero())
    }

    /// Returns the side carrying the amount, if exactly one side does.
    #[must_use]
    pub fn side(&self) -> Option<EntryType> {
        match (self.debit.is_zero(), self.credit.is_zero()) {
            (false, true) => Some(EntryType::Debit),
            (true, false) => Some(EntryType::Credit),
            _ => None,
        }
    }
}
