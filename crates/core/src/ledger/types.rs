//! Ledger domain types for voucher composition and posting.

use bokforing_shared::types::AccountCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::LedgerLine;
use super::error::LedgerError;
use super::validation::{BalancePolicy, validate_with};
use crate::vat::VatRate;

/// Direction of the money flow a voucher records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    /// Purchase / supplier invoice: cost and input VAT are debited.
    #[default]
    Incoming,
    /// Sale: revenue and output VAT are credited.
    Outgoing,
}

/// Transaction data the composer derives default entries from.
///
/// Populated by the caller from bank transaction data or from metadata
/// extracted from an attachment (bilaga). Missing amounts are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionContext {
    /// Amount including VAT (brutto).
    pub gross: Decimal,
    /// Amount excluding VAT (netto).
    pub net: Decimal,
    /// VAT amount (moms).
    pub tax: Decimal,
    /// Cost or revenue account proposed for the transaction.
    pub suggested_account: Option<AccountCode>,
    /// Purchase or sale.
    pub direction: FlowDirection,
    /// Reverse-charge VAT (omvänd skattskyldighet).
    pub reverse_charge: bool,
    /// Explicit VAT rate; inferred from net and tax when absent.
    pub vat_rate: Option<VatRate>,
}

impl TransactionContext {
    /// Creates a purchase context from invoice amounts.
    #[must_use]
    pub fn purchase(gross: Decimal, net: Decimal, tax: Decimal) -> Self {
        Self {
            gross,
            net,
            tax,
            ..Self::default()
        }
    }

    /// Creates a sale context from invoice amounts.
    #[must_use]
    pub fn sale(gross: Decimal, net: Decimal, tax: Decimal) -> Self {
        Self {
            direction: FlowDirection::Outgoing,
            ..Self::purchase(gross, net, tax)
        }
    }

    /// Sets the suggested cost/revenue account.
    #[must_use]
    pub fn with_account(mut self, account: AccountCode) -> Self {
        self.suggested_account = Some(account);
        self
    }

    /// Marks the transaction as reverse-charge.
    #[must_use]
    pub fn with_reverse_charge(mut self) -> Self {
        self.reverse_charge = true;
        self
    }

    /// Sets an explicit VAT rate.
    #[must_use]
    pub fn with_vat_rate(mut self, rate: VatRate) -> Self {
        self.vat_rate = Some(rate);
        self
    }
}

/// A voucher being edited: its lines and their totals.
///
/// Transient by nature; persisting it is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherDraft {
    /// The proposed lines, in entry order.
    pub lines: Vec<LedgerLine>,
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
    /// `total_debit - total_credit`.
    pub diff: Decimal,
    /// Whether the totals balance under the policy.
    pub balanced: bool,
}

impl VoucherDraft {
    /// Builds a draft and computes its totals.
    #[must_use]
    pub fn from_lines(lines: Vec<LedgerLine>, policy: &BalancePolicy) -> Self {
        let summary = validate_with(&lines, policy);
        Self {
            lines,
            total_debit: summary.total_debit,
            total_credit: summary.total_credit,
            diff: summary.diff,
            balanced: summary.balanced,
        }
    }

    /// Lines worth submitting: those with a non-zero amount.
    pub fn postable_lines(&self) -> impl Iterator<Item = &LedgerLine> {
        self.lines.iter().filter(|line| !line.is_zero())
    }

    /// Checks the draft may be submitted.
    ///
    /// # Errors
    ///
    /// - `NegativeAmount` if any line carries a negative amount
    /// - `IncompleteVoucher` if fewer than `policy.min_lines` lines are non-zero
    /// - `OutOfBalance` if the totals do not balance
    pub fn ensure_postable(&self, policy: &BalancePolicy) -> Result<(), LedgerError> {
        if let Some(line) = self.lines.iter().find(|l| l.has_negative_amount()) {
            return Err(LedgerError::NegativeAmount(line.account.clone()));
        }

        let count = self.postable_lines().count();
        if count < policy.min_lines {
            return Err(LedgerError::IncompleteVoucher {
                lines: count,
                required: policy.min_lines,
            });
        }

        if !self.balanced {
            return Err(LedgerError::OutOfBalance {
                debit: self.total_debit,
                credit: self.total_credit,
            });
        }

        Ok(())
    }

    /// Consumes the draft, returning only the postable lines.
    #[must_use]
    pub fn into_postable_lines(self) -> Vec<LedgerLine> {
        self.lines.into_iter().filter(|line| !line.is_zero()).collect()
    }
}
