//! Ledger error types for voucher, VAT, rule, and export failures.
//!
//! Every variant is recoverable by user correction. The pure composition
//! and validation functions never return these; they are produced by the
//! explicit call-site checks and by the supplementary features.

use bokforing_shared::AppError;
use bokforing_shared::types::AccountCode;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Voucher Errors ==========
    /// Debits and credits differ beyond the tolerance, or nothing was booked.
    #[error("Obalans! Debet ({debit}) matchar inte Kredit ({credit})")]
    OutOfBalance {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Too few non-zero lines to form a voucher.
    #[error("Voucher must have at least {required} non-zero lines, found {lines}")]
    IncompleteVoucher {
        /// Number of non-zero lines present.
        lines: usize,
        /// Minimum number of lines required.
        required: usize,
    },

    /// A line carries a negative amount.
    #[error("Line on account {0} has a negative amount")]
    NegativeAmount(AccountCode),

    // ========== VAT Errors ==========
    /// The amount to split must be positive.
    #[error("Amount to split must be positive, got {0}")]
    InvalidVatAmount(Decimal),

    /// VAT rate cannot be negative.
    #[error("Invalid VAT rate: {0}%")]
    InvalidVatRate(Decimal),

    // ========== Rule Errors ==========
    /// A rule has no entry templates.
    #[error("Rule has no entries")]
    EmptyRule,

    /// A rule expression could not be evaluated.
    #[error("Invalid rule expression '{expression}': {reason}")]
    InvalidRuleExpression {
        /// The offending expression.
        expression: String,
        /// What went wrong.
        reason: String,
    },

    /// Evaluated rule entries do not balance.
    #[error("Rule produced an unbalanced voucher. Debit: {debit}, Credit: {credit}")]
    RuleUnbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    // ========== Export Errors ==========
    /// There are no verifications to export.
    #[error("Inga transaktioner att exportera")]
    NothingToExport,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBalance { .. } => "OUT_OF_BALANCE",
            Self::IncompleteVoucher { .. } => "INCOMPLETE_VOUCHER",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::InvalidVatAmount(_) => "INVALID_VAT_AMOUNT",
            Self::InvalidVatRate(_) => "INVALID_VAT_RATE",
            Self::EmptyRule => "EMPTY_RULE",
            Self::InvalidRuleExpression { .. } => "INVALID_RULE_EXPRESSION",
            Self::RuleUnbalanced { .. } => "RULE_UNBALANCED",
            Self::NothingToExport => "NOTHING_TO_EXPORT",
        }
    }

    /// Returns true for malformed input, false for business-rule violations.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidVatAmount(_)
                | Self::InvalidVatRate(_)
                | Self::EmptyRule
                | Self::InvalidRuleExpression { .. }
        )
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        if err.is_validation_error() {
            Self::Validation(err.to_string())
        } else {
            Self::BusinessRule(err.to_string())
        }
    }
}
