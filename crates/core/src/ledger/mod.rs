//! Double-entry bookkeeping logic.
//!
//! This module implements the voucher (verifikation) side of the ledger:
//! - Ledger lines (konto, debet, kredit)
//! - Transaction context supplied by the UI layer
//! - Default entry composition for invoices and bank transactions
//! - Balance validation and postability checks
//! - Error types for ledger operations

pub mod bank;
pub mod compose;
pub mod entry;
pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod compose_props;
#[cfg(test)]
mod validation_props;

pub use bank::compose_bank_entries;
pub use compose::{EntryComposer, compose_default_entries};
pub use entry::{EntryType, LedgerLine};
pub use error::LedgerError;
pub use types::{FlowDirection, TransactionContext, VoucherDraft};
pub use validation::{BalancePolicy, BalanceSummary, validate, validate_with};
