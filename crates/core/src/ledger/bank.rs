//! Default entries for imported bank transactions.

use bokforing_shared::types::{AccountCode, round_amount};
use rust_decimal::Decimal;

use super::entry::LedgerLine;

/// Proposes the two lines for a bank transaction.
///
/// A deposit (positive amount) debits the bank and credits `contra`; a
/// withdrawal (negative amount) credits the bank and debits `contra`, both
/// with the absolute amount. A zero amount produces no lines.
#[must_use]
pub fn compose_bank_entries(
    amount: Decimal,
    bank: &AccountCode,
    contra: &AccountCode,
) -> Vec<LedgerLine> {
    let amount = round_amount(amount);
    if amount > Decimal::ZERO {
        vec![
            LedgerLine::debit(bank.clone(), amount),
            LedgerLine::credit(contra.clone(), amount),
        ]
    } else if amount < Decimal::ZERO {
        vec![
            LedgerLine::credit(bank.clone(), -amount),
            LedgerLine::debit(contra.clone(), -amount),
        ]
    } else {
        Vec::new()
    }
}
