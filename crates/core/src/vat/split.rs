//! Splitting a VAT-inclusive amount into base and tax.

use bokforing_shared::types::{AccountCode, round_amount};
use rust_decimal::Decimal;
use serde::Serialize;

use super::rate::VatRate;
use crate::ledger::{FlowDirection, LedgerError};

/// Result of splitting a gross amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VatSplit {
    /// Account the VAT is booked on.
    pub vat_account: AccountCode,
    /// VAT part of the amount.
    pub vat_amount: Decimal,
    /// Amount excluding VAT.
    pub base_amount: Decimal,
    /// The rate applied.
    pub rate: VatRate,
}

/// Splits a gross (VAT-inclusive) amount at the given rate.
///
/// The amount is first rounded to whole öre. Then
/// `vat = round(gross * rate / (100 + rate), 2)` and the base is the
/// remainder, so `vat + base` equals the rounded gross exactly.
///
/// # Errors
///
/// Returns `InvalidVatAmount` if the amount rounds to zero or below, or is
/// too large to split.
///
/// # Example
///
/// ```
/// use bokforing_core::ledger::FlowDirection;
/// use bokforing_core::vat::{VatRate, split_vat};
/// use rust_decimal_macros::dec;
///
/// let split = split_vat(dec!(125), VatRate::Standard, FlowDirection::Incoming).unwrap();
/// assert_eq!(split.vat_account, "2641");
/// assert_eq!(split.vat_amount, dec!(25.00));
/// assert_eq!(split.base_amount, dec!(100.00));
/// ```
pub fn split_vat(
    amount: Decimal,
    rate: VatRate,
    direction: FlowDirection,
) -> Result<VatSplit, LedgerError> {
    let gross = round_amount(amount);
    if gross <= Decimal::ZERO {
        return Err(LedgerError::InvalidVatAmount(amount));
    }

    let percent = rate.percent();
    let vat_amount = gross
        .checked_mul(percent)
        .zip(Decimal::ONE_HUNDRED.checked_add(percent))
        .and_then(|(scaled, divisor)| scaled.checked_div(divisor))
        .map(round_amount)
        .ok_or(LedgerError::InvalidVatAmount(amount))?;
    let base_amount = round_amount(gross - vat_amount);

    Ok(VatSplit {
        vat_account: rate.account(direction),
        vat_amount,
        base_amount,
        rate,
    })
}
