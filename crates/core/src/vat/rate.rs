//! VAT rates and the BAS accounts they are booked on.

use bokforing_shared::types::AccountCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{FlowDirection, LedgerError};

/// A VAT rate in percent.
///
/// Swedish VAT has three tiers; any other non-negative rate is carried as
/// [`VatRate::Other`] and booked on the 25% accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub enum VatRate {
    /// 25%.
    #[default]
    Standard,
    /// 12% (food, hotels).
    Reduced,
    /// 6% (books, passenger transport).
    Low,
    /// Any other rate, in percent.
    Other(Decimal),
}

impl VatRate {
    /// Creates a rate from a percentage.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVatRate` for negative percentages.
    pub fn from_percent(percent: Decimal) -> Result<Self, LedgerError> {
        if percent.is_sign_negative() && !percent.is_zero() {
            return Err(LedgerError::InvalidVatRate(percent));
        }
        Ok(match percent.normalize() {
            p if p == Decimal::from(25) => Self::Standard,
            p if p == Decimal::from(12) => Self::Reduced,
            p if p == Decimal::from(6) => Self::Low,
            p => Self::Other(p),
        })
    }

    /// Returns the rate in percent.
    #[must_use]
    pub fn percent(self) -> Decimal {
        match self {
            Self::Standard => Decimal::from(25),
            Self::Reduced => Decimal::from(12),
            Self::Low => Decimal::from(6),
            Self::Other(p) => p,
        }
    }

    /// Guesses the rate from invoice amounts.
    ///
    /// `tax / net` rounded to two decimals must hit one of the Swedish tiers.
    #[must_use]
    pub fn infer(net: Decimal, tax: Decimal) -> Option<Self> {
        if net <= Decimal::ZERO || tax <= Decimal::ZERO {
            return None;
        }
        let ratio = tax.checked_div(net)?.round_dp(2);
        match ratio {
            r if r == Decimal::new(25, 2) => Some(Self::Standard),
            r if r == Decimal::new(12, 2) => Some(Self::Reduced),
            r if r == Decimal::new(6, 2) => Some(Self::Low),
            _ => None,
        }
    }

    /// Input VAT account (ingående moms), debited on purchases.
    #[must_use]
    pub fn input_account(self) -> AccountCode {
        AccountCode::from_static(match self {
            Self::Standard | Self::Other(_) => "2641",
            Self::Reduced => "2642",
            Self::Low => "2643",
        })
    }

    /// Output VAT account (utgående moms), credited on sales.
    #[must_use]
    pub fn output_account(self) -> AccountCode {
        AccountCode::from_static(match self {
            Self::Standard | Self::Other(_) => "2611",
            Self::Reduced => "2612",
            Self::Low => "2613",
        })
    }

    /// VAT account for the given flow direction.
    #[must_use]
    pub fn account(self, direction: FlowDirection) -> AccountCode {
        match direction {
            FlowDirection::Incoming => self.input_account(),
            FlowDirection::Outgoing => self.output_account(),
        }
    }
}

impl TryFrom<Decimal> for VatRate {
    type Error = LedgerError;

    fn try_from(percent: Decimal) -> Result<Self, Self::Error> {
        Self::from_percent(percent)
    }
}

impl From<VatRate> for Decimal {
    fn from(rate: VatRate) -> Self {
        rate.percent()
    }
}

impl std::fmt::Display for VatRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
