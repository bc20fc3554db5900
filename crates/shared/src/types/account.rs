//! Ledger account codes (konto).
//!
//! Account codes are plain identifiers such as `"1930"` (bank) or `"2641"`
//! (input VAT 25%). The code itself carries no meaning here; names and
//! semantics come from the chart of accounts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an account code is blank or contains whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid account code: {0:?}")]
pub struct InvalidAccountCode(pub String);

/// A ledger account code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountCode(String);

impl AccountCode {
    /// Bank account (Bankkonto).
    pub const BANK: &'static str = "1930";
    /// Accounts payable (Leverantörsskulder).
    pub const PAYABLE: &'static str = "2440";

    /// Creates an account code, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty or contains inner whitespace.
    pub fn new(code: impl Into<String>) -> Result<Self, InvalidAccountCode> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(InvalidAccountCode(code));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Creates an account code from a compile-time constant.
    ///
    /// Only for codes known to be valid, such as the BAS defaults.
    #[must_use]
    pub fn from_static(code: &'static str) -> Self {
        debug_assert!(Self::new(code).is_ok(), "invalid static account code");
        Self(code.to_string())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountCode {
    type Error = InvalidAccountCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountCode> for String {
    fn from(code: AccountCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for AccountCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for AccountCode {
    type Err = InvalidAccountCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq<str> for AccountCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AccountCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
