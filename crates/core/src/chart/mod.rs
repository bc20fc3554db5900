//! Chart of accounts (kontoplan) and keyword-based account suggestions.

pub mod association;

use std::collections::BTreeMap;

use bokforing_shared::types::AccountCode;
use serde::Serialize;

pub use association::AssociationRules;

/// Accounts of the default Swedish BAS-based plan used by the application.
const SWEDISH_DEFAULT: &[(&str, &str)] = &[
    ("1613", "Lön"),
    ("1630", "Skatteverket"),
    ("1680", "Lån"),
    ("1798", "Avvaktar (Inbetalning)"),
    ("1799", "Avvaktar (Utbetalning)"),
    ("1930", "Bankkonto"),
    ("2440", "Leverantörsskulder"),
    ("2611", "Utgående moms (25%)"),
    ("2612", "Utgående moms (12%)"),
    ("2613", "Utgående moms (6%)"),
    ("2641", "Ingående moms (25%)"),
    ("2642", "Ingående moms (12%)"),
    ("2643", "Ingående moms (6%)"),
    ("2893", "Utlägg/Avräkning"),
    ("3041", "Försäljning"),
    ("4010", "Inköp av varor och material"),
    ("5410", "Förbrukningsinventarier"),
    ("5611", "Drivmedel"),
    ("6250", "Porto"),
    ("6570", "Banktjänster/Bankkostnader"),
    ("6991", "Hyra"),
];

/// A single account with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountEntry {
    /// Account code.
    pub code: AccountCode,
    /// Human-readable name.
    pub name: String,
}

/// Mapping from account code to display name, ordered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartOfAccounts {
    accounts: BTreeMap<AccountCode, String>,
}

impl ChartOfAccounts {
    /// Creates an empty chart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The application's default account plan.
    #[must_use]
    pub fn swedish_default() -> Self {
        SWEDISH_DEFAULT
            .iter()
            .map(|(code, name)| (AccountCode::from_static(code), (*name).to_string()))
            .collect()
    }

    /// Adds or renames an account.
    pub fn insert(&mut self, code: AccountCode, name: impl Into<String>) {
        self.accounts.insert(code, name.into());
    }

    /// Returns true if the account exists.
    #[must_use]
    pub fn contains(&self, code: &AccountCode) -> bool {
        self.accounts.contains_key(code)
    }

    /// Returns the account name, if known.
    #[must_use]
    pub fn name(&self, code: &AccountCode) -> Option<&str> {
        self.accounts.get(code).map(String::as_str)
    }

    /// Returns the account name, or a placeholder for unknown codes.
    #[must_use]
    pub fn display_name(&self, code: &AccountCode) -> String {
        self.name(code)
            .map_or_else(|| format!("Okänt konto {code}"), str::to_string)
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterates accounts in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountCode, &str)> {
        self.accounts.iter().map(|(code, name)| (code, name.as_str()))
    }

    /// Returns all accounts as owned entries, in code order.
    #[must_use]
    pub fn entries(&self) -> Vec<AccountEntry> {
        self.iter()
            .map(|(code, name)| AccountEntry {
                code: code.clone(),
                name: name.to_string(),
            })
            .collect()
    }
}

impl FromIterator<(AccountCode, String)> for ChartOfAccounts {
    fn from_iter<I: IntoIterator<Item = (AccountCode, String)>>(iter: I) -> Self {
        Self {
            accounts: iter.into_iter().collect(),
        }
    }
}
