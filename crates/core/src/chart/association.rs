//! Keyword associations from transaction texts to accounts.
//!
//! Bank references and invoice texts are matched case-insensitively against
//! an ordered keyword list; the first keyword contained in the text wins.

use bokforing_shared::AccountDefaults;
use bokforing_shared::types::AccountCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::FlowDirection;
use crate::vat::VatRate;

/// Default keyword list, in match order.
const DEFAULT_KEYWORDS: &[(&str, &str)] = &[
    ("xl-bygg", "4010"),
    ("jbm", "4010"),
    ("skatteverket", "1630"),
    ("lån", "1680"),
    ("bankkostnad", "6570"),
    ("bankkostnader", "6570"),
    ("utlägg", "2893"),
    ("lön", "1613"),
    ("avräkning", "2893"),
    ("avr", "2893"),
    ("bankavgift", "6570"),
    ("banktjänst", "6570"),
    ("leverantör", "2440"),
    ("försäljning", "3041"),
    ("hyra", "6991"),
    ("drivmedel", "5611"),
    ("okq8", "5611"),
    ("ingo", "5611"),
];

/// A single keyword rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    /// Lowercase keyword searched for in texts.
    pub keyword: String,
    /// Account suggested on a match.
    pub account: AccountCode,
}

/// Ordered keyword rules plus the suspense accounts used when nothing matches.
#[derive(Debug, Clone)]
pub struct AssociationRules {
    rules: Vec<Association>,
    pending_incoming: AccountCode,
    pending_outgoing: AccountCode,
}

impl Default for AssociationRules {
    fn default() -> Self {
        Self::swedish_default(&AccountDefaults::default())
    }
}

impl AssociationRules {
    /// Creates rules from an explicit list; keywords are lowercased.
    #[must_use]
    pub fn new(rules: Vec<Association>, accounts: &AccountDefaults) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|rule| Association {
                    keyword: rule.keyword.to_lowercase(),
                    account: rule.account,
                })
                .collect(),
            pending_incoming: accounts.pending_incoming.clone(),
            pending_outgoing: accounts.pending_outgoing.clone(),
        }
    }

    /// The application's default keyword list.
    #[must_use]
    pub fn swedish_default(accounts: &AccountDefaults) -> Self {
        let rules = DEFAULT_KEYWORDS
            .iter()
            .map(|(keyword, account)| Association {
                keyword: (*keyword).to_string(),
                account: AccountCode::from_static(account),
            })
            .collect();
        Self::new(rules, accounts)
    }

    /// The rules in match order.
    #[must_use]
    pub fn rules(&self) -> &[Association] {
        &self.rules
    }

    /// Returns the account of the first keyword found in `text`.
    #[must_use]
    pub fn suggest_account(&self, text: &str) -> Option<AccountCode> {
        let text = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| text.contains(&rule.keyword))
            .map(|rule| rule.account.clone())
    }

    /// Picks the contra account for a bank transaction.
    ///
    /// 1. A reference mentioning "moms" is a VAT payment or refund: output
    ///    VAT for deposits, input VAT for withdrawals.
    /// 2. Otherwise the first matching keyword.
    /// 3. Otherwise a suspense account by direction.
    #[must_use]
    pub fn suggest_contra_account(&self, reference: &str, amount: Decimal) -> AccountCode {
        let deposit = amount > Decimal::ZERO;

        if reference.to_lowercase().contains("moms") {
            let direction = if deposit {
                FlowDirection::Outgoing
            } else {
                FlowDirection::Incoming
            };
            return VatRate::Standard.account(direction);
        }

        self.suggest_account(reference).unwrap_or_else(|| {
            if deposit {
                self.pending_incoming.clone()
            } else {
                self.pending_outgoing.clone()
            }
        })
    }
}
