//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::AccountCode;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Ledger policy and default accounts.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Ledger configuration: when a voucher counts as postable, and which
/// accounts the composer falls back to.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Largest absolute debit/credit difference still treated as balanced
    /// (exclusive).
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Decimal,
    /// Reject drafts whose total debit is zero.
    #[serde(default = "default_true")]
    pub require_positive_total: bool,
    /// Minimum number of non-zero lines a voucher needs to be posted.
    #[serde(default = "default_min_lines")]
    pub min_lines: usize,
    /// Default accounts used when composing entries.
    #[serde(default)]
    pub accounts: AccountDefaults,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: default_balance_tolerance(),
            require_positive_total: true,
            min_lines: default_min_lines(),
            accounts: AccountDefaults::default(),
        }
    }
}

fn default_balance_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

fn default_true() -> bool {
    true
}

fn default_min_lines() -> usize {
    2
}

/// Fallback and settlement accounts (BAS chart).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccountDefaults {
    /// Cost account for purchases without a suggested account.
    pub purchase_fallback: AccountCode,
    /// Revenue account for sales without a suggested account.
    pub sale_fallback: AccountCode,
    /// Settlement account for purchases (accounts payable).
    pub payable: AccountCode,
    /// Settlement account for sales.
    pub sale_settlement: AccountCode,
    /// The company bank account.
    pub bank: AccountCode,
    /// Suspense account for unmatched deposits.
    pub pending_incoming: AccountCode,
    /// Suspense account for unmatched withdrawals.
    pub pending_outgoing: AccountCode,
}

impl Default for AccountDefaults {
    fn default() -> Self {
        Self {
            purchase_fallback: AccountCode::from_static("4010"),
            sale_fallback: AccountCode::from_static("3041"),
            payable: AccountCode::from_static(AccountCode::PAYABLE),
            sale_settlement: AccountCode::from_static(AccountCode::BANK),
            bank: AccountCode::from_static(AccountCode::BANK),
            pending_incoming: AccountCode::from_static("1798"),
            pending_outgoing: AccountCode::from_static("1799"),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BOKFORING").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
