//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for composing, validating and exporting vouchers
//! - Lenient amount parsing for form input
//! - JSON error responses

pub mod amount;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use bokforing_core::chart::{AssociationRules, ChartOfAccounts};
use bokforing_core::ledger::{BalancePolicy, EntryComposer};
use bokforing_shared::LedgerConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// When a draft counts as balanced and postable.
    pub policy: Arc<BalancePolicy>,
    /// Default entry composer.
    pub composer: Arc<EntryComposer>,
    /// Chart of accounts for names and export.
    pub chart: Arc<ChartOfAccounts>,
    /// Keyword rules for account suggestions.
    pub associations: Arc<AssociationRules>,
}

impl AppState {
    /// Builds the state from the ledger configuration with the default
    /// Swedish chart and keyword list.
    #[must_use]
    pub fn from_config(config: &LedgerConfig) -> Self {
        Self {
            policy: Arc::new(BalancePolicy::from(config)),
            composer: Arc::new(EntryComposer::new(config.accounts.clone())),
            chart: Arc::new(ChartOfAccounts::swedish_default()),
            associations: Arc::new(AssociationRules::swedish_default(&config.accounts)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&LedgerConfig::default())
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
