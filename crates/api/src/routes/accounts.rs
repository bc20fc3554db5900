//! Chart of accounts and account suggestion routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use bokforing_core::chart::{ChartOfAccounts, association::Association};
use bokforing_shared::types::{AccountCode, parse_amount};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/suggest", get(suggest_account))
        .route("/accounts/associations", get(list_associations))
}

/// An account with its display name.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account code.
    pub konto: AccountCode,
    /// Display name.
    pub namn: String,
}

impl AccountResponse {
    /// Looks up the display name in the chart.
    pub fn named(konto: AccountCode, chart: &ChartOfAccounts) -> Self {
        let namn = chart.display_name(&konto);
        Self { konto, namn }
    }
}

/// Query for a contra-account suggestion.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    /// Bank reference text.
    #[serde(default)]
    pub reference: String,
    /// Signed amount in any accepted notation.
    #[serde(default)]
    pub amount: String,
}

/// GET /accounts
async fn list_accounts(State(state): State<AppState>) -> Json<Vec<AccountResponse>> {
    Json(
        state
            .chart
            .iter()
            .map(|(konto, namn)| AccountResponse {
                konto: konto.clone(),
                namn: namn.to_string(),
            })
            .collect(),
    )
}

/// GET /accounts/suggest?reference=&amount=
async fn suggest_account(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<AccountResponse> {
    let amount = parse_amount(&query.amount);
    let konto = state
        .associations
        .suggest_contra_account(&query.reference, amount);
    debug!(reference = %query.reference, %amount, %konto, "Suggested contra account");
    Json(AccountResponse::named(konto, &state.chart))
}

/// GET /accounts/associations
async fn list_associations(State(state): State<AppState>) -> Json<Vec<Association>> {
    Json(state.associations.rules().to_vec())
}
