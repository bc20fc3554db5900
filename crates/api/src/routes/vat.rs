//! VAT routes.

use axum::{Json, Router, extract::State, routing::post};
use bokforing_core::ledger::FlowDirection;
use bokforing_core::vat::{VatRate, split_vat};
use bokforing_shared::types::{AccountCode, format_amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;
use crate::amount::deserialize_amount;
use crate::error::ApiError;

/// Creates the VAT routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/vat/split", post(split))
}

/// Gross amount to split.
#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    /// Amount including VAT.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    /// Rate in percent; 25 when missing.
    #[serde(default)]
    pub rate: VatRate,
    /// Purchase or sale.
    #[serde(default)]
    pub direction: FlowDirection,
}

/// VAT part and base of a gross amount.
#[derive(Debug, Serialize)]
pub struct SplitResponse {
    /// Account the VAT is booked on.
    pub vat_account: AccountCode,
    /// Name of `vat_account`.
    pub vat_account_name: String,
    /// VAT part.
    pub vat_amount: Decimal,
    /// Amount excluding VAT.
    pub base_amount: Decimal,
    /// Applied rate in percent.
    pub rate: VatRate,
    /// `vat_amount` in display notation.
    pub vat_amount_text: String,
    /// `base_amount` in display notation.
    pub base_amount_text: String,
}

/// POST /vat/split
async fn split(
    State(state): State<AppState>,
    Json(request): Json<SplitRequest>,
) -> Result<Json<SplitResponse>, ApiError> {
    let split = split_vat(request.amount, request.rate, request.direction)?;
    debug!(
        amount = %request.amount,
        rate = %split.rate,
        vat = %split.vat_amount,
        "Split gross amount"
    );
    Ok(Json(SplitResponse {
        vat_account_name: state.chart.display_name(&split.vat_account),
        vat_amount_text: format_amount(split.vat_amount),
        base_amount_text: format_amount(split.base_amount),
        vat_account: split.vat_account,
        vat_amount: split.vat_amount,
        base_amount: split.base_amount,
        rate: split.rate,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{body_json, post_json};

    #[tokio::test]
    async fn test_split_purchase() {
        let response = post_json("/api/v1/vat/split", r#"{"amount": "1 250,00"}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["vat_account"], "2641");
        assert_eq!(body["vat_amount_text"], "250,00");
        assert_eq!(body["base_amount_text"], "1 000,00");
        assert_eq!(body["rate"], "25");
    }

    #[tokio::test]
    async fn test_split_sale_low_rate() {
        let response = post_json(
            "/api/v1/vat/split",
            r#"{"amount": 106, "rate": 6, "direction": "outgoing"}"#,
        )
        .await;
        let body = body_json(response).await;
        assert_eq!(body["vat_account"], "2613");
        assert_eq!(body["vat_account_name"], "Utgående moms (6%)");
        assert_eq!(body["vat_amount_text"], "6,00");
    }

    #[tokio::test]
    async fn test_split_rejects_zero() {
        let response = post_json("/api/v1/vat/split", r#"{"amount": "0"}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "INVALID_VAT_AMOUNT");
    }
}
