//! SIE export route.

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::post,
};
use bokforing_core::sie::{Company, Verification, generate_sie};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::AppState;
use crate::error::ApiError;

/// Creates the SIE routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/sie", post(export_sie))
}

/// Vouchers to export.
#[derive(Debug, Deserialize)]
pub struct SieRequest {
    /// Company header.
    pub company: Company,
    /// Posted vouchers.
    #[serde(default)]
    pub verifications: Vec<Verification>,
    /// Value of `#GEN`; today when missing.
    #[serde(default)]
    pub generated_on: Option<NaiveDate>,
}

/// POST /sie
async fn export_sie(
    State(state): State<AppState>,
    Json(request): Json<SieRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let generated_on = request
        .generated_on
        .unwrap_or_else(|| Utc::now().date_naive());

    let content = generate_sie(
        &request.company,
        &request.verifications,
        &state.chart,
        generated_on,
    )
    .inspect_err(|e| warn!(error = %e, company = %request.company.name, "SIE export refused"))?;

    info!(
        company = %request.company.name,
        verifications = request.verifications.len(),
        "Exported SIE file"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"export.se\"",
            ),
        ],
        content,
    ))
}
