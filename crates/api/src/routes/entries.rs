//! Voucher entry routes: default composition, validation, bank entries and
//! rule application.

use axum::{Json, Router, extract::State, routing::post};
use bokforing_core::chart::ChartOfAccounts;
use bokforing_core::ledger::{FlowDirection, LedgerLine, TransactionContext, VoucherDraft};
use bokforing_core::rules::{Rule, apply_rule};
use bokforing_core::vat::VatRate;
use bokforing_shared::types::{AccountCode, format_amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::accounts::AccountResponse;
use crate::AppState;
use crate::amount::{deserialize_amount, deserialize_amount_or_zero, display_amount};
use crate::error::ApiError;

/// Creates the entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries/compose", post(compose_entries))
        .route("/entries/validate", post(validate_entries))
        .route("/entries/bank", post(bank_entries))
        .route("/entries/rule", post(rule_entries))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Invoice data to propose default lines for.
#[derive(Debug, Deserialize)]
pub struct ComposeRequest {
    /// Amount including VAT.
    #[serde(default, deserialize_with = "deserialize_amount_or_zero")]
    pub gross: Decimal,
    /// Amount excluding VAT.
    #[serde(default, deserialize_with = "deserialize_amount_or_zero")]
    pub net: Decimal,
    /// VAT amount.
    #[serde(default, deserialize_with = "deserialize_amount_or_zero")]
    pub tax: Decimal,
    /// Cost or revenue account chosen by the user.
    #[serde(default, alias = "suggested_account")]
    pub konto: Option<AccountCode>,
    /// Free text (seller, item) used to suggest an account when none is given.
    #[serde(default)]
    pub text: Option<String>,
    /// Purchase (`incoming`) or sale (`outgoing`).
    #[serde(default)]
    pub direction: FlowDirection,
    /// Domestic reverse charge.
    #[serde(default)]
    pub reverse_charge: bool,
    /// VAT rate in percent.
    #[serde(default)]
    pub vat_rate: Option<VatRate>,
}

/// A voucher line as entered in the form.
#[derive(Debug, Deserialize)]
pub struct LineInput {
    /// Account code.
    pub konto: AccountCode,
    /// Debit amount.
    #[serde(default, deserialize_with = "deserialize_amount_or_zero")]
    pub debet: Decimal,
    /// Credit amount.
    #[serde(default, deserialize_with = "deserialize_amount_or_zero")]
    pub kredit: Decimal,
}

impl From<LineInput> for LedgerLine {
    fn from(input: LineInput) -> Self {
        Self {
            account: input.konto,
            debit: input.debet,
            credit: input.kredit,
        }
    }
}

/// Lines to validate.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    /// The voucher lines.
    #[serde(default)]
    pub entries: Vec<LineInput>,
}

/// A bank transaction to propose lines for.
#[derive(Debug, Deserialize)]
pub struct BankRequest {
    /// Signed amount: positive for deposits, negative for withdrawals.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    /// Bank reference text.
    #[serde(default)]
    pub reference: String,
    /// Contra account; suggested from the reference when missing.
    #[serde(default)]
    pub contra: Option<AccountCode>,
}

/// A rule to apply to a bank amount.
#[derive(Debug, Deserialize)]
pub struct RuleRequest {
    /// Signed transaction amount.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    /// The rule templates.
    pub rule: Rule,
}

/// A voucher line with names and display text.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    /// Account code.
    pub konto: AccountCode,
    /// Account name.
    pub namn: String,
    /// Debit amount.
    pub debet: Decimal,
    /// Credit amount.
    pub kredit: Decimal,
    /// Debit in display notation, empty when zero.
    pub debet_text: String,
    /// Credit in display notation, empty when zero.
    pub kredit_text: String,
}

impl LineResponse {
    fn new(line: &LedgerLine, chart: &ChartOfAccounts) -> Self {
        Self {
            konto: line.account.clone(),
            namn: chart.display_name(&line.account),
            debet: line.debit,
            kredit: line.credit,
            debet_text: display_amount(line.debit),
            kredit_text: display_amount(line.credit),
        }
    }
}

/// Totals and postability of a draft.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
    /// Debit minus credit.
    pub diff: Decimal,
    /// True if the totals balance.
    pub balanced: bool,
    /// True if the draft passes every posting check.
    pub postable: bool,
    /// Code of the first failed posting check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// Message of the first failed posting check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// `total_debit` in display notation.
    pub total_debit_text: String,
    /// `total_credit` in display notation.
    pub total_credit_text: String,
    /// `diff` in display notation.
    pub diff_text: String,
}

/// Lines with their summary.
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    /// Proposed lines.
    pub lines: Vec<LineResponse>,
    /// Totals and postability.
    pub summary: SummaryResponse,
}

/// Bank lines with the chosen contra account.
#[derive(Debug, Serialize)]
pub struct BankResponse {
    /// Contra account used.
    pub contra: AccountResponse,
    /// Proposed lines and summary.
    #[serde(flatten)]
    pub draft: DraftResponse,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn summarize(draft: &VoucherDraft, state: &AppState) -> SummaryResponse {
    let check = draft.ensure_postable(&state.policy);
    let (error, message) = match &check {
        Ok(()) => (None, None),
        Err(e) => (Some(e.error_code()), Some(e.to_string())),
    };
    SummaryResponse {
        total_debit: draft.total_debit,
        total_credit: draft.total_credit,
        diff: draft.diff,
        balanced: draft.balanced,
        postable: check.is_ok(),
        error,
        message,
        total_debit_text: format_amount(draft.total_debit),
        total_credit_text: format_amount(draft.total_credit),
        diff_text: format_amount(draft.diff),
    }
}

fn draft_response(lines: Vec<LedgerLine>, state: &AppState) -> DraftResponse {
    let draft = VoucherDraft::from_lines(lines, &state.policy);
    DraftResponse {
        lines: draft
            .lines
            .iter()
            .map(|line| LineResponse::new(line, &state.chart))
            .collect(),
        summary: summarize(&draft, state),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /entries/compose
async fn compose_entries(
    State(state): State<AppState>,
    Json(request): Json<ComposeRequest>,
) -> Json<DraftResponse> {
    let suggested = request.konto.or_else(|| {
        request
            .text
            .as_deref()
            .and_then(|text| state.associations.suggest_account(text))
    });

    let ctx = TransactionContext {
        gross: request.gross,
        net: request.net,
        tax: request.tax,
        suggested_account: suggested,
        direction: request.direction,
        reverse_charge: request.reverse_charge,
        vat_rate: request.vat_rate,
    };

    let lines = state.composer.compose(&ctx);
    let response = draft_response(lines, &state);
    debug!(
        lines = response.lines.len(),
        balanced = response.summary.balanced,
        diff = %response.summary.diff,
        "Composed default entries"
    );
    Json(response)
}

/// POST /entries/validate
async fn validate_entries(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Json<SummaryResponse> {
    let lines: Vec<LedgerLine> = request.entries.into_iter().map(LedgerLine::from).collect();
    let draft = VoucherDraft::from_lines(lines, &state.policy);
    let summary = summarize(&draft, &state);
    if !summary.postable {
        warn!(
            lines = draft.lines.len(),
            diff = %summary.diff,
            error = summary.error.unwrap_or_default(),
            "Voucher not postable"
        );
    }
    Json(summary)
}

/// POST /entries/bank
async fn bank_entries(
    State(state): State<AppState>,
    Json(request): Json<BankRequest>,
) -> Json<BankResponse> {
    let contra = request.contra.unwrap_or_else(|| {
        state
            .associations
            .suggest_contra_account(&request.reference, request.amount)
    });
    let lines = state.composer.compose_bank(request.amount, &contra);
    info!(
        amount = %request.amount,
        reference = %request.reference,
        contra = %contra,
        "Composed bank entries"
    );
    Json(BankResponse {
        contra: AccountResponse::named(contra, &state.chart),
        draft: draft_response(lines, &state),
    })
}

/// POST /entries/rule
async fn rule_entries(
    State(state): State<AppState>,
    Json(request): Json<RuleRequest>,
) -> Result<Json<DraftResponse>, ApiError> {
    let lines = apply_rule(&request.rule, request.amount).inspect_err(|e| {
        warn!(error = %e, rule = ?request.rule.name, "Rule could not be applied");
    })?;
    Ok(Json(draft_response(lines, &state)))
}
