//! Billing API Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use shared::billing::{BillingDocument, EnteredLine, LineItem, Totals};

use crate::common::{ApiResponse, AppError, AppResult};
use crate::core::ServerState;
use crate::document::{PrintDocument, SubmissionPayload};
use crate::money::format_money;
use crate::pricing::{
    compute_document_totals, normalize_lines, prepare_document, prepare_entered_lines,
};

/// Body of `POST /api/billing/normalize`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeRequest {
    #[serde(default)]
    pub lines: Vec<EnteredLine>,
}

fn read_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_format(rejection.body_text()))
}

/// Read the document and apply the configured input policy
fn prepared_document(
    state: &ServerState,
    body: Result<Json<BillingDocument>, JsonRejection>,
) -> AppResult<BillingDocument> {
    let document = read_body(body)?;
    prepare_document(document, state.input_policy()).map_err(|e| {
        tracing::debug!(error = %e, "Billing document rejected");
        AppError::from(e)
    })
}

/// POST /api/billing/normalize - convert entered lines to native units
pub async fn normalize(
    State(state): State<ServerState>,
    body: Result<Json<NormalizeRequest>, JsonRejection>,
) -> AppResult<ApiResponse<Vec<LineItem>>> {
    let request = read_body(body)?;
    let lines = prepare_entered_lines(request.lines, state.input_policy())?;
    Ok(ApiResponse::success(normalize_lines(&lines)))
}

/// POST /api/billing/quote - unrounded totals
pub async fn quote(
    State(state): State<ServerState>,
    body: Result<Json<BillingDocument>, JsonRejection>,
) -> AppResult<ApiResponse<Totals>> {
    let document = prepared_document(&state, body)?;
    Ok(ApiResponse::success(compute_document_totals(&document)))
}

/// POST /api/billing/payload - body for the persistence backend
pub async fn payload(
    State(state): State<ServerState>,
    body: Result<Json<BillingDocument>, JsonRejection>,
) -> AppResult<ApiResponse<SubmissionPayload>> {
    let document = prepared_document(&state, body)?;
    let totals = compute_document_totals(&document);
    let payload = SubmissionPayload::build(&document, &totals);

    crate::audit_log!(
        "payload",
        document.document_number.as_deref().unwrap_or("-"),
        format!(
            "lines={} grand_total={}",
            payload.line_items.len(),
            format_money(totals.grand_total)
        )
    );

    Ok(ApiResponse::success(payload))
}

/// POST /api/billing/print - ready-to-render document
pub async fn print(
    State(state): State<ServerState>,
    body: Result<Json<BillingDocument>, JsonRejection>,
) -> AppResult<ApiResponse<PrintDocument>> {
    let document = prepared_document(&state, body)?;
    let totals = compute_document_totals(&document);
    Ok(ApiResponse::success(PrintDocument::build(&document, &totals)))
}
