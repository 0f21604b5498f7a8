//! Axum route handlers for the Drafting API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::drafting::models::{ContractDocument, DraftRequest};
use crate::drafting::pipeline::draft_contract;
use crate::drafting::render::render_plain_text;
use crate::errors::AppError;
use crate::state::AppState;

pub const SUPPORTED_CONTRACT_TYPES: &[&str] = &[
    "NDA",
    "Service Agreement",
    "Employment Contract",
    "Consulting Agreement",
];
pub const DEFAULT_CONTRACT_TYPE: &str = "NDA";

/// Unwraps the JSON body. Every field may be blank; the pipeline fills placeholders.
fn accept(payload: Result<Json<DraftRequest>, JsonRejection>) -> Result<DraftRequest, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(request.normalized())
}

async fn draft(state: &AppState, request: &DraftRequest) -> ContractDocument {
    info!(
        "Drafting {} between {} and {}",
        request.contract_type, request.party_a, request.party_b
    );
    draft_contract(state.invoker.as_ref(), request, state.config.model_timeout()).await
}

/// POST /api/v1/contracts/draft
pub async fn handle_draft(
    State(state): State<AppState>,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> Result<Json<ContractDocument>, AppError> {
    let request = accept(payload)?;
    Ok(Json(draft(&state, &request).await))
}

/// POST /api/v1/contracts/draft/text
///
/// Same pipeline as `/draft`, rendered as plain text.
pub async fn handle_draft_text(
    State(state): State<AppState>,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> Result<String, AppError> {
    let request = accept(payload)?;
    let document = draft(&state, &request).await;
    Ok(render_plain_text(&document))
}

/// GET /api/v1/contracts/types
pub async fn handle_contract_types() -> Json<Value> {
    Json(json!({
        "supportedTypes": SUPPORTED_CONTRACT_TYPES,
        "defaultType": DEFAULT_CONTRACT_TYPE
    }))
}
