use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::common::ApiError;
use crate::domains::audit::{run_audit, AuditRequest, AuditResult};
use crate::server::app::AppState;

/// `POST /api/audit`
///
/// Body is `{"url": ...}` or `{"html": ...}`. A body that is not JSON is
/// answered with 400 like any other invalid input.
pub async fn audit_handler(
    State(state): State<AppState>,
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> Result<Json<AuditResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let result = run_audit(&state.deps, request).await?;
    Ok(Json(result))
}
