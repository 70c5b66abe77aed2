use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    /// Gemini key configured
    audit: bool,
    /// Storyblok credentials configured
    content: bool,
}

/// Health check endpoint
///
/// Reports which pipelines are usable. Never contacts an upstream.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        audit: state.deps.ai.is_some(),
        content: state.deps.content.is_some(),
    })
}
