use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Query, State},
    Json,
};

use crate::common::ApiError;
use crate::domains::content::{fetch_content, ContentRequest, ContentResponse};
use crate::server::app::AppState;

/// `GET /api/content[?url=...]` - single story when `url` is given, full listing otherwise
pub async fn content_get_handler(
    State(state): State<AppState>,
    query: Result<Query<ContentRequest>, QueryRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
    let Query(request) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let response = fetch_content(&state.deps, request.into_lookup()).await?;
    Ok(Json(response))
}

/// `POST /api/content` with `{"url": ...}` - always a single story
pub async fn content_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let lookup = request.into_single().map_err(ApiError::BadRequest)?;

    let response = fetch_content(&state.deps, lookup).await?;
    Ok(Json(response))
}
