//! `/prompts/{id}/favorite` handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::favorites::FavoriteStatus;
use crate::http::envelope::{ok, ApiError};
use crate::http::server::AppState;
use crate::observability::metrics;

pub const ADDED_MESSAGE: &str = "已添加到收藏";
pub const REMOVED_MESSAGE: &str = "已取消收藏";

const STATUS_CACHE_CONTROL: &str = "private, max-age=60";

#[derive(Debug, Serialize)]
pub struct ToggleResult {
    #[serde(flatten)]
    pub status: FavoriteStatus,
    pub message: &'static str,
}

/// The `{id}` segment, or an enveloped error when it cannot be decoded.
fn path_id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::InvalidId(rejection.body_text()))
}

fn require_id(id: &str) -> Result<&str, ApiError> {
    if id.trim().is_empty() {
        Err(ApiError::MissingId)
    } else {
        Ok(id)
    }
}

/// `POST /prompts/{id}/favorite`
pub async fn toggle_favorite(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let id = path_id(path)?;
    let prompt_id = require_id(&id)?;
    let user_key = state.identity.resolve(&headers);

    let status = state
        .favorites
        .toggle_status(&user_key, prompt_id)
        .map_err(ApiError::ToggleFailed)?;
    metrics::record_favorite_toggle(status.is_favorite);

    let message = if status.is_favorite {
        ADDED_MESSAGE
    } else {
        REMOVED_MESSAGE
    };
    Ok(ok(ToggleResult { status, message }).into_response())
}

/// `GET /prompts/{id}/favorite`
pub async fn get_favorite(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let id = path_id(path)?;
    let prompt_id = require_id(&id)?;
    let user_key = state.identity.resolve(&headers);

    let status = state
        .favorites
        .get_status(&user_key, prompt_id)
        .map_err(ApiError::StatusFailed)?;

    Ok(([(header::CACHE_CONTROL, STATUS_CACHE_CONTROL)], ok(status)).into_response())
}

/// `/prompts//favorite`: the id segment is empty.
pub async fn missing_id() -> ApiError {
    ApiError::MissingId
}
