//! JSON response envelope and API errors.
//!
//! Success: `{"success": true, "data": ...}`
//! Failure: `{"success": false, "error": {"code": ..., "message": ...}}`
//!
//! Internal failures are logged with their cause; callers only ever see the
//! fixed public message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::favorites::StoreError;

#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub success: bool,
    pub data: T,
}

/// Wrap `data` in a success envelope.
pub fn ok<T: Serialize>(data: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        data,
    })
}

#[derive(Debug, Serialize)]
pub struct Failure {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: &'static str,
}

/// Every error a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("prompt id is missing")]
    MissingId,

    #[error("toggling favorite failed: {0}")]
    ToggleFailed(#[source] StoreError),

    #[error("reading favorite status failed: {0}")]
    StatusFailed(#[source] StoreError),

    #[error("prompt id is not valid: {0}")]
    InvalidId(String),

    #[error("no such route")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("request timed out")]
    Timeout,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingId | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::ToggleFailed(_) | ApiError::StatusFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingId => "MISSING_ID",
            ApiError::ToggleFailed(_) => "TOGGLE_FAVORITE_FAILED",
            ApiError::StatusFailed(_) => "GET_FAVORITE_STATUS_FAILED",
            ApiError::InvalidId(_) => "INVALID_ID",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ApiError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ApiError::Timeout => "REQUEST_TIMEOUT",
        }
    }

    /// Message shown to the caller. Never includes the underlying cause.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::MissingId => "缺少提示词ID",
            ApiError::ToggleFailed(_) => "切换收藏状态失败",
            ApiError::StatusFailed(_) => "获取收藏状态失败",
            ApiError::InvalidId(_) => "提示词ID无效",
            ApiError::NotFound => "接口不存在",
            ApiError::MethodNotAllowed => "请求方法不被允许",
            ApiError::PayloadTooLarge => "请求体过大",
            ApiError::Timeout => "请求超时",
        }
    }

    /// Envelope equivalent of a bare error status produced below the
    /// handlers (body limit, timeout, method routing).
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::METHOD_NOT_ALLOWED => Some(ApiError::MethodNotAllowed),
            StatusCode::PAYLOAD_TOO_LARGE => Some(ApiError::PayloadTooLarge),
            StatusCode::REQUEST_TIMEOUT => Some(ApiError::Timeout),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.code(), "Request rejected");
        }

        let body = Failure {
            success: false,
            error: ErrorBody {
                code: self.code(),
                message: self.public_message(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_codes() {
        assert_eq!(ApiError::MissingId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingId.code(), "MISSING_ID");

        let err = ApiError::ToggleFailed(StoreError::Unavailable("disk on fire".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "TOGGLE_FAVORITE_FAILED");
        assert!(!err.public_message().contains("disk"));

        let err = ApiError::StatusFailed(StoreError::Unavailable("x".into()));
        assert_eq!(err.code(), "GET_FAVORITE_STATUS_FAILED");

        let err = ApiError::InvalidId("bad utf-8".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_ID");
        assert!(!err.public_message().contains("utf-8"));
    }

    #[test]
    fn test_from_status() {
        assert_eq!(
            ApiError::from_status(StatusCode::PAYLOAD_TOO_LARGE).map(|e| e.code()),
            Some("PAYLOAD_TOO_LARGE")
        );
        assert_eq!(
            ApiError::from_status(StatusCode::REQUEST_TIMEOUT).map(|e| e.status()),
            Some(StatusCode::REQUEST_TIMEOUT)
        );
        assert_eq!(
            ApiError::from_status(StatusCode::METHOD_NOT_ALLOWED).map(|e| e.code()),
            Some("METHOD_NOT_ALLOWED")
        );
        assert!(ApiError::from_status(StatusCode::OK).is_none());
        assert!(ApiError::from_status(StatusCode::BAD_GATEWAY).is_none());
    }

    #[test]
    fn test_success_shape() {
        let Json(body) = ok(serde_json::json!({ "a": 1 }));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "success": true, "data": { "a": 1 } })
        );
    }
}
