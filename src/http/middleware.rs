//! Response decoration and request accounting middleware.
//!
//! Wired in `server.rs` with `axum::middleware::from_fn*`. Metrics sit outside
//! CORS so answered preflights are counted too.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::envelope::ApiError;
use crate::observability::metrics;
use crate::security::{apply_security_headers, build_cors_headers, is_origin_allowed, SecurityPolicy};

/// Add the policy's security headers to every response.
pub async fn security_headers(
    State(policy): State<Arc<SecurityPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    apply_security_headers(response, &policy)
}

/// Answer preflights and attach CORS headers to cross-origin responses.
pub async fn cors(
    State(policy): State<Arc<SecurityPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    if origin.is_some() && !is_origin_allowed(origin.as_deref(), &policy) {
        tracing::debug!(origin = ?origin, "Origin not in allow-list, no CORS grant");
    }

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        response
            .headers_mut()
            .extend(build_cors_headers(origin.as_deref(), &policy));
        return response;
    }

    let mut response = next.run(request).await;
    if origin.is_some() {
        response
            .headers_mut()
            .extend(build_cors_headers(origin.as_deref(), &policy));
    }
    response
}

/// Re-wrap bare error statuses from the framework and tower layers (body
/// limit, timeout, method routing) in the JSON error envelope.
pub async fn envelope_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if is_json(&response) {
        return response;
    }
    match ApiError::from_status(response.status()) {
        Some(err) => {
            let mut enveloped = err.into_response();
            if let Some(allow) = response.headers().get(header::ALLOW) {
                enveloped.headers_mut().insert(header::ALLOW, allow.clone());
            }
            enveloped
        }
        None => response,
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Count requests and record latency.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();

    let response = next.run(request).await;
    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}
