//! CORS response headers for a request origin.
//!
//! Policy:
//! - Origin listed exactly in `allowed_origins`: echoed back
//! - Otherwise, `*` in `allowed_origins`: `Access-Control-Allow-Origin: *`
//! - Otherwise: no allow-origin header, i.e. no CORS grant
//!
//! Methods, allowed headers and max-age are always sent.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::security::origin::is_origin_allowed;
use crate::security::policy::{SecurityPolicy, ANY_ORIGIN};

static ALLOW_METHODS: HeaderValue = HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS");
static ALLOW_HEADERS: HeaderValue =
    HeaderValue::from_static("Content-Type, Authorization, X-Requested-With");
static MAX_AGE: HeaderValue = HeaderValue::from_static("86400");
static TRUE: HeaderValue = HeaderValue::from_static("true");
static WILDCARD: HeaderValue = HeaderValue::from_static(ANY_ORIGIN);

/// Build the CORS header set for a request carrying `origin`.
pub fn build_cors_headers(origin: Option<&str>, policy: &SecurityPolicy) -> HeaderMap {
    let mut headers = HeaderMap::new();

    let allowed = origin.filter(|o| is_origin_allowed(Some(o), policy));
    let allow_origin = match allowed {
        Some(o) if policy.lists_origin(o) => HeaderValue::from_str(o).ok(),
        _ if policy.allows_any_origin() => Some(WILDCARD.clone()),
        _ => None,
    };
    if let Some(value) = allow_origin {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }

    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS.clone());

    if policy.cors_credentials {
        headers.insert(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, TRUE.clone());
    }

    headers.insert(header::ACCESS_CONTROL_MAX_AGE, MAX_AGE.clone());
    headers
}
