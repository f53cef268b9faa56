//! Security response headers.
//!
//! # Responsibilities
//! - Compose the static Content-Security-Policy
//! - Decorate outgoing responses with HSTS, CSP and browser hardening headers
//!
//! # Design Decisions
//! - CSP text is fixed; `csp_enabled` only decides whether it is attached
//! - HSTS is attached only when HTTPS is forced
//! - Existing response headers with the same name are replaced

use axum::http::{header, HeaderName, HeaderValue, Response};

use crate::security::policy::SecurityPolicy;

pub const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");

static XSS_PROTECTION: HeaderValue = HeaderValue::from_static("1; mode=block");
static REFERRER: HeaderValue = HeaderValue::from_static("strict-origin-when-cross-origin");
static PERMISSIONS: HeaderValue =
    HeaderValue::from_static("camera=(), microphone=(), geolocation=()");

const CSP_DIRECTIVES: &[&str] = &[
    "default-src 'self'",
    "script-src 'self' 'unsafe-inline' 'unsafe-eval'",
    "style-src 'self' 'unsafe-inline' https://fonts.googleapis.com",
    "font-src 'self' https://fonts.gstatic.com data:",
    "img-src 'self' data: blob: https:",
    "connect-src 'self' https:",
    "media-src 'self' blob: https:",
    "object-src 'none'",
    "base-uri 'self'",
    "form-action 'self'",
    "frame-ancestors 'none'",
    "upgrade-insecure-requests",
];

/// The Content-Security-Policy header value.
pub fn build_csp() -> String {
    CSP_DIRECTIVES.join("; ")
}

/// Return `response` with the policy's security headers added.
///
/// Status and body are untouched.
pub fn apply_security_headers<B>(mut response: Response<B>, policy: &SecurityPolicy) -> Response<B> {
    let headers = response.headers_mut();

    if policy.force_https {
        let hsts = format!(
            "max-age={}; includeSubDomains; preload",
            policy.hsts_max_age_secs
        );
        insert_str(headers, header::STRICT_TRANSPORT_SECURITY, &hsts);
    }

    if policy.csp_enabled {
        insert_str(headers, header::CONTENT_SECURITY_POLICY, &build_csp());
    }

    insert_str(headers, header::X_FRAME_OPTIONS, &policy.frame_options);
    insert_str(headers, header::X_CONTENT_TYPE_OPTIONS, &policy.content_type_options);
    headers.insert(header::X_XSS_PROTECTION, XSS_PROTECTION.clone());
    headers.insert(header::REFERRER_POLICY, REFERRER.clone());
    headers.insert(PERMISSIONS_POLICY, PERMISSIONS.clone());

    response
}

fn insert_str(headers: &mut axum::http::HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.insert(name, v);
        }
        Err(_) => {
            tracing::warn!(header = %name, value = %value, "Skipping invalid security header value");
        }
    }
}
