//! Session issuing and liveness.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::envelope::ok;
use crate::http::server::AppState;
use crate::security::token::{generate_secure_token, session_cookie, SESSION_MAX_AGE_SECS};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIssued {
    pub max_age: u64,
}

/// `POST /session`: set a fresh session cookie.
///
/// The token only travels in the `HttpOnly` cookie, never in the body.
pub async fn create_session(State(state): State<AppState>) -> Response {
    let token = generate_secure_token();
    let cookie = session_cookie(&token, &state.policy);
    tracing::debug!(secure = state.policy.secure_cookies, "Session issued");

    (
        [(header::SET_COOKIE, cookie)],
        ok(SessionIssued {
            max_age: SESSION_MAX_AGE_SECS,
        }),
    )
        .into_response()
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
