//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use zimage_api::{HttpServer, SecurityPolicy, ServerConfig, Shutdown};

pub const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
#[allow(dead_code)]
pub const SAFARI: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 Safari/605.1.15";

/// Fully layered router with default config.
#[allow(dead_code)]
pub fn app(policy: SecurityPolicy) -> Router {
    HttpServer::new(ServerConfig::default(), policy).router()
}

/// Send one request through `router` and decode the JSON body (Null if empty).
#[allow(dead_code)]
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

#[allow(dead_code)]
pub fn request(method: &str, uri: &str, user_agent: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("user-agent", user_agent)
        .body(Body::empty())
        .unwrap()
}

/// Start a real server on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_server(
    policy: SecurityPolicy,
) -> (SocketAddr, Shutdown, JoinHandle<std::io::Result<()>>) {
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, policy);
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    (addr, shutdown, handle)
}
