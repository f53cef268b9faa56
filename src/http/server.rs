//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, security headers, CORS,
//!   metrics, error enveloping, timeout, body limit)
//! - Serve plain HTTP on a Tokio listener or HTTPS through axum-server
//! - Stop gracefully on the shutdown broadcast

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderName, Request},
    middleware,
    routing::{get, post},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::favorites::{
    FavoriteService, FavoriteStore, HeaderHashIdentity, IdentityResolver, InMemoryFavoriteStore,
};
use crate::http::envelope::ApiError;
use crate::http::request::{request_id_of, UuidRequestId};
use crate::http::{favorite, middleware as mw, session};
use crate::lifecycle::shutdown;
use crate::security::SecurityPolicy;

/// Connections still open this long after shutdown are cut.
const TLS_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub policy: Arc<SecurityPolicy>,
    pub favorites: FavoriteService,
    pub identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    pub fn new(
        policy: SecurityPolicy,
        store: Arc<dyn FavoriteStore>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            policy: Arc::new(policy),
            favorites: FavoriteService::new(store),
            identity,
        }
    }
}

/// HTTP server for the favorite API.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server with the in-memory favorite store and header-hash identity.
    pub fn new(config: ServerConfig, policy: SecurityPolicy) -> Self {
        let identity_header = HeaderName::from_bytes(config.favorites.identity_header.as_bytes())
            .unwrap_or_else(|_| {
                tracing::warn!(
                    header = %config.favorites.identity_header,
                    "Invalid identity header, falling back to user-agent"
                );
                header::USER_AGENT
            });

        let state = AppState::new(
            policy,
            Arc::new(InMemoryFavoriteStore::new()),
            Arc::new(HeaderHashIdentity::new(identity_header)),
        );
        Self::with_state(config, state)
    }

    /// Create a server around caller-provided state (custom store or identity).
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let policy = state.policy.clone();

        Router::new()
            .route(
                "/prompts/{id}/favorite",
                get(favorite::get_favorite).post(favorite::toggle_favorite),
            )
            .route(
                "/prompts//favorite",
                get(favorite::missing_id).post(favorite::missing_id),
            )
            .route("/session", post(session::create_session))
            .route("/health", get(session::health))
            .fallback(not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn(mw::envelope_errors))
            .layer(middleware::from_fn_with_state(policy.clone(), mw::cors))
            .layer(middleware::from_fn(mw::track_metrics))
            .layer(middleware::from_fn_with_state(policy, mw::security_headers))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id_of(request),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server with TLS termination.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            shutdown::wait(shutdown_rx).await;
            drain.graceful_shutdown(Some(TLS_DRAIN_TIMEOUT));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
