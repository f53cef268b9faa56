//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order (metrics, then HTTP)
//! - Bind the listener last, so traffic only arrives when ready
//! - Serve until the shutdown broadcast fires
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::net::tls::load_tls_config;
use crate::observability::metrics;
use crate::security::SecurityPolicy;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid bind address `{0}`")]
    BindAddress(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS setup failed: {0}")]
    Tls(#[source] std::io::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Start every subsystem and serve until `shutdown` triggers.
pub async fn start(
    config: ServerConfig,
    policy: SecurityPolicy,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        identity_header = %config.favorites.identity_header,
        "Configuration loaded"
    );
    tracing::info!(
        force_https = policy.force_https,
        csp_enabled = policy.csp_enabled,
        allowed_origins = ?policy.allowed_origins,
        cors_credentials = policy.cors_credentials,
        "Security policy loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let addr: SocketAddr = config
        .listener
        .bind_address
        .parse()
        .map_err(|_| StartupError::BindAddress(config.listener.bind_address.clone()))?;

    let tls = match &config.listener.tls {
        Some(tls) => Some(load_tls_config(tls).await.map_err(StartupError::Tls)?),
        None => None,
    };

    let server = HttpServer::new(config, policy);
    let shutdown_rx = shutdown.subscribe();

    match tls {
        Some(tls) => server
            .run_tls(addr, tls, shutdown_rx)
            .await
            .map_err(StartupError::Serve),
        None => {
            let listener = TcpListener::bind(addr)
                .await
                .map_err(|source| StartupError::Bind { addr, source })?;
            server
                .run(listener, shutdown_rx)
                .await
                .map_err(StartupError::Serve)
        }
    }
}
