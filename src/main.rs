//! Z-Image API server.
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace ─▶ security headers ─▶ CORS ─▶ metrics
//!                                                                          │
//!                                                                          ▼
//!                                              timeout ─▶ body limit ─▶ router
//!                                                                          │
//!                       ┌──────────────────────────────────────────────────┤
//!                       ▼                                                  ▼
//!              /prompts/{id}/favorite                             /session, /health
//!                       │
//!                       ▼
//!          identity (header hash) ─▶ FavoriteService ─▶ FavoriteStore
//! ```
//!
//! Configuration comes from an optional TOML file (`--config`); the security
//! policy comes from the environment and is read once here.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use zimage_api::config::{load_config, ServerConfig};
use zimage_api::lifecycle::{signals, startup, Shutdown};
use zimage_api::observability::logging;
use zimage_api::SecurityPolicy;

#[derive(Parser)]
#[command(name = "zimage-api")]
#[command(about = "Z-Image favorite API server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("zimage-api v{} starting", env!("CARGO_PKG_VERSION"));

    let policy = SecurityPolicy::from_env();

    let shutdown = Arc::new(Shutdown::new());
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        trigger.trigger();
    });

    startup::start(config, policy, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
