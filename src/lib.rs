//! Z-Image API layer.
//!
//! Serves the prompt favorite API behind an environment-driven security and
//! CORS policy, and provides the provisioning helpers used by `zimage-setup`.

pub mod config;
pub mod favorites;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod provision;
pub mod security;

pub use config::ServerConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
pub use security::SecurityPolicy;
