//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → tokio TcpListener (plain HTTP), or
//!     → tls.rs + axum-server (HTTPS)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - TLS is optional and selected purely by configuration
//! - Missing certificate files fail startup with a clear message

pub mod tls;
