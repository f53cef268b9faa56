//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → middleware.rs (security headers, CORS, metrics)
//!     → favorite.rs / session.rs (handlers)
//!     → envelope.rs (JSON success/error envelope)
//!     → Send to client
//! ```

pub mod envelope;
pub mod favorite;
pub mod middleware;
pub mod request;
pub mod server;
pub mod session;

pub use envelope::ApiError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
