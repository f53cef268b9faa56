//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Process start:
//!     → policy.rs (read environment once → Arc<SecurityPolicy>)
//!
//! Every response:
//!     → cors.rs (CORS grant for the request Origin)
//!     → headers.rs (HSTS, CSP, frame/content-type/referrer/permissions)
//! ```
//!
//! # Design Decisions
//! - Policy is read-only for the process lifetime
//! - Loading never fails; absent settings fall back to defaults
//! - Header composition is pure; wiring lives in `http::middleware`

pub mod cors;
pub mod headers;
pub mod origin;
pub mod policy;
pub mod token;

pub use cors::build_cors_headers;
pub use headers::{apply_security_headers, build_csp};
pub use origin::is_origin_allowed;
pub use policy::SecurityPolicy;
pub use token::{generate_secure_token, session_cookie};
