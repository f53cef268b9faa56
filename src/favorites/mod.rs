//! Favorite toggle subsystem.
//!
//! # Data Flow
//! ```text
//! request headers
//!     → identity.rs (header → anonymous user key)
//!     → service.rs (get_status / toggle_status)
//!     → store.rs (FavoriteStore: in-memory by default)
//! ```
//!
//! # Design Decisions
//! - Storage sits behind a trait so a persistent backend can replace it
//! - Identity resolution is pluggable; the default is not authentication
//! - Reads never create store entries

pub mod identity;
pub mod service;
pub mod store;

pub use identity::{HeaderHashIdentity, IdentityResolver};
pub use service::{FavoriteService, FavoriteStatus};
pub use store::{FavoriteStore, InMemoryFavoriteStore, StoreError};
