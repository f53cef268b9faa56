//! Anonymous user keys.
//!
//! There is no authentication in front of the favorite API. A user key is
//! derived from a request header so that the same browser lands in the same
//! bucket. Anyone sending the same header value shares the bucket, which makes
//! this unsuitable wherever per-user correctness matters.

use axum::http::{HeaderMap, HeaderName};
use sha2::{Digest, Sha256};

/// Length of a derived user key, in hex characters.
pub const USER_KEY_LEN: usize = 16;

/// Maps request headers to a user key.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> String;
}

/// Hashes one header value (SHA-256, first 16 hex chars).
#[derive(Debug, Clone)]
pub struct HeaderHashIdentity {
    header: HeaderName,
}

impl HeaderHashIdentity {
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }
}

impl Default for HeaderHashIdentity {
    fn default() -> Self {
        Self::new(axum::http::header::USER_AGENT)
    }
}

impl IdentityResolver for HeaderHashIdentity {
    fn resolve(&self, headers: &HeaderMap) -> String {
        let raw = headers
            .get(&self.header)
            .map(|v| v.as_bytes())
            .unwrap_or_default();
        derive_user_key(raw)
    }
}

pub fn derive_user_key(raw: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw);
    let mut key = hex::encode(hasher.finalize());
    key.truncate(USER_KEY_LEN);
    key
}
