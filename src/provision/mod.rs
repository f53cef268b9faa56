//! Environment provisioning for a fresh deployment.
//!
//! # Data Flow
//! ```text
//! generate_api_key (256-bit, hex)
//!     → secrets.rs (upsert into the local secrets file)
//!     → deploy.rs (push function config, then deploy, via the cloud CLI)
//! ```
//!
//! Used by the `zimage-setup` binary.

pub mod deploy;
pub mod secrets;

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;
use url::Url;

pub use deploy::DeployCli;
pub use secrets::{upsert_env, write_secrets_file};

pub const API_SECRET_KEY: &str = "API_SECRET_KEY";
pub const API_BASE_URL: &str = "API_BASE_URL";
pub const ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid deployment URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("deployment step `{step}` failed: {reason}")]
    Deployment { step: &'static str, reason: String },
}

/// A fresh 256-bit key, hex encoded (64 characters).
pub fn generate_api_key() -> String {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    hex::encode(key)
}

/// Parse the deployment URL the site will call.
pub fn parse_deployment_url(raw: &str) -> Result<Url, SetupError> {
    Url::parse(raw.trim()).map_err(|source| SetupError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// Origin of `url`, the default value for `ALLOWED_ORIGINS`.
pub fn default_allowed_origins(url: &Url) -> String {
    url.origin().ascii_serialization()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_256_bit_hex() {
        let key = generate_api_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key, generate_api_key());
    }

    #[test]
    fn test_deployment_url() {
        let url = parse_deployment_url(" https://api.example.com/v1 ").unwrap();
        assert_eq!(default_allowed_origins(&url), "https://api.example.com");

        let err = parse_deployment_url("not a url").unwrap_err();
        assert!(matches!(err, SetupError::InvalidUrl { .. }));
    }
}
