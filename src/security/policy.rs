//! Security policy loaded from the process environment.
//!
//! Read once at startup and shared as `Arc<SecurityPolicy>`. Loading never
//! fails: absent variables take their defaults and string values are used
//! as given.

use std::env;

pub const DEFAULT_HSTS_MAX_AGE: u64 = 31_536_000;
pub const DEFAULT_FRAME_OPTIONS: &str = "DENY";
pub const DEFAULT_CONTENT_TYPE_OPTIONS: &str = "nosniff";

/// Wildcard entry in `allowed_origins`.
pub const ANY_ORIGIN: &str = "*";

/// Response-hardening and CORS policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityPolicy {
    /// Attach `Strict-Transport-Security` (`FORCE_HTTPS`).
    pub force_https: bool,
    /// HSTS `max-age` in seconds (`HSTS_MAX_AGE`).
    pub hsts_max_age_secs: u64,
    /// Attach `Content-Security-Policy` (`CSP_ENABLED`).
    pub csp_enabled: bool,
    /// `X-Frame-Options` value (`X_FRAME_OPTIONS`).
    pub frame_options: String,
    /// `X-Content-Type-Options` value (`X_CONTENT_TYPE_OPTIONS`).
    pub content_type_options: String,
    /// CORS allow-list, may contain `*` (`ALLOWED_ORIGINS`, comma separated).
    pub allowed_origins: Vec<String>,
    /// Send `Access-Control-Allow-Credentials: true` (`CORS_CREDENTIALS`).
    pub cors_credentials: bool,
    /// Mark issued cookies `Secure` (`SECURE_COOKIES`).
    pub secure_cookies: bool,
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            force_https: false,
            hsts_max_age_secs: DEFAULT_HSTS_MAX_AGE,
            csp_enabled: false,
            frame_options: DEFAULT_FRAME_OPTIONS.to_string(),
            content_type_options: DEFAULT_CONTENT_TYPE_OPTIONS.to_string(),
            allowed_origins: Vec::new(),
            cors_credentials: false,
            secure_cookies: false,
        }
    }
}

impl SecurityPolicy {
    /// Load the policy from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the policy through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).map(|v| v == "true").unwrap_or(false);

        let hsts_max_age_secs = match lookup("HSTS_MAX_AGE") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "HSTS_MAX_AGE is not a number, using default");
                DEFAULT_HSTS_MAX_AGE
            }),
            None => DEFAULT_HSTS_MAX_AGE,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            force_https: flag("FORCE_HTTPS"),
            hsts_max_age_secs,
            csp_enabled: flag("CSP_ENABLED"),
            frame_options: lookup("X_FRAME_OPTIONS")
                .unwrap_or_else(|| DEFAULT_FRAME_OPTIONS.to_string()),
            content_type_options: lookup("X_CONTENT_TYPE_OPTIONS")
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE_OPTIONS.to_string()),
            allowed_origins,
            cors_credentials: flag("CORS_CREDENTIALS"),
            secure_cookies: flag("SECURE_COOKIES"),
        }
    }

    /// Whether the allow-list contains the `*` wildcard.
    pub fn allows_any_origin(&self) -> bool {
        self.lists_origin(ANY_ORIGIN)
    }

    /// Exact membership in `allowed_origins`.
    pub fn lists_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn policy_from(vars: &[(&str, &str)]) -> SecurityPolicy {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SecurityPolicy::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let policy = policy_from(&[]);
        assert_eq!(policy, SecurityPolicy::default());
        assert_eq!(policy.hsts_max_age_secs, 31_536_000);
        assert_eq!(policy.frame_options, "DENY");
        assert_eq!(policy.content_type_options, "nosniff");
        assert!(policy.allowed_origins.is_empty());
    }

    #[test]
    fn test_flags_require_literal_true() {
        let policy = policy_from(&[
            ("FORCE_HTTPS", "true"),
            ("CSP_ENABLED", "TRUE"),
            ("CORS_CREDENTIALS", "1"),
            ("SECURE_COOKIES", "true"),
        ]);
        assert!(policy.force_https);
        assert!(!policy.csp_enabled);
        assert!(!policy.cors_credentials);
        assert!(policy.secure_cookies);
    }

    #[test]
    fn test_origins_are_split_and_trimmed() {
        let policy = policy_from(&[(
            "ALLOWED_ORIGINS",
            "https://a.example, https://b.example,,  ",
        )]);
        assert_eq!(
            policy.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(!policy.allows_any_origin());
    }

    #[test]
    fn test_malformed_hsts_falls_back() {
        let policy = policy_from(&[("HSTS_MAX_AGE", "a-year")]);
        assert_eq!(policy.hsts_max_age_secs, DEFAULT_HSTS_MAX_AGE);

        let policy = policy_from(&[("HSTS_MAX_AGE", "600")]);
        assert_eq!(policy.hsts_max_age_secs, 600);
    }

    #[test]
    fn test_strings_pass_through_unvalidated() {
        let policy = policy_from(&[("X_FRAME_OPTIONS", "SAMEORIGIN"), ("ALLOWED_ORIGINS", "*")]);
        assert_eq!(policy.frame_options, "SAMEORIGIN");
        assert!(policy.allows_any_origin());
    }
}
