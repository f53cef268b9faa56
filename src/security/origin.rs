//! Origin allow-list check.

use crate::security::policy::SecurityPolicy;

/// Is `origin` permitted under the policy's allow-list?
///
/// Missing or empty origins are never allowed. Otherwise the origin must be an
/// exact member of `allowed_origins`, or the list must contain `*`.
pub fn is_origin_allowed(origin: Option<&str>, policy: &SecurityPolicy) -> bool {
    match origin {
        None | Some("") => false,
        Some(origin) => policy.allows_any_origin() || policy.lists_origin(origin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(origins: &[&str]) -> SecurityPolicy {
        SecurityPolicy {
            allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
            ..SecurityPolicy::default()
        }
    }

    #[test]
    fn test_wildcard_allows_anything_non_empty() {
        let p = policy(&["https://good.example", "*"]);
        for origin in ["https://evil.example", "null", "x"] {
            assert!(is_origin_allowed(Some(origin), &p), "{origin}");
        }
    }

    #[test]
    fn test_missing_or_empty_never_allowed() {
        for p in [policy(&[]), policy(&["*"]), policy(&[""])] {
            assert!(!is_origin_allowed(None, &p));
            assert!(!is_origin_allowed(Some(""), &p));
        }
    }

    #[test]
    fn test_exact_match_only() {
        let p = policy(&["https://good.example"]);
        assert!(is_origin_allowed(Some("https://good.example"), &p));
        assert!(!is_origin_allowed(Some("https://good.example/"), &p));
        assert!(!is_origin_allowed(Some("http://good.example"), &p));
        assert!(!is_origin_allowed(Some("https://evil.example"), &p));
    }
}
