//! Session token generation and the session cookie.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::security::policy::SecurityPolicy;

const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const TOKEN_LEN: usize = 32;
pub const SESSION_COOKIE: &str = "session_id";
pub const SESSION_MAX_AGE_SECS: u64 = 86_400;

/// A 32-character alphanumeric token drawn from the OS CSPRNG.
///
/// Bytes are reduced modulo 62, so the distribution is slightly biased.
/// Good enough for session identifiers, not for key material.
pub fn generate_secure_token() -> String {
    let mut bytes = [0u8; TOKEN_LEN];
    OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
        .collect()
}

/// `Set-Cookie` value carrying a session token.
pub fn session_cookie(token: &str, policy: &SecurityPolicy) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={SESSION_MAX_AGE_SECS}"
    );
    if policy.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        for _ in 0..100 {
            let token = generate_secure_token();
            assert_eq!(token.len(), TOKEN_LEN);
            assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_tokens_differ() {
        assert_ne!(generate_secure_token(), generate_secure_token());
    }

    #[test]
    fn test_cookie_secure_flag() {
        let plain = session_cookie("abc", &SecurityPolicy::default());
        assert_eq!(
            plain,
            "session_id=abc; Path=/; HttpOnly; SameSite=Strict; Max-Age=86400"
        );

        let policy = SecurityPolicy {
            secure_cookies: true,
            ..SecurityPolicy::default()
        };
        assert!(session_cookie("abc", &policy).ends_with("; Secure"));
    }
}
