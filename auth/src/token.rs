//! Opaque bearer tokens and API-key comparison.
//!
//! Session tokens are 32 bytes of OS randomness, base64url-encoded. The
//! raw token is returned to the client once; only its SHA-256 digest is
//! stored, so a leaked session table cannot be replayed. Lookup by digest
//! also makes comparison timing-independent of the stored value.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes in a session token.
const TOKEN_BYTES: usize = 32;

/// Generate a fresh opaque session token.
#[must_use]
pub fn generate() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 digest of a token, base64url-encoded, as stored at rest.
#[must_use]
pub fn digest(token: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()))
}

/// Constant-time comparison of a presented admin API key against the
/// configured one.
///
/// This is the entire administrative capability check: it gates the train
/// catalog's `create` boundary and never reaches the allocation engine.
#[must_use]
pub fn verify_api_key(presented: &str, configured: &str) -> bool {
    constant_time_eq(presented.as_bytes(), configured.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_url_safe() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        // 32 bytes -> 43 base64url chars without padding
        assert_eq!(a.len(), 43);
    }

    #[test]
    fn digest_is_deterministic_and_not_identity() {
        let token = generate();
        assert_eq!(digest(&token), digest(&token));
        assert_ne!(digest(&token), token);
    }

    #[test]
    fn api_key_comparison() {
        assert!(verify_api_key("secret", "secret"));
        assert!(!verify_api_key("secret", "other"));
        assert!(!verify_api_key("", "secret"));
    }
}
