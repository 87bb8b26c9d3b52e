use axum::http::HeaderValue;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Constant-time credential check gating admin operations.
///
/// Accepts exactly one scheme: `Authorization: Basic <base64(user:pass)>`.
/// Both halves are compared as SHA-256 digests so the comparison length is
/// fixed, and the two comparisons are combined with a bitwise AND so neither
/// short-circuits. The raw credential is never logged or echoed.
pub struct AdminGuard {
    username_digest: Vec<u8>,
    password_digest: Vec<u8>,
}

impl AdminGuard {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username_digest: hash(username.as_bytes()),
            password_digest: hash(password.as_bytes()),
        }
    }

    /// `true` only for a well-formed header carrying the configured pair.
    /// Missing, malformed, or mismatched input denies; this never errors.
    pub fn check(&self, header: Option<&HeaderValue>) -> bool {
        let Some(value) = header else {
            return false;
        };
        let Ok(raw) = value.to_str() else {
            return false;
        };
        let Some(encoded) = raw.strip_prefix("Basic ") else {
            return false;
        };
        let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
            return false;
        };
        let Ok(pair) = String::from_utf8(decoded) else {
            return false;
        };
        let Some((username, password)) = pair.split_once(':') else {
            return false;
        };

        let username_ok = hash(username.as_bytes()).ct_eq(&self.username_digest);
        let password_ok = hash(password.as_bytes()).ct_eq(&self.password_digest);
        bool::from(username_ok & password_ok)
    }
}

fn hash(input: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hasher.finalize().to_vec()
}
