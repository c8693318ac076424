//! CSRF protection
//!
//! Double-submit token scheme: the server issues a random token which the
//! client sends back in the `x-csrf-token` header on state-changing
//! requests. Issued tokens live in an explicit store injected through
//! `AppState`, with a fixed TTL; expired tokens are evicted on every issue
//! and validate call.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Mutex;

/// Header carrying the CSRF token on state-changing requests.
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";

/// How long an issued token stays valid.
const TOKEN_TTL_HOURS: i64 = 24;

/// Store of issued CSRF tokens with their expiry times
pub struct CsrfTokenStore {
    tokens: Mutex<HashMap<String, DateTime<Utc>>>,
    ttl: Duration,
}

impl Default for CsrfTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CsrfTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    /// Issues a fresh token and records its expiry.
    pub fn issue(&self) -> String {
        self.issue_at(Utc::now())
    }

    /// Deterministic core of [`CsrfTokenStore::issue`] with an explicit clock.
    pub fn issue_at(&self, now: DateTime<Utc>) -> String {
        let token = generate_token();
        let mut tokens = self.tokens.lock().unwrap_or_else(|e| e.into_inner());
        tokens.retain(|_, expires| now < *expires);
        tokens.insert(token.clone(), now + self.ttl);
        token
    }

    /// Whether the presented token was issued here and has not expired.
    pub fn validate(&self, presented: &str) -> bool {
        self.validate_at(presented, Utc::now())
    }

    /// Deterministic core of [`CsrfTokenStore::validate`].
    pub fn validate_at(&self, presented: &str, now: DateTime<Utc>) -> bool {
        let mut tokens = self.tokens.lock().unwrap_or_else(|e| e.into_inner());
        tokens.retain(|_, expires| now < *expires);
        tokens
            .keys()
            .any(|issued| constant_time_eq(issued.as_bytes(), presented.as_bytes()))
    }

    /// Invalidates a single token.
    pub fn revoke(&self, token: &str) {
        let mut tokens = self.tokens.lock().unwrap_or_else(|e| e.into_inner());
        tokens.remove(token);
    }
}

/// Generates a 32-byte random token, hex-encoded.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Timing-safe byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_issued_token_validates() {
        let store = CsrfTokenStore::new();
        let token = store.issue_at(at(0));
        assert_eq!(token.len(), 64);
        assert!(store.validate_at(&token, at(60)));
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let store = CsrfTokenStore::new();
        store.issue_at(at(0));
        assert!(!store.validate_at("deadbeef", at(1)));
    }

    #[test]
    fn test_expired_token_is_rejected_and_evicted() {
        let store = CsrfTokenStore::new();
        let token = store.issue_at(at(0));
        let after_ttl = at(25 * 60 * 60);
        assert!(!store.validate_at(&token, after_ttl));
        assert!(store.tokens.lock().unwrap().is_empty());
    }

    #[test]
    fn test_revoked_token_is_rejected() {
        let store = CsrfTokenStore::new();
        let token = store.issue_at(at(0));
        store.revoke(&token);
        assert!(!store.validate_at(&token, at(1)));
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = CsrfTokenStore::new();
        let first = store.issue_at(at(0));
        let second = store.issue_at(at(0));
        assert_ne!(first, second);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
