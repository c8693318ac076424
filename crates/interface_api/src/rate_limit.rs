//! Request rate limiting
//!
//! Sliding-window rate limiting backed by an explicit store injected through
//! `AppState` - never a process-wide singleton. Expired windows are evicted
//! deterministically: a full sweep runs every [`SWEEP_INTERVAL`] checks, and
//! callers may force one with [`RateLimiter::evict_expired`].

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Checks between full sweeps of expired windows.
const SWEEP_INTERVAL: u64 = 256;

/// A rate-limit window configuration
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Window length
    pub window: Duration,
    /// Max requests allowed inside one window
    pub max_requests: u32,
}

/// Preset limits per endpoint class
pub mod presets {
    use super::RateLimitConfig;
    use chrono::Duration;

    /// Strict limits for authentication endpoints
    pub fn auth() -> RateLimitConfig {
        RateLimitConfig {
            window: Duration::minutes(15),
            max_requests: 5,
        }
    }

    /// Moderate limits for general API endpoints
    pub fn api() -> RateLimitConfig {
        RateLimitConfig {
            window: Duration::minutes(1),
            max_requests: 60,
        }
    }

    /// Lenient limits for read-only endpoints
    pub fn read() -> RateLimitConfig {
        RateLimitConfig {
            window: Duration::minutes(1),
            max_requests: 100,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RequestLog {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Outcome of a rate-limit check, carrying the header values clients see
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

impl RateLimitDecision {
    /// Seconds until the window resets, floored at zero
    pub fn retry_after_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.reset_at - now).num_seconds().max(0)
    }
}

/// Sliding-window rate limiter over client identifiers
pub struct RateLimiter {
    windows: Mutex<HashMap<String, RequestLog>>,
    checks: AtomicU64,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            checks: AtomicU64::new(0),
        }
    }

    /// Records a request for `client_id` and decides whether it is allowed.
    pub fn check(&self, client_id: &str, config: RateLimitConfig) -> RateLimitDecision {
        self.check_at(client_id, config, Utc::now())
    }

    /// Deterministic core of [`RateLimiter::check`] with an explicit clock.
    pub fn check_at(
        &self,
        client_id: &str,
        config: RateLimitConfig,
        now: DateTime<Utc>,
    ) -> RateLimitDecision {
        if self.checks.fetch_add(1, Ordering::Relaxed) % SWEEP_INTERVAL == SWEEP_INTERVAL - 1 {
            self.evict_expired_at(now);
        }

        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let entry = windows.get(client_id).copied();

        match entry {
            None => {
                let reset_at = now + config.window;
                windows.insert(
                    client_id.to_string(),
                    RequestLog {
                        count: 1,
                        reset_at,
                    },
                );
                RateLimitDecision {
                    allowed: true,
                    limit: config.max_requests,
                    remaining: config.max_requests.saturating_sub(1),
                    reset_at,
                }
            }
            Some(log) if now > log.reset_at => {
                let reset_at = now + config.window;
                windows.insert(
                    client_id.to_string(),
                    RequestLog {
                        count: 1,
                        reset_at,
                    },
                );
                RateLimitDecision {
                    allowed: true,
                    limit: config.max_requests,
                    remaining: config.max_requests.saturating_sub(1),
                    reset_at,
                }
            }
            Some(log) => {
                let count = log.count.saturating_add(1);
                windows.insert(
                    client_id.to_string(),
                    RequestLog {
                        count,
                        reset_at: log.reset_at,
                    },
                );
                RateLimitDecision {
                    allowed: count <= config.max_requests,
                    limit: config.max_requests,
                    remaining: config.max_requests.saturating_sub(count),
                    reset_at: log.reset_at,
                }
            }
        }
    }

    /// Removes every window that expired before `now`.
    pub fn evict_expired_at(&self, now: DateTime<Utc>) {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        windows.retain(|_, log| now <= log.reset_at);
    }

    /// Removes every expired window, using the UTC clock.
    pub fn evict_expired(&self) {
        self.evict_expired_at(Utc::now());
    }

    /// Clears the window for one client.
    pub fn reset(&self, client_id: &str) {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        windows.remove(client_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_allows_up_to_limit_then_blocks() {
        let limiter = RateLimiter::new();
        let config = RateLimitConfig {
            window: Duration::minutes(1),
            max_requests: 3,
        };

        for i in 0..3 {
            let decision = limiter.check_at("client", config, at(i));
            assert!(decision.allowed, "request {i} should pass");
        }
        let decision = limiter.check_at("client", config, at(3));
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let limiter = RateLimiter::new();
        let config = RateLimitConfig {
            window: Duration::seconds(30),
            max_requests: 1,
        };

        assert!(limiter.check_at("client", config, at(0)).allowed);
        assert!(!limiter.check_at("client", config, at(10)).allowed);
        assert!(limiter.check_at("client", config, at(31)).allowed);
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = RateLimiter::new();
        let config = RateLimitConfig {
            window: Duration::minutes(1),
            max_requests: 1,
        };

        assert!(limiter.check_at("a", config, at(0)).allowed);
        assert!(limiter.check_at("b", config, at(0)).allowed);
        assert!(!limiter.check_at("a", config, at(1)).allowed);
    }

    #[test]
    fn test_reset_clears_single_client() {
        let limiter = RateLimiter::new();
        let config = RateLimitConfig {
            window: Duration::minutes(1),
            max_requests: 1,
        };

        limiter.check_at("client", config, at(0));
        assert!(!limiter.check_at("client", config, at(1)).allowed);
        limiter.reset("client");
        assert!(limiter.check_at("client", config, at(2)).allowed);
    }

    #[test]
    fn test_eviction_drops_expired_windows() {
        let limiter = RateLimiter::new();
        let config = RateLimitConfig {
            window: Duration::seconds(10),
            max_requests: 1,
        };

        limiter.check_at("old", config, at(0));
        limiter.check_at("fresh", config, at(8));
        limiter.evict_expired_at(at(15));

        let windows = limiter.windows.lock().unwrap();
        assert!(!windows.contains_key("old"));
        assert!(windows.contains_key("fresh"));
    }

    #[test]
    fn test_retry_after_is_never_negative() {
        let decision = RateLimitDecision {
            allowed: false,
            limit: 1,
            remaining: 0,
            reset_at: at(0),
        };
        assert_eq!(decision.retry_after_secs(at(100)), 0);
    }
}
