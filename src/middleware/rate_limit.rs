//! Rate limiting for authentication endpoints
//!
//! This module provides a sliding-window rate limiter keyed by client IP,
//! applied to login and signup to slow down credential guessing.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::utils::errors::{Result, UniEventsError};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window_duration: Duration,
    /// Burst allowance (extra requests allowed in short bursts)
    pub burst_allowance: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_duration: Duration::from_secs(60),
            burst_allowance: 5,
        }
    }
}

/// Rate limit entry tracking one client's requests
#[derive(Debug, Clone)]
struct RateLimitEntry {
    requests: Vec<Instant>,
    burst_used: u32,
    last_reset: Instant,
}

impl RateLimitEntry {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
            burst_used: 0,
            last_reset: Instant::now(),
        }
    }

    /// Clean up old requests outside the window
    fn cleanup(&mut self, window_duration: Duration) {
        let cutoff = Instant::now() - window_duration;
        self.requests.retain(|&time| time > cutoff);

        // Reset burst if enough time has passed
        if self.last_reset.elapsed() > window_duration {
            self.burst_used = 0;
            self.last_reset = Instant::now();
        }
    }

    /// Check if a request is allowed
    fn is_allowed(&mut self, config: &RateLimitConfig) -> bool {
        self.cleanup(config.window_duration);

        let current_requests = self.requests.len() as u32;

        if current_requests < config.max_requests {
            return true;
        }

        // Check if burst allowance is available
        if self.burst_used < config.burst_allowance {
            self.burst_used += 1;
            return true;
        }

        false
    }

    /// Record a new request
    fn record_request(&mut self) {
        self.requests.push(Instant::now());
    }
}

/// In-memory sliding-window rate limiter
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Check and record a request for the given key.
    ///
    /// Keys are client IPs; a poisoned lock fails open rather than taking
    /// down authentication. Stale clients are purged on every check so the
    /// map tracks only addresses seen within the recent past.
    pub fn check(&self, key: &str) -> Result<()> {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(_) => return Ok(()),
        };

        Self::purge_stale(&mut entries, self.config.window_duration);

        let entry = entries
            .entry(key.to_string())
            .or_insert_with(RateLimitEntry::new);

        if !entry.is_allowed(&self.config) {
            warn!(key = key, "Rate limit exceeded");
            return Err(UniEventsError::RateLimitExceeded);
        }

        entry.record_request();
        Ok(())
    }

    /// Number of client keys currently tracked
    pub fn tracked_clients(&self) -> usize {
        match self.entries.lock() {
            Ok(entries) => entries.len(),
            Err(_) => 0,
        }
    }

    /// Drop entries whose newest request left the window long ago.
    ///
    /// Entries are kept for twice the window so burst accounting survives
    /// a quiet spell shorter than the window itself.
    fn purge_stale(entries: &mut HashMap<String, RateLimitEntry>, window_duration: Duration) {
        let cutoff = 2 * window_duration;
        entries.retain(|_, entry| {
            entry
                .requests
                .last()
                .is_some_and(|newest| newest.elapsed() < cutoff)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight_config() -> RateLimitConfig {
        RateLimitConfig {
            max_requests: 3,
            window_duration: Duration::from_secs(60),
            burst_allowance: 1,
        }
    }

    #[test]
    fn test_allows_requests_within_limit() {
        let limiter = RateLimiter::new(tight_config());
        for _ in 0..3 {
            assert!(limiter.check("10.0.0.1").is_ok());
        }
    }

    #[test]
    fn test_blocks_after_limit_and_burst() {
        let limiter = RateLimiter::new(tight_config());
        // 3 within limit + 1 burst
        for _ in 0..4 {
            assert!(limiter.check("10.0.0.2").is_ok());
        }
        assert!(matches!(
            limiter.check("10.0.0.2"),
            Err(UniEventsError::RateLimitExceeded)
        ));
    }

    #[test]
    fn test_stale_clients_are_purged() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 3,
            window_duration: Duration::from_millis(10),
            burst_allowance: 1,
        });

        for i in 0..50 {
            let _ = limiter.check(&format!("10.1.0.{}", i));
        }
        assert_eq!(limiter.tracked_clients(), 50);

        // Past twice the window every one of those clients is stale; the
        // next check sweeps them out
        std::thread::sleep(Duration::from_millis(50));
        limiter.check("10.2.0.1").unwrap();
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_active_clients_survive_the_purge() {
        let limiter = RateLimiter::new(tight_config());
        limiter.check("10.3.0.1").unwrap();
        limiter.check("10.3.0.2").unwrap();
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(tight_config());
        for _ in 0..4 {
            let _ = limiter.check("10.0.0.3");
        }
        assert!(limiter.check("10.0.0.4").is_ok());
    }
}
