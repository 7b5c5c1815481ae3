//! Fixed-window rate limiting.
//!
//! In-memory per-key counters. A window opens at the first request for a
//! key; all requests inside it share one counter, and the counter resets
//! when the window elapses.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rate limit configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed inside one window
    pub max_requests: u32,
    /// Window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

struct Window {
    started_at_ms: i64,
    count: u32,
}

/// Fixed-window counter keyed by an opaque string (typically a client IP).
pub struct FixedWindowLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count a request for `key` against the current window.
    pub fn check(&self, key: &str) -> RateLimitResult {
        self.check_at(key, now_ms())
    }

    /// Same as [`check`](Self::check) with an explicit clock, for tests.
    pub fn check_at(&self, key: &str, now_ms: i64) -> RateLimitResult {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at_ms: now_ms,
            count: 0,
        });

        if now_ms - window.started_at_ms >= self.config.window_ms() {
            window.started_at_ms = now_ms;
            window.count = 0;
        }

        window.count += 1;

        RateLimitResult {
            allowed: window.count <= self.config.max_requests,
            remaining: self.config.max_requests.saturating_sub(window.count),
            reset_at_ms: window.started_at_ms + self.config.window_ms(),
        }
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
