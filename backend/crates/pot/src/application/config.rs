//! Application Configuration

use std::time::Duration;

use platform::rate_limit::RateLimitConfig;

/// Bearer token lifetime (1 hour)
pub const TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Pot application configuration
///
/// There is deliberately no `Default` and no generated fallback secret:
/// the token secret is mandatory and startup fails without one.
#[derive(Debug, Clone)]
pub struct PotConfig {
    /// Secret key for HMAC token signing (32 bytes)
    pub token_secret: [u8; 32],
    /// Token lifetime
    pub token_ttl: Duration,
    /// Optional application-wide password pepper
    pub password_pepper: Option<Vec<u8>>,
    /// Per-IP fixed-window limit applied at the router boundary
    pub rate_limit: RateLimitConfig,
}

impl PotConfig {
    pub fn new(token_secret: [u8; 32]) -> Self {
        Self {
            token_secret,
            token_ttl: TOKEN_TTL,
            password_pepper: None,
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Token lifetime in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl.as_secs() as i64
    }

    /// Password pepper as a slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
