//! API configuration for the `BotVips` backend.
//!
//! The base URL and timeouts come from environment variables (a `.env` file
//! is honored when present) with defaults matching the reference client:
//! 10 seconds for general API calls and 5 seconds for push-token
//! acquisition. The URL default targets the Android emulator loopback, which
//! is only useful in development, so falling back to it logs a warning.

use std::time::Duration;

use tracing::warn;

use crate::errors::{Error, Result};

/// Fallback backend URL (Android emulator loopback to the host machine).
pub const DEFAULT_API_URL: &str = "http://10.0.2.2:3000";

/// Default timeout for general API calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for push-permission/token acquisition.
pub const DEFAULT_PUSH_TOKEN_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the backend HTTP client and push-token acquisition.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the `BotVips` backend, without a trailing slash.
    pub base_url: String,
    /// Timeout applied to every backend request.
    pub request_timeout: Duration,
    /// Timeout for obtaining a device push token from the platform.
    pub push_token_timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration for the given base URL with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            push_token_timeout: DEFAULT_PUSH_TOKEN_TIMEOUT,
        }
    }

    /// Loads the configuration from the environment.
    ///
    /// Recognized variables:
    /// * `BOTVIPS_API_URL` - backend base URL
    /// * `BOTVIPS_REQUEST_TIMEOUT_SECS` - general request timeout
    /// * `BOTVIPS_PUSH_TIMEOUT_SECS` - push-token acquisition timeout
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a timeout override is present but not a
    /// positive integer number of seconds.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("BOTVIPS_API_URL").unwrap_or_else(|_| {
            warn!(
                "BOTVIPS_API_URL not set, falling back to {}",
                DEFAULT_API_URL
            );
            DEFAULT_API_URL.to_string()
        });

        Ok(Self {
            base_url,
            request_timeout: timeout_from_env("BOTVIPS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT)?,
            push_token_timeout: timeout_from_env("BOTVIPS_PUSH_TIMEOUT_SECS", DEFAULT_PUSH_TOKEN_TIMEOUT)?,
        })
    }

    /// Overrides the general request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Overrides the push-token acquisition timeout.
    #[must_use]
    pub fn with_push_token_timeout(mut self, timeout: Duration) -> Self {
        self.push_token_timeout = timeout;
        self
    }
}

fn timeout_from_env(var: &str, default: Duration) -> Result<Duration> {
    match std::env::var(var) {
        Err(_) => Ok(default),
        Ok(raw) => parse_timeout_secs(var, &raw),
    }
}

fn parse_timeout_secs(var: &str, raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::Config {
            message: format!("{var} must be a positive number of seconds, got '{raw}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_timeouts() {
        let config = ApiConfig::new("http://localhost:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.push_token_timeout, DEFAULT_PUSH_TOKEN_TIMEOUT);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ApiConfig::new("http://localhost:3000")
            .with_request_timeout(Duration::from_millis(250))
            .with_push_token_timeout(Duration::from_millis(100));
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.push_token_timeout, Duration::from_millis(100));
    }

    #[test]
    fn test_parse_timeout_accepts_positive_seconds() {
        let timeout = parse_timeout_secs("BOTVIPS_REQUEST_TIMEOUT_SECS", "15").unwrap();
        assert_eq!(timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_parse_timeout_rejects_garbage_and_zero() {
        assert!(matches!(
            parse_timeout_secs("BOTVIPS_REQUEST_TIMEOUT_SECS", "soon"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            parse_timeout_secs("BOTVIPS_REQUEST_TIMEOUT_SECS", "0"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_timeout_from_env_missing_uses_default() {
        let timeout =
            timeout_from_env("BOTVIPS_TEST_TIMEOUT_MISSING", DEFAULT_PUSH_TOKEN_TIMEOUT).unwrap();
        assert_eq!(timeout, DEFAULT_PUSH_TOKEN_TIMEOUT);
    }
}
