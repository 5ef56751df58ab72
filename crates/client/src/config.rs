//! Harness configuration resolved from the environment.
//!
//! | variable          | default                  |
//! |-------------------|--------------------------|
//! | `STRIPE_MOCK_URL` | `http://localhost:12111` |
//! | `STRIPE_API_KEY`  | `sk_test_123`            |
//! | `REQUEST_TIMEOUT` | `30` (seconds)           |
//! | `VERIFY_SSL`      | `false`                  |
//!
//! Settings are a plain value: build them once at session start and hand
//! them to [`StripeClient`](crate::StripeClient).

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{ClientError, Result};

pub const BASE_URL_VAR: &str = "STRIPE_MOCK_URL";
pub const API_KEY_VAR: &str = "STRIPE_API_KEY";
pub const REQUEST_TIMEOUT_VAR: &str = "REQUEST_TIMEOUT";
pub const VERIFY_SSL_VAR: &str = "VERIFY_SSL";

/// Default address stripe-mock listens on
pub const DEFAULT_BASE_URL: &str = "http://localhost:12111";
/// Test key accepted by stripe-mock
pub const DEFAULT_API_KEY: &str = "sk_test_123";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings shared by every client of a test session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the API, without trailing slash
    pub base_url: String,

    /// Secret key sent as a bearer token; `None` sends no `Authorization` header
    pub api_key: Option<String>,

    /// Per-request timeout enforced by the transport
    pub request_timeout: Duration,

    /// Whether TLS certificates are verified
    pub verify_ssl: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: Some(DEFAULT_API_KEY.to_string()),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            verify_ssl: false,
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment
    ///
    /// A `.env` file in the working directory (or any parent) is loaded
    /// first; a missing file is not an error.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded environment file"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(error = %e, "Failed to load .env file"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup(BASE_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let api_key = lookup(API_KEY_VAR).or(defaults.api_key);

        let request_timeout = match lookup(REQUEST_TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    ClientError::Config(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        REQUEST_TIMEOUT_VAR, raw
                    ))
                })?;
                if secs == 0 {
                    return Err(ClientError::Config(format!(
                        "{} must be greater than zero",
                        REQUEST_TIMEOUT_VAR
                    )));
                }
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        let verify_ssl = lookup(VERIFY_SSL_VAR)
            .map(|raw| raw.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(defaults.verify_ssl);

        Ok(Self {
            base_url,
            api_key,
            request_timeout,
            verify_ssl,
        })
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Drop the API key so requests go out unauthenticated
    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Enable or disable TLS certificate verification
    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    /// Value of the `Authorization` header, if a non-empty key is configured
    pub fn auth_header(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(|key| format!("Bearer {}", key))
    }
}
