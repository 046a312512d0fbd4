//! Client configuration.
//!
//! A [`ClientConfig`] is built once, wrapped in an `Arc` by the client, and never
//! mutated afterwards; every operation reads it concurrently without locking.

use std::env;
use std::fmt;
use std::time::Duration;

use reqwest::Url;

use crate::error::{ApiError, Result};
use crate::utils::log_sanitizer::mask_credential;

/// Production API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://rest.active24.cz";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default upper bound on pages fetched by one listing call.
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "ACTIVE24_API_KEY";
/// Environment variable holding the API secret.
pub const ENV_API_SECRET: &str = "ACTIVE24_API_SECRET";
/// Environment variable overriding the endpoint.
pub const ENV_API_ENDPOINT: &str = "ACTIVE24_API_ENDPOINT";
/// Environment variable overriding the request timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "ACTIVE24_TIMEOUT_SECS";
/// Environment variable overriding the page limit.
pub const ENV_MAX_PAGES: &str = "ACTIVE24_MAX_PAGES";

/// Immutable client settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: String,
    auth_key: String,
    auth_secret: String,
    timeout: Duration,
    max_pages: usize,
}

impl ClientConfig {
    /// Settings with the default endpoint, timeout and page limit.
    pub fn new(auth_key: impl Into<String>, auth_secret: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            auth_key: auth_key.into(),
            auth_secret: auth_secret.into(),
            timeout: DEFAULT_TIMEOUT,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Load settings from `ACTIVE24_*` environment variables.
    ///
    /// `ACTIVE24_API_KEY` and `ACTIVE24_API_SECRET` are required;
    /// `ACTIVE24_API_ENDPOINT`, `ACTIVE24_TIMEOUT_SECS` and `ACTIVE24_MAX_PAGES`
    /// override the defaults when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ApiError::Config {
                    key: key.to_string(),
                    detail: "environment variable is not set".to_string(),
                })
        };

        let mut config = Self::new(required(ENV_API_KEY)?, required(ENV_API_SECRET)?);

        if let Some(endpoint) = lookup(ENV_API_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = Duration::from_secs(parse_number(ENV_TIMEOUT_SECS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_MAX_PAGES) {
            config.max_pages = parse_number(ENV_MAX_PAGES, &raw)?;
        }

        config.validated()
    }

    /// Check the endpoint and normalise the settings.
    ///
    /// The endpoint must be an absolute `http`/`https` URL; a trailing `/` is
    /// dropped. The page limit is raised to at least 1.
    pub(crate) fn validated(mut self) -> Result<Self> {
        let url = Url::parse(&self.endpoint).map_err(|e| ApiError::Config {
            key: "endpoint".to_string(),
            detail: format!("'{}' is not a valid URL: {e}", self.endpoint),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config {
                key: "endpoint".to_string(),
                detail: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        self.endpoint = self.endpoint.trim_end_matches('/').to_string();
        self.max_pages = self.max_pages.max(1);
        Ok(self)
    }

    pub(crate) fn set_endpoint(&mut self, endpoint: String) {
        self.endpoint = endpoint;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_pages(&mut self, max_pages: usize) {
        self.max_pages = max_pages;
    }

    /// Base URL requests are issued against.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// API key (Basic-auth username).
    pub fn auth_key(&self) -> &str {
        &self.auth_key
    }

    pub(crate) fn auth_secret(&self) -> &str {
        &self.auth_secret
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Maximum pages one listing call fetches before giving up with partial data.
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("auth_key", &mask_credential(&self.auth_key))
            .field("auth_secret", &"****")
            .field("timeout", &self.timeout)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e| ApiError::Config {
        key: key.to_string(),
        detail: format!("invalid value '{raw}': {e}"),
    })
}
