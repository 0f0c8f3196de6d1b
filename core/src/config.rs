//! Client configuration.
//!
//! # Design
//! Everything a request needs besides its lookup key lives in one
//! `ClientConfig` owned by the client: the service base URL, the optional
//! API key and the per-call timeout. Nothing is process-global, so two
//! clients with different keys can coexist.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://www.vouchley.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const BASE_URL_ENV: &str = "VOUCHLEY_BASE_URL";
pub const API_KEY_ENV: &str = "VOUCHLEY_API_KEY";
pub const TIMEOUT_ENV: &str = "VOUCHLEY_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// The key must never end up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Read overrides from `VOUCHLEY_BASE_URL`, `VOUCHLEY_API_KEY` and
    /// `VOUCHLEY_TIMEOUT_SECS`. Unset or empty variables keep the defaults.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        if let Some(base_url) = var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        if let Some(api_key) = var(API_KEY_ENV) {
            config = config.with_api_key(api_key);
        }
        if let Some(secs) = var(TIMEOUT_ENV) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ApiError::InvalidConfig(format!("{TIMEOUT_ENV} is not a number of seconds: {secs:?}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the bearer token sent with every request. An empty key is
    /// treated as no key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.is_empty()).then_some(api_key);
        self
    }

    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Reject configurations that cannot produce a valid request URL.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.base_url.is_empty() {
            return Err(ApiError::InvalidConfig("base url is empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApiError::InvalidConfig(format!(
                "base url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ApiError::InvalidConfig("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}
