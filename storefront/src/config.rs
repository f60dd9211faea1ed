//! Storefront configuration.
//!
//! Loads configuration from environment variables with defaults pointing at
//! the hosted development services.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default catalog/search service
pub const DEFAULT_SEARCH_API_URL: &str = "https://t1uohu23vl.execute-api.us-east-1.amazonaws.com/dev";

/// Default purchase service
pub const DEFAULT_PURCHASE_API_URL: &str =
    "https://y4bndl0fk1.execute-api.us-east-1.amazonaws.com/dev";

/// Storefront configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Base URL of the catalog/search service (`STOREFRONT_SEARCH_API_URL`)
    pub search_api_url: String,
    /// Base URL of the purchase service (`STOREFRONT_PURCHASE_API_URL`)
    pub purchase_api_url: String,
    /// Suggestion debounce in milliseconds (`STOREFRONT_DEBOUNCE_MS`, default 300)
    pub debounce_ms: u64,
    /// Directory for client storage (`STOREFRONT_STORAGE_DIR`, default `.storefront`)
    pub storage_dir: PathBuf,
    /// HTTP request timeout in seconds (`STOREFRONT_REQUEST_TIMEOUT_SECS`, default 10)
    pub request_timeout_secs: u64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            search_api_url: DEFAULT_SEARCH_API_URL.to_string(),
            purchase_api_url: DEFAULT_PURCHASE_API_URL.to_string(),
            debounce_ms: 300,
            storage_dir: PathBuf::from(".storefront"),
            request_timeout_secs: 10,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            search_api_url: lookup("STOREFRONT_SEARCH_API_URL")
                .unwrap_or(defaults.search_api_url),
            purchase_api_url: lookup("STOREFRONT_PURCHASE_API_URL")
                .unwrap_or(defaults.purchase_api_url),
            debounce_ms: parse_var(&lookup, "STOREFRONT_DEBOUNCE_MS")?
                .unwrap_or(defaults.debounce_ms),
            storage_dir: lookup("STOREFRONT_STORAGE_DIR")
                .map_or(defaults.storage_dir, PathBuf::from),
            request_timeout_secs: parse_var(&lookup, "STOREFRONT_REQUEST_TIMEOUT_SECS")?
                .unwrap_or(defaults.request_timeout_secs),
        })
    }

    /// Quiet period before a suggestion fetch fires
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Per-request HTTP timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value })
        })
        .transpose()
}
