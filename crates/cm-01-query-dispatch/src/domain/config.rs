//! Dispatcher configuration with validation.

use crate::domain::errors::ConfigError;
use crate::domain::headers::HeaderOverride;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default service base address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/v1/";

/// Query dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Base address of the data service.
    pub base_url: String,
    /// Path of the envelope endpoint, relative to `base_url`.
    pub data_path: String,
    /// Path of the status endpoint, relative to `base_url`.
    pub status_path: String,
    /// Transport-level timeout for a whole request. `None` waits forever.
    pub request_timeout: Option<Duration>,
    /// Transport-level connect timeout.
    pub connect_timeout: Option<Duration>,
    /// Caller-supplied headers (currently unsupported).
    pub header_override: Option<HeaderOverride>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_path: "data".to_string(),
            status_path: "status".to_string(),
            request_timeout: None,
            connect_timeout: None,
            header_override: None,
        }
    }
}

impl DispatcherConfig {
    /// Configuration pointing at `base_url`, everything else default.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        match reqwest::Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidBaseUrl(self.base_url.clone())),
        }
        if self.data_path.trim().is_empty() {
            return Err(ConfigError::EmptyPath("data_path"));
        }
        if self.status_path.trim().is_empty() {
            return Err(ConfigError::EmptyPath("status_path"));
        }
        Ok(())
    }

    /// Full URL of the envelope endpoint.
    #[must_use]
    pub fn data_url(&self) -> String {
        join_url(&self.base_url, &self.data_path)
    }

    /// Full URL of the status endpoint.
    #[must_use]
    pub fn status_url(&self) -> String {
        join_url(&self.base_url, &self.status_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
