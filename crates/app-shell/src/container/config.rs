//! # Application Configuration
//!
//! Defaults for every setting with environment overrides.
//!
//! ## Environment Variables
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `CM_API_BASE_URL` | data service base URL |
//! | `CM_REQUEST_TIMEOUT_MS` | whole-request timeout |
//! | `CM_CONNECT_TIMEOUT_MS` | connect timeout |
//! | `CM_IGNORED_KEYS` | comma-separated settings ignore-list |
//! | `CM_MOBILE_MAX_WIDTH` | largest mobile viewport width |
//! | `CM_MOBILE_MAX_HEIGHT` | largest mobile viewport height |
//! | `CM_LOG_LEVEL` or `RUST_LOG` | log filter |

use crate::layout::LayoutRule;
use crate::settings::DEFAULT_IGNORED_KEYS;
use cm_01_query_dispatch::DispatcherConfig;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Complete application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Data service client.
    pub api: DispatcherConfig,
    /// Settings store.
    pub settings: SettingsConfig,
    /// Viewport classification.
    pub layout: LayoutConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Settings store configuration.
#[derive(Debug, Clone)]
pub struct SettingsConfig {
    /// Keys excluded from notification and export.
    pub ignored_keys: Vec<String>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            ignored_keys: DEFAULT_IGNORED_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Layout configuration.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Largest mobile width.
    pub mobile_max_width: u32,
    /// Largest mobile height.
    pub mobile_max_height: u32,
    /// Async listener buffer of the layout channel.
    pub channel_capacity: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let rule = LayoutRule::default();
        Self {
            mobile_max_width: rule.max_width,
            mobile_max_height: rule.max_height,
            channel_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl LayoutConfig {
    /// Thresholds as a rule.
    #[must_use]
    pub fn rule(&self) -> LayoutRule {
        LayoutRule {
            max_width: self.mobile_max_width,
            max_height: self.mobile_max_height,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `cm_01_query_dispatch=debug`.
    pub level: String,
    /// Include module targets in output.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Data service settings rejected.
    #[error("api: {0}")]
    Api(#[from] cm_01_query_dispatch::ConfigError),

    /// A layout threshold is zero.
    #[error("layout: {0} must be greater than zero")]
    ZeroThreshold(&'static str),

    /// The layout channel cannot buffer anything.
    #[error("layout: channel_capacity must be greater than zero")]
    ZeroCapacity,

    /// An ignore-list entry is blank.
    #[error("settings: ignored key must not be blank")]
    BlankIgnoredKey,
}

impl AppConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden from `lookup`. Unparseable values are skipped.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("CM_API_BASE_URL") {
            config.api.base_url = url;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "CM_REQUEST_TIMEOUT_MS") {
            config.api.request_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "CM_CONNECT_TIMEOUT_MS") {
            config.api.connect_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(keys) = lookup("CM_IGNORED_KEYS") {
            config.settings.ignored_keys = keys
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(width) = parse_var(&lookup, "CM_MOBILE_MAX_WIDTH") {
            config.layout.mobile_max_width = width;
        }
        if let Some(height) = parse_var(&lookup, "CM_MOBILE_MAX_HEIGHT") {
            config.layout.mobile_max_height = height;
        }
        if let Some(level) = lookup("CM_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.logging.level = level;
        }

        config
    }

    /// Validate all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.layout.mobile_max_width == 0 {
            return Err(ConfigError::ZeroThreshold("mobile_max_width"));
        }
        if self.layout.mobile_max_height == 0 {
            return Err(ConfigError::ZeroThreshold("mobile_max_height"));
        }
        if self.layout.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.settings.ignored_keys.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::BlankIgnoredKey);
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}
