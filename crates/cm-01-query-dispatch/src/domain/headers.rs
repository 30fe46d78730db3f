//! # Header Policy
//!
//! Resolved once when a dispatcher is built and attached to every request.

use crate::domain::errors::DispatchError;
use serde::{Deserialize, Serialize};

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Accept` header name.
pub const ACCEPT: &str = "Accept";
/// `Access-Control-Allow-Headers` header name.
pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";

/// Ordered request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    /// The default header set.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            entries: vec![
                (CONTENT_TYPE.to_string(), "application/json".to_string()),
                (ACCEPT.to_string(), "*/*".to_string()),
                (
                    ACCESS_CONTROL_ALLOW_HEADERS.to_string(),
                    "Content-Type".to_string(),
                ),
            ],
        }
    }

    /// Value of `name`, compared case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Caller-supplied header configuration.
///
/// Accepted in configuration so the integration point exists, but there is
/// no conversion to a [`HeaderSet`] yet: supplying one fails with
/// [`DispatchError::UnsupportedHeaderOverride`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderOverride {
    /// Requested headers.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

/// Resolve the header set for a dispatcher.
pub fn configure_headers(config: Option<&HeaderOverride>) -> Result<HeaderSet, DispatchError> {
    match config {
        None => Ok(HeaderSet::defaults()),
        Some(_) => Err(DispatchError::UnsupportedHeaderOverride),
    }
}
