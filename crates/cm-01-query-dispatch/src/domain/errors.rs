//! # Domain Errors
//!
//! Error types for query dispatch.

use serde_json::Value;
use thiserror::Error;

/// Failure reported by the transport layer.
///
/// Surfaced to callers unmodified inside [`DispatchError::Transport`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransportError {
    /// Could not reach the service.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The transport gave up waiting.
    #[error("Request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("Server returned HTTP {code}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Decoded JSON body, if the response carried one.
        body: Option<Value>,
    },

    /// The response body was not JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// Any other request failure.
    #[error("Request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// The service's own error message (`{"error": "..."}`) on a status failure.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Status {
                body: Some(body), ..
            } => body.get("error").and_then(Value::as_str),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Reason a dispatch was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DispatchError {
    /// Envelope field that must not be empty was empty.
    #[error("Invalid envelope: {field} must not be empty")]
    InvalidEnvelope {
        /// Offending field name.
        field: &'static str,
    },

    /// The transport call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The transport succeeded without a body (or with `null`).
    #[error("No response from server")]
    EmptyResponse,

    /// The transport succeeded with a falsy body.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// A custom header configuration was supplied.
    #[error("Not implemented: custom header configuration is not supported")]
    UnsupportedHeaderOverride,

    /// A service reply could not be decoded into the requested type.
    #[error("Failed to decode service reply: {0}")]
    Decode(String),

    /// The dispatcher configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Invalid dispatcher configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No base URL.
    #[error("base_url must not be empty")]
    EmptyBaseUrl,

    /// Base URL is not an absolute http(s) URL.
    #[error("Invalid base_url '{0}'")]
    InvalidBaseUrl(String),

    /// A path suffix is empty.
    #[error("{0} must not be empty")]
    EmptyPath(&'static str),
}
