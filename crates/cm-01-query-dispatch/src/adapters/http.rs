//! # HTTP Transport
//!
//! reqwest-backed [`QueryTransport`].

use crate::domain::{DispatcherConfig, HeaderSet, QueryEnvelope, TransportError};
use crate::ports::QueryTransport;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::trace;

/// HTTP transport over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client honouring the configured timeouts.
    pub fn new(config: &DispatcherConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn header_map(headers: &HeaderSet) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::Request(format!("invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::Request(format!("invalid header value: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Read the body; empty means absent. Non-2xx becomes `Status`.
async fn read_body(response: Response) -> Result<Option<Value>, TransportError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    trace!(status = status.as_u16(), len = bytes.len(), "response received");

    if !status.is_success() {
        return Err(TransportError::Status {
            code: status.as_u16(),
            body: serde_json::from_slice(&bytes).ok(),
        });
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| TransportError::Decode(e.to_string()))
}

#[async_trait]
impl QueryTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &HeaderSet,
        envelope: &QueryEnvelope,
    ) -> Result<Option<Value>, TransportError> {
        let body = serde_json::to_vec(envelope)
            .map_err(|e| TransportError::Request(format!("failed to encode envelope: {e}")))?;

        let response = self
            .client
            .post(url)
            .headers(header_map(headers)?)
            .body(body)
            .send()
            .await?;

        read_body(response).await
    }

    async fn get_json(
        &self,
        url: &str,
        headers: &HeaderSet,
    ) -> Result<Option<Value>, TransportError> {
        let response = self
            .client
            .get(url)
            .headers(header_map(headers)?)
            .send()
            .await?;

        read_body(response).await
    }
}
