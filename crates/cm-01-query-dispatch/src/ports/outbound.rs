//! # Outbound Port - QueryTransport
//!
//! The HTTP-capable transport the dispatcher depends on.

use crate::domain::{HeaderSet, QueryEnvelope, TransportError};
use async_trait::async_trait;
use serde_json::Value;

/// Transport used to reach the data service.
///
/// A successful call yields `Some(body)` when the response carried a JSON
/// body and `None` when it carried nothing. Implementations must not retry.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// POST `envelope` as JSON to `url`.
    async fn post_json(
        &self,
        url: &str,
        headers: &HeaderSet,
        envelope: &QueryEnvelope,
    ) -> Result<Option<Value>, TransportError>;

    /// GET `url` and decode the JSON body.
    async fn get_json(&self, url: &str, headers: &HeaderSet)
        -> Result<Option<Value>, TransportError>;
}
