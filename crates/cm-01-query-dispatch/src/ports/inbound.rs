//! # Inbound Port - QueryApi
//!
//! Primary driving port for sending envelopes to the data service.

use crate::domain::{DispatchError, QueryEnvelope, ServiceStatus};
use async_trait::async_trait;
use serde_json::Value;

/// Primary API for the Query Dispatch subsystem.
///
/// # Example
///
/// ```rust,ignore
/// use cm_01_query_dispatch::{QueryApi, QueryEnvelope};
///
/// async fn load_users(api: &impl QueryApi) {
///     let envelope = QueryEnvelope::empty("User", "get_multiple").unwrap();
///     match api.dispatch(envelope).await {
///         Ok(body) => println!("{body}"),
///         Err(e) => eprintln!("{e}"),
///     }
/// }
/// ```
#[async_trait]
pub trait QueryApi: Send + Sync {
    /// Send one envelope and settle exactly once.
    ///
    /// # Errors
    /// - `Transport`: the transport call failed (passed through unmodified)
    /// - `EmptyResponse`: the body was absent or `null`
    /// - `InvalidResponse`: the body was falsy
    async fn dispatch(&self, envelope: QueryEnvelope) -> Result<Value, DispatchError>;

    /// Probe the service status endpoint.
    async fn status(&self) -> Result<ServiceStatus, DispatchError>;
}
