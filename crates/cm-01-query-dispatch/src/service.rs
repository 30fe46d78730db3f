//! # Query Dispatcher
//!
//! Sends envelopes through a [`QueryTransport`] and settles each one exactly
//! once. Dispatches are independent: concurrent calls share nothing but the
//! counters.

use crate::adapters::HttpTransport;
use crate::domain::{
    configure_headers, is_truthy, DispatchError, DispatcherConfig, HeaderSet, QueryCommand,
    QueryEnvelope, ServiceReply, ServiceStatus,
};
use crate::ports::{QueryApi, QueryTransport};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Dispatch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchStats {
    /// Envelopes handed to the transport.
    pub dispatched: u64,
    /// Dispatches that resolved with a body.
    pub succeeded: u64,
    /// Dispatches rejected with `EmptyResponse`.
    pub empty: u64,
    /// Dispatches rejected with `InvalidResponse`.
    pub invalid: u64,
    /// Dispatches rejected by the transport.
    pub transport_failures: u64,
}

#[derive(Debug, Default)]
struct StatsCounters {
    dispatched: AtomicU64,
    succeeded: AtomicU64,
    empty: AtomicU64,
    invalid: AtomicU64,
    transport_failures: AtomicU64,
}

impl StatsCounters {
    fn record(&self, outcome: &Result<Value, DispatchError>) {
        let counter = match outcome {
            Ok(_) => &self.succeeded,
            Err(DispatchError::EmptyResponse) => &self.empty,
            Err(DispatchError::InvalidResponse) => &self.invalid,
            Err(_) => &self.transport_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> DispatchStats {
        DispatchStats {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            empty: self.empty.load(Ordering::Relaxed),
            invalid: self.invalid.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
        }
    }
}

/// Classify a transport body.
fn settle(body: Option<Value>) -> Result<Value, DispatchError> {
    match body {
        None | Some(Value::Null) => Err(DispatchError::EmptyResponse),
        Some(value) if !is_truthy(&value) => Err(DispatchError::InvalidResponse),
        Some(value) => Ok(value),
    }
}

/// Client for the campaign data service.
pub struct QueryDispatcher {
    transport: Arc<dyn QueryTransport>,
    data_url: String,
    status_url: String,
    headers: HeaderSet,
    stats: StatsCounters,
}

impl QueryDispatcher {
    /// Create a dispatcher over `transport`.
    ///
    /// Fails when the configuration is invalid or carries a header override.
    pub fn new(
        config: &DispatcherConfig,
        transport: Arc<dyn QueryTransport>,
    ) -> Result<Self, DispatchError> {
        config.validate()?;
        let headers = configure_headers(config.header_override.as_ref())?;

        Ok(Self {
            transport,
            data_url: config.data_url(),
            status_url: config.status_url(),
            headers,
            stats: StatsCounters::default(),
        })
    }

    /// Create a dispatcher over a reqwest-backed transport.
    pub fn with_http(config: &DispatcherConfig) -> Result<Self, DispatchError> {
        let transport = HttpTransport::new(config)?;
        Self::new(config, Arc::new(transport))
    }

    /// Envelope endpoint.
    #[must_use]
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// Headers attached to every request.
    #[must_use]
    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Send one envelope.
    ///
    /// Exactly one transport call is made. The body is returned unmodified.
    #[instrument(
        skip(self, envelope),
        fields(
            entity = %envelope.entity(),
            action = %envelope.action(),
            request_id = %Uuid::new_v4(),
        )
    )]
    pub async fn dispatch(&self, envelope: QueryEnvelope) -> Result<Value, DispatchError> {
        self.stats.dispatched.fetch_add(1, Ordering::Relaxed);

        let outcome = match self
            .transport
            .post_json(&self.data_url, &self.headers, &envelope)
            .await
        {
            Ok(body) => settle(body),
            Err(err) => Err(DispatchError::Transport(err)),
        };

        self.stats.record(&outcome);
        match &outcome {
            Ok(_) => debug!("dispatch resolved"),
            Err(e) => debug!(error = %e, "dispatch rejected"),
        }
        outcome
    }

    /// Send a typed command.
    pub async fn execute(&self, command: QueryCommand) -> Result<Value, DispatchError> {
        self.dispatch(command.into_envelope()).await
    }

    /// Send a typed command and decode the `data` of the service reply.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        command: QueryCommand,
    ) -> Result<T, DispatchError> {
        let body = self.execute(command).await?;
        ServiceReply::from_value(body)?.into_data()
    }

    /// Probe the status endpoint.
    ///
    /// An absent or `null` body is [`DispatchError::EmptyResponse`], as for
    /// [`dispatch`](Self::dispatch).
    #[instrument(skip(self))]
    pub async fn status(&self) -> Result<ServiceStatus, DispatchError> {
        let body = match self
            .transport
            .get_json(&self.status_url, &self.headers)
            .await?
        {
            None | Some(Value::Null) => return Err(DispatchError::EmptyResponse),
            Some(body) => body,
        };
        serde_json::from_value(body).map_err(|e| DispatchError::Decode(e.to_string()))
    }

    /// Counters since creation.
    #[must_use]
    pub fn stats(&self) -> DispatchStats {
        self.stats.snapshot()
    }
}

impl std::fmt::Debug for QueryDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryDispatcher")
            .field("data_url", &self.data_url)
            .field("status_url", &self.status_url)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl QueryApi for QueryDispatcher {
    async fn dispatch(&self, envelope: QueryEnvelope) -> Result<Value, DispatchError> {
        QueryDispatcher::dispatch(self, envelope).await
    }

    async fn status(&self) -> Result<ServiceStatus, DispatchError> {
        QueryDispatcher::status(self).await
    }
}
