//! # Mock Transport
//!
//! Scripted [`QueryTransport`] for tests and offline runs.

use crate::domain::{HeaderSet, QueryEnvelope, TransportError};
use crate::ports::QueryTransport;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::time::Duration;

/// One scripted transport outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Successful call with a JSON body.
    Body(Value),
    /// Successful call without a body.
    Absent,
    /// Failed call.
    Fail(TransportError),
}

impl MockReply {
    fn into_result(self) -> Result<Option<Value>, TransportError> {
        match self {
            MockReply::Body(value) => Ok(Some(value)),
            MockReply::Absent => Ok(None),
            MockReply::Fail(err) => Err(err),
        }
    }
}

/// A call observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// `POST` or `GET`.
    pub method: &'static str,
    /// Target URL.
    pub url: String,
    /// Headers sent.
    pub headers: HeaderSet,
    /// Envelope sent (`POST` only).
    pub envelope: Option<QueryEnvelope>,
}

/// Mock transport.
///
/// Replies are taken from the script in order; once it is exhausted every
/// call gets the fallback reply.
#[derive(Debug)]
pub struct MockTransport {
    script: Mutex<VecDeque<MockReply>>,
    fallback: MockReply,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::always(MockReply::Body(serde_json::json!({ "status": "ok", "data": null })))
    }
}

impl MockTransport {
    /// Answer every call with `reply`.
    #[must_use]
    pub fn always(reply: MockReply) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: reply,
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Answer every call with a JSON body.
    #[must_use]
    pub fn with_body(body: Value) -> Self {
        Self::always(MockReply::Body(body))
    }

    /// Fail every call with `err`.
    #[must_use]
    pub fn failing(err: TransportError) -> Self {
        Self::always(MockReply::Fail(err))
    }

    /// Queue replies ahead of the fallback.
    #[must_use]
    pub fn scripted(mut self, replies: impl IntoIterator<Item = MockReply>) -> Self {
        self.script.get_mut().extend(replies);
        self
    }

    /// Sleep before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Calls seen so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of calls seen so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    async fn answer(&self, call: RecordedCall) -> Result<Option<Value>, TransportError> {
        self.calls.lock().push(call);
        let reply = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        reply.into_result()
    }
}

#[async_trait]
impl QueryTransport for MockTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &HeaderSet,
        envelope: &QueryEnvelope,
    ) -> Result<Option<Value>, TransportError> {
        self.answer(RecordedCall {
            method: "POST",
            url: url.to_string(),
            headers: headers.clone(),
            envelope: Some(envelope.clone()),
        })
        .await
    }

    async fn get_json(
        &self,
        url: &str,
        headers: &HeaderSet,
    ) -> Result<Option<Value>, TransportError> {
        self.answer(RecordedCall {
            method: "GET",
            url: url.to_string(),
            headers: headers.clone(),
            envelope: None,
        })
        .await
    }
}
