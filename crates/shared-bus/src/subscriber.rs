//! # Async Subscriptions
//!
//! Receiving side for listeners that prefer awaiting over callbacks.

use std::pin::Pin;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The source was dropped.
    #[error("Source closed")]
    Closed,
}

/// A handle for awaiting events published after it was created.
///
/// Nothing published before the subscription existed is ever delivered.
/// A listener that falls more than the channel capacity behind skips the
/// oldest pending events rather than blocking the publisher.
pub struct Subscription<E> {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<E>,

    /// Name of the source, for logs.
    source: String,
}

impl<E: Clone> Subscription<E> {
    /// Create a new subscription.
    pub(crate) fn new(receiver: broadcast::Receiver<E>, source: impl Into<String>) -> Self {
        Self {
            receiver,
            source: source.into(),
        }
    }

    /// Wrap a receiver obtained from any broadcast sender.
    #[must_use]
    pub fn from_receiver(receiver: broadcast::Receiver<E>, source: impl Into<String>) -> Self {
        Self::new(receiver, source)
    }

    /// Receive the next event.
    ///
    /// # Returns
    ///
    /// - `Some(event)` - The next event
    /// - `None` - The source was dropped
    pub async fn recv(&mut self) -> Option<E> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(source = %self.source, lagged = count, "Listener lagged, events skipped");
                }
            }
        }
    }

    /// Try to receive the next event without waiting.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` - An event was available
    /// - `Ok(None)` - Nothing pending
    /// - `Err(SubscriptionError::Closed)` - The source was dropped
    pub fn try_recv(&mut self) -> Result<Option<E>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Ok(Some(event)),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            }
        }
    }

    /// Name of the source this subscription listens to.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl<E: Clone + Send + 'static> Subscription<E> {
    /// Convert into a `Stream`, skipping over lag gaps.
    pub fn into_stream(self) -> Pin<Box<dyn Stream<Item = E> + Send>> {
        let source = self.source;
        Box::pin(
            BroadcastStream::new(self.receiver).filter_map(move |item| match item {
                Ok(event) => Some(event),
                Err(BroadcastStreamRecvError::Lagged(count)) => {
                    debug!(source = %source, lagged = count, "Stream lagged, events skipped");
                    None
                }
            }),
        )
    }
}
