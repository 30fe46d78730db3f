//! # Signal Channel
//!
//! Payload-less, replay-less broadcast of "something changed, re-check".

use crate::delivery::DeliveryGate;
use crate::events::Signal;
use crate::observers::{DeliveryReport, ObserverSet, SubscriptionHandle};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Trait for emitting signals.
///
/// Triggers (such as a viewport resize hook) hold this rather than the
/// concrete channel.
pub trait SignalPublisher: Send + Sync + fmt::Debug {
    /// Emit one signal to every current subscriber.
    ///
    /// # Returns
    ///
    /// The outcome of synchronous observer delivery. Empty when the signal
    /// was queued behind a delivery already running on this thread.
    fn emit(&self) -> DeliveryReport;

    /// Total signals emitted so far.
    fn emissions(&self) -> u64;
}

/// A named, process-wide change signal.
///
/// Observers registered with [`subscribe`](Self::subscribe) are called
/// synchronously inside `emit`, in subscription order. Listeners created with
/// [`listen`](Self::listen) receive the same signals asynchronously.
///
/// A signal emitted from inside an observer is delivered after the current
/// signal has reached every observer, before the outer `emit` returns.
pub struct SignalChannel {
    /// Channel name, used in logs and on subscriptions.
    name: String,

    /// Synchronous observers.
    observers: ObserverSet<Signal>,

    /// Broadcast sender for async listeners.
    sender: broadcast::Sender<Signal>,

    /// Total signals emitted.
    emissions: AtomicU64,

    /// Serializes emissions; queues signals emitted by observers.
    gate: DeliveryGate<Signal>,

    /// Async listener buffer capacity.
    capacity: usize,
}

impl SignalChannel {
    /// Create a channel with default listener capacity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a channel with the given listener capacity.
    #[must_use]
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            name: name.into(),
            observers: ObserverSet::new(),
            sender,
            emissions: AtomicU64::new(0),
            gate: DeliveryGate::new(),
            capacity: capacity.max(1),
        }
    }

    /// Register a synchronous observer.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionHandle
    where
        F: Fn(&Signal) + Send + Sync + 'static,
    {
        let handle = self.observers.subscribe(observer);
        debug!(channel = %self.name, subscription = %handle, "Signal observer added");
        handle
    }

    /// Remove a synchronous observer. Returns `false` for an unknown handle.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        self.observers.unsubscribe(handle)
    }

    /// Create an async listener for signals emitted from now on.
    #[must_use]
    pub fn listen(&self) -> Subscription<Signal> {
        Subscription::new(self.sender.subscribe(), self.name.clone())
    }

    /// Emit one signal to every current observer and listener.
    ///
    /// Returns an empty report when called from inside an observer: the
    /// signal is queued and delivered once the current one is done.
    pub fn emit(&self) -> DeliveryReport {
        let gate = self.gate.lock();
        let signal = Signal::new(self.emissions.fetch_add(1, Ordering::SeqCst) + 1);
        gate.deliver(signal, |signal| self.deliver(signal)).unwrap_or_default()
    }

    fn deliver(&self, signal: Signal) -> DeliveryReport {
        // No listeners is not an error: the signal is simply not buffered.
        let listeners = self.sender.send(signal).unwrap_or(0);

        let report = self.observers.notify(&signal);

        debug!(
            channel = %self.name,
            sequence = signal.sequence,
            observers = report.delivered,
            failed = report.failed,
            listeners,
            "Signal emitted"
        );
        report
    }

    /// Total signals emitted so far.
    #[must_use]
    pub fn emissions(&self) -> u64 {
        self.emissions.load(Ordering::SeqCst)
    }

    /// Channel name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of synchronous observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Number of live async listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Async listener capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl SignalPublisher for SignalChannel {
    fn emit(&self) -> DeliveryReport {
        SignalChannel::emit(self)
    }

    fn emissions(&self) -> u64 {
        SignalChannel::emissions(self)
    }
}

impl fmt::Debug for SignalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalChannel")
            .field("name", &self.name)
            .field("observers", &self.observer_count())
            .field("listeners", &self.listener_count())
            .field("emissions", &self.emissions())
            .finish()
    }
}
