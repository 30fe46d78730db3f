//! # Observer Registry
//!
//! Synchronous observer callbacks with per-observer panic isolation.
//! Used by [`SignalChannel`](crate::SignalChannel) and by the tracked
//! settings store for change notifications.

use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared observer callback.
pub type ObserverFn<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    /// Raw handle id.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Outcome of delivering one event to every registered observer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Observers that returned normally.
    pub delivered: usize,
    /// Observers that panicked.
    pub failed: usize,
}

impl DeliveryReport {
    /// Total observers the event was offered to.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Ordered set of observer callbacks.
///
/// Observers are called in subscription order. The registry lock is not
/// held while callbacks run, so an observer may subscribe or unsubscribe
/// from inside its own callback; the change applies to the next event.
pub struct ObserverSet<E> {
    observers: RwLock<Vec<(SubscriptionHandle, ObserverFn<E>)>>,
    next_id: AtomicU64,
}

impl<E> ObserverSet<E> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register an observer.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionHandle
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let handle = SubscriptionHandle(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((handle, Arc::new(observer)));
        debug!(subscription = %handle, "Observer subscribed");
        handle
    }

    /// Remove an observer. Returns `false` if the handle was unknown.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(h, _)| *h != handle);
        let removed = observers.len() != before;
        if removed {
            debug!(subscription = %handle, "Observer unsubscribed");
        }
        removed
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// True when no observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }

    /// Deliver `event` to every observer registered at call time.
    pub fn notify(&self, event: &E) -> DeliveryReport {
        let observers: Vec<(SubscriptionHandle, ObserverFn<E>)> = self
            .observers
            .read()
            .iter()
            .map(|(handle, observer)| (*handle, Arc::clone(observer)))
            .collect();

        let mut report = DeliveryReport::default();
        for (handle, observer) in observers {
            match catch_unwind(AssertUnwindSafe(|| observer(event))) {
                Ok(()) => report.delivered += 1,
                Err(payload) => {
                    report.failed += 1;
                    warn!(
                        subscription = %handle,
                        reason = %panic_message(payload.as_ref()),
                        "Observer panicked, continuing delivery"
                    );
                }
            }
        }
        report
    }
}

impl<E> Default for ObserverSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ObserverSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverSet")
            .field("observers", &self.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
