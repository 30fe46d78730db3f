//! # Property Tracker
//!
//! Ordered key/value store with change notifications and an ignore-list.
//!
//! ## Delivery
//!
//! Every write to a non-ignored key produces exactly one
//! [`PropertyChange`], queued to async listeners and then delivered to
//! synchronous observers in subscription order. Writes and their
//! notifications pass through a [`DeliveryGate`], so notifications leave the
//! store in the order the writes were issued.
//!
//! An observer may write back into the store from its callback. The write is
//! applied at once; its notification waits until the current change has
//! reached every observer.

use crate::domain::{IgnoreList, PropertyChange, PropertyDiff};
use parking_lot::RwLock;
use serde::Serialize;
use shared_bus::{DeliveryGate, DeliveryReport, ObserverSet, Subscription, SubscriptionHandle};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Change notifications buffered per async listener.
pub const DEFAULT_CHANGE_CAPACITY: usize = 256;

/// Backing map plus insertion order.
struct TrackedState<V> {
    values: HashMap<String, V>,
    order: Vec<String>,
}

impl<V> TrackedState<V> {
    fn new() -> Self {
        Self {
            values: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn insert(&mut self, key: String, value: V) -> Option<V> {
        match self.values.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.order.push(key.clone());
                self.values.insert(key, value);
                None
            }
        }
    }
}

/// The shared settings store.
///
/// Values are never validated; the store never fails. Share one instance per
/// process behind an `Arc`.
pub struct PropTracker<V> {
    state: RwLock<TrackedState<V>>,
    ignored: RwLock<IgnoreList>,
    observers: ObserverSet<PropertyChange<V>>,
    sender: broadcast::Sender<PropertyChange<V>>,
    sequence: AtomicU64,
    gate: DeliveryGate<PropertyChange<V>>,
}

impl<V> PropTracker<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty store with no ignored keys.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_CHANGE_CAPACITY);
        Self {
            state: RwLock::new(TrackedState::new()),
            ignored: RwLock::new(IgnoreList::new()),
            observers: ObserverSet::new(),
            sender,
            sequence: AtomicU64::new(0),
            gate: DeliveryGate::new(),
        }
    }

    /// Create a store holding `initial`, in iteration order.
    ///
    /// Initial values produce no notifications.
    #[must_use]
    pub fn with_initial<I, K>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let tracker = Self::new();
        {
            let mut state = tracker.state.write();
            for (key, value) in initial {
                state.insert(key.into(), value);
            }
        }
        tracker
    }

    /// Replace the ignore-list.
    ///
    /// Applies to writes and exports from now on; notifications already
    /// delivered are unaffected. Re-applying the same set changes nothing.
    pub fn set_ignored_keys<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list: IgnoreList = keys.into_iter().collect();
        let _gate = self.gate.lock();
        let mut ignored = self.ignored.write();
        if *ignored == list {
            trace!(keys = list.len(), "Ignore-list unchanged");
            return;
        }
        debug!(keys = ?list.iter().collect::<Vec<_>>(), "Ignore-list replaced");
        *ignored = list;
    }

    /// Current ignore-list.
    #[must_use]
    pub fn ignored_keys(&self) -> IgnoreList {
        self.ignored.read().clone()
    }

    /// Whether `key` is on the ignore-list.
    #[must_use]
    pub fn is_ignored(&self, key: &str) -> bool {
        self.ignored.read().contains(key)
    }

    /// Insert or overwrite `key`, returning the previous value.
    ///
    /// Notifies observers unless `key` is ignored.
    pub fn set_value(&self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let gate = self.gate.lock();

        let previous = self.state.write().insert(key.clone(), value.clone());

        if self.is_ignored(&key) {
            trace!(key = %key, "Ignored key written, no notification");
            return previous;
        }

        let change = PropertyChange {
            key,
            value,
            previous: previous.clone(),
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
        };
        gate.deliver(change, |change| self.publish(change));
        previous
    }

    /// Current value of `key`, or `None` if never set.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<V> {
        self.state.read().values.get(key).cloned()
    }

    /// Whether `key` has a value (ignored or not).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.state.read().values.contains_key(key)
    }

    /// All keys with a value, ignored ones included, in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.state.read().order.clone()
    }

    /// Number of stored keys, ignored ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().order.len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().order.is_empty()
    }

    /// Tracked entries in insertion order, ignored keys omitted.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, V)> {
        let ignored = self.ignored.read();
        let state = self.state.read();
        state
            .order
            .iter()
            .filter(|key| !ignored.contains(key))
            .filter_map(|key| state.values.get(key).map(|v| (key.clone(), v.clone())))
            .collect()
    }

    /// Register a synchronous change observer.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionHandle
    where
        F: Fn(&PropertyChange<V>) + Send + Sync + 'static,
    {
        self.observers.subscribe(observer)
    }

    /// Remove a change observer. Returns `false` for an unknown handle.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        self.observers.unsubscribe(handle)
    }

    /// Async listener for changes made from now on.
    #[must_use]
    pub fn changes(&self) -> Subscription<PropertyChange<V>> {
        Subscription::from_receiver(self.sender.subscribe(), "prop-tracker")
    }

    /// Notifications delivered so far.
    #[must_use]
    pub fn notification_count(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    fn publish(&self, change: PropertyChange<V>) -> DeliveryReport {
        let listeners = self.sender.send(change.clone()).unwrap_or(0);
        let report = self.observers.notify(&change);
        let key = change.key;
        let sequence = change.sequence;
        debug!(
            key = %key,
            sequence,
            observers = report.delivered,
            failed = report.failed,
            listeners,
            "Property change delivered"
        );
        report
    }
}

impl<V> PropTracker<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Tracked differences between `baseline` and current state.
    ///
    /// Ignored keys are skipped on both sides. Current keys come first in
    /// insertion order, followed by baseline keys that no longer exist.
    #[must_use]
    pub fn diff(&self, baseline: &[(String, V)]) -> Vec<PropertyDiff<V>> {
        let current = self.snapshot();
        let ignored = self.ignored.read();
        let before: HashMap<&str, &V> = baseline
            .iter()
            .filter(|(key, _)| !ignored.contains(key))
            .map(|(key, value)| (key.as_str(), value))
            .collect();

        let mut diffs: Vec<PropertyDiff<V>> = current
            .iter()
            .filter(|(key, value)| before.get(key.as_str()) != Some(&value))
            .map(|(key, value)| PropertyDiff {
                key: key.clone(),
                before: before.get(key.as_str()).map(|v| (*v).clone()),
                after: Some(value.clone()),
            })
            .collect();

        let now: HashMap<&str, &V> = current.iter().map(|(k, v)| (k.as_str(), v)).collect();
        diffs.extend(
            baseline
                .iter()
                .filter(|(key, _)| !ignored.contains(key) && !now.contains_key(key.as_str()))
                .map(|(key, value)| PropertyDiff {
                    key: key.clone(),
                    before: Some(value.clone()),
                    after: None,
                }),
        );
        diffs
    }
}

impl<V> PropTracker<V>
where
    V: Clone + Serialize + Send + Sync + 'static,
{
    /// Tracked entries as a JSON object, ignored keys omitted.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut map = serde_json::Map::new();
        for (key, value) in self.snapshot() {
            map.insert(key, serde_json::to_value(value)?);
        }
        Ok(serde_json::Value::Object(map))
    }
}

impl<V> Default for PropTracker<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for PropTracker<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropTracker")
            .field("keys", &self.state.read().order)
            .field("ignored", &*self.ignored.read())
            .field("observers", &self.observers.len())
            .field("notifications", &self.sequence.load(Ordering::SeqCst))
            .finish()
    }
}
