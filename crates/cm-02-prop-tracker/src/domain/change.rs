//! # Change Records
//!
//! What observers receive on a tracked write, and what `diff` reports.

use serde::{Deserialize, Serialize};

/// Notification for one tracked write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyChange<V> {
    /// Key that was written.
    pub key: String,
    /// The new value.
    pub value: V,
    /// Value held before the write, if any.
    pub previous: Option<V>,
    /// 1-based position of this notification on its store.
    pub sequence: u64,
}

impl<V> PropertyChange<V> {
    /// True when the key had no value before this write.
    #[must_use]
    pub fn is_insert(&self) -> bool {
        self.previous.is_none()
    }
}

/// One differing key between a baseline snapshot and current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDiff<V> {
    /// Differing key.
    pub key: String,
    /// Value in the baseline (`None` if absent there).
    pub before: Option<V>,
    /// Current value (`None` if absent now).
    pub after: Option<V>,
}
