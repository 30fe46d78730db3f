//! # Ignore-List
//!
//! Keys that are stored but never tracked, exported or diffed.

use std::collections::BTreeSet;

/// Set of ignored keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    keys: BTreeSet<String>,
}

impl IgnoreList {
    /// Empty ignore-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is ignored.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of ignored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when nothing is ignored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Ignored keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
