//! # Signals
//!
//! The unit delivered by a [`SignalChannel`](crate::SignalChannel).

use std::fmt;

/// One emission on a signal channel.
///
/// A signal carries no data. Observers treat it as "something changed,
/// re-check" and re-read whatever shared state they care about.
/// `sequence` is the 1-based position of the emission on its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signal {
    /// Position of this emission on its channel.
    pub sequence: u64,
}

impl Signal {
    /// Create a signal for the given emission number.
    #[must_use]
    pub fn new(sequence: u64) -> Self {
        Self { sequence }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "signal#{}", self.sequence)
    }
}
