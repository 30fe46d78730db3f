//! # CM-02 Property Tracker
//!
//! The one shared settings store of the application process.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (domain + service), no outbound ports
//!
//! ## Purpose
//!
//! Independent UI fragments read and write shared settings here instead of
//! talking to each other:
//! - key-scoped `set_value` / `get_value`
//! - change notifications for every non-ignored write, in issue order
//! - an ignore-list for keys that hold live handles (services, zones, ...)
//!   which must never be tracked, exported or diffed
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Ignored keys never notify | checked inside the delivery gate on every write |
//! | Ignored keys never exported | `snapshot`, `to_json`, `diff` filter through the ignore-list |
//! | One instance per process | constructed once and shared as `Arc<PropTracker<V>>` |
//!
//! ## Module Structure
//!
//! ```text
//! cm-02-prop-tracker/
//! ├── domain/          # PropertyChange, PropertyDiff, IgnoreList
//! └── tracker.rs       # PropTracker
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod tracker;

// Re-exports
pub use domain::{IgnoreList, PropertyChange, PropertyDiff};
pub use shared_bus::{DeliveryReport, Subscription, SubscriptionHandle};
pub use tracker::{PropTracker, DEFAULT_CHANGE_CAPACITY};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
