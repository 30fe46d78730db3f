//! # Domain Layer
//!
//! Change records and the ignore-list.

pub mod change;
pub mod ignore;

pub use change::{PropertyChange, PropertyDiff};
pub use ignore::IgnoreList;
