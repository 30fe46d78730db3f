//! # CM-01 Query Dispatch
//!
//! Generic entity/action queries against the campaign data service.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Every read and write of campaign data goes through one request unit, the
//! envelope `{entity, action, data}`, POSTed to `<base_url>data`:
//! - one transport call per dispatch, no retry, no cache, no dedup
//! - the response body is passed through untouched
//! - every failure surfaces to the immediate caller
//!
//! ## Settlement Rules
//!
//! | Transport outcome | Result |
//! |-------------------|--------|
//! | error (connect, timeout, non-2xx, undecodable) | `DispatchError::Transport` |
//! | body absent or `null` | `DispatchError::EmptyResponse` |
//! | body falsy (`false`, `0`, `""`) | `DispatchError::InvalidResponse` |
//! | anything else | `Ok(body)` |
//!
//! ## Module Structure
//!
//! ```text
//! cm-01-query-dispatch/
//! ├── domain/          # QueryEnvelope, QueryCommand, headers, replies, errors, config
//! ├── ports/           # QueryApi (inbound), QueryTransport (outbound)
//! ├── adapters/        # HttpTransport (reqwest), MockTransport
//! └── service.rs       # QueryDispatcher
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{HttpTransport, MockReply, MockTransport, RecordedCall};
pub use domain::{
    configure_headers, is_truthy, ConfigError, DispatchError, DispatcherConfig, EntityKind,
    HeaderOverride, HeaderSet, QueryAction, QueryCommand, QueryEnvelope, ServiceReply,
    ServiceStatus, TransportError,
};
pub use ports::{QueryApi, QueryTransport};
pub use service::{DispatchStats, QueryDispatcher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
