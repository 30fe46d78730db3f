//! # Domain Layer
//!
//! Envelope, typed commands, header policy, service replies, errors and
//! configuration.

pub mod command;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod headers;
pub mod reply;

pub use command::{EntityKind, QueryAction, QueryCommand};
pub use config::DispatcherConfig;
pub use envelope::QueryEnvelope;
pub use errors::{ConfigError, DispatchError, TransportError};
pub use headers::{configure_headers, HeaderOverride, HeaderSet};
pub use reply::{is_truthy, ServiceReply, ServiceStatus};
