//! Ports layer for Query Dispatch.
//!
//! - Inbound (Driving) port: the query API used by screens and services
//! - Outbound (Driven) port: the transport that reaches the data service

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
