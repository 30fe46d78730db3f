//! Adapters layer for Query Dispatch.
//!
//! - `http`: reqwest-backed transport
//! - `mock`: scripted transport for tests and offline use

pub mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::{MockReply, MockTransport, RecordedCall};
