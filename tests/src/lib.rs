//! # Campaign Manager Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # Cross-crate flows
//! │   ├── dispatch_flows.rs   # shell + dispatcher against a stub service
//! │   ├── settings_flows.rs   # settings store shared between screens
//! │   └── layout_flows.rs     # resize → layout channel → listeners
//! │
//! └── benches/           # criterion benchmarks for the store and channel
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cm-tests
//! cargo test -p cm-tests integration::settings_flows
//! cargo bench -p cm-tests
//! ```

pub mod integration;
