//! Cross-crate integration flows.

pub mod dispatch_flows;
pub mod layout_flows;
pub mod settings_flows;
