//! # Layout Monitor
//!
//! Reclassifies the viewport on every resize and signals the layout-change
//! channel so subscribed views can recompute.
//!
//! ```text
//! resize(w, h) ──→ mobile = w <= max_width || h <= max_height
//!                        │
//!                        ↓
//!                 DeviceInfo updated ──→ layout channel emit()
//! ```

use crate::device::DeviceInfo;
use parking_lot::RwLock;
use shared_bus::{DeliveryReport, SignalPublisher};
use std::sync::Arc;
use tracing::debug;

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl ViewportSize {
    /// New size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Mobile thresholds; either dimension at or below its limit is mobile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRule {
    /// Largest mobile width.
    pub max_width: u32,
    /// Largest mobile height.
    pub max_height: u32,
}

impl Default for LayoutRule {
    fn default() -> Self {
        Self {
            max_width: 761,
            max_height: 600,
        }
    }
}

impl LayoutRule {
    /// Classify `size`.
    #[must_use]
    pub fn is_mobile(&self, size: ViewportSize) -> bool {
        size.width <= self.max_width || size.height <= self.max_height
    }
}

/// Applies [`LayoutRule`] on resize and emits layout changes.
#[derive(Debug, Clone)]
pub struct LayoutMonitor {
    rule: LayoutRule,
    device: Arc<RwLock<DeviceInfo>>,
    channel: Arc<dyn SignalPublisher>,
}

impl LayoutMonitor {
    /// Monitor writing into `device` and emitting on `channel`.
    pub fn new(
        rule: LayoutRule,
        device: Arc<RwLock<DeviceInfo>>,
        channel: Arc<dyn SignalPublisher>,
    ) -> Self {
        Self {
            rule,
            device,
            channel,
        }
    }

    /// Handle a resize. Always emits, even when the classification is unchanged.
    pub fn on_resize(&self, size: ViewportSize) -> DeliveryReport {
        let is_mobile = self.rule.is_mobile(size);
        {
            let mut device = self.device.write();
            device.is_mobile = is_mobile;
        }
        debug!(width = size.width, height = size.height, is_mobile, "Viewport resized");
        self.channel.emit()
    }

    /// Current classification.
    #[must_use]
    pub fn device(&self) -> DeviceInfo {
        *self.device.read()
    }

    /// Thresholds in use.
    #[must_use]
    pub fn rule(&self) -> LayoutRule {
        self.rule
    }
}
