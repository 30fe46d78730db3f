//! Device classification.

use serde::{Deserialize, Serialize};

/// Form factor flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Phone-sized device or viewport.
    pub is_mobile: bool,
    /// Tablet device.
    pub is_tablet: bool,
}

impl DeviceInfo {
    /// Neither mobile nor tablet.
    #[must_use]
    pub fn is_desktop(&self) -> bool {
        !self.is_mobile && !self.is_tablet
    }
}

/// Source of the initial device classification.
pub trait DeviceDetector: Send + Sync {
    /// Classify the current device.
    fn detect(&self) -> DeviceInfo;
}

/// Detector returning a fixed classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDetector(pub DeviceInfo);

impl StaticDetector {
    /// Desktop classification.
    #[must_use]
    pub fn desktop() -> Self {
        Self(DeviceInfo::default())
    }

    /// Mobile classification.
    #[must_use]
    pub fn mobile() -> Self {
        Self(DeviceInfo {
            is_mobile: true,
            is_tablet: false,
        })
    }
}

impl DeviceDetector for StaticDetector {
    fn detect(&self) -> DeviceInfo {
        self.0
    }
}
