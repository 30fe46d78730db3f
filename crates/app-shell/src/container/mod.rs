//! # Application Container
//!
//! Holds the long-lived services of the application and wires them to each
//! other once at startup.
//!
//! ## Wiring Order
//!
//! 1. Settings store with the configured ignore-list
//! 2. Query dispatcher over the chosen transport
//! 3. Dispatcher handle registered under `txSvc` (ignored, so silent)
//! 4. Initial device classification
//! 5. Layout channel and monitor

pub mod config;

pub use config::{AppConfig, ConfigError, LayoutConfig, LoggingConfig, SettingsConfig};

use crate::device::{DeviceDetector, DeviceInfo};
use crate::layout::LayoutMonitor;
use crate::navigation::NavigationHandle;
use crate::settings::{SettingValue, QUERY_SERVICE_KEY};
use crate::ShellError;
use cm_01_query_dispatch::{QueryDispatcher, QueryTransport};
use cm_02_prop_tracker::PropTracker;
use parking_lot::RwLock;
use shared_bus::{SignalChannel, SignalPublisher};
use std::sync::Arc;
use tracing::info;

/// Name of the layout-change channel.
pub const LAYOUT_CHANNEL: &str = "layout-change";

/// Services shared across the application.
pub struct AppContainer {
    /// Configuration the container was built from.
    pub config: AppConfig,
    /// Shared settings store.
    pub settings: Arc<PropTracker<SettingValue>>,
    /// Data service client.
    pub dispatcher: Arc<QueryDispatcher>,
    /// Layout-change channel.
    pub layout_changes: Arc<SignalChannel>,
    /// Resize handling.
    pub layout: LayoutMonitor,
    /// Navigation.
    pub navigation: Arc<NavigationHandle>,
    device: Arc<RwLock<DeviceInfo>>,
}

impl AppContainer {
    /// Build over a reqwest-backed transport.
    pub fn new(config: AppConfig, detector: &dyn DeviceDetector) -> Result<Self, ShellError> {
        config.validate()?;
        let dispatcher = QueryDispatcher::with_http(&config.api)?;
        Self::assemble(config, dispatcher, detector)
    }

    /// Build over `transport`.
    pub fn with_transport(
        config: AppConfig,
        transport: Arc<dyn QueryTransport>,
        detector: &dyn DeviceDetector,
    ) -> Result<Self, ShellError> {
        config.validate()?;
        let dispatcher = QueryDispatcher::new(&config.api, transport)?;
        Self::assemble(config, dispatcher, detector)
    }

    fn assemble(
        config: AppConfig,
        dispatcher: QueryDispatcher,
        detector: &dyn DeviceDetector,
    ) -> Result<Self, ShellError> {
        let settings = Arc::new(PropTracker::new());
        settings.set_ignored_keys(config.settings.ignored_keys.iter().cloned());

        let dispatcher = Arc::new(dispatcher);
        settings.set_value(
            QUERY_SERVICE_KEY,
            SettingValue::handle("query-dispatcher", Arc::clone(&dispatcher)),
        );

        let initial = detector.detect();
        let device = Arc::new(RwLock::new(initial));
        let layout_changes = Arc::new(SignalChannel::with_capacity(
            LAYOUT_CHANNEL,
            config.layout.channel_capacity,
        ));
        let layout = LayoutMonitor::new(
            config.layout.rule(),
            Arc::clone(&device),
            Arc::clone(&layout_changes) as Arc<dyn SignalPublisher>,
        );

        info!(
            data_url = dispatcher.data_url(),
            ignored_keys = settings.ignored_keys().len(),
            device = ?initial,
            "Application container ready"
        );

        Ok(Self {
            config,
            settings,
            dispatcher,
            layout_changes,
            layout,
            navigation: Arc::new(NavigationHandle::default()),
            device,
        })
    }

    /// Current device classification.
    #[must_use]
    pub fn device(&self) -> DeviceInfo {
        *self.device.read()
    }

    /// Dispatcher looked up through the settings store.
    #[must_use]
    pub fn registered_dispatcher(&self) -> Option<Arc<QueryDispatcher>> {
        self.settings
            .get_value(QUERY_SERVICE_KEY)
            .and_then(|value| value.service::<QueryDispatcher>())
    }
}

impl std::fmt::Debug for AppContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContainer")
            .field("settings", &self.settings)
            .field("dispatcher", &self.dispatcher)
            .field("layout_changes", &self.layout_changes)
            .field("device", &self.device())
            .finish_non_exhaustive()
    }
}
