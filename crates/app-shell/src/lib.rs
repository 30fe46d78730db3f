//! # Campaign Manager Application Shell
//!
//! Wires the subsystems together and runs the startup sequence.
//!
//! ## Modular Structure
//!
//! - `container/` - Service container and configuration
//! - `settings` - Values of the shared settings store
//! - `device` - Initial device classification
//! - `layout` - Resize classification and layout-change signal
//! - `navigation` - Route handle shared with screens
//! - `telemetry` - Log output
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults + `CM_*` environment)
//! 2. Build the container (settings store, dispatcher, layout channel)
//! 3. Probe the data service status endpoint
//! 4. Run the startup query `User / get_multiple / {}`
//! 5. Watch layout changes until shutdown
//!
//! Failures in steps 3 and 4 are logged and reported, never fatal.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod container;
pub mod device;
pub mod layout;
pub mod navigation;
pub mod settings;
pub mod telemetry;

use cm_01_query_dispatch::{DispatchError, EntityKind, QueryCommand, QueryTransport, ServiceStatus};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info, warn};

pub use container::{AppConfig, AppContainer, ConfigError};
pub use device::{DeviceDetector, DeviceInfo, StaticDetector};
pub use layout::{LayoutMonitor, LayoutRule, ViewportSize};
pub use navigation::NavigationHandle;
pub use settings::{ServiceHandle, SettingValue, DEFAULT_IGNORED_KEYS};

/// Errors building the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Configuration rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dispatcher could not be created.
    #[error("query dispatcher error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// What happened during startup.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupReport {
    /// Status probe result.
    pub status: Result<ServiceStatus, DispatchError>,
    /// Startup user query result.
    pub users: Result<Value, DispatchError>,
}

impl StartupReport {
    /// Both steps succeeded.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(&self.status, Ok(status) if status.is_ok()) && self.users.is_ok()
    }
}

/// The application.
pub struct AppShell {
    container: Arc<AppContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl AppShell {
    /// Build over the HTTP transport.
    pub fn new(config: AppConfig, detector: &dyn DeviceDetector) -> Result<Self, ShellError> {
        Ok(Self::from_container(AppContainer::new(config, detector)?))
    }

    /// Build over `transport`.
    pub fn with_transport(
        config: AppConfig,
        transport: Arc<dyn QueryTransport>,
        detector: &dyn DeviceDetector,
    ) -> Result<Self, ShellError> {
        Ok(Self::from_container(AppContainer::with_transport(
            config, transport, detector,
        )?))
    }

    fn from_container(container: AppContainer) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Run the startup sequence and spawn the layout watcher.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(&self) -> StartupReport {
        info!("===========================================");
        info!("  Campaign Manager v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        self.spawn_layout_watcher();

        let dispatcher = &self.container.dispatcher;

        let status = dispatcher.status().await;
        match &status {
            Ok(s) if s.is_ok() => info!("Data service is up"),
            Ok(s) => warn!(status = %s.status, "Data service reported a non-ok status"),
            Err(e) => warn!(error = %e, "Data service status probe failed"),
        }

        let users = dispatcher
            .execute(QueryCommand::get_multiple(EntityKind::User))
            .await;
        match &users {
            Ok(body) => info!(response = %body, "Startup user query resolved"),
            Err(e) => error!(error = %e, "Startup user query rejected"),
        }

        StartupReport { status, users }
    }

    fn spawn_layout_watcher(&self) {
        let mut layout = self.container.layout_changes.listen();
        let container = Arc::clone(&self.container);
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    signal = layout.recv() => match signal {
                        Some(signal) => info!(
                            %signal,
                            device = ?container.device(),
                            "Layout changed"
                        ),
                        None => break,
                    },
                    _ = shutdown.changed() => {
                        info!("Layout watcher stopped");
                        break;
                    }
                }
            }
        });
    }

    /// Signal background tasks to stop.
    pub fn shutdown(&self) {
        info!("Initiating shutdown...");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
    }

    /// The service container.
    #[must_use]
    pub fn container(&self) -> Arc<AppContainer> {
        Arc::clone(&self.container)
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
