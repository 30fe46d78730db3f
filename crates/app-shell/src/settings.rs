//! # Application Settings
//!
//! Values held by the shared settings store. Most settings are plain JSON;
//! long-lived services are stored as opaque handles so screens can look them
//! up by key. Handles cannot be serialized, so their keys sit on the
//! ignore-list.

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Key of the dialog manager handle.
pub const DIALOG_MANAGER_KEY: &str = "dialogMgr";
/// Key of the query dispatcher handle.
pub const QUERY_SERVICE_KEY: &str = "txSvc";
/// Key of the UI zone handle.
pub const UI_ZONE_KEY: &str = "ngZone";

/// Keys excluded from notification and export by default.
pub const DEFAULT_IGNORED_KEYS: [&str; 3] = [DIALOG_MANAGER_KEY, QUERY_SERVICE_KEY, UI_ZONE_KEY];

/// Shared reference to a running service.
#[derive(Clone)]
pub struct ServiceHandle {
    name: &'static str,
    service: Arc<dyn Any + Send + Sync>,
}

impl ServiceHandle {
    /// Wrap `service` under a diagnostic `name`.
    pub fn new<T: Any + Send + Sync>(name: &'static str, service: Arc<T>) -> Self {
        Self { name, service }
    }

    /// Diagnostic name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The service, if it is a `T`.
    #[must_use]
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.service).downcast::<T>().ok()
    }
}

impl PartialEq for ServiceHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.service, &other.service)
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceHandle({})", self.name)
    }
}

/// A value in the settings store.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// Plain data.
    Json(Value),
    /// Service reference.
    Handle(ServiceHandle),
}

impl SettingValue {
    /// Wrap a service.
    pub fn handle<T: Any + Send + Sync>(name: &'static str, service: Arc<T>) -> Self {
        SettingValue::Handle(ServiceHandle::new(name, service))
    }

    /// The JSON value, if this is data.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            SettingValue::Json(value) => Some(value),
            SettingValue::Handle(_) => None,
        }
    }

    /// The service, if this is a handle to a `T`.
    #[must_use]
    pub fn service<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            SettingValue::Handle(handle) => handle.downcast(),
            SettingValue::Json(_) => None,
        }
    }
}

impl From<Value> for SettingValue {
    fn from(value: Value) -> Self {
        SettingValue::Json(value)
    }
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SettingValue::Json(value) => value.serialize(serializer),
            SettingValue::Handle(handle) => Err(S::Error::custom(format!(
                "service handle '{}' cannot be serialized",
                handle.name()
            ))),
        }
    }
}
