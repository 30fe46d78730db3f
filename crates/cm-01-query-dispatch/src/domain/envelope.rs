//! # Query Envelope
//!
//! The wire request unit: `{ "entity": ..., "action": ..., "data": {...} }`.

use crate::domain::errors::DispatchError;
use serde::Serialize;
use serde_json::{Map, Value};

/// A generic entity/action request.
///
/// Built once and never mutated; carries no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryEnvelope {
    entity: String,
    action: String,
    data: Map<String, Value>,
}

impl QueryEnvelope {
    /// Build an envelope. `entity` and `action` must be non-empty.
    pub fn new(
        entity: impl Into<String>,
        action: impl Into<String>,
        data: Map<String, Value>,
    ) -> Result<Self, DispatchError> {
        let entity = entity.into();
        let action = action.into();
        if entity.trim().is_empty() {
            return Err(DispatchError::InvalidEnvelope { field: "entity" });
        }
        if action.trim().is_empty() {
            return Err(DispatchError::InvalidEnvelope { field: "action" });
        }
        Ok(Self::from_parts(entity, action, data))
    }

    /// Build an envelope with empty `data`.
    pub fn empty(
        entity: impl Into<String>,
        action: impl Into<String>,
    ) -> Result<Self, DispatchError> {
        Self::new(entity, action, Map::new())
    }

    /// Build from parts already known to be valid.
    pub(crate) fn from_parts(entity: String, action: String, data: Map<String, Value>) -> Self {
        Self {
            entity,
            action,
            data,
        }
    }

    /// Logical resource type.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Verb.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Action parameters.
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// JSON body as sent on the wire.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("entity".to_string(), Value::String(self.entity.clone()));
        body.insert("action".to_string(), Value::String(self.action.clone()));
        body.insert("data".to_string(), Value::Object(self.data.clone()));
        Value::Object(body)
    }
}
