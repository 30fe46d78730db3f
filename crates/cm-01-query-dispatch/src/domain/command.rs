//! # Typed Commands
//!
//! Known entity/action pairs of the campaign data service. Envelopes are
//! built from commands at the wire boundary only.

use crate::domain::envelope::QueryEnvelope;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Entities exposed by the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Application users.
    User,
    /// Campaign missions.
    Mission,
    /// Pilots on a roster.
    Pilot,
    /// Reference mech data.
    MechData,
}

impl EntityKind {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Mission => "Mission",
            EntityKind::Pilot => "Pilot",
            EntityKind::MechData => "MechData",
        }
    }

    /// All entities.
    #[must_use]
    pub const fn all() -> [EntityKind; 4] {
        [
            EntityKind::User,
            EntityKind::Mission,
            EntityKind::Pilot,
            EntityKind::MechData,
        ]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verbs understood by the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryAction {
    /// First record matching `data`.
    Get,
    /// All records matching `data`.
    GetMultiple,
    /// Insert a record built from `data`.
    Save,
    /// Update matching records.
    Update,
    /// Delete matching records.
    Delete,
}

impl QueryAction {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            QueryAction::Get => "get",
            QueryAction::GetMultiple => "get_multiple",
            QueryAction::Save => "save",
            QueryAction::Update => "update",
            QueryAction::Delete => "delete",
        }
    }
}

impl fmt::Display for QueryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed request, translated to a [`QueryEnvelope`] when dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCommand {
    entity: EntityKind,
    action: QueryAction,
    data: Map<String, Value>,
}

impl QueryCommand {
    /// Command with empty parameters.
    #[must_use]
    pub fn new(entity: EntityKind, action: QueryAction) -> Self {
        Self {
            entity,
            action,
            data: Map::new(),
        }
    }

    /// `get` on `entity`.
    #[must_use]
    pub fn get(entity: EntityKind) -> Self {
        Self::new(entity, QueryAction::Get)
    }

    /// `get_multiple` on `entity`.
    #[must_use]
    pub fn get_multiple(entity: EntityKind) -> Self {
        Self::new(entity, QueryAction::GetMultiple)
    }

    /// `save` on `entity`.
    #[must_use]
    pub fn save(entity: EntityKind) -> Self {
        Self::new(entity, QueryAction::Save)
    }

    /// `delete` on `entity`.
    #[must_use]
    pub fn delete(entity: EntityKind) -> Self {
        Self::new(entity, QueryAction::Delete)
    }

    /// Add or replace one parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Ask for substring matching on string filters (`get_multiple`).
    #[must_use]
    pub fn loose(self) -> Self {
        self.with("loose", true)
    }

    /// Target entity.
    #[must_use]
    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// Verb.
    #[must_use]
    pub fn action(&self) -> QueryAction {
        self.action
    }

    /// Parameters collected so far.
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Wire envelope for this command.
    #[must_use]
    pub fn into_envelope(self) -> QueryEnvelope {
        QueryEnvelope::from_parts(
            self.entity.as_str().to_string(),
            self.action.as_str().to_string(),
            self.data,
        )
    }
}

impl From<QueryCommand> for QueryEnvelope {
    fn from(command: QueryCommand) -> Self {
        command.into_envelope()
    }
}
