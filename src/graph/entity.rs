//! Entities and their outbound connections
//!
//! An entity owns its connections in declaration order. Descriptive fields the
//! analysis does not read are kept in `details` and passed through untouched.

use super::types::{EntityId, EntityType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Directed relationship owned by its source entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Destination entity; may not exist in the loaded set
    pub target_id: EntityId,

    /// Free-text description, e.g. "issued by"
    pub relationship: String,
}

impl Connection {
    pub fn new(target_id: impl Into<EntityId>, relationship: impl Into<String>) -> Self {
        Connection {
            target_id: target_id.into(),
            relationship: relationship.into(),
        }
    }
}

/// A node of the entity graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,

    pub name: String,

    #[serde(rename = "type")]
    pub entity_type: EntityType,

    /// 0 = single point of control, 100 = fully permissionless
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decentralization_score: Option<u8>,

    #[serde(default)]
    pub connections: Vec<Connection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Remaining descriptive fields (capture narrative, score breakdown, sources...)
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Entity {
    /// Create an entity with no explicit score and no connections
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, entity_type: EntityType) -> Self {
        Entity {
            id: id.into(),
            name: name.into(),
            entity_type,
            decentralization_score: None,
            connections: Vec::new(),
            description: None,
            details: Map::new(),
        }
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.decentralization_score = Some(score);
        self
    }

    pub fn with_connection(
        mut self,
        target_id: impl Into<EntityId>,
        relationship: impl Into<String>,
    ) -> Self {
        self.connections.push(Connection::new(target_id, relationship));
        self
    }

    /// The decentralization score, falling back to the type default.
    ///
    /// Every consumer reads scores through this accessor.
    pub fn score(&self) -> u8 {
        self.decentralization_score
            .unwrap_or_else(|| self.entity_type.default_score())
    }

    /// Whether the score was set explicitly rather than defaulted
    pub fn has_explicit_score(&self) -> bool {
        self.decentralization_score.is_some()
    }
}
