//! Core type definitions for the entity graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, stable identifier of an entity
pub type EntityId = String;

/// Kind of entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Person,
    Organization,
    Stablecoin,
    Government,
    Concept,
    Event,
}

impl EntityType {
    /// Decentralization score assumed when an entity has none of its own
    pub fn default_score(&self) -> u8 {
        match self {
            EntityType::Government => 5,
            EntityType::Organization => 30,
            EntityType::Stablecoin => 30,
            EntityType::Person => 40,
            EntityType::Concept => 50,
            EntityType::Event => 50,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Person => "person",
            EntityType::Organization => "organization",
            EntityType::Stablecoin => "stablecoin",
            EntityType::Government => "government",
            EntityType::Concept => "concept",
            EntityType::Event => "event",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of a relationship, derived from its free-text description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum EdgeType {
    Ownership,
    Partnership,
    Regulatory,
    Funding,
    BoardSeat,
    Custody,
    Other,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Ownership => "ownership",
            EdgeType::Partnership => "partnership",
            EdgeType::Regulatory => "regulatory",
            EdgeType::Funding => "funding",
            EdgeType::BoardSeat => "boardSeat",
            EdgeType::Custody => "custody",
            EdgeType::Other => "other",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
