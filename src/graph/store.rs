//! In-memory entity snapshot
//!
//! The store is built once from the dataset and never mutated afterwards.
//! Lookups are O(1) by id and iteration follows declaration order.

use super::entity::Entity;
use super::types::{EntityId, EntityType};
use indexmap::IndexMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{info, warn};

static NEXT_SNAPSHOT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Errors that can occur while loading a snapshot
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Entity {0} already exists")]
    DuplicateEntity(EntityId),

    #[error("Entity id must not be empty (entity named {0:?})")]
    EmptyEntityId(String),

    #[error("Entity {id} has decentralization score {score}, expected 0-100")]
    InvalidScore { id: EntityId, score: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Immutable snapshot of all entities and their connections
#[derive(Debug)]
pub struct EntityStore {
    /// id -> entity, in declaration order
    entities: IndexMap<EntityId, Entity>,

    /// Process-unique snapshot version, used as a cache key
    version: u64,
}

impl EntityStore {
    /// Build a snapshot, validating ids and scores
    pub fn from_entities(entities: Vec<Entity>) -> GraphResult<Self> {
        let mut map = IndexMap::with_capacity(entities.len());

        for entity in entities {
            if entity.id.is_empty() {
                return Err(GraphError::EmptyEntityId(entity.name));
            }
            if let Some(score) = entity.decentralization_score {
                if score > 100 {
                    return Err(GraphError::InvalidScore { id: entity.id, score });
                }
            }
            if map.contains_key(&entity.id) {
                return Err(GraphError::DuplicateEntity(entity.id));
            }
            map.insert(entity.id.clone(), entity);
        }

        let store = EntityStore {
            entities: map,
            version: NEXT_SNAPSHOT_VERSION.fetch_add(1, Ordering::Relaxed),
        };

        let dangling = store.dangling_connections();
        if dangling > 0 {
            warn!("{} connections reference unknown entities", dangling);
        }
        info!(
            "Loaded snapshot v{}: {} entities, {} connections",
            store.version,
            store.len(),
            store.connection_count()
        );

        Ok(store)
    }

    /// Parse a JSON array of entities
    pub fn from_json_str(json: &str) -> GraphResult<Self> {
        let entities: Vec<Entity> = serde_json::from_str(json)?;
        Self::from_entities(entities)
    }

    /// Load a JSON dataset file
    pub fn load(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        info!("Loading dataset from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Look up an entity. A missing id is an expected outcome.
    pub fn get_entity(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// All entities in declaration order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entities_of_type(&self, entity_type: EntityType) -> impl Iterator<Item = &Entity> {
        self.entities
            .values()
            .filter(move |e| e.entity_type == entity_type)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total number of declared connections, dangling ones included
    pub fn connection_count(&self) -> usize {
        self.entities.values().map(|e| e.connections.len()).sum()
    }

    /// Connections whose target is not in the snapshot
    pub fn dangling_connections(&self) -> usize {
        self.entities
            .values()
            .flat_map(|e| e.connections.iter())
            .filter(|c| !self.entities.contains_key(&c.target_id))
            .count()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
