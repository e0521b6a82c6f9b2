//! Entity graph
//!
//! This module holds the immutable entity/connection snapshot:
//! - Entities typed as person, organization, stablecoin, government, concept or event
//! - Directed connections owned by their source entity, possibly dangling
//! - Decentralization scores read through a type-defaulting accessor

pub mod entity;
pub mod store;
pub mod types;

// Re-export main types
pub use entity::{Connection, Entity};
pub use store::{EntityStore, GraphError, GraphResult};
pub use types::{EdgeType, EntityId, EntityType};
