//! Trustmap
//!
//! Relationship analysis over a curated graph of organizations, people,
//! stablecoins, government bodies, concepts and events, each scored on a
//! decentralization axis (0 = single point of control, 100 = permissionless).
//!
//! # Architecture
//!
//! - `graph`: immutable entity/connection snapshot with O(1) lookup
//! - `classify`: relationship text -> edge type, and per-edge explanations
//! - `algo`: undirected projection and path queries (shortest path, all
//!   simple paths, degree of separation, N-hop neighbourhood), plus the
//!   explained path to a reference entity
//! - `metrics`: whole-graph aggregates (custody concentration, regulatory
//!   capture, hubs, score distribution, rankings)
//! - `http`: read-only JSON API over one snapshot
//!
//! Queries never fail for missing or unreachable entities; they return
//! sentinel results (`found == false`, `distance == -1`, empty collections).
//!
//! ## Example Usage
//!
//! ```rust
//! use trustmap::algo::{build_view, find_shortest_path};
//! use trustmap::classify::PatternClassifier;
//! use trustmap::graph::{Entity, EntityStore, EntityType};
//!
//! let store = EntityStore::from_entities(vec![
//!     Entity::new("usdc", "USDC", EntityType::Stablecoin).with_connection("circle", "issued by"),
//!     Entity::new("circle", "Circle", EntityType::Organization),
//! ])
//! .unwrap();
//!
//! let view = build_view(&store, &PatternClassifier::new());
//! let path = find_shortest_path(&view, "circle", "usdc");
//! assert!(path.found);
//! assert_eq!(path.distance, 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod classify;
pub mod config;
pub mod graph;
pub mod http;
pub mod metrics;

// Re-export main types for convenience
pub use graph::{
    Connection, EdgeType, Entity, EntityId, EntityStore, EntityType, GraphError, GraphResult,
};

pub use algo::{
    build_view, degree_of_separation, find_all_paths, find_entities_within_degrees,
    find_path_to_center, find_shortest_path, EdgeMeta, GraphView, HopExplanation, PathResult,
    PathToCenterResult,
};

pub use classify::{EdgeClassifier, ExplanationGenerator, PatternClassifier, TemplateExplainer};

pub use metrics::{get_all_metrics, MetricsCache, NetworkMetrics};

pub use config::{AppConfig, ConfigError, ConfigResult};

pub use http::{AppState, HttpServer};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
