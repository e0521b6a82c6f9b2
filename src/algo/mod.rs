//! Graph query engine
//!
//! Algorithms are implemented in the `trustmap-graph-algorithms` crate.
//! This module provides the integration/adapter layer: it projects the entity
//! snapshot into an undirected view whose edges carry the declared direction
//! and classified type, and exposes the queries the visualization layer calls.

pub mod narration;

use crate::classify::EdgeClassifier;
use crate::graph::{EdgeType, EntityId, EntityStore};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

pub use narration::{find_path_to_center, HopExplanation, PathToCenterResult};
pub use trustmap_graph_algorithms::{degree_stats, top_by_degree, DegreeStats};

/// Metadata of one connection, as seen by traversal.
///
/// Traversal is undirected; `source` and `target` keep the declared direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeMeta {
    pub source: EntityId,
    pub target: EntityId,
    pub relationship: String,
    pub edge_type: EdgeType,
}

impl EdgeMeta {
    /// Whether this edge joins `a` and `b`, in either direction
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// Undirected traversal view over the entity snapshot
pub type GraphView = trustmap_graph_algorithms::GraphView<EdgeMeta>;

/// Shortest / enumerated path over `EdgeMeta` edges
pub type PathResult = trustmap_graph_algorithms::PathResult<EdgeMeta>;

/// Default bound for `find_all_paths`
pub const DEFAULT_MAX_PATH_LENGTH: usize = 5;

/// Every declared connection with its classified type, dangling ones included,
/// in declaration order.
pub fn classify_connections(
    store: &EntityStore,
    classifier: &dyn EdgeClassifier,
) -> Vec<EdgeMeta> {
    store
        .entities()
        .flat_map(|entity| {
            entity.connections.iter().map(move |conn| EdgeMeta {
                source: entity.id.clone(),
                target: conn.target_id.clone(),
                relationship: conn.relationship.clone(),
                edge_type: classifier.classify(&conn.relationship),
            })
        })
        .collect()
}

/// Build a GraphView from the store for query execution.
///
/// Nodes follow declaration order; every connection is classified and
/// inserted in both directions. Connections to unknown entities are left out.
pub fn build_view(store: &EntityStore, classifier: &dyn EdgeClassifier) -> GraphView {
    view_from_edges(store, classify_connections(store, classifier))
}

/// Build a GraphView from already classified connections
pub fn view_from_edges(store: &EntityStore, edges: Vec<EdgeMeta>) -> GraphView {
    let nodes = store.entities().map(|e| e.id.clone());
    let edges = edges
        .into_iter()
        .map(|meta| (meta.source.clone(), meta.target.clone(), meta));

    let view = GraphView::undirected(nodes, edges);
    if view.dangling > 0 {
        warn!("Projection skipped {} dangling connections", view.dangling);
    }
    debug!(
        "Built view: {} nodes, {} edges",
        view.node_count,
        view.edge_count()
    );
    view
}

/// Shortest path between two entities (BFS, hop count)
pub fn find_shortest_path(view: &GraphView, start: &str, end: &str) -> PathResult {
    debug!("Shortest path {} -> {}", start, end);
    trustmap_graph_algorithms::shortest_path(view, start, end)
}

/// All simple paths of at most `max_length` edges, shortest first
pub fn find_all_paths(
    view: &GraphView,
    start: &str,
    end: &str,
    max_length: usize,
) -> Vec<PathResult> {
    debug!("All paths {} -> {} (max {})", start, end, max_length);
    trustmap_graph_algorithms::all_simple_paths(view, start, end, max_length)
}

/// Hop count between two entities, -1 if unreachable
pub fn degree_of_separation(view: &GraphView, start: &str, end: &str) -> i32 {
    trustmap_graph_algorithms::degree_of_separation(view, start, end)
}

/// Entities within `max_degrees` hops of `start`, with their distance.
///
/// `start` is included at distance 0 when it exists.
pub fn find_entities_within_degrees(
    view: &GraphView,
    start: &str,
    max_degrees: usize,
) -> HashMap<EntityId, usize> {
    debug!("Neighbourhood of {} within {} hops", start, max_degrees);
    trustmap_graph_algorithms::within_degrees(view, start, max_degrees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::PatternClassifier;
    use crate::graph::{Entity, EntityType};

    fn store() -> EntityStore {
        EntityStore::from_entities(vec![
            Entity::new("usdc", "USDC", EntityType::Stablecoin)
                .with_connection("circle", "issued by")
                .with_connection("ghost", "rumoured link"),
            Entity::new("circle", "Circle", EntityType::Organization)
                .with_connection("bny", "reserve custodian"),
            Entity::new("bny", "BNY Mellon", EntityType::Organization),
        ])
        .unwrap()
    }

    #[test]
    fn test_graph_view_projection() {
        let store = store();
        let view = build_view(&store, &PatternClassifier::new());

        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 2);
        assert_eq!(view.dangling, 1);

        let circle = view.index_of("circle").unwrap();
        assert_eq!(view.degree(circle), 2);
        assert_eq!(view.edges[0].edge_type, EdgeType::Ownership);
        assert_eq!(view.edges[1].edge_type, EdgeType::Custody);
    }

    #[test]
    fn test_path_keeps_declared_direction() {
        let store = store();
        let view = build_view(&store, &PatternClassifier::new());

        let result = find_shortest_path(&view, "bny", "usdc");
        assert_eq!(result.path, vec!["bny", "circle", "usdc"]);
        // walked against the declared direction, metadata unchanged
        assert_eq!(result.edges[0].source, "circle");
        assert_eq!(result.edges[0].target, "bny");
        assert!(result.edges[0].joins("bny", "circle"));
    }

    #[test]
    fn test_dangling_target_not_reachable() {
        let store = store();
        let view = build_view(&store, &PatternClassifier::new());

        let result = find_shortest_path(&view, "usdc", "ghost");
        assert!(!result.found);
        assert_eq!(degree_of_separation(&view, "usdc", "ghost"), -1);
    }
}
