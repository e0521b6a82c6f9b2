//! Network metrics engine
//!
//! Whole-graph aggregate statistics, recomputed in full from the snapshot.
//! Use `MetricsCache` to memoize the result per snapshot version.

pub mod cache;
pub mod centralization;
pub mod concentration;

use crate::algo::{classify_connections, view_from_edges};
use crate::classify::EdgeClassifier;
use crate::graph::EntityStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

pub use cache::MetricsCache;
pub use centralization::{
    average_centralization, entity_type_breakdown, most_centralized, most_decentralized,
    network_centralization, score_distribution, CentralizationLevel, EntityTypeStats, Hub,
    NetworkCentralization, RankedEntity, ScoreBucket,
};
pub use concentration::{
    connection_breakdown, custody_concentration, regulatory_capture, ConnectionTypeCount,
    CustodyConcentration, CustodyHolder, RegulatoryCapture,
};

/// Default length of the most/least centralized lists
pub const DEFAULT_TOP_N: usize = 10;

/// Every metric the dashboard shows, computed together
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    pub avg_centralization: u32,
    pub custody_concentration: CustodyConcentration,
    pub regulatory_capture: RegulatoryCapture,
    pub network_centralization: NetworkCentralization,
    pub distribution: Vec<ScoreBucket>,
    pub most_centralized: Vec<RankedEntity>,
    pub most_decentralized: Vec<RankedEntity>,
    pub connection_breakdown: Vec<ConnectionTypeCount>,
    pub entity_type_breakdown: Vec<EntityTypeStats>,
    pub total_entities: usize,
    pub last_calculated: DateTime<Utc>,
}

/// Compute all metrics for a snapshot
pub fn get_all_metrics(
    store: &EntityStore,
    classifier: &dyn EdgeClassifier,
    top_n: usize,
) -> NetworkMetrics {
    debug!("Computing metrics for snapshot v{}", store.version());

    let edges = classify_connections(store, classifier);
    let custody = custody_concentration(store, &edges);
    let capture = regulatory_capture(store, &edges);
    let breakdown = connection_breakdown(&edges);
    let view = view_from_edges(store, edges);

    NetworkMetrics {
        avg_centralization: average_centralization(store),
        custody_concentration: custody,
        regulatory_capture: capture,
        network_centralization: network_centralization(store, &view),
        distribution: score_distribution(store),
        most_centralized: most_centralized(store, top_n),
        most_decentralized: most_decentralized(store, top_n),
        connection_breakdown: breakdown,
        entity_type_breakdown: entity_type_breakdown(store),
        total_entities: store.len(),
        last_calculated: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::PatternClassifier;
    use crate::graph::{Entity, EntityType};

    #[test]
    fn test_empty_snapshot() {
        let store = EntityStore::from_entities(Vec::new()).unwrap();
        let metrics = get_all_metrics(&store, &PatternClassifier::new(), DEFAULT_TOP_N);

        assert_eq!(metrics.total_entities, 0);
        assert_eq!(metrics.avg_centralization, 0);
        assert_eq!(metrics.custody_concentration.percentage, 0);
        assert_eq!(metrics.regulatory_capture.index, 0.0);
        assert_eq!(metrics.network_centralization.level, CentralizationLevel::Low);
        assert!(metrics.most_centralized.is_empty());
        assert!(metrics.connection_breakdown.is_empty());
    }

    #[test]
    fn test_dangling_connections_do_not_break_metrics() {
        let store = EntityStore::from_entities(vec![
            Entity::new("a", "A", EntityType::Organization)
                .with_connection("missing", "custodian")
                .with_connection("b", "partner"),
            Entity::new("b", "B", EntityType::Person),
        ])
        .unwrap();

        let metrics = get_all_metrics(&store, &PatternClassifier::new(), 1);
        assert_eq!(metrics.total_entities, 2);
        assert_eq!(metrics.custody_concentration.custody_edges, 1);
        assert_eq!(metrics.connection_breakdown.iter().map(|c| c.count).sum::<usize>(), 2);
        assert_eq!(metrics.network_centralization.hubs.len(), 2);
        assert_eq!(metrics.most_centralized.len(), 1);
        assert_eq!(metrics.most_centralized[0].id, "a");
    }

    #[test]
    fn test_serializes_camel_case() {
        let store =
            EntityStore::from_entities(vec![Entity::new("a", "A", EntityType::Concept)]).unwrap();
        let metrics = get_all_metrics(&store, &PatternClassifier::new(), DEFAULT_TOP_N);
        let json = serde_json::to_value(&metrics).unwrap();

        assert!(json.get("avgCentralization").is_some());
        assert!(json.get("lastCalculated").is_some());
        assert_eq!(json["networkCentralization"]["level"], "Low");
        assert_eq!(json["mostCentralized"][0]["type"], "concept");
    }
}
