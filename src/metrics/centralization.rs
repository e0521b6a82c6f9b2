//! Score-based and degree-based centralization metrics

use crate::algo::{degree_stats, top_by_degree, GraphView};
use crate::graph::{EntityId, EntityStore, EntityType};
use serde::Serialize;
use std::collections::BTreeMap;

/// Degree above which a node is a hub
pub const HUB_DEGREE_THRESHOLD: usize = 10;

/// Number of highest-degree nodes reported as hubs
pub const TOP_HUBS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntity {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBucket {
    pub range: String,
    pub min: u8,
    pub max: u8,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CentralizationLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hub {
    pub id: EntityId,
    pub name: String,
    pub degree: usize,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkCentralization {
    pub level: CentralizationLevel,
    pub density: f64,
    pub hub_count: usize,
    pub hub_ratio: f64,
    pub max_degree: usize,
    pub hubs: Vec<Hub>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTypeStats {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub count: usize,
    pub avg_score: u32,
}

/// Mean decentralization score, rounded; 0 for an empty snapshot
pub fn average_centralization(store: &EntityStore) -> u32 {
    if store.is_empty() {
        return 0;
    }
    let total: u32 = store.entities().map(|e| u32::from(e.score())).sum();
    (f64::from(total) / store.len() as f64).round() as u32
}

/// Five-bucket histogram: [0,20) [20,40) [40,60) [60,80) [80,100]
pub fn score_distribution(store: &EntityStore) -> Vec<ScoreBucket> {
    let mut buckets: Vec<ScoreBucket> = (0..5u8)
        .map(|i| {
            let min = i * 20;
            let max = if i == 4 { 100 } else { min + 19 };
            ScoreBucket {
                range: format!("{}-{}", min, max),
                min,
                max,
                count: 0,
            }
        })
        .collect();

    for entity in store.entities() {
        let idx = usize::from(entity.score() / 20).min(4);
        buckets[idx].count += 1;
    }
    buckets
}

fn ranked(store: &EntityStore) -> Vec<RankedEntity> {
    store
        .entities()
        .map(|e| RankedEntity {
            id: e.id.clone(),
            name: e.name.clone(),
            entity_type: e.entity_type,
            score: e.score(),
        })
        .collect()
}

/// Lowest scores first, ties in declaration order
pub fn most_centralized(store: &EntityStore, count: usize) -> Vec<RankedEntity> {
    let mut entities = ranked(store);
    entities.sort_by_key(|e| e.score);
    entities.truncate(count);
    entities
}

/// Highest scores first, ties in declaration order
pub fn most_decentralized(store: &EntityStore, count: usize) -> Vec<RankedEntity> {
    let mut entities = ranked(store);
    entities.sort_by(|a, b| b.score.cmp(&a.score));
    entities.truncate(count);
    entities
}

/// Density, hubs and an overall Low/Medium/High level
pub fn network_centralization(store: &EntityStore, view: &GraphView) -> NetworkCentralization {
    let stats = degree_stats(view);
    let hub_count = stats.count_above(HUB_DEGREE_THRESHOLD);
    let hub_ratio = if stats.node_count == 0 {
        0.0
    } else {
        hub_count as f64 / stats.node_count as f64
    };

    let level = if hub_ratio > 0.1 || stats.max_degree > 15 {
        CentralizationLevel::High
    } else if hub_ratio > 0.05 || stats.max_degree > 10 {
        CentralizationLevel::Medium
    } else {
        CentralizationLevel::Low
    };

    // nodes the store cannot resolve have no score and are not reported
    let hubs = top_by_degree(view, view.node_count)
        .into_iter()
        .filter_map(|(idx, degree)| {
            let entity = store.get_entity(&view.index_to_node[idx])?;
            Some(Hub {
                id: entity.id.clone(),
                name: entity.name.clone(),
                degree,
                score: entity.score(),
            })
        })
        .take(TOP_HUBS)
        .collect();

    NetworkCentralization {
        level,
        density: stats.density,
        hub_count,
        hub_ratio,
        max_degree: stats.max_degree,
        hubs,
    }
}

/// Count and mean score per entity type, lowest mean first
pub fn entity_type_breakdown(store: &EntityStore) -> Vec<EntityTypeStats> {
    let mut groups: BTreeMap<EntityType, (usize, u32)> = BTreeMap::new();
    for entity in store.entities() {
        let slot = groups.entry(entity.entity_type).or_insert((0, 0));
        slot.0 += 1;
        slot.1 += u32::from(entity.score());
    }

    let mut stats: Vec<EntityTypeStats> = groups
        .into_iter()
        .map(|(entity_type, (count, total))| EntityTypeStats {
            entity_type,
            count,
            avg_score: (f64::from(total) / count as f64).round() as u32,
        })
        .collect();
    stats.sort_by_key(|s| s.avg_score);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::build_view;
    use crate::classify::PatternClassifier;
    use crate::graph::Entity;

    fn store() -> EntityStore {
        EntityStore::from_entities(vec![
            Entity::new("fed", "Federal Reserve", EntityType::Government),
            Entity::new("circle", "Circle", EntityType::Organization).with_score(20),
            Entity::new("usdc", "USDC", EntityType::Stablecoin),
            Entity::new("vitalik", "Vitalik", EntityType::Person).with_score(60),
            Entity::new("bitcoin", "Bitcoin", EntityType::Concept).with_score(100),
        ])
        .unwrap()
    }

    #[test]
    fn test_average_uses_defaults() {
        // 5 + 20 + 30 + 60 + 100 = 215 / 5 = 43
        assert_eq!(average_centralization(&store()), 43);
        let empty = EntityStore::from_entities(Vec::new()).unwrap();
        assert_eq!(average_centralization(&empty), 0);
    }

    #[test]
    fn test_distribution_buckets() {
        let buckets = score_distribution(&store());
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        // 5 | 20,30 | - | 60 | 100
        assert_eq!(counts, vec![1, 2, 0, 1, 1]);
        assert_eq!(buckets[4].range, "80-100");
        assert_eq!(buckets[0].range, "0-19");
    }

    #[test]
    fn test_rankings() {
        let store = store();
        let low: Vec<String> = most_centralized(&store, 2)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(low, vec!["fed", "circle"]);

        let high: Vec<String> = most_decentralized(&store, 2)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(high, vec!["bitcoin", "vitalik"]);

        assert_eq!(most_centralized(&store, 50).len(), 5);
    }

    #[test]
    fn test_type_breakdown_sorted_by_mean() {
        let stats = entity_type_breakdown(&store());
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].entity_type, EntityType::Government);
        assert_eq!(stats[0].avg_score, 5);
        assert_eq!(stats.last().unwrap().entity_type, EntityType::Concept);
    }

    #[test]
    fn test_network_levels() {
        // a single hub with 11 spokes out of 12 nodes: degree > 10, ratio ~0.083
        let mut entities = vec![Entity::new("hub", "Hub", EntityType::Organization)];
        for i in 0..11 {
            let id = format!("spoke{:02}", i);
            entities[0] = entities[0].clone().with_connection(id.clone(), "partner");
            entities.push(Entity::new(id, format!("Spoke {}", i), EntityType::Person));
        }
        let store = EntityStore::from_entities(entities).unwrap();
        let view = build_view(&store, &PatternClassifier::new());

        let net = network_centralization(&store, &view);
        assert_eq!(net.hub_count, 1);
        assert_eq!(net.max_degree, 11);
        assert_eq!(net.level, CentralizationLevel::Medium);
        assert_eq!(net.hubs.len(), TOP_HUBS);
        assert_eq!(net.hubs[0].id, "hub");
        assert_eq!(net.hubs[0].score, 30);
    }

    #[test]
    fn test_hubs_skip_unknown_entities() {
        // The view is built from a store with an extra, highest-degree node
        let full = EntityStore::from_entities(vec![
            Entity::new("ghost", "Ghost", EntityType::Organization)
                .with_connection("fed", "regulated by")
                .with_connection("circle", "partner")
                .with_connection("usdc", "partner"),
            Entity::new("fed", "Federal Reserve", EntityType::Government),
            Entity::new("circle", "Circle", EntityType::Organization).with_score(20),
            Entity::new("usdc", "USDC", EntityType::Stablecoin),
        ])
        .unwrap();
        let view = build_view(&full, &PatternClassifier::new());

        let net = network_centralization(&store(), &view);
        assert_eq!(net.max_degree, 3);
        assert!(net.hubs.iter().all(|h| h.id != "ghost"));
        assert_eq!(net.hubs.len(), 3);
        let fed = net.hubs.iter().find(|h| h.id == "fed").unwrap();
        assert_eq!(fed.score, 5);
    }

    #[test]
    fn test_sparse_network_is_low() {
        let store = store();
        let view = build_view(&store, &PatternClassifier::new());
        let net = network_centralization(&store, &view);
        assert_eq!(net.level, CentralizationLevel::Low);
        assert_eq!(net.density, 0.0);
        assert_eq!(net.hub_count, 0);
    }
}
