//! Concentration metrics over classified connections

use crate::algo::EdgeMeta;
use crate::graph::{EdgeType, EntityId, EntityStore, EntityType};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of top custody holders whose share is reported
pub const CUSTODY_TOP_K: usize = 5;

/// Normalization ceiling of the regulatory capture weight.
///
/// Chosen for a dataset of a few hundred entities; it is not a theoretical
/// maximum, and larger datasets saturate the index at 10.
pub const REGULATORY_CAPTURE_CEILING: f64 = 150.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyHolder {
    pub id: EntityId,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyConcentration {
    /// Share of custody edge endpoints held by the top holders, 0-100
    pub percentage: u32,
    pub top_holders: Vec<CustodyHolder>,
    pub custody_edges: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryCapture {
    /// 0-10, one decimal
    pub index: f64,
    pub government_entities: usize,
    pub regulatory_edges: usize,
    pub affected_entities: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTypeCount {
    pub edge_type: EdgeType,
    pub count: usize,
    pub percentage: u32,
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 * 100.0 / whole as f64).round() as u32
}

/// How much of the custody relationships the top holders account for.
///
/// Both endpoints of every custody edge count once, dangling targets included.
pub fn custody_concentration(store: &EntityStore, edges: &[EdgeMeta]) -> CustodyConcentration {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    let mut custody_edges = 0;

    for edge in edges.iter().filter(|e| e.edge_type == EdgeType::Custody) {
        custody_edges += 1;
        *counts.entry(edge.source.as_str()).or_insert(0) += 1;
        *counts.entry(edge.target.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // stable: ties keep first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(CUSTODY_TOP_K);

    let top_total: usize = ranked.iter().map(|(_, c)| c).sum();
    let top_holders = ranked
        .into_iter()
        .map(|(id, count)| CustodyHolder {
            id: id.to_string(),
            name: store
                .get_entity(id)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| id.to_string()),
            count,
        })
        .collect();

    CustodyConcentration {
        percentage: percent(top_total, custody_edges * 2),
        top_holders,
        custody_edges,
    }
}

/// Weighted government/regulatory entanglement on a 0-10 scale.
///
/// weight = 3 x government entities + 2 x regulatory edges + distinct entities
/// that touch a regulatory edge or are directly connected to a government
/// entity. Only entities present in the snapshot are counted.
pub fn regulatory_capture(store: &EntityStore, edges: &[EdgeMeta]) -> RegulatoryCapture {
    let is_government = |id: &str| {
        store
            .get_entity(id)
            .is_some_and(|e| e.entity_type == EntityType::Government)
    };

    let government_entities = store.entities_of_type(EntityType::Government).count();
    let mut regulatory_edges = 0;
    let mut affected: FxHashSet<&str> = FxHashSet::default();

    for edge in edges {
        if edge.edge_type == EdgeType::Regulatory {
            regulatory_edges += 1;
            affected.insert(&edge.source);
            affected.insert(&edge.target);
        }
        if is_government(&edge.source) {
            affected.insert(&edge.target);
        }
        if is_government(&edge.target) {
            affected.insert(&edge.source);
        }
    }
    affected.retain(|id| store.contains(id));

    let weight = 3 * government_entities + 2 * regulatory_edges + affected.len();
    let scaled = (weight as f64 / REGULATORY_CAPTURE_CEILING * 10.0).min(10.0);

    RegulatoryCapture {
        index: (scaled * 10.0).round() / 10.0,
        government_entities,
        regulatory_edges,
        affected_entities: affected.len(),
    }
}

/// Edge count per classified type with its share of all connections,
/// most frequent first
pub fn connection_breakdown(edges: &[EdgeMeta]) -> Vec<ConnectionTypeCount> {
    let mut counts: BTreeMap<EdgeType, usize> = BTreeMap::new();
    for edge in edges {
        *counts.entry(edge.edge_type).or_insert(0) += 1;
    }

    let mut breakdown: Vec<ConnectionTypeCount> = counts
        .into_iter()
        .map(|(edge_type, count)| ConnectionTypeCount {
            edge_type,
            count,
            percentage: percent(count, edges.len()),
        })
        .collect();
    breakdown.sort_by(|a, b| b.count.cmp(&a.count));
    breakdown
}
