//! Path to a reference node, explained
//!
//! Turns a shortest path towards a fixed reference entity into per-hop
//! explanations, a short narrative and a trust distance.

use super::{find_shortest_path, EdgeMeta, GraphView, PathResult};
use crate::classify::ExplanationGenerator;
use crate::graph::{EdgeType, EntityId, EntityStore};
use serde::Serialize;
use tracing::debug;

/// Narrative used when the reference node cannot be reached
pub const NO_PATH_NARRATIVE: &str = "No path found";

/// Trust distance above which a path counts as highly centralized
pub const HIGH_CENTRALIZATION: u32 = 70;

/// Trust distance above which a path counts as moderately centralized
pub const MODERATE_CENTRALIZATION: u32 = 40;

/// One step along the path, in walking order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HopExplanation {
    /// 1-based position along the path
    pub step: usize,
    pub from: EntityId,
    pub from_name: String,
    pub to: EntityId,
    pub to_name: String,
    pub relationship: String,
    pub edge_type: EdgeType,
    /// True when the hop follows the declared direction of the connection
    pub forward: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathToCenterResult {
    #[serde(flatten)]
    pub path: PathResult,
    pub hop_explanations: Vec<HopExplanation>,
    pub narrative: String,
    /// 0 = every entity on the path fully decentralized, 100 = fully centralized
    pub trust_distance: u32,
}

/// Shortest path from `start` to `center`, explained hop by hop.
///
/// Endpoints missing from `store` do not fail the computation: their hops
/// fall back to an id-only explanation and carry the full penalty in the
/// trust distance.
pub fn find_path_to_center(
    view: &GraphView,
    store: &EntityStore,
    start: &str,
    center: &str,
    explainer: &dyn ExplanationGenerator,
) -> PathToCenterResult {
    debug!("Path to center {} -> {}", start, center);
    let path = find_shortest_path(view, start, center);

    if !path.found {
        return PathToCenterResult {
            path,
            hop_explanations: Vec::new(),
            narrative: NO_PATH_NARRATIVE.to_string(),
            trust_distance: 0,
        };
    }

    let hop_explanations = path
        .edges
        .iter()
        .enumerate()
        .map(|(i, edge)| {
            explain_hop(store, explainer, i, &path.path[i], &path.path[i + 1], edge)
        })
        .collect();
    let trust_distance = trust_distance(store, &path.path);
    let narrative = narrate(store, &path, trust_distance);

    PathToCenterResult {
        path,
        hop_explanations,
        narrative,
        trust_distance,
    }
}

fn explain_hop(
    store: &EntityStore,
    explainer: &dyn ExplanationGenerator,
    index: usize,
    from: &str,
    to: &str,
    edge: &EdgeMeta,
) -> HopExplanation {
    let explanation = match (store.get_entity(&edge.source), store.get_entity(&edge.target)) {
        (Some(source), Some(target)) => {
            explainer
                .explain(source, target, &edge.relationship, edge.edge_type)
                .summary
        }
        _ => format!(
            "{} is connected to {} ({}).",
            edge.source, edge.target, edge.relationship
        ),
    };

    HopExplanation {
        step: index + 1,
        from: from.to_string(),
        from_name: display_name(store, from),
        to: to.to_string(),
        to_name: display_name(store, to),
        relationship: edge.relationship.clone(),
        edge_type: edge.edge_type,
        forward: edge.source == from,
        explanation,
    }
}

fn display_name(store: &EntityStore, id: &str) -> String {
    store
        .get_entity(id)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Penalty charged for a path entity the store cannot resolve
pub const UNRESOLVED_PENALTY: u32 = 100;

/// Mean centralization penalty `(100 - score)` over every entity of a path,
/// on a 0-100 scale.
///
/// Every entity weighs the same regardless of edge type or position. Ids the
/// store cannot resolve carry `UNRESOLVED_PENALTY`. A path containing any
/// entity below 100 never rounds down to 0; an empty path is 0.
pub fn trust_distance(store: &EntityStore, path: &[EntityId]) -> u32 {
    if path.is_empty() {
        return 0;
    }

    let total: u32 = path
        .iter()
        .map(|id| match store.get_entity(id) {
            Some(entity) => 100 - u32::from(entity.score()),
            None => UNRESOLVED_PENALTY,
        })
        .sum();

    let mean = (f64::from(total) / path.len() as f64).round() as u32;
    if mean == 0 && total > 0 {
        1
    } else {
        mean.min(100)
    }
}

fn narrate(store: &EntityStore, path: &PathResult, trust_distance: u32) -> String {
    let (Some(first), Some(last)) = (path.path.first(), path.path.last()) else {
        return NO_PATH_NARRATIVE.to_string();
    };
    let start_name = display_name(store, first);
    let center_name = display_name(store, last);

    let mut sentences = Vec::new();
    match path.distance {
        0 => sentences.push(format!("{} is the reference point itself.", start_name)),
        1 => {
            sentences.push(format!("{} reaches {} in 1 hop.", start_name, center_name));
            sentences.push("This is a direct connection.".to_string());
        }
        hops => {
            sentences.push(format!("{} reaches {} in {} hops.", start_name, center_name, hops));
            let via: Vec<String> = path.path[1..path.path.len() - 1]
                .iter()
                .map(|id| display_name(store, id))
                .collect();
            sentences.push(format!("The path runs through {}.", via.join(" → ")));
        }
    }

    let closing = if trust_distance > HIGH_CENTRALIZATION {
        "This path is highly centralized, with significant trust requirements along the way."
    } else if trust_distance > MODERATE_CENTRALIZATION {
        "This path shows moderate centralization."
    } else {
        "This path is relatively decentralized."
    };
    sentences.push(closing.to_string());

    sentences.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::build_view;
    use crate::classify::{PatternClassifier, TemplateExplainer};
    use crate::graph::{Entity, EntityType};

    fn chain() -> EntityStore {
        EntityStore::from_entities(vec![
            Entity::new("a", "Alpha", EntityType::Organization)
                .with_score(10)
                .with_connection("b", "partner of"),
            Entity::new("b", "Beta", EntityType::Organization)
                .with_score(50)
                .with_connection("c", "issued by"),
            Entity::new("c", "Gamma", EntityType::Concept).with_score(90),
            Entity::new("island", "Island", EntityType::Event),
        ])
        .unwrap()
    }

    fn center(store: &EntityStore, start: &str, center: &str) -> PathToCenterResult {
        let view = build_view(store, &PatternClassifier::new());
        find_path_to_center(&view, store, start, center, &TemplateExplainer::new())
    }

    #[test]
    fn test_trust_distance_mean() {
        let store = chain();
        let result = center(&store, "a", "c");

        assert!(result.path.found);
        assert_eq!(result.path.distance, 2);
        // mean of 0.9, 0.5, 0.1
        assert_eq!(result.trust_distance, 50);
    }

    #[test]
    fn test_hop_explanations() {
        let store = chain();
        let result = center(&store, "a", "c");

        assert_eq!(result.hop_explanations.len(), 2);
        let second = &result.hop_explanations[1];
        assert_eq!(second.step, 2);
        assert_eq!(second.from_name, "Beta");
        assert_eq!(second.to_name, "Gamma");
        assert!(second.forward);
        assert_eq!(second.explanation, "Beta is issued by Gamma.");
    }

    #[test]
    fn test_narrative_lists_intermediates() {
        let store = chain();
        let result = center(&store, "a", "c");

        assert!(result.narrative.starts_with("Alpha reaches Gamma in 2 hops."));
        assert!(result.narrative.contains("The path runs through Beta."));
        assert!(result.narrative.ends_with("moderate centralization."));
    }

    #[test]
    fn test_direct_connection() {
        let store = chain();
        let result = center(&store, "c", "b");

        assert_eq!(result.path.distance, 1);
        assert!(result.narrative.contains("This is a direct connection."));
        assert!(!result.hop_explanations[0].forward);
    }

    #[test]
    fn test_no_path() {
        let store = chain();
        let result = center(&store, "a", "island");

        assert!(!result.path.found);
        assert_eq!(result.path.distance, -1);
        assert!(result.hop_explanations.is_empty());
        assert_eq!(result.narrative, NO_PATH_NARRATIVE);
        assert_eq!(result.trust_distance, 0);
    }

    #[test]
    fn test_start_is_center() {
        let store = chain();
        let result = center(&store, "b", "b");
        assert_eq!(result.path.distance, 0);
        assert_eq!(result.trust_distance, 50);
        assert!(result.narrative.starts_with("Beta is the reference point itself."));
    }

    #[test]
    fn test_missing_entities_fall_back_to_ids() {
        // The view knows "b" but the narrating store does not
        let full = chain();
        let view = build_view(&full, &PatternClassifier::new());
        let partial = EntityStore::from_entities(vec![
            Entity::new("a", "Alpha", EntityType::Organization).with_score(10),
            Entity::new("c", "Gamma", EntityType::Concept).with_score(90),
        ])
        .unwrap();

        let result = find_path_to_center(&view, &partial, "a", "c", &TemplateExplainer::new());
        assert!(result.path.found);
        assert_eq!(result.hop_explanations[0].to_name, "b");
        assert_eq!(result.hop_explanations[0].explanation, "a is connected to b (partner of).");
        // b carries the full penalty: (90 + 100 + 10) / 3
        assert_eq!(result.trust_distance, 67);
    }

    #[test]
    fn test_unresolved_entity_is_not_free() {
        let full = EntityStore::from_entities(vec![
            Entity::new("a", "Alpha", EntityType::Concept)
                .with_score(100)
                .with_connection("b", "partner of"),
            Entity::new("b", "Beta", EntityType::Organization)
                .with_score(0)
                .with_connection("c", "partner of"),
            Entity::new("c", "Gamma", EntityType::Concept).with_score(100),
        ])
        .unwrap();
        let view = build_view(&full, &PatternClassifier::new());
        let partial = EntityStore::from_entities(vec![
            Entity::new("a", "Alpha", EntityType::Concept).with_score(100),
            Entity::new("c", "Gamma", EntityType::Concept).with_score(100),
        ])
        .unwrap();

        let explainer = TemplateExplainer::new();
        let result = find_path_to_center(&view, &partial, "a", "c", &explainer);
        assert_eq!(result.path.path, vec!["a", "b", "c"]);
        // a missing score-0 entity costs the same as a known one
        assert_eq!(result.trust_distance, 33);
        let resolved = find_path_to_center(&view, &full, "a", "c", &explainer);
        assert_eq!(result.trust_distance, resolved.trust_distance);

        let ids: Vec<EntityId> = vec!["ghost".into()];
        assert_eq!(trust_distance(&partial, &ids), UNRESOLVED_PENALTY);
        assert_eq!(trust_distance(&partial, &[]), 0);
    }

    #[test]
    fn test_high_centralization_wording() {
        let store = EntityStore::from_entities(vec![
            Entity::new("fed", "Federal Reserve", EntityType::Government)
                .with_connection("bank", "regulates"),
            Entity::new("bank", "Bank", EntityType::Organization).with_score(10),
        ])
        .unwrap();

        let result = center(&store, "bank", "fed");
        // penalties 90 and 95
        assert_eq!(result.trust_distance, 93);
        assert!(result.narrative.contains("highly centralized"));
    }

    #[test]
    fn test_near_zero_never_reports_zero() {
        let store = EntityStore::from_entities(vec![
            Entity::new("x", "X", EntityType::Concept).with_score(100),
            Entity::new("y", "Y", EntityType::Concept).with_score(100),
            Entity::new("z", "Z", EntityType::Concept).with_score(99),
        ])
        .unwrap();

        let ids: Vec<EntityId> = vec!["x".into(), "y".into(), "z".into()];
        assert_eq!(trust_distance(&store, &ids), 1);
        assert_eq!(trust_distance(&store, &ids[..2]), 0);
    }
}
