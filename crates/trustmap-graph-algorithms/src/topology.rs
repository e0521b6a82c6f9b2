//! Graph topology analysis algorithms
//!
//! Degree statistics over the undirected view: density, per-node degree and
//! the highest-degree nodes.

use super::common::GraphView;
use std::collections::HashSet;

/// Degree summary of an undirected view
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeStats {
    pub node_count: usize,
    /// Distinct unordered node pairs joined by at least one edge
    pub connected_pairs: usize,
    /// `connected_pairs` over all possible pairs, 0.0 for fewer than two nodes
    pub density: f64,
    /// Degree per dense index
    pub degrees: Vec<usize>,
    pub max_degree: usize,
}

impl DegreeStats {
    /// Number of nodes whose degree is strictly greater than `threshold`
    pub fn count_above(&self, threshold: usize) -> usize {
        self.degrees.iter().filter(|&&d| d > threshold).count()
    }
}

/// Degree statistics
///
/// Parallel edges count towards a node's degree but only once towards density,
/// and self-loops are ignored for density.
pub fn degree_stats<E>(view: &GraphView<E>) -> DegreeStats {
    let n = view.node_count;
    let degrees: Vec<usize> = (0..n).map(|idx| view.degree(idx)).collect();

    let pairs: HashSet<(usize, usize)> = view
        .endpoints
        .iter()
        .filter(|(u, v)| u != v)
        .map(|&(u, v)| if u < v { (u, v) } else { (v, u) })
        .collect();

    let possible = n.saturating_sub(1) * n / 2;
    let density = if possible == 0 {
        0.0
    } else {
        pairs.len() as f64 / possible as f64
    };

    DegreeStats {
        node_count: n,
        connected_pairs: pairs.len(),
        density,
        max_degree: degrees.iter().copied().max().unwrap_or(0),
        degrees,
    }
}

/// The `k` highest-degree nodes as `(index, degree)`, ties broken by node id
pub fn top_by_degree<E>(view: &GraphView<E>, k: usize) -> Vec<(usize, usize)> {
    let mut ranked: Vec<(usize, usize)> = (0..view.node_count)
        .map(|idx| (idx, view.degree(idx)))
        .collect();

    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| view.index_to_node[a.0].cmp(&view.index_to_node[b.0]))
    });
    ranked.truncate(k);
    ranked
}
