//! Shared utilities for graph algorithms
//!
//! Provides a read-only, undirected view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (stable string id from the dataset)
pub type NodeId = String;

/// One entry of an adjacency list: the neighbour index and the edge that reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacent {
    /// Dense index of the neighbour
    pub neighbor: usize,
    /// Index into `GraphView::edges`
    pub edge: usize,
}

/// A dense, integer-indexed, undirected view of the graph topology.
///
/// Every logical edge is inserted twice (once per endpoint), so traversal is
/// symmetric regardless of the declared direction. The declared direction is
/// still available through `endpoints` and the edge payload `E`.
#[derive(Debug, Clone)]
pub struct GraphView<E> {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,
    /// Adjacency lists, ordered by neighbour id
    pub adjacency: Vec<Vec<Adjacent>>,
    /// Declared (source, target) indices of each logical edge
    pub endpoints: Vec<(usize, usize)>,
    /// Edge payloads, aligned with `endpoints`
    pub edges: Vec<E>,
    /// Edges dropped because an endpoint was not a known node
    pub dangling: usize,
}

impl<E> GraphView<E> {
    /// Build an undirected view from a node list and directed edges.
    ///
    /// Node order fixes the dense indices. Duplicate node ids keep their
    /// first position. Edges whose source or target is not in `nodes` are
    /// skipped and counted in `dangling`. Each adjacency list is sorted by
    /// neighbour id; the sort is stable, so parallel edges keep input order.
    pub fn undirected<N, I>(nodes: N, edges: I) -> Self
    where
        N: IntoIterator<Item = NodeId>,
        I: IntoIterator<Item = (NodeId, NodeId, E)>,
    {
        let mut index_to_node = Vec::new();
        let mut node_to_index = HashMap::new();

        for node_id in nodes {
            if node_to_index.contains_key(&node_id) {
                continue;
            }
            node_to_index.insert(node_id.clone(), index_to_node.len());
            index_to_node.push(node_id);
        }

        let node_count = index_to_node.len();
        let mut adjacency: Vec<Vec<Adjacent>> = vec![Vec::new(); node_count];
        let mut endpoints = Vec::new();
        let mut payloads = Vec::new();
        let mut dangling = 0;

        for (source, target, payload) in edges {
            let (Some(&u), Some(&v)) = (node_to_index.get(&source), node_to_index.get(&target))
            else {
                dangling += 1;
                continue;
            };

            let edge = payloads.len();
            endpoints.push((u, v));
            payloads.push(payload);

            adjacency[u].push(Adjacent { neighbor: v, edge });
            if u != v {
                adjacency[v].push(Adjacent { neighbor: u, edge });
            }
        }

        for list in adjacency.iter_mut() {
            list.sort_by(|a, b| index_to_node[a.neighbor].cmp(&index_to_node[b.neighbor]));
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            adjacency,
            endpoints,
            edges: payloads,
            dangling,
        }
    }

    /// Number of logical (undirected) edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Dense index of a node, if present
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.node_to_index.get(id).copied()
    }

    /// Whether the node is part of the view
    pub fn contains(&self, id: &str) -> bool {
        self.node_to_index.contains_key(id)
    }

    /// Undirected degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.adjacency[idx].len()
    }

    /// Neighbours of a node (by index)
    pub fn neighbors(&self, idx: usize) -> &[Adjacent] {
        &self.adjacency[idx]
    }

    /// Whether edge `edge` was declared from `from` towards the other endpoint
    pub fn is_forward(&self, edge: usize, from: usize) -> bool {
        self.endpoints[edge].0 == from
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<NodeId> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_undirected_projection() {
        let view = GraphView::undirected(
            ids(&["a", "b", "c"]),
            vec![
                ("a".to_string(), "b".to_string(), "ab"),
                ("b".to_string(), "c".to_string(), "bc"),
            ],
        );

        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 2);

        let b = view.index_of("b").unwrap();
        assert_eq!(view.degree(b), 2);

        // Edge b->c is visible from c as well
        let c = view.index_of("c").unwrap();
        assert_eq!(view.neighbors(c)[0].neighbor, b);
        assert!(!view.is_forward(view.neighbors(c)[0].edge, c));
        assert!(view.is_forward(view.neighbors(c)[0].edge, b));
    }

    #[test]
    fn test_dangling_edges_are_skipped() {
        let view = GraphView::undirected(
            ids(&["a", "b"]),
            vec![
                ("a".to_string(), "b".to_string(), ()),
                ("a".to_string(), "ghost".to_string(), ()),
            ],
        );

        assert_eq!(view.edge_count(), 1);
        assert_eq!(view.dangling, 1);
        assert!(!view.contains("ghost"));
    }

    #[test]
    fn test_neighbors_sorted_by_id() {
        let view = GraphView::undirected(
            ids(&["hub", "zeta", "alpha", "mid"]),
            vec![
                ("hub".to_string(), "zeta".to_string(), 0),
                ("hub".to_string(), "alpha".to_string(), 1),
                ("mid".to_string(), "hub".to_string(), 2),
            ],
        );

        let hub = view.index_of("hub").unwrap();
        let order: Vec<&str> = view
            .neighbors(hub)
            .iter()
            .map(|a| view.index_to_node[a.neighbor].as_str())
            .collect();
        assert_eq!(order, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_duplicate_nodes_keep_first_position() {
        let view: GraphView<()> =
            GraphView::undirected(ids(&["a", "b", "a"]), Vec::new());
        assert_eq!(view.node_count, 2);
        assert_eq!(view.index_of("a"), Some(0));
    }
}
