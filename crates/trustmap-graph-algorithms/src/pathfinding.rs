//! Pathfinding algorithms
//!
//! Breadth-first shortest path, bounded simple-path enumeration and
//! N-hop neighbourhoods over an undirected `GraphView`.

use super::common::{GraphView, NodeId};
use std::collections::{HashMap, VecDeque};

/// Result of a pathfinding algorithm
///
/// `edges[i]` connects `path[i]` and `path[i + 1]`. A missing path is a normal
/// outcome: `found == false`, both sequences empty and `distance == -1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PathResult<E> {
    pub path: Vec<NodeId>,
    pub edges: Vec<E>,
    pub distance: i32,
    pub found: bool,
}

impl<E> PathResult<E> {
    /// The sentinel "no path" result
    pub fn not_found() -> Self {
        PathResult {
            path: Vec::new(),
            edges: Vec::new(),
            distance: -1,
            found: false,
        }
    }

    /// A zero-length path containing a single node
    pub fn trivial(id: &str) -> Self {
        PathResult {
            path: vec![id.to_string()],
            edges: Vec::new(),
            distance: 0,
            found: true,
        }
    }

    fn from_parts(path: Vec<NodeId>, edges: Vec<E>) -> Self {
        PathResult {
            distance: edges.len() as i32,
            path,
            edges,
            found: true,
        }
    }
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// Nodes are marked visited when enqueued, and the search stops as soon as
/// `target` is discovered. Among several shortest paths the one returned
/// follows the adjacency order of the view (neighbour id order).
pub fn shortest_path<E: Clone>(
    view: &GraphView<E>,
    source: &str,
    target: &str,
) -> PathResult<E> {
    if source == target {
        return PathResult::trivial(source);
    }

    let (Some(source_idx), Some(target_idx)) = (view.index_of(source), view.index_of(target))
    else {
        return PathResult::not_found();
    };

    let mut queue = VecDeque::new();
    let mut visited = vec![false; view.node_count];
    // index -> (parent_index, edge_index)
    let mut parent: Vec<Option<(usize, usize)>> = vec![None; view.node_count];

    queue.push_back(source_idx);
    visited[source_idx] = true;

    while let Some(current_idx) = queue.pop_front() {
        for adj in view.neighbors(current_idx) {
            if visited[adj.neighbor] {
                continue;
            }
            visited[adj.neighbor] = true;
            parent[adj.neighbor] = Some((current_idx, adj.edge));

            if adj.neighbor == target_idx {
                return reconstruct(view, &parent, target_idx);
            }
            queue.push_back(adj.neighbor);
        }
    }

    PathResult::not_found()
}

fn reconstruct<E: Clone>(
    view: &GraphView<E>,
    parent: &[Option<(usize, usize)>],
    target_idx: usize,
) -> PathResult<E> {
    let mut path = vec![view.index_to_node[target_idx].clone()];
    let mut edges = Vec::new();
    let mut curr = target_idx;

    while let Some((prev, edge)) = parent[curr] {
        path.push(view.index_to_node[prev].clone());
        edges.push(view.edges[edge].clone());
        curr = prev;
    }

    path.reverse();
    edges.reverse();
    PathResult::from_parts(path, edges)
}

/// Enumerate every simple path from `source` to `target` with at most
/// `max_length` edges, sorted ascending by length.
///
/// Exponential in the worst case; `max_length` is the only bound.
pub fn all_simple_paths<E: Clone>(
    view: &GraphView<E>,
    source: &str,
    target: &str,
    max_length: usize,
) -> Vec<PathResult<E>> {
    let (Some(source_idx), Some(target_idx)) = (view.index_of(source), view.index_of(target))
    else {
        return Vec::new();
    };

    let mut search = SimplePathSearch {
        view,
        target: target_idx,
        max_length,
        visited: vec![false; view.node_count],
        nodes: Vec::new(),
        edges: Vec::new(),
        results: Vec::new(),
    };
    search.visit(source_idx);

    let mut results = search.results;
    results.sort_by_key(|r| r.distance);
    results
}

struct SimplePathSearch<'a, E> {
    view: &'a GraphView<E>,
    target: usize,
    max_length: usize,
    visited: Vec<bool>,
    nodes: Vec<usize>,
    edges: Vec<usize>,
    results: Vec<PathResult<E>>,
}

impl<E: Clone> SimplePathSearch<'_, E> {
    fn visit(&mut self, current: usize) {
        self.visited[current] = true;
        self.nodes.push(current);

        if current == self.target {
            self.record();
        } else if self.edges.len() < self.max_length {
            let view = self.view;
            for adj in view.neighbors(current) {
                if self.visited[adj.neighbor] {
                    continue;
                }
                self.edges.push(adj.edge);
                self.visit(adj.neighbor);
                self.edges.pop();
            }
        }

        self.nodes.pop();
        self.visited[current] = false;
    }

    fn record(&mut self) {
        let path = self
            .nodes
            .iter()
            .map(|&idx| self.view.index_to_node[idx].clone())
            .collect();
        let edges = self
            .edges
            .iter()
            .map(|&idx| self.view.edges[idx].clone())
            .collect();
        self.results.push(PathResult::from_parts(path, edges));
    }
}

/// Hop count of the shortest path, or -1 when unreachable
pub fn degree_of_separation<E: Clone>(
    view: &GraphView<E>,
    source: &str,
    target: &str,
) -> i32 {
    shortest_path(view, source, target).distance
}

/// Every node reachable from `source` within `max_degrees` hops, with its
/// hop distance. `source` itself is included at distance 0; an unknown
/// source yields an empty map.
pub fn within_degrees<E>(
    view: &GraphView<E>,
    source: &str,
    max_degrees: usize,
) -> HashMap<NodeId, usize> {
    let mut distances = HashMap::new();
    let Some(source_idx) = view.index_of(source) else {
        return distances;
    };

    let mut depth: Vec<Option<usize>> = vec![None; view.node_count];
    let mut queue = VecDeque::new();
    depth[source_idx] = Some(0);
    queue.push_back(source_idx);

    while let Some(current_idx) = queue.pop_front() {
        let d = depth[current_idx].unwrap_or(0);
        distances.insert(view.index_to_node[current_idx].clone(), d);

        if d >= max_degrees {
            continue;
        }
        for adj in view.neighbors(current_idx) {
            if depth[adj.neighbor].is_none() {
                depth[adj.neighbor] = Some(d + 1);
                queue.push_back(adj.neighbor);
            }
        }
    }

    distances
}
