pub mod common;
pub mod pathfinding;
pub mod topology;

pub use common::{Adjacent, GraphView, NodeId};
pub use pathfinding::{
    all_simple_paths, degree_of_separation, shortest_path, within_degrees, PathResult,
};
pub use topology::{degree_stats, top_by_degree, DegreeStats};
