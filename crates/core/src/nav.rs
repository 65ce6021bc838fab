//! Traversal graph construction and cost-aware path search.

mod cost;
mod graph;
mod search;

pub use cost::{PathCost, destructible_step_cost};
pub use graph::{TraversalGraph, build_graph};
pub use search::{PathOutcome, SearchResult, astar_search, find_path};
