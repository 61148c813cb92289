//! Query layer over a [`Graph`](crate::Graph)
//!
//! Neighbor resolution is the single primitive; breadth-first and depth-first
//! traversals, attribute searches and shortest paths are all built on it.

mod breadth_first;
mod depth_first;
mod neighbors;
mod path;
mod scope;
mod types;

pub use breadth_first::{bfs, bft};
pub use depth_first::{dfs_iterative, dfs_recursive, dft_iterative, dft_recursive};
pub use neighbors::{find_edges, neighbors};
pub use path::{edge_attribute_weight, PathMethod, PathQuery, WeightFn};
pub use types::{Direction, NeighborFilter, NeighborOptions, PathResult, UnknownEdgePolicy};
