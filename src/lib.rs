//! Graphweave: an in-memory, mutable, typed graph container
//!
//! Nodes are joined by typed edges and grouped into universes. The engine
//! keeps node and edge bookkeeping symmetric through every mutation, and a
//! query layer built on direction-sensitive neighbor resolution provides
//! breadth-first and depth-first traversals, attribute searches and
//! shortest paths.
//!
//! # Core Concepts
//!
//! - **Nodes**: vertices holding their incident edges and an attribute bag
//! - **Edges**: directed, undirected, or caller-defined links between nodes
//! - **Universes**: node-backed containers that scope traversals
//!
//! # Example
//!
//! ```
//! use graphweave::{bft, Attributes, Graph, NeighborOptions, UniverseLaws};
//!
//! let mut graph = Graph::new();
//! let uni = graph.add_universe(UniverseLaws::default());
//! let a = graph.add_member(uni, Attributes::new()).unwrap();
//! let b = graph.add_member(uni, Attributes::new()).unwrap();
//! graph.add_directed_edge(Some(a), Some(b)).unwrap();
//!
//! let order = bft(&graph, Some(uni), a, &NeighborOptions::default()).unwrap();
//! assert_eq!(order, Some(vec![a, b]));
//! ```

pub mod builder;
pub mod config;
mod graph;
pub mod query;
pub mod render;

pub use config::GraphConfig;
pub use graph::{
    AttributeValue, Attributes, CacheKey, CacheReport, CacheStats, Edge, EdgeId, EdgeKind, Entity,
    Graph, GraphError, GraphResult, Node, NodeId, NodeRegistry, Universe, UniverseId, UniverseLaws,
    UniverseLawsBuilder,
};
pub use query::{
    bfs, bft, dfs_iterative, dfs_recursive, dft_iterative, dft_recursive, edge_attribute_weight,
    find_edges, neighbors, Direction, NeighborFilter, NeighborOptions, PathMethod, PathQuery,
    PathResult, UnknownEdgePolicy,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
