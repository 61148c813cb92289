//! Graph construction helpers
//!
//! Builders only use the public mutation surface of [`Graph`](crate::Graph),
//! so every graph they produce obeys the same linkage rules as hand-built ones.

pub mod adjacency;
pub mod document;
pub mod explicit;
pub mod random;

pub use adjacency::{load_adjacency_list, load_adjacency_matrix};
pub use document::{DocumentEdgeKind, EdgeSpec, GraphDocument, LoadedGraph, NodeSpec};
pub use explicit::{link_directed, link_from_to, link_undirected, unlink};
pub use random::{random_graph, RandomGraphOptions};
