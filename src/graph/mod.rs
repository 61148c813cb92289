//! Core graph data structures and the linkage engine

mod cache;
mod edge;
mod engine;
mod entity;
mod node;
mod registry;
mod universe;

#[cfg(test)]
mod tests;

pub use cache::{CacheKey, CacheReport, CacheStats};
pub use edge::{Edge, EdgeId, EdgeKind};
pub use engine::{Graph, GraphError, GraphResult};
pub use entity::{AttributeValue, Attributes, Entity};
pub use node::{Node, NodeId};
pub use registry::NodeRegistry;
pub use universe::{Universe, UniverseId, UniverseLaws, UniverseLawsBuilder};
