//! Node representation in the graph arena

use super::cache::NeighborCache;
use super::edge::EdgeId;
use super::entity::Entity;
use super::universe::UniverseId;
use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

/// Handle of a node in its graph's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A vertex: holds its incident edges and the universes it belongs to
#[derive(Debug)]
pub struct Node {
    entity: Entity,
    /// Incident edges in insertion order, each present once
    pub(crate) edges: Vec<EdgeId>,
    pub(crate) universes: Vec<UniverseId>,
    /// Set when this node backs a universe
    pub(crate) universe: Option<UniverseId>,
    pub(crate) cache: RefCell<NeighborCache>,
}

impl Node {
    pub(crate) fn new(entity: Entity) -> Self {
        Self {
            entity,
            edges: Vec::new(),
            universes: Vec::new(),
            universe: None,
            cache: RefCell::new(NeighborCache::default()),
        }
    }

    /// Incident edges in the order they were linked
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn universes(&self) -> &[UniverseId] {
        &self.universes
    }

    /// The universe this node backs, if it is one
    pub fn as_universe(&self) -> Option<UniverseId> {
        self.universe
    }

    pub fn has_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }
}

impl Deref for Node {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        &self.entity
    }
}

impl DerefMut for Node {
    fn deref_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}
