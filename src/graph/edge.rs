//! Edge representation: typed links between endpoint nodes

use super::entity::Entity;
use super::node::NodeId;
use std::ops::{Deref, DerefMut};

/// Handle of an edge in its graph's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Kind of an edge, which fixes its traversal semantics
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// v1 --> v2
    Directed,
    /// v1 -- v2
    Undirected,
    /// The untyped base link. Only created with an explicit force flag.
    Base,
    /// A caller-defined kind with no built-in traversal meaning
    Custom(String),
}

impl EdgeKind {
    /// Directed and undirected edges have exactly two endpoint slots
    pub fn is_two_ended(&self) -> bool {
        matches!(self, EdgeKind::Directed | EdgeKind::Undirected)
    }

    pub fn name(&self) -> &str {
        match self {
            EdgeKind::Directed => "directed",
            EdgeKind::Undirected => "undirected",
            EdgeKind::Base => "base",
            EdgeKind::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An edge joining endpoint nodes
///
/// Endpoints are held in slots. Two-ended kinds always carry two slots,
/// either of which may be empty; other kinds hold only present endpoints.
/// The same node may appear in more than one slot (self-loops).
#[derive(Debug, Clone)]
pub struct Edge {
    entity: Entity,
    kind: EdgeKind,
    pub(crate) slots: Vec<Option<NodeId>>,
}

impl Edge {
    pub(crate) fn new(entity: Entity, kind: EdgeKind, slots: Vec<Option<NodeId>>) -> Self {
        Self {
            entity,
            kind,
            slots,
        }
    }

    pub fn kind(&self) -> &EdgeKind {
        &self.kind
    }

    /// Present endpoints in slot order, duplicates kept
    pub fn endpoints(&self) -> Vec<NodeId> {
        self.slots.iter().flatten().copied().collect()
    }

    /// Origin (directed) or first end (undirected)
    pub fn v1(&self) -> Option<NodeId> {
        if self.kind.is_two_ended() {
            self.slots.first().copied().flatten()
        } else {
            None
        }
    }

    /// Destination (directed) or second end (undirected)
    pub fn v2(&self) -> Option<NodeId> {
        if self.kind.is_two_ended() {
            self.slots.get(1).copied().flatten()
        } else {
            None
        }
    }

    pub fn has_endpoint(&self, node: NodeId) -> bool {
        self.slots.contains(&Some(node))
    }

    /// Partner of `node` on a two-ended edge
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if !self.kind.is_two_ended() {
            return None;
        }
        if self.v1() == Some(node) {
            self.v2()
        } else if self.v2() == Some(node) {
            self.v1()
        } else {
            None
        }
    }

    /// Every endpoint except one occurrence of `node`
    pub(crate) fn others(&self, node: NodeId) -> Vec<NodeId> {
        let mut skipped = false;
        self.slots
            .iter()
            .flatten()
            .copied()
            .filter(|&n| {
                if n == node && !skipped {
                    skipped = true;
                    false
                } else {
                    true
                }
            })
            .collect()
    }
}

impl Deref for Edge {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        &self.entity
    }
}

impl DerefMut for Edge {
    fn deref_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}
