//! Universe: a container scoping membership and traversal

use super::edge::EdgeKind;
use super::node::NodeId;
use std::collections::HashSet;

/// Handle of a universe in its graph's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniverseId(pub(crate) usize);

impl UniverseId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for UniverseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "u{}", self.0)
    }
}

/// Structural rules that apply to a universe
///
/// Read-only once built. Rules are recorded for callers to consult; the
/// engine does not enforce them.
#[derive(Debug, Clone, PartialEq)]
pub struct UniverseLaws {
    edge_whitelist: Option<Vec<EdgeKind>>,
    mixed_links: bool,
    cycles: bool,
    multipath: bool,
    multiverse: bool,
}

impl Default for UniverseLaws {
    fn default() -> Self {
        Self {
            edge_whitelist: None,
            mixed_links: false,
            cycles: true,
            multipath: true,
            multiverse: false,
        }
    }
}

impl UniverseLaws {
    pub fn builder() -> UniverseLawsBuilder {
        UniverseLawsBuilder::default()
    }

    pub fn edge_whitelist(&self) -> Option<&[EdgeKind]> {
        self.edge_whitelist.as_deref()
    }

    /// Whether an edge kind passes the whitelist (no whitelist permits all)
    pub fn permits(&self, kind: &EdgeKind) -> bool {
        match &self.edge_whitelist {
            Some(list) => list.contains(kind),
            None => true,
        }
    }

    pub fn mixed_links(&self) -> bool {
        self.mixed_links
    }

    pub fn cycles(&self) -> bool {
        self.cycles
    }

    pub fn multipath(&self) -> bool {
        self.multipath
    }

    pub fn multiverse(&self) -> bool {
        self.multiverse
    }
}

/// Builder for [`UniverseLaws`]
#[derive(Debug, Clone, Default)]
pub struct UniverseLawsBuilder {
    laws: UniverseLaws,
}

impl UniverseLawsBuilder {
    pub fn edge_whitelist(mut self, kinds: impl IntoIterator<Item = EdgeKind>) -> Self {
        self.laws.edge_whitelist = Some(kinds.into_iter().collect());
        self
    }

    pub fn mixed_links(mut self, allowed: bool) -> Self {
        self.laws.mixed_links = allowed;
        self
    }

    pub fn cycles(mut self, allowed: bool) -> Self {
        self.laws.cycles = allowed;
        self
    }

    pub fn multipath(mut self, allowed: bool) -> Self {
        self.laws.multipath = allowed;
        self
    }

    pub fn multiverse(mut self, allowed: bool) -> Self {
        self.laws.multiverse = allowed;
        self
    }

    pub fn build(self) -> UniverseLaws {
        self.laws
    }
}

/// A universe's membership and laws
#[derive(Debug, Clone)]
pub struct Universe {
    node: NodeId,
    laws: UniverseLaws,
    /// Members in insertion order
    members: Vec<NodeId>,
    index: HashSet<NodeId>,
}

impl Universe {
    pub(crate) fn new(node: NodeId, laws: UniverseLaws) -> Self {
        Self {
            node,
            laws,
            members: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// The node backing this universe
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn laws(&self) -> &UniverseLaws {
        &self.laws
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.index.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns false when already a member
    pub(crate) fn insert(&mut self, node: NodeId) -> bool {
        if !self.index.insert(node) {
            return false;
        }
        self.members.push(node);
        true
    }

    /// Returns false when not a member
    pub(crate) fn remove(&mut self, node: NodeId) -> bool {
        if !self.index.remove(&node) {
            return false;
        }
        self.members.retain(|&n| n != node);
        true
    }
}
