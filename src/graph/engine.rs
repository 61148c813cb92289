//! Graph: the arena owning nodes, edges and universes, and the linkage
//! protocol that keeps node and edge bookkeeping symmetric.

use super::cache::{CacheKey, CacheReport, CacheStats};
use super::edge::{Edge, EdgeId, EdgeKind};
use super::entity::{Attributes, Entity};
use super::node::{Node, NodeId};
use super::universe::{Universe, UniverseId, UniverseLaws};
use crate::config::GraphConfig;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in graph operations
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Invalid endpoint: {0} is not a node of this graph")]
    InvalidEndpointKind(NodeId),

    #[error("Base edges cannot be created without forcing")]
    DirectInstantiationDenied,

    #[error("Membership not found: {0}")]
    MembershipNotFound(String),

    #[error("Start node {node} is not a member of universe {universe}")]
    StartNotInContainer { node: NodeId, universe: UniverseId },

    #[error("Unsupported edge kind '{kind}' on edge {edge}")]
    UnsupportedEdgeKind { edge: EdgeId, kind: EdgeKind },

    #[error("Unknown shortest path method: {0}")]
    UnknownMethod(String),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),

    #[error("Universe not found: {0}")]
    UniverseNotFound(UniverseId),

    #[error("Edge {0} is not a two-ended edge")]
    NotTwoEnded(EdgeId),

    #[error("Edge {0} already has both endpoints")]
    EndpointsFull(EdgeId),

    #[error("A {kind} edge takes at most two endpoints, got {count}")]
    TooManyEndpoints { kind: EdgeKind, count: usize },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// An in-memory, mutable, typed multigraph
///
/// Nodes, edges and universes live in arenas and are referred to by `Copy`
/// handles. Identity is handle equality, so two edges between the same pair
/// of nodes are always distinct. All structural mutation goes through the
/// methods here, which update both sides of every node/edge association and
/// invalidate neighbor caches before returning.
///
/// A graph is single-writer: it is not `Sync`, and callers sharing one across
/// threads must serialize access themselves.
#[derive(Debug, Default)]
pub struct Graph {
    config: GraphConfig,
    nodes: Vec<Node>,
    /// Dissolved edges leave `None`; handles are never reused
    edges: Vec<Option<Edge>>,
    universes: Vec<Universe>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Enable or disable neighbor caching
    ///
    /// Every cached answer is dropped when the setting changes.
    pub fn set_neighbor_caching(&mut self, enabled: bool) {
        if self.config.neighbor_caching == enabled {
            return;
        }
        for node in &self.nodes {
            node.cache.borrow_mut().clear();
        }
        self.config.neighbor_caching = enabled;
        tracing::debug!(enabled, "neighbor caching toggled");
    }

    pub fn set_strict_membership(&mut self, strict: bool) {
        self.config.strict_membership = strict;
    }

    // === Nodes ===

    pub fn add_node(&mut self, attributes: Attributes) -> NodeId {
        self.push_node(Entity::new(None, attributes))
    }

    pub fn add_node_with_uid(&mut self, uid: Uuid, attributes: Attributes) -> NodeId {
        self.push_node(Entity::new(Some(uid), attributes))
    }

    /// Create a node and make it a member of `universe`
    pub fn add_member(&mut self, universe: UniverseId, attributes: Attributes) -> GraphResult<NodeId> {
        self.universe(universe)?;
        let id = self.add_node(attributes);
        self.add_to_universe(universe, id)?;
        Ok(id)
    }

    fn push_node(&mut self, entity: Entity) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(entity));
        tracing::trace!(node = %id, "node created");
        id
    }

    pub fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.nodes.get(id.0).ok_or(GraphError::NodeNotFound(id))
    }

    /// Mutable access for attribute updates. Structure stays engine-owned.
    pub fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // === Edges ===

    /// Create a directed edge `v1 --> v2`; either end may be left empty
    pub fn add_directed_edge(&mut self, v1: Option<NodeId>, v2: Option<NodeId>) -> GraphResult<EdgeId> {
        self.add_two_ended(EdgeKind::Directed, v1, v2)
    }

    /// Create an undirected edge `v1 -- v2`; either end may be left empty
    pub fn add_undirected_edge(&mut self, v1: Option<NodeId>, v2: Option<NodeId>) -> GraphResult<EdgeId> {
        self.add_two_ended(EdgeKind::Undirected, v1, v2)
    }

    /// Create an edge of any kind over the given endpoints
    ///
    /// Base edges have no traversal meaning and require `force`. Directed
    /// and undirected kinds accept at most two endpoints.
    pub fn add_edge(&mut self, kind: EdgeKind, endpoints: &[NodeId], force: bool) -> GraphResult<EdgeId> {
        match kind {
            EdgeKind::Base if !force => Err(GraphError::DirectInstantiationDenied),
            EdgeKind::Directed | EdgeKind::Undirected => {
                if endpoints.len() > 2 {
                    return Err(GraphError::TooManyEndpoints {
                        kind,
                        count: endpoints.len(),
                    });
                }
                let v1 = endpoints.first().copied();
                let v2 = endpoints.get(1).copied();
                self.add_two_ended(kind, v1, v2)
            }
            kind => {
                for &node in endpoints {
                    self.check_endpoint(node)?;
                }
                let slots = endpoints.iter().copied().map(Some).collect();
                Ok(self.push_edge(kind, slots))
            }
        }
    }

    fn add_two_ended(&mut self, kind: EdgeKind, v1: Option<NodeId>, v2: Option<NodeId>) -> GraphResult<EdgeId> {
        for node in [v1, v2].into_iter().flatten() {
            self.check_endpoint(node)?;
        }
        Ok(self.push_edge(kind, vec![v1, v2]))
    }

    fn push_edge(&mut self, kind: EdgeKind, slots: Vec<Option<NodeId>>) -> EdgeId {
        let id = EdgeId(self.edges.len());
        let ends: Vec<NodeId> = slots.iter().flatten().copied().collect();
        tracing::trace!(edge = %id, %kind, ?ends, "edge created");
        self.edges.push(Some(Edge::new(Entity::new(None, Attributes::new()), kind, slots)));
        for node in ends {
            self.link(id, node);
        }
        id
    }

    fn check_endpoint(&self, node: NodeId) -> GraphResult<()> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::InvalidEndpointKind(node))
        }
    }

    pub fn edge(&self, id: EdgeId) -> GraphResult<&Edge> {
        self.edges
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(GraphError::EdgeNotFound(id))
    }

    /// Mutable access for attribute updates. Structure stays engine-owned.
    pub fn edge_mut(&mut self, id: EdgeId) -> GraphResult<&mut Edge> {
        self.edges
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(GraphError::EdgeNotFound(id))
    }

    /// Live edges in creation order
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| EdgeId(i))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    /// Partner of `node` on a two-ended edge
    pub fn other(&self, edge: EdgeId, node: NodeId) -> GraphResult<Option<NodeId>> {
        Ok(self.edge(edge)?.other(node))
    }

    // === Linkage ===

    /// Add `node` as an endpoint of `edge`
    ///
    /// Two-ended edges fill their first empty slot. The node records the
    /// edge once no matter how many slots it occupies.
    pub fn attach(&mut self, edge: EdgeId, node: NodeId) -> GraphResult<()> {
        self.check_endpoint(node)?;
        let record = self.edge_mut(edge)?;
        if record.kind().is_two_ended() {
            match record.slots.iter().position(Option::is_none) {
                Some(slot) => record.slots[slot] = Some(node),
                None => return Err(GraphError::EndpointsFull(edge)),
            }
        } else {
            record.slots.push(Some(node));
        }
        self.link(edge, node);
        self.invalidate_ends(edge);
        Ok(())
    }

    /// Associate `edge` with `node`; a no-op if already associated
    pub fn add_edge_to_node(&mut self, node: NodeId, edge: EdgeId) -> GraphResult<()> {
        if self.node(node)?.has_edge(edge) {
            return Ok(());
        }
        if self.edge(edge)?.has_endpoint(node) {
            self.link(edge, node);
            Ok(())
        } else {
            self.attach(edge, node)
        }
    }

    /// Remove the first occurrence of `node` from `edge`'s endpoints
    ///
    /// On two-ended edges the slot is emptied and the other end kept. The
    /// edge leaves the node's incident list once the node no longer appears
    /// among its endpoints.
    pub fn detach(&mut self, edge: EdgeId, node: NodeId) -> GraphResult<()> {
        self.node(node)?;
        let strict = self.config.strict_membership;
        let record = self.edge_mut(edge)?;
        let Some(slot) = record.slots.iter().position(|s| *s == Some(node)) else {
            return Self::absent(strict, || format!("{} is not an endpoint of {}", node, edge));
        };
        if record.kind().is_two_ended() {
            record.slots[slot] = None;
        } else {
            record.slots.remove(slot);
        }
        let still_linked = record.has_endpoint(node);
        if still_linked {
            self.invalidate(node);
        } else {
            self.unlink(edge, node);
        }
        self.invalidate_ends(edge);
        Ok(())
    }

    /// Node-side counterpart of [`Graph::detach`]
    pub fn remove_edge_from_node(&mut self, node: NodeId, edge: EdgeId) -> GraphResult<()> {
        if !self.node(node)?.has_edge(edge) {
            let strict = self.config.strict_membership;
            return Self::absent(strict, || format!("{} is not incident to {}", edge, node));
        }
        self.detach(edge, node)
    }

    /// Reassign the origin / first end of a two-ended edge
    pub fn set_v1(&mut self, edge: EdgeId, node: Option<NodeId>) -> GraphResult<()> {
        self.set_end(edge, 0, node)
    }

    /// Reassign the destination / second end of a two-ended edge
    pub fn set_v2(&mut self, edge: EdgeId, node: Option<NodeId>) -> GraphResult<()> {
        self.set_end(edge, 1, node)
    }

    fn set_end(&mut self, edge: EdgeId, slot: usize, new: Option<NodeId>) -> GraphResult<()> {
        if let Some(node) = new {
            self.check_endpoint(node)?;
        }
        let record = self.edge_mut(edge)?;
        if !record.kind().is_two_ended() {
            return Err(GraphError::NotTwoEnded(edge));
        }
        let old = record.slots[slot];
        if old == new {
            return Ok(());
        }
        record.slots[slot] = new;
        let orphaned = old.filter(|&o| !record.has_endpoint(o));

        if let Some(old) = orphaned {
            self.unlink(edge, old);
        }
        if let Some(new) = new {
            self.link(edge, new);
        }
        self.invalidate_ends(edge);
        tracing::trace!(edge = %edge, slot, ?old, ?new, "edge end reassigned");
        Ok(())
    }

    /// Detach every endpoint and retire the edge
    pub fn dissolve_edge(&mut self, edge: EdgeId) -> GraphResult<Edge> {
        let record = self
            .edges
            .get_mut(edge.0)
            .and_then(Option::take)
            .ok_or(GraphError::EdgeNotFound(edge))?;
        for node in record.endpoints() {
            self.unlink(edge, node);
        }
        tracing::trace!(edge = %edge, "edge dissolved");
        Ok(record)
    }

    /// Node side of an association. Callers have validated `node`.
    fn link(&mut self, edge: EdgeId, node: NodeId) {
        let record = &mut self.nodes[node.0];
        if record.edges.contains(&edge) {
            return;
        }
        record.edges.push(edge);
        self.invalidate(node);
        tracing::trace!(edge = %edge, node = %node, "linked");
    }

    fn unlink(&mut self, edge: EdgeId, node: NodeId) {
        let record = &mut self.nodes[node.0];
        let Some(pos) = record.edges.iter().position(|&e| e == edge) else {
            return;
        };
        record.edges.remove(pos);
        self.invalidate(node);
        tracing::trace!(edge = %edge, node = %node, "unlinked");
    }

    fn absent(strict: bool, describe: impl FnOnce() -> String) -> GraphResult<()> {
        if strict {
            let message = describe();
            tracing::warn!(%message, "strict membership rejected removal");
            Err(GraphError::MembershipNotFound(message))
        } else {
            Ok(())
        }
    }

    // === Universes ===

    /// Create a universe backed by a fresh node
    pub fn add_universe(&mut self, laws: UniverseLaws) -> UniverseId {
        let node = self.add_node(Attributes::new());
        let id = UniverseId(self.universes.len());
        self.universes.push(Universe::new(node, laws));
        self.nodes[node.0].universe = Some(id);
        tracing::trace!(universe = %id, node = %node, "universe created");
        id
    }

    pub fn universe(&self, id: UniverseId) -> GraphResult<&Universe> {
        self.universes.get(id.0).ok_or(GraphError::UniverseNotFound(id))
    }

    pub fn universe_ids(&self) -> impl Iterator<Item = UniverseId> + '_ {
        (0..self.universes.len()).map(UniverseId)
    }

    /// Make `node` a member of `universe`; a no-op if it already is
    pub fn add_to_universe(&mut self, universe: UniverseId, node: NodeId) -> GraphResult<()> {
        self.node(node)?;
        let record = self
            .universes
            .get_mut(universe.0)
            .ok_or(GraphError::UniverseNotFound(universe))?;
        if record.insert(node) {
            self.nodes[node.0].universes.push(universe);
            tracing::trace!(universe = %universe, node = %node, "member added");
        }
        Ok(())
    }

    pub fn remove_from_universe(&mut self, universe: UniverseId, node: NodeId) -> GraphResult<()> {
        self.node(node)?;
        let strict = self.config.strict_membership;
        let record = self
            .universes
            .get_mut(universe.0)
            .ok_or(GraphError::UniverseNotFound(universe))?;
        if !record.remove(node) {
            return Self::absent(strict, || format!("{} is not a member of {}", node, universe));
        }
        self.nodes[node.0].universes.retain(|&u| u != universe);
        tracing::trace!(universe = %universe, node = %node, "member removed");
        Ok(())
    }

    /// Members of a universe in insertion order
    pub fn members(&self, universe: UniverseId) -> GraphResult<&[NodeId]> {
        Ok(self.universe(universe)?.members())
    }

    pub fn contains(&self, universe: UniverseId, node: NodeId) -> GraphResult<bool> {
        Ok(self.universe(universe)?.contains(node))
    }

    pub fn node_universes(&self, node: NodeId) -> GraphResult<&[UniverseId]> {
        Ok(self.node(node)?.universes())
    }

    // === Neighbor cache ===

    pub(crate) fn cached_neighbors(&self, node: NodeId, key: &CacheKey) -> Option<Vec<NodeId>> {
        self.nodes.get(node.0)?.cache.borrow_mut().get(key)
    }

    pub(crate) fn store_neighbors(&self, node: NodeId, key: CacheKey, answer: &[NodeId]) {
        if let Some(record) = self.nodes.get(node.0) {
            record.cache.borrow_mut().insert(key, answer.to_vec());
        }
    }

    fn invalidate(&self, node: NodeId) {
        if !self.config.neighbor_caching {
            return;
        }
        self.nodes[node.0].cache.borrow_mut().invalidate();
    }

    /// Invalidate every present endpoint of `edge`, whose answers name each other
    fn invalidate_ends(&self, edge: EdgeId) {
        if !self.config.neighbor_caching {
            return;
        }
        let Ok(record) = self.edge(edge) else {
            return;
        };
        for node in record.endpoints() {
            self.nodes[node.0].cache.borrow_mut().invalidate();
        }
    }

    pub fn cache_stats(&self, node: NodeId) -> GraphResult<CacheStats> {
        Ok(self.node(node)?.cache.borrow().stats())
    }

    pub fn cache_report(&self) -> CacheReport {
        let mut totals = CacheStats::default();
        let mut entries = 0;
        for node in &self.nodes {
            let cache = node.cache.borrow();
            totals += cache.stats();
            entries += cache.len();
        }
        CacheReport {
            enabled: self.config.neighbor_caching,
            nodes: self.nodes.len(),
            entries,
            totals,
        }
    }
}
