//! Query types and result structures

use crate::graph::{CacheKey, EdgeId, Graph, NodeId};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Direction policy for neighbor resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Follow directed edges from origin to destination
    #[default]
    Forward,
    /// Follow directed edges from destination back to origin
    Backward,
    /// Treat every edge as undirected
    Any,
}

/// What to do with edges that are neither directed nor undirected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnknownEdgePolicy {
    TreatAsNeighbor,
    TreatAsNonNeighbor,
    /// Fail with `UnsupportedEdgeKind`
    #[default]
    Error,
}

type FilterFn = dyn Fn(&Graph, EdgeId, NodeId) -> bool;

static NEXT_FILTER_ID: AtomicU64 = AtomicU64::new(0);

/// Caller predicate deciding whether a candidate neighbor is kept
///
/// Called with the edge being followed and the candidate node. Each filter
/// gets a unique id at construction which clones share; cached neighbor
/// answers are keyed by that id.
#[derive(Clone)]
pub struct NeighborFilter {
    id: u64,
    predicate: Rc<FilterFn>,
}

impl NeighborFilter {
    pub fn new(predicate: impl Fn(&Graph, EdgeId, NodeId) -> bool + 'static) -> Self {
        Self {
            id: NEXT_FILTER_ID.fetch_add(1, Ordering::Relaxed),
            predicate: Rc::new(predicate),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn accepts(&self, graph: &Graph, edge: EdgeId, node: NodeId) -> bool {
        (self.predicate)(graph, edge, node)
    }
}

impl fmt::Debug for NeighborFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NeighborFilter").field("id", &self.id).finish()
    }
}

/// Arguments of a neighbor resolution, shared by traversals and path queries
#[derive(Debug, Clone, Default)]
pub struct NeighborOptions {
    pub direction: Direction,
    pub unknown_edges: UnknownEdgePolicy,
    pub filter: Option<NeighborFilter>,
}

impl NeighborOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn unknown_edges(mut self, policy: UnknownEdgePolicy) -> Self {
        self.unknown_edges = policy;
        self
    }

    pub fn filter(mut self, filter: NeighborFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub(crate) fn cache_key(&self) -> CacheKey {
        CacheKey {
            direction: self.direction,
            unknown_edges: self.unknown_edges,
            filter: self.filter.as_ref().map(NeighborFilter::id),
        }
    }
}

/// Result of a path query
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Whether a path was found
    pub found: bool,
    /// Nodes from start to destination (inclusive)
    pub path: Vec<NodeId>,
    /// Summed edge weight along the path
    pub distance: Option<f64>,
    /// Number of hops
    pub length: usize,
}

impl PathResult {
    pub fn not_found() -> Self {
        Self {
            found: false,
            path: Vec::new(),
            distance: None,
            length: 0,
        }
    }

    pub fn found(path: Vec<NodeId>, distance: f64) -> Self {
        let length = path.len().saturating_sub(1);
        Self {
            found: true,
            path,
            distance: Some(distance),
            length,
        }
    }

    /// `(path, distance)`, both `None` when no path exists
    pub fn into_parts(self) -> (Option<Vec<NodeId>>, Option<f64>) {
        if self.found {
            (Some(self.path), self.distance)
        } else {
            (None, None)
        }
    }
}
