//! Depth-first traversal and search, recursive and iterative
//!
//! The two forms visit children in opposite orders: the recursive form
//! descends in incidence order, while the iterative form pushes children on
//! a stack and so pops them in reverse. Both are deterministic for a given
//! graph and mutation history.

use super::neighbors::neighbors;
use super::scope::{attribute_matches, Scope};
use super::types::NeighborOptions;
use crate::graph::{AttributeValue, Graph, GraphResult, NodeId, UniverseId};
use std::collections::HashSet;

/// Recursive depth-first traversal from `start`
///
/// Children are descended into in incidence order, each as soon as it is
/// reached. The walk keeps its own frame stack, so arbitrarily deep graphs
/// are safe. Returns `Ok(None)` when the universe has no members.
pub fn dft_recursive(
    graph: &Graph,
    universe: Option<UniverseId>,
    start: NodeId,
    options: &NeighborOptions,
) -> GraphResult<Option<Vec<NodeId>>> {
    let Some(scope) = Scope::enter(graph, universe, start)? else {
        return Ok(None);
    };
    let mut walk = Walk::new(graph, scope, options);
    let mut order = Vec::new();
    walk.traverse(start, &mut order)?;
    tracing::debug!(start = %start, visited = order.len(), "recursive depth-first traversal complete");
    Ok(Some(order))
}

/// Recursive depth-first search for a node whose `key` attribute equals `value`
///
/// The start node is checked first.
pub fn dfs_recursive(
    graph: &Graph,
    universe: Option<UniverseId>,
    start: NodeId,
    key: &str,
    value: &AttributeValue,
    options: &NeighborOptions,
) -> GraphResult<Option<NodeId>> {
    let Some(scope) = Scope::enter(graph, universe, start)? else {
        return Ok(None);
    };
    if attribute_matches(graph, start, key, value)? {
        return Ok(Some(start));
    }
    let mut walk = Walk::new(graph, scope, options);
    walk.search(start, key, value)
}

/// Iterative depth-first traversal from `start`
///
/// Returns `Ok(None)` when the universe has no members.
pub fn dft_iterative(
    graph: &Graph,
    universe: Option<UniverseId>,
    start: NodeId,
    options: &NeighborOptions,
) -> GraphResult<Option<Vec<NodeId>>> {
    let Some(scope) = Scope::enter(graph, universe, start)? else {
        return Ok(None);
    };

    let mut discovered = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![start];

    while let Some(v) = stack.pop() {
        if discovered.contains(&v) || !scope.admits(v) {
            continue;
        }
        discovered.insert(v);
        order.push(v);
        stack.extend(neighbors(graph, v, options)?);
    }

    tracing::debug!(start = %start, visited = order.len(), "iterative depth-first traversal complete");
    Ok(Some(order))
}

/// Iterative depth-first search for a node whose `key` attribute equals `value`
///
/// Nodes outside the universe or already discovered are skipped before
/// matching, so each node is checked at most once.
pub fn dfs_iterative(
    graph: &Graph,
    universe: Option<UniverseId>,
    start: NodeId,
    key: &str,
    value: &AttributeValue,
    options: &NeighborOptions,
) -> GraphResult<Option<NodeId>> {
    let Some(scope) = Scope::enter(graph, universe, start)? else {
        return Ok(None);
    };

    let mut discovered = HashSet::new();
    let mut stack = vec![start];

    while let Some(v) = stack.pop() {
        if !scope.admits(v) || !discovered.insert(v) {
            continue;
        }
        if attribute_matches(graph, v, key, value)? {
            tracing::debug!(start = %start, found = %v, "iterative depth-first search hit");
            return Ok(Some(v));
        }
        stack.extend(neighbors(graph, v, options)?);
    }
    Ok(None)
}

/// Recursive-order depth-first walk
///
/// Each frame holds a node's neighbor list, resolved on entry, and the index
/// of the next child to try, exactly as a call to the recursive form would.
/// Frames live on the heap so depth is bounded by memory rather than the
/// thread stack.
struct Walk<'a> {
    graph: &'a Graph,
    scope: Scope<'a>,
    options: &'a NeighborOptions,
    visited: HashSet<NodeId>,
    frames: Vec<(Vec<NodeId>, usize)>,
}

impl<'a> Walk<'a> {
    fn new(graph: &'a Graph, scope: Scope<'a>, options: &'a NeighborOptions) -> Self {
        Self {
            graph,
            scope,
            options,
            visited: HashSet::new(),
            frames: Vec::new(),
        }
    }

    fn enter(&mut self, v: NodeId) -> GraphResult<()> {
        self.visited.insert(v);
        let children = neighbors(self.graph, v, self.options)?;
        self.frames.push((children, 0));
        Ok(())
    }

    /// Next admissible, unvisited child of the innermost frame, unwinding
    /// finished frames; `None` once the walk is complete
    fn next_child(&mut self) -> Option<NodeId> {
        while let Some((children, next)) = self.frames.last_mut() {
            match children.get(*next).copied() {
                Some(w) => {
                    *next += 1;
                    if self.scope.admits(w) && !self.visited.contains(&w) {
                        return Some(w);
                    }
                }
                None => {
                    self.frames.pop();
                }
            }
        }
        None
    }

    fn traverse(&mut self, start: NodeId, order: &mut Vec<NodeId>) -> GraphResult<()> {
        order.push(start);
        self.enter(start)?;
        while let Some(w) = self.next_child() {
            order.push(w);
            self.enter(w)?;
        }
        Ok(())
    }

    fn search(&mut self, start: NodeId, key: &str, value: &AttributeValue) -> GraphResult<Option<NodeId>> {
        self.enter(start)?;
        while let Some(w) = self.next_child() {
            if attribute_matches(self.graph, w, key, value)? {
                return Ok(Some(w));
            }
            self.enter(w)?;
        }
        Ok(None)
    }
}
