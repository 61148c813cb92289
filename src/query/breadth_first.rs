//! Breadth-first traversal and search

use super::neighbors::neighbors;
use super::scope::{attribute_matches, Scope};
use super::types::NeighborOptions;
use crate::graph::{AttributeValue, Graph, GraphResult, NodeId, UniverseId};
use std::collections::{HashSet, VecDeque};

/// Visit every node reachable from `start`, nearest first
///
/// Neighbors are expanded in incidence order and each node is visited once.
/// With a universe, nodes outside it are skipped as they are reached.
/// Returns `Ok(None)` when the universe has no members.
pub fn bft(
    graph: &Graph,
    universe: Option<UniverseId>,
    start: NodeId,
    options: &NeighborOptions,
) -> GraphResult<Option<Vec<NodeId>>> {
    let Some(scope) = Scope::enter(graph, universe, start)? else {
        return Ok(None);
    };

    let mut visited: HashSet<NodeId> = HashSet::from([start]);
    let mut order = vec![start];
    let mut queue = VecDeque::from([start]);

    while let Some(u) = queue.pop_front() {
        for v in neighbors(graph, u, options)? {
            if !scope.admits(v) {
                continue;
            }
            if visited.insert(v) {
                order.push(v);
                queue.push_back(v);
            }
        }
    }

    tracing::debug!(start = %start, visited = order.len(), "breadth-first traversal complete");
    Ok(Some(order))
}

/// Find the nearest node whose `key` attribute equals `value`
///
/// The start node is checked first. Returns `Ok(None)` when nothing matches
/// or the universe has no members.
pub fn bfs(
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

    let mut visited: HashSet<NodeId> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(u) = queue.pop_front() {
        for v in neighbors(graph, u, options)? {
            if !scope.admits(v) || !visited.insert(v) {
                continue;
            }
            if attribute_matches(graph, v, key, value)? {
                tracing::debug!(start = %start, found = %v, "breadth-first search hit");
                return Ok(Some(v));
            }
            queue.push_back(v);
        }
    }
    Ok(None)
}
