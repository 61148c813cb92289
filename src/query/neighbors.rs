//! Direction-sensitive neighbor resolution

use super::types::{Direction, NeighborOptions, UnknownEdgePolicy};
use crate::graph::{EdgeId, EdgeKind, Graph, GraphError, GraphResult, NodeId};

/// Nodes reachable from `node` in one step under `options`
///
/// Candidates are produced in incidence order. Duplicates are kept: two
/// parallel edges to the same partner yield the partner twice.
///
/// When neighbor caching is on, answers are memoized per node and argument
/// tuple and reused until a mutation touches the node.
pub fn neighbors(graph: &Graph, node: NodeId, options: &NeighborOptions) -> GraphResult<Vec<NodeId>> {
    let caching = graph.config().neighbor_caching;
    let key = options.cache_key();
    if caching {
        if let Some(answer) = graph.cached_neighbors(node, &key) {
            return Ok(answer);
        }
    }

    let answer = resolve(graph, node, options)?;

    if caching {
        graph.store_neighbors(node, key, &answer);
    }
    Ok(answer)
}

fn resolve(graph: &Graph, node: NodeId, options: &NeighborOptions) -> GraphResult<Vec<NodeId>> {
    let mut out = Vec::new();
    for &edge_id in graph.node(node)?.edges() {
        let edge = graph.edge(edge_id)?;
        let candidates = match (edge.kind(), options.direction) {
            (EdgeKind::Undirected, _) | (EdgeKind::Directed, Direction::Any) => {
                edge.other(node).into_iter().collect()
            }
            (EdgeKind::Directed, Direction::Forward) => {
                if edge.v1() == Some(node) {
                    edge.v2().into_iter().collect()
                } else {
                    Vec::new()
                }
            }
            (EdgeKind::Directed, Direction::Backward) => {
                if edge.v2() == Some(node) {
                    edge.v1().into_iter().collect()
                } else {
                    Vec::new()
                }
            }
            (_, Direction::Any) => edge.others(node),
            (kind, _) => match options.unknown_edges {
                UnknownEdgePolicy::TreatAsNeighbor => edge.others(node),
                UnknownEdgePolicy::TreatAsNonNeighbor => Vec::new(),
                UnknownEdgePolicy::Error => {
                    return Err(GraphError::UnsupportedEdgeKind {
                        edge: edge_id,
                        kind: kind.clone(),
                    })
                }
            },
        };
        push_accepted(graph, edge_id, candidates, options, &mut out);
    }
    Ok(out)
}

fn push_accepted(
    graph: &Graph,
    edge: EdgeId,
    candidates: Vec<NodeId>,
    options: &NeighborOptions,
    out: &mut Vec<NodeId>,
) {
    match &options.filter {
        None => out.extend(candidates),
        Some(filter) => out.extend(
            candidates
                .into_iter()
                .filter(|&candidate| filter.accepts(graph, edge, candidate)),
        ),
    }
}

/// Every edge incident to `a` that also has `b` as an endpoint
///
/// With `a == b` only self-loops match: edges naming `a` at least twice.
pub fn find_edges(graph: &Graph, a: NodeId, b: NodeId) -> GraphResult<Vec<EdgeId>> {
    let mut found = Vec::new();
    for &edge in graph.node(a)?.edges() {
        let record = graph.edge(edge)?;
        let joins = if a == b {
            record.endpoints().iter().filter(|&&n| n == a).count() >= 2
        } else {
            record.has_endpoint(b)
        };
        if joins {
            found.push(edge);
        }
    }
    Ok(found)
}
