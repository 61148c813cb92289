//! Pairwise linking of existing nodes

use crate::graph::{EdgeId, EdgeKind, Graph, GraphResult, NodeId};
use crate::query::find_edges;

/// Create an edge of `kind` from `a` to `b`
pub fn link_from_to(graph: &mut Graph, a: NodeId, kind: EdgeKind, b: NodeId) -> GraphResult<EdgeId> {
    graph.add_edge(kind, &[a, b], false)
}

/// Create a directed edge `a --> b`
pub fn link_directed(graph: &mut Graph, a: NodeId, b: NodeId) -> GraphResult<EdgeId> {
    graph.add_directed_edge(Some(a), Some(b))
}

/// Create an undirected edge `a -- b`
pub fn link_undirected(graph: &mut Graph, a: NodeId, b: NodeId) -> GraphResult<EdgeId> {
    graph.add_undirected_edge(Some(a), Some(b))
}

/// Dissolve every edge joining `a` and `b`, in either direction
///
/// Returns the dissolved handles in `a`'s incidence order.
pub fn unlink(graph: &mut Graph, a: NodeId, b: NodeId) -> GraphResult<Vec<EdgeId>> {
    let edges = find_edges(graph, a, b)?;
    for &edge in &edges {
        graph.dissolve_edge(edge)?;
    }
    tracing::debug!(a = %a, b = %b, removed = edges.len(), "nodes unlinked");
    Ok(edges)
}
