//! Adjacency list and matrix loaders

use crate::graph::{EdgeKind, Graph, GraphError, GraphResult, NodeId, UniverseId, UniverseLaws};

/// Link each node to the nodes listed after it
///
/// Every node named anywhere in the list becomes a member of a new universe,
/// in the order first seen.
pub fn load_adjacency_list(
    graph: &mut Graph,
    adjacency: &[(NodeId, Vec<NodeId>)],
    kind: EdgeKind,
) -> GraphResult<UniverseId> {
    let universe = graph.add_universe(UniverseLaws::default());
    for (node, targets) in adjacency {
        graph.add_to_universe(universe, *node)?;
        for &target in targets {
            graph.add_to_universe(universe, target)?;
            graph.add_edge(kind.clone(), &[*node, target], false)?;
        }
    }
    tracing::debug!(universe = %universe, rows = adjacency.len(), %kind, "adjacency list loaded");
    Ok(universe)
}

/// Link `nodes[i]` to `nodes[j]` wherever `matrix[i][j]` is non-zero
///
/// The matrix must be square with one row per node.
pub fn load_adjacency_matrix(
    graph: &mut Graph,
    nodes: &[NodeId],
    matrix: &[Vec<u32>],
    kind: EdgeKind,
) -> GraphResult<UniverseId> {
    if matrix.len() != nodes.len() {
        return Err(GraphError::MalformedInput(format!(
            "matrix has {} rows for {} nodes",
            matrix.len(),
            nodes.len()
        )));
    }
    if let Some((i, row)) = matrix.iter().enumerate().find(|(_, row)| row.len() != matrix.len()) {
        return Err(GraphError::MalformedInput(format!(
            "matrix is not square: row {} has {} columns, expected {}",
            i,
            row.len(),
            matrix.len()
        )));
    }

    let universe = graph.add_universe(UniverseLaws::default());
    for &node in nodes {
        graph.add_to_universe(universe, node)?;
    }
    for (i, row) in matrix.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            if cell != 0 {
                graph.add_edge(kind.clone(), &[nodes[i], nodes[j]], false)?;
            }
        }
    }
    tracing::debug!(universe = %universe, size = nodes.len(), %kind, "adjacency matrix loaded");
    Ok(universe)
}
