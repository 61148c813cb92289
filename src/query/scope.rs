//! Universe scoping shared by traversals and path queries

use crate::graph::{AttributeValue, Graph, GraphError, GraphResult, NodeId, Universe, UniverseId};

/// The universe a query is confined to, if any
///
/// Membership is checked lazily as nodes are reached, never by pre-filtering
/// neighbor lists.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope<'g> {
    universe: Option<&'g Universe>,
}

impl<'g> Scope<'g> {
    /// Resolve the scope for a traversal starting at `start`
    ///
    /// Returns `None` when the universe has no members.
    pub(crate) fn enter(
        graph: &'g Graph,
        universe: Option<UniverseId>,
        start: NodeId,
    ) -> GraphResult<Option<Self>> {
        if let Some(id) = universe {
            if graph.universe(id)?.is_empty() {
                return Ok(None);
            }
        }
        Self::confine(graph, universe, start).map(Some)
    }

    /// Resolve the scope for a query starting at `start`, which must be a
    /// member of `universe` when one is given
    pub(crate) fn confine(graph: &'g Graph, universe: Option<UniverseId>, start: NodeId) -> GraphResult<Self> {
        graph.node(start)?;
        let Some(id) = universe else {
            return Ok(Self { universe: None });
        };
        let record = graph.universe(id)?;
        if !record.contains(start) {
            return Err(GraphError::StartNotInContainer {
                node: start,
                universe: id,
            });
        }
        Ok(Self {
            universe: Some(record),
        })
    }

    pub(crate) fn admits(&self, node: NodeId) -> bool {
        self.universe.map_or(true, |u| u.contains(node))
    }
}

/// Whether `node` carries `key` with exactly `value`
pub(crate) fn attribute_matches(
    graph: &Graph,
    node: NodeId,
    key: &str,
    value: &AttributeValue,
) -> GraphResult<bool> {
    Ok(graph.node(node)?.attribute(key) == Some(value))
}
