//! Line-per-node text rendering

use crate::graph::{Graph, GraphResult, NodeId, UniverseId};
use crate::query::{neighbors, NeighborOptions};
use std::fmt;
use std::rc::Rc;

type NodeText = dyn Fn(&Graph, NodeId) -> String;

/// How [`basic_render`] labels and orders nodes
#[derive(Clone, Default)]
pub struct RenderOptions {
    label: Option<Rc<NodeText>>,
    sort_key: Option<Rc<NodeText>>,
    /// Neighbor resolution used for each line
    pub neighbors: NeighborOptions,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render each node with `label` instead of its handle
    pub fn label(mut self, label: impl Fn(&Graph, NodeId) -> String + 'static) -> Self {
        self.label = Some(Rc::new(label));
        self
    }

    /// Order members and their neighbors by `key`
    pub fn sort_by(mut self, key: impl Fn(&Graph, NodeId) -> String + 'static) -> Self {
        self.sort_key = Some(Rc::new(key));
        self
    }

    pub fn neighbors(mut self, options: NeighborOptions) -> Self {
        self.neighbors = options;
        self
    }

    fn text(&self, graph: &Graph, node: NodeId) -> String {
        match &self.label {
            Some(label) => label(graph, node),
            None => node.to_string(),
        }
    }

    fn order(&self, graph: &Graph, nodes: &mut [NodeId]) {
        if let Some(key) = &self.sort_key {
            nodes.sort_by_cached_key(|&n| key(graph, n));
        }
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("label", &self.label.is_some())
            .field("sort_key", &self.sort_key.is_some())
            .field("neighbors", &self.neighbors)
            .finish()
    }
}

/// Render each member of `universe` as `node -> neighbor, neighbor`
///
/// Members appear in insertion order unless a sort key is given. This is a
/// listing, not a traversal: every member gets exactly one line. A member
/// without neighbors renders as `node ->`. Returns `Ok(None)` for an empty
/// universe.
pub fn basic_render(graph: &Graph, universe: UniverseId, options: &RenderOptions) -> GraphResult<Option<String>> {
    let mut members = graph.members(universe)?.to_vec();
    if members.is_empty() {
        return Ok(None);
    }
    options.order(graph, &mut members);

    let mut lines = Vec::with_capacity(members.len());
    for node in members {
        let mut ends = neighbors(graph, node, &options.neighbors)?;
        options.order(graph, &mut ends);
        let ends: Vec<String> = ends.into_iter().map(|n| options.text(graph, n)).collect();

        let head = options.text(graph, node);
        if ends.is_empty() {
            lines.push(format!("{} ->", head));
        } else {
            lines.push(format!("{} -> {}", head, ends.join(", ")));
        }
    }
    Ok(Some(lines.join("\n")))
}
