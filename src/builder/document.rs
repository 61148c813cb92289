//! Graph documents: a serde description of named nodes and edges
//!
//! ```yaml
//! nodes:
//!   - name: a
//!     attributes: { label: start }
//!   - name: b
//! edges:
//!   - { from: a, to: b, weight: 2.5 }
//!   - { from: b, to: a, kind: undirected }
//! ```

use crate::config::GraphConfig;
use crate::graph::{
    AttributeValue, Attributes, EdgeKind, Graph, GraphError, GraphResult, NodeId, NodeRegistry,
    UniverseId, UniverseLaws,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Attribute holding a node's document name
pub const NAME_ATTRIBUTE: &str = "name";
/// Attribute holding an edge's document weight
pub const WEIGHT_ATTRIBUTE: &str = "weight";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub kind: DocumentEdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Edge kinds a document may request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentEdgeKind {
    #[default]
    Directed,
    Undirected,
}

impl From<DocumentEdgeKind> for EdgeKind {
    fn from(kind: DocumentEdgeKind) -> Self {
        match kind {
            DocumentEdgeKind::Directed => EdgeKind::Directed,
            DocumentEdgeKind::Undirected => EdgeKind::Undirected,
        }
    }
}

/// A graph built from a document, with its name index
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: Graph,
    /// Universe holding every document node, in document order
    pub universe: UniverseId,
    pub names: NodeRegistry<String>,
}

impl LoadedGraph {
    /// Look up a node by its document name
    pub fn node(&self, name: &str) -> GraphResult<NodeId> {
        self.names
            .get(&name.to_string())
            .ok_or_else(|| GraphError::MalformedInput(format!("unknown node '{}'", name)))
    }

    /// Document name of a node, if it has one
    pub fn name_of(&self, node: NodeId) -> Option<&str> {
        self.graph
            .node(node)
            .ok()?
            .attribute(NAME_ATTRIBUTE)
            .and_then(AttributeValue::as_str)
    }
}

impl GraphDocument {
    pub fn from_yaml_str(source: &str) -> GraphResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read a document, choosing the format from the file extension
    ///
    /// `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let document = if is_json {
            Self::from_json_str(&source)?
        } else {
            Self::from_yaml_str(&source)?
        };
        tracing::debug!(
            path = %path.display(),
            nodes = document.nodes.len(),
            edges = document.edges.len(),
            "graph document loaded"
        );
        Ok(document)
    }

    /// Build a fresh graph holding this document
    ///
    /// Node names must be unique and every edge must name existing nodes.
    pub fn build(&self, config: GraphConfig) -> GraphResult<LoadedGraph> {
        let mut graph = Graph::with_config(config);
        let universe = graph.add_universe(UniverseLaws::default());
        let mut names: NodeRegistry<String> = NodeRegistry::new();

        for spec in &self.nodes {
            if names.get(&spec.name).is_some() {
                return Err(GraphError::MalformedInput(format!(
                    "duplicate node '{}'",
                    spec.name
                )));
            }
            let mut attributes = spec.attributes.clone();
            attributes.insert(NAME_ATTRIBUTE.to_string(), spec.name.as_str().into());
            names.get_or_create(&mut graph, spec.name.clone(), |g| g.add_member(universe, attributes))?;
        }

        for spec in &self.edges {
            let lookup = |name: &str| {
                names
                    .get(&name.to_string())
                    .ok_or_else(|| GraphError::MalformedInput(format!("edge names unknown node '{}'", name)))
            };
            let from = lookup(&spec.from)?;
            let to = lookup(&spec.to)?;
            let edge = graph.add_edge(spec.kind.into(), &[from, to], false)?;
            if let Some(weight) = spec.weight {
                graph.edge_mut(edge)?.set_attribute(WEIGHT_ATTRIBUTE, weight);
            }
        }

        Ok(LoadedGraph {
            graph,
            universe,
            names,
        })
    }
}
