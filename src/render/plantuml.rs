//! PlantUML object-diagram source for a universe
//!
//! Members become `object` blocks listing their attributes and two-ended
//! edges between members become links (`-->` directed, `--` undirected).
//! Only the source text is produced; turning it into an image is left to a
//! PlantUML installation.

use crate::graph::{EdgeKind, Graph, GraphResult, NodeId, UniverseId};
use std::collections::HashSet;
use std::fmt::{self, Write};
use std::rc::Rc;

type NodeText = dyn Fn(&Graph, NodeId) -> String;

/// Diagram-wide and per-object settings for [`render_plantuml`]
#[derive(Clone)]
pub struct PlantUmlOptions {
    /// `skinparam <key> <value>` lines for the whole diagram
    pub skinparams: Vec<(String, String)>,
    /// PlantUML element used for nodes
    pub object_type: String,
    /// Stereotype attached to every node
    pub stereotype: String,
    /// Skinparams scoped to the stereotype, e.g. `BackgroundColor<<Node>> White`
    pub stereotype_skinparams: Vec<(String, String)>,
    /// Attribute keys listed as fields; `None` lists every attribute
    pub show_attributes: Option<Vec<String>>,
    title: Option<Rc<NodeText>>,
}

impl Default for PlantUmlOptions {
    fn default() -> Self {
        let pairs = |items: &[(&str, &str)]| -> Vec<(String, String)> {
            items
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        Self {
            skinparams: pairs(&[("dpi", "300")]),
            object_type: "object".to_string(),
            stereotype: "Node".to_string(),
            stereotype_skinparams: pairs(&[
                ("BackgroundColor", "White"),
                ("FontColor", "Black"),
                ("StereotypeFontColor", "Black"),
            ]),
            show_attributes: None,
            title: None,
        }
    }
}

impl PlantUmlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name each object with `title` instead of `n<index>`
    ///
    /// Titles must be valid PlantUML identifiers and unique per diagram.
    pub fn title(mut self, title: impl Fn(&Graph, NodeId) -> String + 'static) -> Self {
        self.title = Some(Rc::new(title));
        self
    }

    pub fn show_attributes<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.show_attributes = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn skinparam(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.skinparams.push((key.into(), value.into()));
        self
    }

    fn title_of(&self, graph: &Graph, node: NodeId) -> String {
        match &self.title {
            Some(title) => title(graph, node),
            None => format!("n{}", node.index()),
        }
    }

    fn shows(&self, key: &str) -> bool {
        match &self.show_attributes {
            Some(keys) => keys.iter().any(|k| k == key),
            None => true,
        }
    }
}

impl fmt::Debug for PlantUmlOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlantUmlOptions")
            .field("skinparams", &self.skinparams)
            .field("object_type", &self.object_type)
            .field("stereotype", &self.stereotype)
            .field("stereotype_skinparams", &self.stereotype_skinparams)
            .field("show_attributes", &self.show_attributes)
            .field("title", &self.title.is_some())
            .finish()
    }
}

/// Render `universe` as PlantUML object-diagram source
///
/// Objects appear in member order and links in the order they are first met
/// walking members' incident edges. Edges leaving the universe, edges with
/// an empty end, and base or custom edges are not drawn. Returns `Ok(None)`
/// for an empty universe.
pub fn render_plantuml(
    graph: &Graph,
    universe: UniverseId,
    options: &PlantUmlOptions,
) -> GraphResult<Option<String>> {
    let uni = graph.universe(universe)?;
    if uni.is_empty() {
        return Ok(None);
    }

    let mut out = String::from("@startuml\n");
    for (key, value) in &options.skinparams {
        let _ = writeln!(out, "skinparam {} {}", key, value);
    }
    if !options.stereotype_skinparams.is_empty() {
        out.push_str("skinparam object {\n");
        for (key, value) in &options.stereotype_skinparams {
            let _ = writeln!(out, "    {}<<{}>> {}", key, options.stereotype, value);
        }
        out.push_str("}\n");
    }
    let _ = writeln!(
        out,
        "note as generated\n    PlantUML source generated by\n    graphweave {}\nend note",
        crate::VERSION
    );

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for &member in uni.members() {
        let node = graph.node(member)?;
        let _ = writeln!(
            out,
            "{} {} <<{}>> {{",
            options.object_type,
            options.title_of(graph, member),
            options.stereotype
        );
        for (key, value) in node.attributes() {
            if options.shows(key) {
                let _ = writeln!(out, "    {{field}} {} = {}", key, value);
            }
        }
        out.push_str("}\n");

        for &edge_id in node.edges() {
            if !seen.insert(edge_id) {
                continue;
            }
            let edge = graph.edge(edge_id)?;
            let arrow = match edge.kind() {
                EdgeKind::Directed => "-->",
                EdgeKind::Undirected => "--",
                _ => continue,
            };
            if let (Some(v1), Some(v2)) = (edge.v1(), edge.v2()) {
                if uni.contains(v1) && uni.contains(v2) {
                    links.push(format!(
                        "{} {} {}",
                        options.title_of(graph, v1),
                        arrow,
                        options.title_of(graph, v2)
                    ));
                }
            }
        }
    }
    for link in links {
        out.push_str(&link);
        out.push('\n');
    }
    out.push_str("@enduml\n");

    tracing::debug!(universe = %universe, members = uni.len(), "rendered PlantUML source");
    Ok(Some(out))
}
