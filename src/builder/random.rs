//! Random graph generation

use crate::graph::{AttributeValue, Attributes, EdgeKind, Graph, GraphError, GraphResult, NodeId, UniverseId, UniverseLaws};
use rand::seq::SliceRandom;
use rand::Rng;

/// Parameters for [`random_graph`]
#[derive(Debug, Clone)]
pub struct RandomGraphOptions {
    /// Number of nodes to create
    pub count: usize,
    /// Probability that any given pair of nodes is linked, in `[0, 1]`
    pub connectivity: f64,
    pub kind: EdgeKind,
    /// Give every node at least one edge when `count > 1`
    pub ensure_link: bool,
}

impl Default for RandomGraphOptions {
    fn default() -> Self {
        Self {
            count: 10,
            connectivity: 0.5,
            kind: EdgeKind::Directed,
            ensure_link: false,
        }
    }
}

/// Generate a random graph in a new universe
///
/// Directed kinds consider every ordered pair, other kinds every unordered
/// pair. Nodes get an integer `i` attribute holding their creation index.
/// The result is fully determined by the state of `rng`.
pub fn random_graph<R: Rng>(
    graph: &mut Graph,
    rng: &mut R,
    options: &RandomGraphOptions,
) -> GraphResult<UniverseId> {
    if !(0.0..=1.0).contains(&options.connectivity) {
        return Err(GraphError::MalformedInput(format!(
            "connectivity must be within [0, 1], got {}",
            options.connectivity
        )));
    }

    let universe = graph.add_universe(UniverseLaws::default());
    let mut nodes: Vec<NodeId> = Vec::with_capacity(options.count);
    for i in 0..options.count {
        let attributes = Attributes::from([("i".to_string(), AttributeValue::Int(i as i64))]);
        nodes.push(graph.add_member(universe, attributes)?);
    }

    let directed = options.kind == EdgeKind::Directed;
    for (i, &a) in nodes.iter().enumerate() {
        for (j, &b) in nodes.iter().enumerate() {
            let candidate = if directed { i != j } else { i < j };
            if candidate && rng.gen_bool(options.connectivity) {
                graph.add_edge(options.kind.clone(), &[a, b], false)?;
            }
        }
    }

    if options.ensure_link && nodes.len() > 1 {
        for &a in &nodes {
            if !graph.node(a)?.edges().is_empty() {
                continue;
            }
            let others: Vec<NodeId> = nodes.iter().copied().filter(|&b| b != a).collect();
            if let Some(&b) = others.choose(rng) {
                graph.add_edge(options.kind.clone(), &[a, b], false)?;
            }
        }
    }

    tracing::debug!(
        universe = %universe,
        nodes = nodes.len(),
        edges = graph.edge_count(),
        "random graph generated"
    );
    Ok(universe)
}
