//! Shared graph fixtures for integration tests

#![allow(dead_code)]

use graphweave::builder::link_directed;
use graphweave::{
    AttributeValue, Attributes, Graph, GraphConfig, NodeId, UniverseId, UniverseLaws,
};

/// A graph whose nodes carry an integer `i` attribute equal to their index
pub struct Fixture {
    pub graph: Graph,
    pub universe: UniverseId,
    pub nodes: Vec<NodeId>,
}

impl Fixture {
    /// Index of a node in `nodes`
    pub fn index_of(&self, node: NodeId) -> usize {
        self.nodes
            .iter()
            .position(|&n| n == node)
            .expect("node belongs to fixture")
    }

    /// Map a node sequence back to fixture indices
    pub fn indices(&self, nodes: &[NodeId]) -> Vec<usize> {
        nodes.iter().map(|&n| self.index_of(n)).collect()
    }
}

fn indexed_members(graph: &mut Graph, universe: UniverseId, count: usize) -> Vec<NodeId> {
    (0..count)
        .map(|i| {
            let attrs = Attributes::from([("i".to_string(), AttributeValue::Int(i as i64))]);
            graph.add_member(universe, attrs).unwrap()
        })
        .collect()
}

/// Edges of the ten-node reference graph, CLRS figure 22.6 without `5 -> 6`
pub const REFERENCE_EDGES: [(usize, usize); 13] = [
    (0, 2),
    (0, 3),
    (0, 6),
    (1, 4),
    (1, 8),
    (2, 5),
    (3, 7),
    (3, 8),
    (4, 8),
    (6, 2),
    (7, 9),
    (8, 0),
    (9, 7),
];

fn directed_fixture(config: GraphConfig, edges: &[(usize, usize)]) -> Fixture {
    let mut graph = Graph::with_config(config);
    let universe = graph.add_universe(UniverseLaws::default());
    let nodes = indexed_members(&mut graph, universe, 10);
    for &(a, b) in edges {
        link_directed(&mut graph, nodes[a], nodes[b]).unwrap();
    }
    Fixture {
        graph,
        universe,
        nodes,
    }
}

/// The reference graph exactly as listed in [`REFERENCE_EDGES`]
pub fn reference_graph(config: GraphConfig) -> Fixture {
    directed_fixture(config, &REFERENCE_EDGES)
}

/// Directed graph from CLRS (3rd ed.) figure 22.6
///
/// ```text
/// 0 -> 2, 3, 6     1 -> 4, 8     2 -> 5     3 -> 7, 8     4 -> 8
/// 5 -> 6           6 -> 2        7 -> 9     8 -> 0        9 -> 7
/// ```
pub fn clrs_22_6(config: GraphConfig) -> Fixture {
    let mut edges = REFERENCE_EDGES.to_vec();
    edges.push((5, 6));
    directed_fixture(config, &edges)
}

fn weighted_chain(weights: [f64; 5], bypass: f64) -> Fixture {
    let mut graph = Graph::new();
    let universe = graph.add_universe(UniverseLaws::default());
    let nodes = indexed_members(&mut graph, universe, 6);
    for (i, weight) in weights.into_iter().enumerate() {
        let e = link_directed(&mut graph, nodes[i], nodes[i + 1]).unwrap();
        graph.edge_mut(e).unwrap().set_attribute("weight", weight);
    }
    let e = link_directed(&mut graph, nodes[0], nodes[5]).unwrap();
    graph.edge_mut(e).unwrap().set_attribute("weight", bypass);
    Fixture {
        graph,
        universe,
        nodes,
    }
}

/// Chain 0 -> 1 -> ... -> 5 of unit weights plus a 0 -> 5 bypass of weight 4
pub fn cheapest_is_shortest() -> Fixture {
    weighted_chain([1.0; 5], 4.0)
}

/// Chain 0 -> 1 -> ... -> 5 weighted 1..5 plus a 0 -> 5 bypass of weight 20
pub fn cheapest_is_longest() -> Fixture {
    weighted_chain([1.0, 2.0, 3.0, 4.0, 5.0], 20.0)
}
