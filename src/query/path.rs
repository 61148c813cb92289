//! Single-pair shortest path finding

use super::neighbors::neighbors;
use super::scope::Scope;
use super::types::{Direction, NeighborFilter, NeighborOptions, PathResult, UnknownEdgePolicy};
use crate::graph::{AttributeValue, EdgeKind, Graph, GraphError, GraphResult, NodeId, UniverseId};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Cost of stepping from the first node to the second
pub type WeightFn = dyn Fn(&Graph, NodeId, NodeId) -> f64;

/// Algorithm used to answer a [`PathQuery`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMethod {
    #[default]
    Dijkstra,
}

impl FromStr for PathMethod {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dijkstra" => Ok(PathMethod::Dijkstra),
            other => Err(GraphError::UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for PathMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathMethod::Dijkstra => write!(f, "dijkstra"),
        }
    }
}

/// Query for the cheapest path between two nodes
#[derive(Clone)]
pub struct PathQuery {
    /// Start node
    pub start: NodeId,
    /// Destination node
    pub dest: NodeId,
    /// Universe confining the search; `None` searches the whole graph
    pub universe: Option<UniverseId>,
    /// Neighbor resolution arguments, the filter restricting followed edges
    pub options: NeighborOptions,
    pub method: PathMethod,
    weight: Option<Rc<WeightFn>>,
}

impl PathQuery {
    /// Create a new path query between two nodes
    pub fn between(start: NodeId, dest: NodeId) -> Self {
        Self {
            start,
            dest,
            universe: None,
            options: NeighborOptions::default(),
            method: PathMethod::default(),
            weight: None,
        }
    }

    /// Confine the search to members of a universe
    pub fn within(mut self, universe: UniverseId) -> Self {
        self.universe = Some(universe);
        self
    }

    /// Set the step cost function (every step costs 1 by default)
    ///
    /// Negative weights are accepted; negative cycles give undefined results.
    pub fn weight(mut self, weight: impl Fn(&Graph, NodeId, NodeId) -> f64 + 'static) -> Self {
        self.weight = Some(Rc::new(weight));
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.options.direction = direction;
        self
    }

    pub fn unknown_edges(mut self, policy: UnknownEdgePolicy) -> Self {
        self.options.unknown_edges = policy;
        self
    }

    /// Only follow steps the filter accepts
    pub fn via(mut self, filter: NeighborFilter) -> Self {
        self.options.filter = Some(filter);
        self
    }

    pub fn method(mut self, method: PathMethod) -> Self {
        self.method = method;
        self
    }

    /// Execute the path query
    ///
    /// An unreachable destination is not an error: the result reports
    /// `found == false`.
    pub fn execute(&self, graph: &Graph) -> GraphResult<PathResult> {
        let scope = Scope::confine(graph, self.universe, self.start)?;
        graph.node(self.dest)?;

        if self.start == self.dest {
            return Ok(PathResult::found(vec![self.start], 0.0));
        }

        let result = match self.method {
            PathMethod::Dijkstra => self.dijkstra(graph, scope)?,
        };
        tracing::debug!(
            start = %self.start,
            dest = %self.dest,
            method = %self.method,
            found = result.found,
            distance = ?result.distance,
            "shortest path query complete"
        );
        Ok(result)
    }

    fn step_cost(&self, graph: &Graph, u: NodeId, v: NodeId) -> f64 {
        match &self.weight {
            Some(weight) => weight(graph, u, v),
            None => 1.0,
        }
    }

    fn dijkstra(&self, graph: &Graph, scope: Scope<'_>) -> GraphResult<PathResult> {
        let mut dist: HashMap<NodeId, f64> = HashMap::from([(self.start, 0.0)]);
        let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
        let mut settled: HashSet<NodeId> = HashSet::new();
        let mut frontier = Frontier::default();
        frontier.push(0.0, self.start);

        while let Some((d_u, u)) = frontier.pop() {
            if !settled.insert(u) {
                continue;
            }
            if u == self.dest {
                return Ok(PathResult::found(route(&prev, self.start, u), d_u));
            }
            for v in neighbors(graph, u, &self.options)? {
                if settled.contains(&v) || !scope.admits(v) {
                    continue;
                }
                let alt = d_u + self.step_cost(graph, u, v);
                let known = dist.get(&v).copied().unwrap_or(f64::INFINITY);
                if alt < known {
                    dist.insert(v, alt);
                    prev.insert(v, u);
                    frontier.push(alt, v);
                }
            }
        }
        Ok(PathResult::not_found())
    }
}

impl fmt::Debug for PathQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathQuery")
            .field("start", &self.start)
            .field("dest", &self.dest)
            .field("universe", &self.universe)
            .field("options", &self.options)
            .field("method", &self.method)
            .field("weighted", &self.weight.is_some())
            .finish()
    }
}

/// Weight function reading a numeric attribute off the edges joining a step
///
/// Only edges that can be followed from `u` to `v` under `direction` count:
/// directed edges must run `u --> v` going forward and `v --> u` going
/// backward, and either way under [`Direction::Any`]. The cheapest such edge
/// wins; steps whose edges lack the attribute cost 1.
pub fn edge_attribute_weight(
    key: impl Into<String>,
    direction: Direction,
) -> impl Fn(&Graph, NodeId, NodeId) -> f64 {
    let key = key.into();
    move |graph: &Graph, u: NodeId, v: NodeId| {
        let Ok(node) = graph.node(u) else {
            return 1.0;
        };
        node.edges()
            .iter()
            .filter_map(|&e| graph.edge(e).ok())
            .filter(|edge| match (edge.kind(), direction) {
                (EdgeKind::Directed, Direction::Forward) => edge.v1() == Some(u) && edge.v2() == Some(v),
                (EdgeKind::Directed, Direction::Backward) => edge.v1() == Some(v) && edge.v2() == Some(u),
                _ => edge.has_endpoint(v),
            })
            .filter_map(|edge| edge.attribute(&key).and_then(AttributeValue::as_f64))
            .min_by(f64::total_cmp)
            .unwrap_or(1.0)
    }
}

/// Walk predecessors back from `dest`
fn route(prev: &HashMap<NodeId, NodeId>, start: NodeId, dest: NodeId) -> Vec<NodeId> {
    let mut path = vec![dest];
    let mut current = dest;
    while current != start {
        match prev.get(&current) {
            Some(&p) => {
                path.push(p);
                current = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Priority queue entry ordered by distance, then by insertion sequence
#[derive(Debug)]
struct Entry {
    dist: f64,
    seq: u64,
    node: NodeId,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Min-heap of tentative distances with FIFO tie-breaking
#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Frontier {
    fn push(&mut self, dist: f64, node: NodeId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { dist, seq, node }));
    }

    fn pop(&mut self) -> Option<(f64, NodeId)> {
        self.heap.pop().map(|Reverse(entry)| (entry.dist, entry.node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Attributes, UniverseLaws};

    /// A diamond: 0 -> 1 -> 3 and 0 -> 2 -> 3
    fn diamond() -> (Graph, Vec<NodeId>) {
        let mut graph = Graph::new();
        let n: Vec<NodeId> = (0..4).map(|_| graph.add_node(Attributes::new())).collect();
        for (a, b) in [(0, 1), (0, 2), (1, 3), (2, 3)] {
            graph.add_directed_edge(Some(n[a]), Some(n[b])).unwrap();
        }
        (graph, n)
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("dijkstra".parse::<PathMethod>().unwrap(), PathMethod::Dijkstra);
        let err = "bellman-ford".parse::<PathMethod>().unwrap_err();
        assert!(matches!(err, GraphError::UnknownMethod(m) if m == "bellman-ford"));
    }

    #[test]
    fn test_path_same_node() {
        let (graph, n) = diamond();
        let result = PathQuery::between(n[2], n[2]).execute(&graph).unwrap();
        assert!(result.found);
        assert_eq!(result.path, vec![n[2]]);
        assert_eq!(result.distance, Some(0.0));
        assert_eq!(result.length, 0);
    }

    #[test]
    fn test_equal_cost_tie_goes_to_first_discovered() {
        let (graph, n) = diamond();
        let result = PathQuery::between(n[0], n[3]).execute(&graph).unwrap();
        assert_eq!(result.path, vec![n[0], n[1], n[3]]);
        assert_eq!(result.distance, Some(2.0));
    }

    #[test]
    fn test_weights_change_route() {
        let (graph, n) = diamond();
        let heavy = n[1];
        let result = PathQuery::between(n[0], n[3])
            .weight(move |_, u, _| if u == heavy { 10.0 } else { 1.0 })
            .execute(&graph)
            .unwrap();
        assert_eq!(result.path, vec![n[0], n[2], n[3]]);
        assert_eq!(result.distance, Some(2.0));
    }

    #[test]
    fn test_via_filter_blocks_steps() {
        let (graph, n) = diamond();
        let blocked = n[3];
        let result = PathQuery::between(n[0], n[3])
            .via(NeighborFilter::new(move |_, _, node| node != blocked))
            .execute(&graph)
            .unwrap();
        assert!(!result.found);
    }

    #[test]
    fn test_backward_direction() {
        let (graph, n) = diamond();
        assert!(!PathQuery::between(n[3], n[0]).execute(&graph).unwrap().found);
        let result = PathQuery::between(n[3], n[0])
            .direction(Direction::Backward)
            .execute(&graph)
            .unwrap();
        assert_eq!(result.path, vec![n[3], n[1], n[0]]);
    }

    #[test]
    fn test_start_outside_universe() {
        let (mut graph, n) = diamond();
        let uni = graph.add_universe(UniverseLaws::default());
        let err = PathQuery::between(n[0], n[3]).within(uni).execute(&graph).unwrap_err();
        assert!(matches!(err, GraphError::StartNotInContainer { .. }));
    }

    #[test]
    fn test_dest_outside_universe_is_not_found() {
        let (mut graph, n) = diamond();
        let uni = graph.add_universe(UniverseLaws::default());
        for &node in &n[..3] {
            graph.add_to_universe(uni, node).unwrap();
        }
        let result = PathQuery::between(n[0], n[3]).within(uni).execute(&graph).unwrap();
        assert_eq!(result.into_parts(), (None, None));
    }

    #[test]
    fn test_edge_attribute_weight() {
        let (mut graph, n) = diamond();
        let e01 = graph.node(n[0]).unwrap().edges()[0];
        graph.edge_mut(e01).unwrap().set_attribute("weight", 5.0);
        let cheap = graph.add_directed_edge(Some(n[0]), Some(n[1])).unwrap();
        graph.edge_mut(cheap).unwrap().set_attribute("weight", 3.0);
        let back = graph.add_directed_edge(Some(n[1]), Some(n[0])).unwrap();
        graph.edge_mut(back).unwrap().set_attribute("weight", 0.5);

        let forward = edge_attribute_weight("weight", Direction::Forward);
        assert_eq!(forward(&graph, n[0], n[1]), 3.0);
        assert_eq!(forward(&graph, n[1], n[0]), 0.5);
        assert_eq!(forward(&graph, n[0], n[2]), 1.0);

        let backward = edge_attribute_weight("weight", Direction::Backward);
        assert_eq!(backward(&graph, n[0], n[1]), 0.5);
        assert_eq!(backward(&graph, n[1], n[0]), 3.0);

        let any = edge_attribute_weight("weight", Direction::Any);
        assert_eq!(any(&graph, n[0], n[1]), 0.5);
        assert_eq!(any(&graph, n[1], n[0]), 0.5);
    }

    #[test]
    fn test_weighted_backward_path() {
        let mut graph = Graph::new();
        let a = graph.add_node(Attributes::new());
        let b = graph.add_node(Attributes::new());
        let e = graph.add_directed_edge(Some(a), Some(b)).unwrap();
        graph.edge_mut(e).unwrap().set_attribute("weight", 7.0);

        let result = PathQuery::between(b, a)
            .direction(Direction::Backward)
            .weight(edge_attribute_weight("weight", Direction::Backward))
            .execute(&graph)
            .unwrap();
        assert_eq!(result.path, vec![b, a]);
        assert_eq!(result.distance, Some(7.0));
    }

    #[test]
    fn test_frontier_breaks_ties_by_insertion() {
        let mut frontier = Frontier::default();
        frontier.push(1.0, NodeId(5));
        frontier.push(1.0, NodeId(2));
        frontier.push(0.5, NodeId(9));
        assert_eq!(frontier.pop(), Some((0.5, NodeId(9))));
        assert_eq!(frontier.pop(), Some((1.0, NodeId(5))));
        assert_eq!(frontier.pop(), Some((1.0, NodeId(2))));
        assert_eq!(frontier.pop(), None);
    }
}
