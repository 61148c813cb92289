//! Linkage consistency tests across nodes, edges and universes

use crate::config::GraphConfig;
use crate::graph::{
    AttributeValue, Attributes, EdgeKind, Graph, GraphError, NodeId, UniverseLaws,
};

fn attrs(i: i64) -> Attributes {
    Attributes::from([("i".to_string(), AttributeValue::Int(i))])
}

fn two_nodes() -> (Graph, NodeId, NodeId) {
    let mut graph = Graph::new();
    let a = graph.add_node(attrs(0));
    let b = graph.add_node(attrs(1));
    (graph, a, b)
}

#[cfg(test)]
mod linkage_tests {
    use super::*;

    #[test]
    fn edge_creation_links_both_sides() {
        let (mut graph, a, b) = two_nodes();
        let e = graph.add_directed_edge(Some(a), Some(b)).unwrap();

        assert_eq!(graph.node(a).unwrap().edges(), &[e]);
        assert_eq!(graph.node(b).unwrap().edges(), &[e]);
        assert_eq!(graph.edge(e).unwrap().endpoints(), vec![a, b]);
        assert_eq!(graph.edge(e).unwrap().v1(), Some(a));
        assert_eq!(graph.edge(e).unwrap().v2(), Some(b));
    }

    #[test]
    fn detach_touches_only_one_side() {
        let (mut graph, a, b) = two_nodes();
        let e = graph.add_undirected_edge(Some(a), Some(b)).unwrap();

        graph.detach(e, a).unwrap();

        assert!(graph.node(a).unwrap().edges().is_empty());
        assert!(!graph.edge(e).unwrap().has_endpoint(a));
        assert_eq!(graph.node(b).unwrap().edges(), &[e]);
        assert_eq!(graph.edge(e).unwrap().v2(), Some(b));
        assert_eq!(graph.edge(e).unwrap().v1(), None);
    }

    #[test]
    fn remove_edge_from_node_unlinks_edge_side() {
        let (mut graph, a, b) = two_nodes();
        let e = graph.add_directed_edge(Some(a), Some(b)).unwrap();

        graph.remove_edge_from_node(b, e).unwrap();

        assert!(graph.node(b).unwrap().edges().is_empty());
        assert_eq!(graph.edge(e).unwrap().endpoints(), vec![a]);
    }

    #[test]
    fn absent_removal_is_noop_by_default() {
        let (mut graph, a, b) = two_nodes();
        let c = graph.add_node(attrs(2));
        let e = graph.add_directed_edge(Some(a), Some(b)).unwrap();

        graph.detach(e, c).unwrap();
        graph.remove_edge_from_node(c, e).unwrap();

        assert_eq!(graph.edge(e).unwrap().endpoints(), vec![a, b]);
    }

    #[test]
    fn absent_removal_errors_in_strict_mode() {
        let mut graph = Graph::with_config(GraphConfig::new().with_strict_membership(true));
        let a = graph.add_node(attrs(0));
        let b = graph.add_node(attrs(1));
        let c = graph.add_node(attrs(2));
        let e = graph.add_directed_edge(Some(a), Some(b)).unwrap();

        assert!(matches!(graph.detach(e, c), Err(GraphError::MembershipNotFound(_))));
        assert!(matches!(
            graph.remove_edge_from_node(c, e),
            Err(GraphError::MembershipNotFound(_))
        ));
        // state untouched by the failed calls
        assert_eq!(graph.edge(e).unwrap().endpoints(), vec![a, b]);
    }

    #[test]
    fn re_adding_same_edge_is_noop() {
        let (mut graph, a, b) = two_nodes();
        let e = graph.add_undirected_edge(Some(a), Some(b)).unwrap();

        graph.add_edge_to_node(a, e).unwrap();
        graph.add_edge_to_node(a, e).unwrap();

        assert_eq!(graph.node(a).unwrap().edges(), &[e]);
        assert_eq!(graph.edge(e).unwrap().endpoints(), vec![a, b]);
    }

    #[test]
    fn add_edge_to_node_fills_empty_slot() {
        let (mut graph, a, b) = two_nodes();
        let e = graph.add_directed_edge(Some(a), None).unwrap();

        graph.add_edge_to_node(b, e).unwrap();

        assert_eq!(graph.edge(e).unwrap().v2(), Some(b));
        assert_eq!(graph.node(b).unwrap().edges(), &[e]);
    }

    #[test]
    fn attach_to_full_two_ended_edge_fails() {
        let (mut graph, a, b) = two_nodes();
        let c = graph.add_node(attrs(2));
        let e = graph.add_directed_edge(Some(a), Some(b)).unwrap();

        assert!(matches!(graph.attach(e, c), Err(GraphError::EndpointsFull(_))));
        assert!(graph.node(c).unwrap().edges().is_empty());
    }

    #[test]
    fn structurally_equal_edges_stay_distinct() {
        let (mut graph, a, b) = two_nodes();
        let e1 = graph.add_directed_edge(Some(a), Some(b)).unwrap();
        let e2 = graph.add_directed_edge(Some(a), Some(b)).unwrap();

        assert_ne!(e1, e2);
        assert_eq!(graph.node(a).unwrap().edges(), &[e1, e2]);
        assert_eq!(graph.node(b).unwrap().edges(), &[e1, e2]);
    }

    #[test]
    fn self_loop_is_listed_once_on_the_node() {
        let mut graph = Graph::new();
        let a = graph.add_node(attrs(0));
        let e = graph.add_directed_edge(Some(a), Some(a)).unwrap();

        assert_eq!(graph.node(a).unwrap().edges(), &[e]);
        assert_eq!(graph.edge(e).unwrap().endpoints(), vec![a, a]);

        // removing one occurrence keeps the edge incident
        graph.detach(e, a).unwrap();
        assert_eq!(graph.node(a).unwrap().edges(), &[e]);
        graph.detach(e, a).unwrap();
        assert!(graph.node(a).unwrap().edges().is_empty());
    }

    #[test]
    fn base_edge_requires_force() {
        let (mut graph, a, b) = two_nodes();
        assert!(matches!(
            graph.add_edge(EdgeKind::Base, &[a, b], false),
            Err(GraphError::DirectInstantiationDenied)
        ));
        let e = graph.add_edge(EdgeKind::Base, &[a, b], true).unwrap();
        assert_eq!(graph.edge(e).unwrap().endpoints(), vec![a, b]);
    }

    #[test]
    fn custom_edges_take_any_arity_with_duplicates() {
        let (mut graph, a, b) = two_nodes();
        let c = graph.add_node(attrs(2));
        let e = graph
            .add_edge(EdgeKind::Custom("hyper".into()), &[a, b, a], false)
            .unwrap();
        graph.attach(e, c).unwrap();

        assert_eq!(graph.edge(e).unwrap().endpoints(), vec![a, b, a, c]);
        assert_eq!(graph.node(a).unwrap().edges(), &[e]);
        assert_eq!(graph.node(c).unwrap().edges(), &[e]);
    }

    #[test]
    fn two_ended_kind_rejects_extra_endpoints() {
        let (mut graph, a, b) = two_nodes();
        let err = graph.add_edge(EdgeKind::Directed, &[a, b, a], false).unwrap_err();
        assert!(matches!(err, GraphError::TooManyEndpoints { count: 3, .. }));
        assert!(graph.node(a).unwrap().edges().is_empty());
    }

    #[test]
    fn dissolve_unlinks_every_endpoint() {
        let (mut graph, a, b) = two_nodes();
        let e = graph.add_undirected_edge(Some(a), Some(b)).unwrap();

        graph.dissolve_edge(e).unwrap();

        assert!(graph.node(a).unwrap().edges().is_empty());
        assert!(graph.node(b).unwrap().edges().is_empty());
        assert!(matches!(graph.edge(e), Err(GraphError::EdgeNotFound(_))));
        assert_eq!(graph.edge_count(), 0);
    }
}

#[cfg(test)]
mod endpoint_reassignment_tests {
    use super::*;

    #[test]
    fn set_v1_moves_origin_and_keeps_destination() {
        let (mut graph, a, b) = two_nodes();
        let c = graph.add_node(attrs(2));
        let e = graph.add_directed_edge(Some(a), Some(b)).unwrap();

        graph.set_v1(e, Some(c)).unwrap();

        let edge = graph.edge(e).unwrap();
        assert_eq!(edge.v1(), Some(c));
        assert_eq!(edge.v2(), Some(b));
        assert!(graph.node(a).unwrap().edges().is_empty());
        assert_eq!(graph.node(c).unwrap().edges(), &[e]);
        assert_eq!(graph.node(b).unwrap().edges(), &[e]);
    }

    #[test]
    fn set_v2_on_undirected_edge() {
        let (mut graph, a, b) = two_nodes();
        let c = graph.add_node(attrs(2));
        let e = graph.add_undirected_edge(Some(a), Some(b)).unwrap();

        graph.set_v2(e, Some(c)).unwrap();

        assert_eq!(graph.edge(e).unwrap().endpoints(), vec![a, c]);
        assert!(graph.node(b).unwrap().edges().is_empty());
    }

    #[test]
    fn clearing_an_end_unlinks_it() {
        let (mut graph, a, b) = two_nodes();
        let e = graph.add_directed_edge(Some(a), Some(b)).unwrap();

        graph.set_v2(e, None).unwrap();

        assert_eq!(graph.edge(e).unwrap().v2(), None);
        assert!(graph.node(b).unwrap().edges().is_empty());
        assert_eq!(graph.node(a).unwrap().edges(), &[e]);
    }

    #[test]
    fn moving_one_end_of_self_loop_keeps_edge_on_node() {
        let mut graph = Graph::new();
        let a = graph.add_node(attrs(0));
        let b = graph.add_node(attrs(1));
        let e = graph.add_directed_edge(Some(a), Some(a)).unwrap();

        graph.set_v2(e, Some(b)).unwrap();

        assert_eq!(graph.node(a).unwrap().edges(), &[e]);
        assert_eq!(graph.node(b).unwrap().edges(), &[e]);
    }

    #[test]
    fn reassigning_base_edge_is_rejected() {
        let (mut graph, a, b) = two_nodes();
        let e = graph.add_edge(EdgeKind::Base, &[a], true).unwrap();
        assert!(matches!(graph.set_v1(e, Some(b)), Err(GraphError::NotTwoEnded(_))));
    }

    #[test]
    fn reassigning_to_unknown_node_is_invalid_endpoint() {
        let (mut graph, a, b) = two_nodes();
        let e = graph.add_directed_edge(Some(a), Some(b)).unwrap();
        let bogus = NodeId(99);
        assert!(matches!(
            graph.set_v1(e, Some(bogus)),
            Err(GraphError::InvalidEndpointKind(_))
        ));
        assert_eq!(graph.edge(e).unwrap().v1(), Some(a));
    }

    #[test]
    fn other_end() {
        let (mut graph, a, b) = two_nodes();
        let c = graph.add_node(attrs(2));
        let e = graph.add_undirected_edge(Some(a), Some(b)).unwrap();
        assert_eq!(graph.other(e, a).unwrap(), Some(b));
        assert_eq!(graph.other(e, b).unwrap(), Some(a));
        assert_eq!(graph.other(e, c).unwrap(), None);
    }
}

#[cfg(test)]
mod universe_tests {
    use super::*;

    #[test]
    fn membership_is_mutual() {
        let mut graph = Graph::new();
        let uni = graph.add_universe(UniverseLaws::default());
        let a = graph.add_node(attrs(0));

        graph.add_to_universe(uni, a).unwrap();
        graph.add_to_universe(uni, a).unwrap();

        assert_eq!(graph.members(uni).unwrap(), &[a]);
        assert_eq!(graph.node_universes(a).unwrap(), &[uni]);

        graph.remove_from_universe(uni, a).unwrap();
        assert!(graph.members(uni).unwrap().is_empty());
        assert!(graph.node_universes(a).unwrap().is_empty());
    }

    #[test]
    fn removing_non_member_respects_strictness() {
        let mut graph = Graph::new();
        let uni = graph.add_universe(UniverseLaws::default());
        let a = graph.add_node(attrs(0));

        graph.remove_from_universe(uni, a).unwrap();

        graph.set_strict_membership(true);
        assert!(matches!(
            graph.remove_from_universe(uni, a),
            Err(GraphError::MembershipNotFound(_))
        ));
    }

    #[test]
    fn removal_leaves_other_members_alone() {
        let mut graph = Graph::new();
        let uni = graph.add_universe(UniverseLaws::default());
        let members: Vec<NodeId> = (0..4)
            .map(|i| graph.add_member(uni, attrs(i)).unwrap())
            .collect();

        graph.remove_from_universe(uni, members[1]).unwrap();

        assert_eq!(graph.members(uni).unwrap(), &[members[0], members[2], members[3]]);
        for &m in &[members[0], members[2], members[3]] {
            assert!(graph.contains(uni, m).unwrap());
            assert_eq!(graph.node_universes(m).unwrap(), &[uni]);
        }
    }

    #[test]
    fn universe_can_be_a_member_and_an_endpoint() {
        let mut graph = Graph::new();
        let outer = graph.add_universe(UniverseLaws::builder().multiverse(true).build());
        let inner = graph.add_universe(UniverseLaws::default());
        let inner_node = graph.universe(inner).unwrap().node();
        let a = graph.add_node(attrs(0));

        graph.add_to_universe(outer, inner_node).unwrap();
        let e = graph.add_directed_edge(Some(inner_node), Some(a)).unwrap();

        assert!(graph.contains(outer, inner_node).unwrap());
        assert_eq!(graph.node(inner_node).unwrap().edges(), &[e]);
    }

    #[test]
    fn node_attributes_are_mutable() {
        let mut graph = Graph::new();
        let a = graph.add_node(attrs(0));
        graph.node_mut(a).unwrap().set_attribute("label", "start");
        graph.node_mut(a).unwrap().remove_attribute("i");

        let node = graph.node(a).unwrap();
        assert_eq!(node.attribute("label"), Some(&AttributeValue::from("start")));
        assert!(!node.has_attribute("i"));
    }
}
