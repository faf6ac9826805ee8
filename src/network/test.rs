use super::shortest_path::BellmanFord;
use super::*;
use crate::heap::{pairing::PairingHeap, DaryHeap};

fn network(n: u32, edges: &[(u32, u32, f64)]) -> Network<u32> {
    let mut net = Network::new();
    for v in 1..=n {
        net.add_vertex(v).unwrap();
    }
    for &(s, d, w) in edges {
        net.add_edge(s, d, w).unwrap();
    }
    net
}

/// Total weight around a cycle, closing it from the last vertex to the first.
fn cycle_weight(net: &Network<u32>, cycle: &[u32]) -> f64 {
    cycle
        .iter()
        .zip(cycle.iter().cycle().skip(1))
        .map(|(s, d)| net.cost(s, d).unwrap())
        .sum()
}

#[test]
fn weights_follow_edges() {
    let mut net = network(3, &[(1, 2, 2.0), (2, 3, 3.0)]);
    assert_eq!(net.m(), 2);
    assert_eq!(net.cost(&1, &2), Ok(2.0));
    assert_eq!(net.cost(&1, &3), Err(GraphError::MissingEdge(1, 3)));
    assert_eq!(net.cost(&1, &9), Err(GraphError::UnknownVertex(9)));

    net.add_edge(1, 2, 7.5).unwrap();
    assert_eq!(net.m(), 2);
    assert_eq!(net.cost(&1, &2), Ok(7.5));

    assert_eq!(net.increase_cost(&2, &3, -1.0), Ok(2.0));
    assert_eq!(net.remove_edge(&2, &3), Ok(Some(2.0)));
    assert_eq!(net.remove_edge(&2, &3), Ok(None));
    assert_eq!(net.is_edge(&2, &3), Ok(false));
    assert!(net.cost(&2, &3).is_err());
    assert_eq!(net.set_cost(&2, &3, 1.0), Err(GraphError::MissingEdge(2, 3)));
}

#[test]
fn reverse_keeps_weights() {
    let net = network(3, &[(1, 2, 2.0), (2, 3, -4.0)]);
    let r = net.reverse();
    assert_eq!(r.cost(&2, &1), Ok(2.0));
    assert_eq!(r.cost(&3, &2), Ok(-4.0));
    assert_eq!(r.total_weight(), -2.0);
    assert_eq!(r.reverse(), net);
}

#[test]
fn weighted_edges_display_and_order() {
    let a = WeightedEdge::new(1, 2, 3.0);
    let b = WeightedEdge::new(0, 5, 3.0);
    let c = WeightedEdge::new(9, 9, 1.0);
    assert_eq!(a.to_string(), "[1, 2, 3]");
    assert!(c < b);
    assert!(b < a);
    assert_eq!(a, WeightedEdge::new(1, 2, 3.0));
}

#[test]
fn bellman_ford_on_weighted_triangle() {
    let net = network(3, &[(1, 2, 2.0), (2, 3, 3.0), (3, 1, 5.0)]);
    let bf: BellmanFord<u32, f64> = net.bellman_ford(&1).unwrap();
    assert_eq!(bf.distance[&1], Some(0.0));
    assert_eq!(bf.distance[&2], Some(2.0));
    assert_eq!(bf.distance[&3], Some(5.0));
    assert!(!bf.has_negative_cycle());
    assert_eq!(bf.path_to(&3), Some(vec![1, 2, 3]));
    assert!(net.negative_cycle_from(&1).unwrap().is_empty());

    let tree = bf.predecessor_network(&net).unwrap();
    assert_eq!(tree.m(), 2);
    assert_eq!(tree.cost(&2, &3), Ok(3.0));
}

#[test]
fn two_cycle_of_negative_edges() {
    let net = network(2, &[(1, 2, -1.0), (2, 1, -1.0)]);
    let cycle = net.negative_cycle_from(&1).unwrap();
    assert_eq!(cycle.len(), 2);
    assert!(cycle.contains(&1) && cycle.contains(&2));
    assert!(cycle_weight(&net, &cycle) < 0.0);
}

#[test]
fn negative_cycle_behind_a_tail() {
    // 1 -> 2 -> 3 is a tail into the cycle 3 -> 4 -> 5 -> 3
    let net = network(
        5,
        &[
            (1, 2, 1.0),
            (2, 3, 1.0),
            (3, 4, 2.0),
            (4, 5, -3.0),
            (5, 3, -1.0),
        ],
    );
    let cycle = net.negative_cycle_from(&1).unwrap();
    let mut members = cycle.clone();
    members.sort();
    assert_eq!(members, vec![3, 4, 5]);
    assert!(cycle_weight(&net, &cycle) < 0.0);
    for (s, d) in cycle.iter().zip(cycle.iter().cycle().skip(1)) {
        assert_eq!(net.is_edge(s, d), Ok(true));
    }
}

#[test]
fn negative_self_loop_is_a_cycle() {
    let net = network(2, &[(1, 2, 4.0), (2, 2, -0.5)]);
    assert_eq!(net.negative_cycle_from(&1), Ok(vec![2]));
}

#[test]
fn unreachable_negative_cycle_is_ignored() {
    let net = network(4, &[(1, 2, 1.0), (3, 4, -2.0), (4, 3, -2.0)]);
    let bf = net.bellman_ford(&1).unwrap();
    assert!(!bf.has_negative_cycle());
    assert_eq!(bf.distance[&3], None);
    assert_eq!(bf.path_to(&3), None);
}

#[test]
fn dijkstra_builds_shortest_path_tree() {
    let net = network(
        5,
        &[
            (1, 2, 10.0),
            (1, 3, 3.0),
            (3, 2, 4.0),
            (2, 4, 2.0),
            (3, 4, 8.0),
            (4, 5, 7.0),
            (3, 5, 20.0),
        ],
    );
    let spt = net.dijkstra(&1).unwrap();
    assert_eq!(spt.distance[&2], 7.0);
    assert_eq!(spt.distance[&4], 9.0);
    assert_eq!(spt.distance[&5], 16.0);
    assert_eq!(spt.tree.n(), 5);
    assert_eq!(spt.tree.m(), 4);
    assert_eq!(spt.tree.is_edge(&3, &2), Ok(true));
    assert_eq!(spt.tree.is_edge(&1, &2), Ok(false));
    assert_eq!(spt.path_to(&5), Some(vec![1, 3, 2, 4, 5]));

    let bf = net.bellman_ford(&1).unwrap();
    for (v, d) in &spt.distance {
        assert_eq!(bf.distance[v], Some(*d));
    }
}

#[test]
fn dijkstra_queues_agree() {
    let net = network(
        6,
        &[
            (1, 2, 7.0),
            (1, 3, 9.0),
            (1, 6, 14.0),
            (2, 3, 10.0),
            (2, 4, 15.0),
            (3, 4, 11.0),
            (3, 6, 2.0),
            (4, 5, 6.0),
            (6, 5, 9.0),
        ],
    );
    let binary = net.dijkstra(&1).unwrap();
    let quaternary = net.dijkstra_with(&1, DaryHeap::with_arity(4)).unwrap();
    let pairing = net.dijkstra_with(&1, PairingHeap::new()).unwrap();
    assert_eq!(binary.distance[&5], 20.0);
    assert_eq!(binary.distance, quaternary.distance);
    assert_eq!(binary.distance, pairing.distance);
    assert_eq!(binary.tree, pairing.tree);
}

#[test]
fn dijkstra_from_isolated_source() {
    let net = network(3, &[(2, 3, 1.0)]);
    let spt = net.dijkstra(&1).unwrap();
    assert_eq!(spt.distance.len(), 1);
    assert_eq!(spt.tree.m(), 0);
    assert_eq!(spt.path_to(&3), None);
}

#[test]
fn dijkstra_rejects_reachable_negative_edges() {
    let net = network(3, &[(1, 2, 1.0), (2, 3, -1.0)]);
    assert_eq!(
        net.dijkstra(&1).unwrap_err(),
        GraphError::NegativeEdge { from: 2, to: 3 }
    );
    // not reachable from 3, so allowed
    assert!(net.dijkstra(&3).is_ok());
    assert_eq!(net.dijkstra(&7).unwrap_err(), GraphError::UnknownVertex(7));
}

#[test]
fn negative_zero_weight_is_allowed() {
    let net = network(2, &[(1, 2, -0.0)]);
    let spt = net.dijkstra(&1).unwrap();
    assert_eq!(spt.distance[&2], 0.0);
    assert_eq!(spt.path_to(&2), Some(vec![1, 2]));
}

#[test]
fn narrow_weights_report_overflow() {
    let mut net: Network<u8, i8> = Network::new();
    for v in 1..=3 {
        net.add_vertex(v).unwrap();
    }
    net.add_edge(1, 2, -100).unwrap();
    net.add_edge(2, 1, -100).unwrap();
    net.add_edge(2, 3, 27).unwrap();
    assert_eq!(
        net.bellman_ford(&1).unwrap_err(),
        GraphError::WeightOverflow { from: 2, to: 1 }
    );

    // the same cycle with small weights stays in range and is found
    net.set_cost(&1, &2, -1).unwrap();
    net.set_cost(&2, &1, -1).unwrap();
    assert!(net.bellman_ford(&1).unwrap().has_negative_cycle());

    let mut long: Network<u8, i8> = Network::new();
    for v in 1..=3 {
        long.add_vertex(v).unwrap();
    }
    long.add_edge(1, 2, 100).unwrap();
    long.add_edge(2, 3, 100).unwrap();
    assert_eq!(
        long.dijkstra(&1).unwrap_err(),
        GraphError::WeightOverflow { from: 2, to: 3 }
    );
    assert_eq!(long.dijkstra(&2).unwrap().distance[&3], 100);
}

#[test]
fn integer_weights() {
    let mut net: Network<&str, i64> = Network::new();
    for v in ["s", "a", "b"] {
        net.add_vertex(v).unwrap();
    }
    net.add_edge("s", "a", 4).unwrap();
    net.add_edge("s", "b", 1).unwrap();
    net.add_edge("b", "a", 2).unwrap();
    assert_eq!(net.dijkstra(&"s").unwrap().distance[&"a"], 3);
    assert_eq!(net.bellman_ford(&"s").unwrap().distance[&"a"], Some(3));
}
