use super::*;

fn flow_network(
    vertices: &[&'static str],
    edges: &[(&'static str, &'static str, i64)],
) -> FlowNetwork<&'static str, i64> {
    let mut net = FlowNetwork::new("s", "t").unwrap();
    for v in vertices {
        net.add_vertex(*v).unwrap();
    }
    for &(s, d, c) in edges {
        net.add_edge(s, d, c).unwrap();
    }
    net
}

#[test]
fn three_edge_network() {
    let net = flow_network(&["a"], &[("s", "a", 10), ("a", "t", 5), ("s", "t", 3)]);
    let flow = net.max_flow();
    assert_eq!(flow.value(), 8);
    assert_eq!(flow.on_edge(&"s", &"a"), 5);
    assert_eq!(flow.on_edge(&"a", &"t"), 5);
    assert_eq!(flow.on_edge(&"s", &"t"), 3);

    // max_flow leaves the network untouched
    assert_eq!(net.cost(&"s", &"a"), Ok(10));
    assert_eq!(net.m(), 3);
}

#[test]
fn augmenting_path_updates_residual_network() {
    let mut net = flow_network(&["a"], &[("s", "a", 10), ("a", "t", 5), ("s", "t", 3)]);

    // fewest edges first: s -> t directly
    let first = net.augmenting_path().unwrap();
    assert_eq!(first.value(), 3);
    assert_eq!(net.is_edge(&"s", &"t"), Ok(false));
    assert_eq!(net.cost(&"t", &"s"), Ok(3));

    let second = net.augmenting_path().unwrap();
    assert_eq!(second.value(), 5);
    assert_eq!(net.cost(&"s", &"a"), Ok(5));
    assert_eq!(net.is_edge(&"a", &"t"), Ok(false));
    assert_eq!(net.cost(&"a", &"s"), Ok(5));
    assert_eq!(net.cost(&"t", &"a"), Ok(5));

    assert!(net.augmenting_path().is_none());
}

#[test]
fn diamond_with_cross_edge() {
    let net = flow_network(
        &["a", "b"],
        &[
            ("s", "a", 1),
            ("s", "b", 1),
            ("a", "b", 1),
            ("a", "t", 1),
            ("b", "t", 1),
        ],
    );
    let flow = net.max_flow();
    assert_eq!(flow.value(), 2);
    // opposing flows cancel, so no edge carries flow both ways
    for e in flow.edges() {
        assert_eq!(flow.is_edge(&e.destination, &e.source), Ok(false));
    }
}

#[test]
fn classic_network() {
    let net = flow_network(
        &["v1", "v2", "v3", "v4"],
        &[
            ("s", "v1", 16),
            ("s", "v2", 13),
            ("v1", "v3", 12),
            ("v2", "v1", 4),
            ("v2", "v4", 14),
            ("v3", "v2", 9),
            ("v3", "t", 20),
            ("v4", "v3", 7),
            ("v4", "t", 4),
        ],
    );
    assert_eq!(net.max_flow().value(), 23);

    let cut = net.min_cut();
    assert_eq!(cut.capacity, 23);
    let mut side: Vec<_> = cut.source_side.iter().copied().collect();
    side.sort();
    assert_eq!(side, vec!["s", "v1", "v2", "v4"]);
}

#[test]
fn disconnected_sink_has_zero_flow() {
    let net = flow_network(&["a"], &[("s", "a", 4)]);
    let flow = net.max_flow();
    assert!(flow.is_empty());
    assert_eq!(flow.value(), 0);
    assert_eq!(net.min_cut().capacity, 0);
}

#[test]
fn zero_capacity_edges_carry_nothing() {
    let net = flow_network(&[], &[("s", "t", 0)]);
    assert_eq!(net.max_flow().value(), 0);
}

#[test]
fn negative_zero_capacity_is_empty() {
    let mut net: FlowNetwork<&str> = FlowNetwork::new("s", "t").unwrap();
    assert_eq!(net.add_edge("s", "t", -0.0), Ok(()));
    assert_eq!(net.max_flow().value(), 0.0);
    assert!(net.augmenting_path().is_none());
}

#[test]
fn flows_accumulate() {
    let net = flow_network(&["a"], &[("s", "a", 2), ("a", "t", 2)]);
    let mut residual = net.clone();
    let mut total = residual.augmenting_path().unwrap();
    let again = total.clone();
    total += &again;
    assert_eq!(total.value(), 4);
    assert_eq!(total.source(), &"s");
    assert_eq!(total.sink(), &"t");
}

#[test]
fn construction_errors() {
    assert_eq!(
        FlowNetwork::<u8, f64>::new(1, 1).unwrap_err(),
        GraphError::DuplicateVertex(1)
    );
    let mut net: FlowNetwork<u8, f64> = FlowNetwork::new(0, 9).unwrap();
    net.add_vertex(9).unwrap();
    net.add_vertex(3).unwrap();
    assert_eq!(net.vertices().copied().collect::<Vec<_>>(), vec![0, 9, 3]);
    assert_eq!(
        net.add_edge(0, 3, -1.0),
        Err(GraphError::NegativeCapacity { from: 0, to: 3 })
    );
    assert_eq!(net.add_edge(0, 4, 1.0), Err(GraphError::UnknownVertex(4)));
}

#[test]
fn float_capacities() {
    let mut net: FlowNetwork<u8> = FlowNetwork::new(0, 3).unwrap();
    net.add_vertex(1).unwrap();
    net.add_vertex(2).unwrap();
    net.add_edge(0, 1, 1.5).unwrap();
    net.add_edge(0, 2, 2.25).unwrap();
    net.add_edge(1, 3, 2.0).unwrap();
    net.add_edge(2, 3, 1.0).unwrap();
    net.add_edge(2, 1, 0.5).unwrap();
    assert_eq!(net.max_flow().value(), 3.0);
}
