use super::scc::partition;
use super::*;

fn digraph(vertices: &[&'static str], edges: &[(&'static str, &'static str)]) -> DiGraph<&'static str> {
    let mut g = DiGraph::new();
    for v in vertices {
        g.add_vertex(*v).unwrap();
    }
    for (s, d) in edges {
        g.add_edge(*s, *d).unwrap();
    }
    g
}

fn sorted_partition(components: &scc::Components<&'static str>) -> Vec<Vec<&'static str>> {
    let mut classes: Vec<_> = partition(components)
        .into_iter()
        .map(|mut c| {
            c.sort();
            c
        })
        .collect();
    classes.sort();
    classes
}

#[test]
fn queries() {
    let g = digraph(&["a", "b", "c"], &[("a", "b"), ("a", "c"), ("b", "c"), ("c", "c")]);
    assert_eq!(g.n(), 3);
    assert_eq!(g.m(), 4);
    assert_eq!(g.out_degree(&"a"), Ok(2));
    assert_eq!(g.in_degree(&"c"), Ok(3));
    assert_eq!(g.is_edge(&"c", &"c"), Ok(true));
    assert_eq!(g.is_edge(&"c", &"a"), Ok(false));
    assert_eq!(g.neighbors(&"a").unwrap().collect::<Vec<_>>(), vec![&"b", &"c"]);
    assert_eq!(g.vertices().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[test]
fn unknown_vertices_are_reported() {
    let mut g = digraph(&["a"], &[]);
    assert_eq!(g.add_edge("a", "z"), Err(GraphError::UnknownVertex("z")));
    assert_eq!(g.add_edge("z", "a"), Err(GraphError::UnknownVertex("z")));
    assert_eq!(g.is_edge(&"a", &"z"), Err(GraphError::UnknownVertex("z")));
    assert!(g.neighbors(&"q").is_err());
    assert_eq!(g.in_degree(&"q"), Err(GraphError::UnknownVertex("q")));
    assert_eq!(g.add_vertex("a"), Err(GraphError::DuplicateVertex("a")));
}

#[test]
fn edges_are_idempotent_and_removable() {
    let mut g = digraph(&["a", "b"], &[]);
    assert_eq!(g.add_edge("a", "b"), Ok(true));
    assert_eq!(g.add_edge("a", "b"), Ok(false));
    assert_eq!(g.m(), 1);
    assert_eq!(g.add_edge_strict("a", "b"), Err(GraphError::DuplicateEdge("a", "b")));
    assert_eq!(g.remove_edge(&"a", &"b"), Ok(true));
    assert_eq!(g.remove_edge(&"a", &"b"), Ok(false));
    assert_eq!(g.m(), 0);
    assert_eq!(g.add_edge_strict("b", "a"), Ok(()));
}

#[test]
fn reverse_flips_every_edge() {
    let g = digraph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
    let r = g.reverse();
    assert_eq!(r.n(), 3);
    assert_eq!(r.m(), 2);
    assert_eq!(r.is_edge(&"b", &"a"), Ok(true));
    assert_eq!(r.is_edge(&"c", &"b"), Ok(true));
    assert_eq!(r.is_edge(&"a", &"b"), Ok(false));
    assert_eq!(r.reverse(), g);
}

#[test]
fn textbook_components() {
    let g = digraph(
        &["a", "b", "c", "d", "e", "f", "g", "h"],
        &[
            ("a", "b"),
            ("b", "c"),
            ("b", "e"),
            ("b", "f"),
            ("c", "d"),
            ("c", "g"),
            ("d", "c"),
            ("d", "h"),
            ("e", "a"),
            ("e", "f"),
            ("f", "g"),
            ("g", "f"),
            ("g", "h"),
            ("h", "h"),
        ],
    );
    let expected = vec![vec!["a", "b", "e"], vec!["c", "d"], vec!["f", "g"], vec!["h"]];

    let tarjan = g.scc_tarjan();
    let kosaraju = g.scc_kosaraju();
    assert_eq!(sorted_partition(&tarjan), expected);
    assert_eq!(sorted_partition(&kosaraju), expected);

    for labels in [&tarjan, &kosaraju] {
        let mut names: Vec<_> = labels.values().copied().collect();
        names.sort();
        names.dedup();
        assert_eq!(names, vec![1, 2, 3, 4]);
    }
}

#[test]
fn tarjan_closes_sinks_first() {
    let g = digraph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
    let tarjan = g.scc_tarjan();
    assert_eq!(tarjan[&"c"], 1);
    assert_eq!(tarjan[&"b"], 2);
    assert_eq!(tarjan[&"a"], 3);

    // the reverse-postorder pass starts from the sink as well
    let kosaraju = g.scc_kosaraju();
    assert_eq!(kosaraju[&"c"], 1);
    assert_eq!(kosaraju[&"a"], 3);
}

#[test]
fn cross_edges_into_closed_components() {
    // d -> b reaches a component closed before d is discovered
    let g = digraph(
        &["a", "b", "c", "d", "e"],
        &[("a", "b"), ("b", "c"), ("c", "b"), ("a", "d"), ("d", "b"), ("d", "e"), ("e", "d")],
    );
    let expected = vec![vec!["a"], vec!["b", "c"], vec!["d", "e"]];
    assert_eq!(sorted_partition(&g.scc_tarjan()), expected);
    assert_eq!(sorted_partition(&g.scc_kosaraju()), expected);
}

#[test]
fn long_cycle_does_not_exhaust_the_stack() {
    let n = 200_000;
    let mut g = DiGraph::new();
    for v in 0..n {
        g.add_vertex(v).unwrap();
    }
    for v in 0..n {
        g.add_edge(v, (v + 1) % n).unwrap();
    }
    assert!(g.scc_tarjan().values().all(|&c| c == 1));
    assert!(g.scc_kosaraju().values().all(|&c| c == 1));
}

#[test]
fn empty_graph_has_no_components() {
    let g: DiGraph<u8> = DiGraph::default();
    assert!(g.scc_tarjan().is_empty());
    assert!(g.scc_kosaraju().is_empty());
}
