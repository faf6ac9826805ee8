//! Strongly connected components.
//!
//! Both algorithms label components `1..=k` and agree on the partition,
//! though not necessarily on the labels. The depth-first searches use an
//! explicit stack of frames, each holding a vertex and the position of the
//! next neighbour to explore, so stack usage does not grow with path length.

use std::collections::VecDeque;
use std::hash::Hash;

use itertools::Itertools;
use tracing::debug;

use super::DiGraph;
use crate::VertexMap;

/// Component label of every vertex.
pub type Components<V> = VertexMap<V, usize>;

/// Low-link of a vertex whose component is closed; larger than any
/// discovery time so edges into closed components never lower a low-link.
const CLOSED: usize = usize::MAX;

struct Frame {
    vertex: usize,
    next: usize,
}

/// Depth-first search from `root`, calling `on_finish` as each vertex is
/// left for the last time.
fn depth_first(
    adjacency: &[Vec<usize>],
    root: usize,
    visited: &mut [bool],
    mut on_finish: impl FnMut(usize),
) {
    visited[root] = true;
    let mut stack = vec![Frame {
        vertex: root,
        next: 0,
    }];
    while let Some(frame) = stack.last_mut() {
        match adjacency[frame.vertex].get(frame.next) {
            Some(&w) => {
                frame.next += 1;
                if !visited[w] {
                    visited[w] = true;
                    stack.push(Frame { vertex: w, next: 0 });
                }
            }
            None => {
                on_finish(frame.vertex);
                stack.pop();
            }
        }
    }
}

impl<V: Hash + Eq + Clone> DiGraph<V> {
    /// Kosaraju's algorithm.
    ///
    /// A search of the reverse graph yields the vertices in reverse
    /// postorder; searching the original graph from each unvisited vertex
    /// in that order discovers exactly one component per search.
    pub fn scc_kosaraju(&self) -> Components<V> {
        let n = self.n();
        let reverse = self.reverse().indexed_adjacency();
        let mut visited = vec![false; n];
        let mut order = VecDeque::with_capacity(n);

        for v in 0..n {
            if !visited[v] {
                depth_first(&reverse, v, &mut visited, |u| order.push_front(u));
            }
        }

        let adjacency = self.indexed_adjacency();
        visited.fill(false);
        let mut component = vec![0; n];
        let mut name = 1;
        for v in order {
            if !visited[v] {
                depth_first(&adjacency, v, &mut visited, |u| component[u] = name);
                name += 1;
            }
        }

        debug!(vertices = n, components = name - 1, "kosaraju scc");
        self.label(component)
    }

    /// Tarjan's algorithm.
    ///
    /// Single pass keeping a discovery time and low-link per vertex and a
    /// stack of vertices whose component is still open. A vertex whose
    /// low-link equals its discovery time roots a component, which is then
    /// popped off the open stack.
    pub fn scc_tarjan(&self) -> Components<V> {
        let adjacency = self.indexed_adjacency();
        let n = adjacency.len();
        let mut pre: Vec<Option<usize>> = vec![None; n];
        let mut low = vec![CLOSED; n];
        let mut component = vec![0; n];
        let mut open = Vec::new();
        let mut time = 1;
        let mut name = 1;

        for root in 0..n {
            if pre[root].is_some() {
                continue;
            }
            pre[root] = Some(time);
            low[root] = time;
            time += 1;
            open.push(root);
            let mut stack = vec![Frame {
                vertex: root,
                next: 0,
            }];

            while let Some(frame) = stack.last_mut() {
                let v = frame.vertex;
                if let Some(&w) = adjacency[v].get(frame.next) {
                    frame.next += 1;
                    if pre[w].is_none() {
                        pre[w] = Some(time);
                        low[w] = time;
                        time += 1;
                        open.push(w);
                        stack.push(Frame { vertex: w, next: 0 });
                    } else {
                        low[v] = low[v].min(low[w]);
                    }
                    continue;
                }

                stack.pop();
                if pre[v] == Some(low[v]) {
                    while let Some(top) = open.pop() {
                        component[top] = name;
                        low[top] = CLOSED;
                        if top == v {
                            break;
                        }
                    }
                    name += 1;
                }
                if let Some(parent) = stack.last() {
                    low[parent.vertex] = low[parent.vertex].min(low[v]);
                }
            }
        }

        debug!(vertices = n, components = name - 1, "tarjan scc");
        self.label(component)
    }

    fn label(&self, component: Vec<usize>) -> Components<V> {
        self.vertices().cloned().zip(component).collect()
    }
}

/// Groups vertices by component label, ordered by label.
pub fn partition<V: Hash + Eq + Clone>(components: &Components<V>) -> Vec<Vec<V>> {
    components
        .iter()
        .map(|(v, &c)| (c, v.clone()))
        .into_group_map()
        .into_iter()
        .sorted_by_key(|(c, _)| *c)
        .map(|(_, members)| members)
        .collect()
}
