//! Single-source shortest paths.
//!
//! - [`Network::dijkstra`]: non-negative weights, returns the shortest path
//!   tree as a fresh network.
//! - [`Network::bellman_ford`]: arbitrary weights, returns distances and
//!   predecessors and extracts a negative cycle when one is reachable.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::hash::Hash;

use tracing::{debug, trace};

use super::{Network, WeightedEdge};
use crate::{
    digraph::GraphError,
    heap::{DaryHeap, PriorityQueue},
    weight::Weight,
    VertexMap, VertexSet,
};

/// Output of Dijkstra's algorithm.
#[derive(Clone, Debug)]
pub struct ShortestPathTree<V: Hash + Eq, W> {
    pub source: V,
    /// All vertices of the input, with one edge `(parent(v), v)` per settled
    /// vertex other than the source.
    pub tree: Network<V, W>,
    /// Distance of every settled vertex.
    pub distance: VertexMap<V, W>,
    pub predecessor: VertexMap<V, V>,
}

/// Output of the Bellman-Ford algorithm.
#[derive(Clone, Debug)]
pub struct BellmanFord<V: Hash + Eq, W> {
    pub source: V,
    /// Best known distance, `None` for vertices unreachable from the source.
    pub distance: VertexMap<V, Option<W>>,
    /// `(predecessor[v], v)` is the last edge on the best known path to `v`.
    pub predecessor: VertexMap<V, V>,
    /// A negative cycle reachable from the source in traversal order, or
    /// empty if there is none.
    pub negative_cycle: Vec<V>,
}

fn trace_path<V: Hash + Eq + Clone>(
    predecessor: &VertexMap<V, V>,
    source: &V,
    target: &V,
) -> Option<Vec<V>> {
    let mut path = vec![target.clone()];
    let mut cursor = target;
    while cursor != source {
        cursor = predecessor.get(cursor)?;
        path.push(cursor.clone());
        if path.len() > predecessor.len() + 1 {
            return None;
        }
    }
    path.reverse();
    Some(path)
}

impl<V: Hash + Eq + Clone, W> ShortestPathTree<V, W> {
    /// Vertices on the shortest path from the source to `target`.
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        trace_path(&self.predecessor, &self.source, target)
    }
}

impl<V: Hash + Eq + Clone, W: Weight> BellmanFord<V, W> {
    pub fn has_negative_cycle(&self) -> bool {
        !self.negative_cycle.is_empty()
    }

    /// Vertices on the best known path from the source to `target`.
    ///
    /// Meaningless once a negative cycle has been found.
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        trace_path(&self.predecessor, &self.source, target)
    }

    /// The predecessor edges `(predecessor[v], v)` as a network, weighted by
    /// their cost in `network`.
    pub fn predecessor_network(
        &self,
        network: &Network<V, W>,
    ) -> Result<Network<V, W>, GraphError<V>> {
        let mut tree = Network::with_vertices_of(network);
        for (v, parent) in &self.predecessor {
            let w = network.cost(parent, v)?;
            tree.add_edge(parent.clone(), v.clone(), w)?;
        }
        Ok(tree)
    }
}

impl<V: Hash + Eq + Clone, W: Weight> Network<V, W> {
    /// Fails on the first negative edge reachable from `source`.
    fn check_non_negative_from(&self, source: &V) -> Result<(), GraphError<V>> {
        let mut seen = VertexSet::default();
        let mut queue = VecDeque::from([source.clone()]);
        seen.insert(source.clone());
        while let Some(u) = queue.pop_front() {
            for v in self.neighbors(&u)? {
                if self.cost(&u, v)?.is_negative() {
                    return Err(GraphError::NegativeEdge {
                        from: u.clone(),
                        to: v.clone(),
                    });
                }
                if seen.insert(v.clone()) {
                    queue.push_back(v.clone());
                }
            }
        }
        Ok(())
    }
}

impl<V: Hash + Ord + Clone, W: Weight> Network<V, W> {
    /// Dijkstra's algorithm with a binary heap.
    pub fn dijkstra(&self, source: &V) -> Result<ShortestPathTree<V, W>, GraphError<V>> {
        self.dijkstra_with(source, DaryHeap::new())
    }

    /// Dijkstra's algorithm using `queue` for the fringe.
    ///
    /// The fringe holds at most one edge per unsettled vertex, keyed by the
    /// distance it would give that vertex. Improving an entry lowers its key
    /// in place. Every weight reachable from `source` must be non-negative;
    /// this is checked before the search starts.
    pub fn dijkstra_with<Q>(
        &self,
        source: &V,
        mut queue: Q,
    ) -> Result<ShortestPathTree<V, W>, GraphError<V>>
    where
        Q: PriorityQueue<WeightedEdge<V, W>>,
    {
        self.check_vertex(source)?;
        self.check_non_negative_from(source)?;

        let mut tree = Network::with_vertices_of(self);
        let mut distance = VertexMap::default();
        let mut predecessor = VertexMap::default();
        let mut best: VertexMap<V, WeightedEdge<V, W>> = VertexMap::default();
        let mut settled = VertexSet::default();

        distance.insert(source.clone(), W::zero());
        settled.insert(source.clone());
        let mut current = source.clone();
        let mut current_distance = W::zero();

        loop {
            for n in self.neighbors(&current)? {
                if settled.contains(n) {
                    continue;
                }
                let through = current_distance
                    .checked_add(self.cost(&current, n)?)
                    .ok_or_else(|| GraphError::WeightOverflow {
                        from: current.clone(),
                        to: n.clone(),
                    })?;
                let fringe = WeightedEdge::new(current.clone(), n.clone(), through);
                match best.get(n) {
                    None => {
                        queue.push(fringe.clone())?;
                        best.insert(n.clone(), fringe);
                    }
                    Some(old) if fringe.weight.total_cmp(&old.weight) == Ordering::Less => {
                        queue.decrease_key(old, fringe.clone())?;
                        best.insert(n.clone(), fringe);
                    }
                    Some(_) => {}
                }
            }

            let Some(next) = queue.pop_min() else {
                break;
            };
            trace!(settled = settled.len(), "settling vertex");
            let w = self.cost(&next.source, &next.destination)?;
            tree.add_edge(next.source.clone(), next.destination.clone(), w)?;
            distance.insert(next.destination.clone(), next.weight);
            predecessor.insert(next.destination.clone(), next.source);
            settled.insert(next.destination.clone());
            current = next.destination;
            current_distance = next.weight;
        }

        debug!(
            vertices = self.n(),
            settled = settled.len(),
            "dijkstra finished"
        );
        Ok(ShortestPathTree {
            source: source.clone(),
            tree,
            distance,
            predecessor,
        })
    }
}

impl<V: Hash + Eq + Clone, W: Weight> Network<V, W> {
    /// The Bellman-Ford algorithm.
    ///
    /// Runs up to `n - 1` rounds relaxing every edge, stopping early once a
    /// round changes nothing. One more round then looks for an edge that
    /// still improves a distance; if there is one, a negative cycle is
    /// reachable from `source` and is extracted from the predecessor links.
    pub fn bellman_ford(&self, source: &V) -> Result<BellmanFord<V, W>, GraphError<V>> {
        self.check_vertex(source)?;
        let n = self.n();

        let mut distance: VertexMap<V, Option<W>> =
            self.vertices().map(|v| (v.clone(), None)).collect();
        distance.insert(source.clone(), Some(W::zero()));
        let mut predecessor = VertexMap::default();

        let mut rounds = 0;
        while rounds + 1 < n {
            rounds += 1;
            if self.relax_all(&mut distance, &mut predecessor)?.is_none() {
                break;
            }
        }

        let negative_cycle = match self.relax_all(&mut distance, &mut predecessor)? {
            Some(last) => extract_cycle(&predecessor, last, n),
            None => Vec::new(),
        };

        debug!(
            vertices = n,
            rounds,
            cycle_len = negative_cycle.len(),
            "bellman-ford finished"
        );
        Ok(BellmanFord {
            source: source.clone(),
            distance,
            predecessor,
            negative_cycle,
        })
    }

    /// A negative cycle reachable from `source`, in traversal order, or an
    /// empty vector if there is none.
    pub fn negative_cycle_from(&self, source: &V) -> Result<Vec<V>, GraphError<V>> {
        Ok(self.bellman_ford(source)?.negative_cycle)
    }

    /// Relaxes every edge once, returning the last vertex whose distance
    /// improved. A distance leaving the range of `W` is an error rather than
    /// a wrapped value.
    fn relax_all(
        &self,
        distance: &mut VertexMap<V, Option<W>>,
        predecessor: &mut VertexMap<V, V>,
    ) -> Result<Option<V>, GraphError<V>> {
        let mut last = None;
        for ((u, v), w) in &self.weights {
            let Some(du) = distance.get(u).copied().flatten() else {
                continue;
            };
            let candidate = du.checked_add(*w).ok_or_else(|| GraphError::WeightOverflow {
                from: u.clone(),
                to: v.clone(),
            })?;
            let improves = match distance.get(v).copied().flatten() {
                None => true,
                Some(dv) => candidate.total_cmp(&dv) == Ordering::Less,
            };
            if improves {
                distance.insert(v.clone(), Some(candidate));
                predecessor.insert(v.clone(), u.clone());
                last = Some(v.clone());
            }
        }
        Ok(last)
    }
}

/// Walks predecessor links back from a vertex relaxed in the extra round.
///
/// `n` steps are enough to leave any tail and land on the cycle; from there
/// the walk collects vertices until it returns to where it started.
fn extract_cycle<V: Hash + Eq + Clone>(
    predecessor: &VertexMap<V, V>,
    start: V,
    n: usize,
) -> Vec<V> {
    let mut on_cycle = start;
    for _ in 0..n {
        match predecessor.get(&on_cycle) {
            Some(p) => on_cycle = p.clone(),
            None => return Vec::new(),
        }
    }

    let mut cycle = vec![on_cycle.clone()];
    let mut cursor = on_cycle.clone();
    loop {
        let Some(p) = predecessor.get(&cursor) else {
            return Vec::new();
        };
        if *p == on_cycle || cycle.len() > n {
            break;
        }
        cycle.push(p.clone());
        cursor = p.clone();
    }
    cycle.reverse();
    cycle
}
