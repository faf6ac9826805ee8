//! # Flow Networks
//!
//! A [`FlowNetwork`] is a [`Network`] whose weights are capacities, with a
//! fixed source and sink. Maximum flow follows the Edmonds-Karp policy:
//! each augmenting path is a fewest-edges path found by breadth-first
//! search, which bounds the number of augmentations by O(V E) regardless of
//! the capacities.
//!
//! [`FlowNetwork::augmenting_path`] works on the network in place, treating
//! its weights as residual capacities. [`FlowNetwork::max_flow`] runs it on a
//! private copy, so the network it is called on is left untouched.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::hash::Hash;
use std::ops::{AddAssign, Deref};

use tracing::{debug, trace};

use crate::{
    digraph::GraphError, network::Network, weight::Weight, VertexMap, VertexSet,
};

/// A flow from source to sink: every edge carries the amount pushed along it.
#[derive(Clone, Debug, PartialEq)]
pub struct Flow<V: Hash + Eq, W = f64> {
    network: Network<V, W>,
    source: V,
    sink: V,
}

impl<V: Hash + Eq, W> Deref for Flow<V, W> {
    type Target = Network<V, W>;

    fn deref(&self) -> &Self::Target {
        &self.network
    }
}

impl<V: Hash + Eq + Clone, W: Weight> Flow<V, W> {
    /// The zero flow on the vertices of `network`.
    fn zero(network: &Network<V, W>, source: &V, sink: &V) -> Self {
        Flow {
            network: Network::with_vertices_of(network),
            source: source.clone(),
            sink: sink.clone(),
        }
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    pub fn sink(&self) -> &V {
        &self.sink
    }

    /// True when no edge carries flow.
    pub fn is_empty(&self) -> bool {
        self.network.m() == 0
    }

    /// Total flow leaving the source.
    pub fn value(&self) -> W {
        self.network
            .neighbors(&self.source)
            .into_iter()
            .flatten()
            .filter_map(|n| self.network.cost(&self.source, n).ok())
            .fold(W::zero(), |acc, w| acc + w)
    }

    /// Flow carried by `s -> d`, zero if none.
    pub fn on_edge(&self, s: &V, d: &V) -> W {
        self.network.cost(s, d).unwrap_or_else(|_| W::zero())
    }

    /// Adds `amount` of flow along `s -> d`, first cancelling any flow on
    /// `d -> s`.
    fn push(&mut self, s: &V, d: &V, amount: W) -> Result<(), GraphError<V>> {
        let mut amount = amount;
        if self.network.is_edge(d, s)? {
            let opposing = self.network.cost(d, s)?;
            if opposing.total_cmp(&amount) == Ordering::Greater {
                self.network.set_cost(d, s, opposing - amount)?;
                return Ok(());
            }
            self.network.remove_edge(d, s)?;
            amount = amount - opposing;
            if amount.is_exhausted() {
                return Ok(());
            }
        }
        if self.network.is_edge(s, d)? {
            self.network.increase_cost(s, d, amount)?;
        } else {
            self.network.add_edge(s.clone(), d.clone(), amount)?;
        }
        Ok(())
    }
}

impl<V: Hash + Eq + Clone, W: Weight> AddAssign<&Flow<V, W>> for Flow<V, W> {
    fn add_assign(&mut self, other: &Flow<V, W>) {
        for edge in other.network.edges() {
            // both flows span the same vertex set
            let _ = self.push(&edge.source, &edge.destination, edge.weight);
        }
    }
}

/// A minimum source/sink cut.
#[derive(Clone, Debug, PartialEq)]
pub struct MinCut<V: Hash + Eq, W> {
    /// Vertices reachable from the source in the final residual network.
    pub source_side: VertexSet<V>,
    /// Total capacity of the edges leaving `source_side`.
    pub capacity: W,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "V: serde::Serialize, W: serde::Serialize",
        deserialize = "V: serde::Deserialize<'de> + Hash + Eq, W: serde::Deserialize<'de>"
    ))
)]
pub struct FlowNetwork<V: Hash + Eq, W = f64> {
    network: Network<V, W>,
    source: V,
    sink: V,
}

impl<V: Hash + Eq, W> Deref for FlowNetwork<V, W> {
    type Target = Network<V, W>;

    fn deref(&self) -> &Self::Target {
        &self.network
    }
}

impl<V: Hash + Eq + Clone, W: Weight> FlowNetwork<V, W> {
    /// A network holding just `source` and `sink`, in that order.
    pub fn new(source: V, sink: V) -> Result<Self, GraphError<V>> {
        let mut network = Network::new();
        network.add_vertex(source.clone())?;
        network.add_vertex(sink.clone())?;
        Ok(FlowNetwork {
            network,
            source,
            sink,
        })
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    pub fn sink(&self) -> &V {
        &self.sink
    }

    /// Adds a vertex; the source and sink are already present and are
    /// accepted without change.
    pub fn add_vertex(&mut self, v: V) -> Result<(), GraphError<V>> {
        if v == self.source || v == self.sink {
            return Ok(());
        }
        self.network.add_vertex(v)
    }

    /// Adds `s -> d` with a non-negative capacity.
    pub fn add_edge(&mut self, s: V, d: V, capacity: W) -> Result<(), GraphError<V>> {
        if capacity.is_negative() {
            return Err(GraphError::NegativeCapacity { from: s, to: d });
        }
        self.network.add_edge(s, d, capacity)
    }

    pub fn remove_edge(&mut self, s: &V, d: &V) -> Result<Option<W>, GraphError<V>> {
        self.network.remove_edge(s, d)
    }

    /// Vertices reached from the source over edges with capacity left, each
    /// mapped to the vertex it was discovered from.
    fn residual_search(&self) -> VertexMap<V, V> {
        let mut parent = VertexMap::default();
        parent.insert(self.source.clone(), self.source.clone());
        let mut queue = VecDeque::from([self.source.clone()]);

        while let Some(front) = queue.pop_front() {
            let Ok(neighbors) = self.network.neighbors(&front) else {
                continue;
            };
            for n in neighbors {
                if parent.contains_key(n) {
                    continue;
                }
                let open = self
                    .network
                    .cost(&front, n)
                    .is_ok_and(|c| !c.is_exhausted());
                if open {
                    parent.insert(n.clone(), front.clone());
                    if *n == self.sink {
                        return parent;
                    }
                    queue.push_back(n.clone());
                }
            }
        }
        parent
    }

    /// Finds a fewest-edges path with capacity left from source to sink and
    /// pushes its bottleneck capacity along it.
    ///
    /// The network is updated as a residual network: forward capacities on
    /// the path drop by the bottleneck, reverse capacities grow by it, and an
    /// edge with no capacity left is removed. Returns `None` when the sink is
    /// unreachable.
    pub fn augmenting_path(&mut self) -> Option<Flow<V, W>> {
        let parent = self.residual_search();
        if !parent.contains_key(&self.sink) {
            return None;
        }

        let mut path = Vec::new();
        let mut v = &self.sink;
        while *v != self.source {
            let p = parent.get(v)?;
            path.push((p.clone(), v.clone()));
            v = p;
        }
        path.reverse();

        let mut bottleneck = None;
        for (u, v) in &path {
            let c = self.network.cost(u, v).ok()?;
            bottleneck = match bottleneck {
                Some(b) if b <= c => Some(b),
                _ => Some(c),
            };
        }
        let bottleneck = bottleneck?;

        let mut flow = Flow::zero(&self.network, &self.source, &self.sink);
        for (u, v) in &path {
            flow.network.add_edge(u.clone(), v.clone(), bottleneck).ok()?;
            self.shift_residual(u, v, bottleneck).ok()?;
        }
        trace!(edges = path.len(), "augmented along path");
        Some(flow)
    }

    /// Moves `amount` of residual capacity from `u -> v` to `v -> u`.
    fn shift_residual(&mut self, u: &V, v: &V, amount: W) -> Result<(), GraphError<V>> {
        let left = self.network.cost(u, v)? - amount;
        if left.is_exhausted() {
            self.network.remove_edge(u, v)?;
        } else {
            self.network.set_cost(u, v, left)?;
        }

        if self.network.is_edge(v, u)? {
            self.network.increase_cost(v, u, amount)?;
        } else {
            self.network.add_edge(v.clone(), u.clone(), amount)?;
        }
        Ok(())
    }

    /// Runs augmenting paths to exhaustion on `residual`, summing them.
    fn saturate(&self, residual: &mut Self) -> Flow<V, W> {
        let mut total = Flow::zero(&self.network, &self.source, &self.sink);
        let mut augmentations = 0usize;
        while let Some(flow) = residual.augmenting_path() {
            total += &flow;
            augmentations += 1;
        }
        debug!(
            vertices = self.network.n(),
            edges = self.network.m(),
            augmentations,
            "max flow finished"
        );
        total
    }

    /// A maximum flow from source to sink.
    pub fn max_flow(&self) -> Flow<V, W> {
        let mut residual = self.clone();
        self.saturate(&mut residual)
    }

    /// A minimum cut, read off the residual network of a maximum flow.
    pub fn min_cut(&self) -> MinCut<V, W> {
        let mut residual = self.clone();
        self.saturate(&mut residual);
        let source_side: VertexSet<V> = residual.residual_search().into_keys().collect();

        let capacity = self
            .network
            .edges()
            .filter(|e| {
                source_side.contains(&e.source) && !source_side.contains(&e.destination)
            })
            .fold(W::zero(), |acc, e| acc + e.weight);
        MinCut {
            source_side,
            capacity,
        }
    }
}

#[cfg(test)]
pub mod test;
