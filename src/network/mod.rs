//! # Weighted Networks
//!
//! A [`Network`] is a [`DiGraph`] together with a weight for every edge.
//! The weights live in their own map keyed by `(source, destination)`; an
//! edge has a weight exactly when the adjacency contains it. Read-only graph
//! queries are available through `Deref` to the underlying digraph, while
//! every mutation goes through the network so both stay in step.
//!
//! Shortest path algorithms are in [`shortest_path`].

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use crate::{
    digraph::{DiGraph, GraphError},
    weight::Weight,
    VertexMap,
};

pub mod shortest_path;

/// An edge together with its weight.
///
/// Ordered by weight, then source, then destination, which is the order
/// Dijkstra's fringe is kept in.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedEdge<V, W> {
    pub source: V,
    pub destination: V,
    pub weight: W,
}

impl<V, W> WeightedEdge<V, W> {
    pub fn new(source: V, destination: V, weight: W) -> Self {
        WeightedEdge {
            source,
            destination,
            weight,
        }
    }
}

impl<V: Display, W: Display> Display for WeightedEdge<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.source, self.destination, self.weight)
    }
}

impl<V: Eq, W: Weight> PartialEq for WeightedEdge<V, W> {
    fn eq(&self, other: &Self) -> bool {
        self.weight.total_cmp(&other.weight) == Ordering::Equal
            && self.source == other.source
            && self.destination == other.destination
    }
}

impl<V: Eq, W: Weight> Eq for WeightedEdge<V, W> {}

impl<V: Hash, W: Weight> Hash for WeightedEdge<V, W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.destination.hash(state);
        self.weight.hash_weight(state);
    }
}

impl<V: Ord, W: Weight> PartialOrd for WeightedEdge<V, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Ord, W: Weight> Ord for WeightedEdge<V, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.destination.cmp(&other.destination))
    }
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
pub struct Network<V: Hash + Eq, W = f64> {
    graph: DiGraph<V>,
    weights: VertexMap<(V, V), W>,
}

impl<V: Hash + Eq, W> Deref for Network<V, W> {
    type Target = DiGraph<V>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

impl<V: Hash + Eq + Clone, W: Weight> Network<V, W> {
    pub fn new() -> Self {
        Network {
            graph: DiGraph::new(),
            weights: VertexMap::default(),
        }
    }

    /// A network on the same vertices as `other`, without edges.
    pub fn with_vertices_of(other: &DiGraph<V>) -> Self {
        let mut network = Self::new();
        for v in other.vertices() {
            // vertices of a graph are unique
            let _ = network.add_vertex(v.clone());
        }
        network
    }

    pub fn digraph(&self) -> &DiGraph<V> {
        &self.graph
    }

    pub fn add_vertex(&mut self, v: V) -> Result<(), GraphError<V>> {
        self.graph.add_vertex(v)
    }

    /// Adds `s -> d` with weight `w`, replacing the weight if the edge exists.
    pub fn add_edge(&mut self, s: V, d: V, w: W) -> Result<(), GraphError<V>> {
        self.graph.add_edge(s.clone(), d.clone())?;
        self.weights.insert((s, d), w);
        Ok(())
    }

    pub fn add_weighted_edge(&mut self, edge: WeightedEdge<V, W>) -> Result<(), GraphError<V>> {
        self.add_edge(edge.source, edge.destination, edge.weight)
    }

    /// Removes `s -> d`, returning its weight if it existed.
    pub fn remove_edge(&mut self, s: &V, d: &V) -> Result<Option<W>, GraphError<V>> {
        self.graph.remove_edge(s, d)?;
        Ok(self.weights.shift_remove(&(s.clone(), d.clone())))
    }

    pub fn cost(&self, s: &V, d: &V) -> Result<W, GraphError<V>> {
        self.graph.check_vertex(s)?;
        self.graph.check_vertex(d)?;
        self.weights
            .get(&(s.clone(), d.clone()))
            .copied()
            .ok_or_else(|| GraphError::MissingEdge(s.clone(), d.clone()))
    }

    /// Overwrites the weight of an existing edge.
    pub fn set_cost(&mut self, s: &V, d: &V, w: W) -> Result<(), GraphError<V>> {
        self.cost(s, d)?;
        self.weights.insert((s.clone(), d.clone()), w);
        Ok(())
    }

    /// Adds `delta` to the weight of an existing edge and returns the result.
    pub fn increase_cost(&mut self, s: &V, d: &V, delta: W) -> Result<W, GraphError<V>> {
        let w = self.cost(s, d)? + delta;
        self.weights.insert((s.clone(), d.clone()), w);
        Ok(w)
    }

    /// All edges with their weights, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = WeightedEdge<V, W>> + '_ {
        self.weights
            .iter()
            .map(|((s, d), w)| WeightedEdge::new(s.clone(), d.clone(), *w))
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> W {
        self.weights.values().fold(W::zero(), |acc, w| acc + *w)
    }

    /// A new network with every edge flipped, keeping its weight.
    pub fn reverse(&self) -> Self {
        let mut reversed = Self::with_vertices_of(&self.graph);
        for ((s, d), w) in &self.weights {
            reversed.graph.add_edge(d.clone(), s.clone()).ok();
            reversed.weights.insert((d.clone(), s.clone()), *w);
        }
        reversed
    }
}

impl<V: Hash + Eq + Clone, W: Weight> Default for Network<V, W> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub mod test;
