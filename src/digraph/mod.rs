//! # Directed Graphs
//!
//! [`DiGraph`] maps every vertex to its set of out-neighbours. There are no
//! parallel edges; self-loops are allowed. Every neighbour stored in an
//! adjacency set is itself a vertex of the graph.
//!
//! Strongly connected components are computed by the algorithms in
//! [`scc`], which work on a dense integer view of the adjacency built by
//! [`DiGraph::indexed_adjacency`].

use std::hash::Hash;

use thiserror::Error;

use crate::{heap::HeapError, VertexMap, VertexSet};

pub mod scc;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError<V> {
    #[error("vertex {0:?} already exists")]
    DuplicateVertex(V),
    #[error("vertex {0:?} does not exist")]
    UnknownVertex(V),
    #[error("edge {0:?} -> {1:?} already exists")]
    DuplicateEdge(V, V),
    #[error("edge {0:?} -> {1:?} does not exist")]
    MissingEdge(V, V),
    #[error("self-loop on {0:?} is not allowed")]
    SelfLoop(V),
    #[error("edge {from:?} -> {to:?} has negative weight reachable from the Dijkstra source")]
    NegativeEdge { from: V, to: V },
    #[error("edge {from:?} -> {to:?} has negative capacity")]
    NegativeCapacity { from: V, to: V },
    #[error("path weight overflowed while relaxing {from:?} -> {to:?}")]
    WeightOverflow { from: V, to: V },
    #[error("graph is not Eulerian")]
    NotEulerian,
    #[error(transparent)]
    Queue(#[from] HeapError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "V: serde::Serialize",
        deserialize = "V: serde::Deserialize<'de> + Hash + Eq"
    ))
)]
pub struct DiGraph<V: Hash + Eq> {
    adjacency: VertexMap<V, VertexSet<V>>,
}

impl<V: Hash + Eq + Clone> DiGraph<V> {
    pub fn new() -> Self {
        DiGraph {
            adjacency: VertexMap::default(),
        }
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    pub fn m(&self) -> usize {
        self.adjacency.values().map(|a| a.len()).sum()
    }

    pub fn is_vertex(&self, v: &V) -> bool {
        self.adjacency.contains_key(v)
    }

    pub fn is_edge(&self, s: &V, d: &V) -> Result<bool, GraphError<V>> {
        self.check_vertex(d)?;
        Ok(self.adjacent(s)?.contains(d))
    }

    pub fn out_degree(&self, v: &V) -> Result<usize, GraphError<V>> {
        Ok(self.adjacent(v)?.len())
    }

    pub fn in_degree(&self, v: &V) -> Result<usize, GraphError<V>> {
        self.check_vertex(v)?;
        Ok(self.adjacency.values().filter(|a| a.contains(v)).count())
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adjacency.keys()
    }

    /// Out-neighbours of `v` in insertion order.
    pub fn neighbors(&self, v: &V) -> Result<impl Iterator<Item = &V>, GraphError<V>> {
        Ok(self.adjacent(v)?.iter())
    }

    /// All edges, grouped by source.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> {
        self.adjacency
            .iter()
            .flat_map(|(s, adj)| adj.iter().map(move |d| (s, d)))
    }

    pub fn add_vertex(&mut self, v: V) -> Result<(), GraphError<V>> {
        if self.is_vertex(&v) {
            return Err(GraphError::DuplicateVertex(v));
        }
        self.adjacency.insert(v, VertexSet::default());
        Ok(())
    }

    /// Adds the edge `s -> d`. Returns `false` if it was already present.
    pub fn add_edge(&mut self, s: V, d: V) -> Result<bool, GraphError<V>> {
        self.check_vertex(&d)?;
        match self.adjacency.get_mut(&s) {
            Some(adj) => Ok(adj.insert(d)),
            None => Err(GraphError::UnknownVertex(s)),
        }
    }

    /// Like [`DiGraph::add_edge`] but fails if the edge already exists.
    pub fn add_edge_strict(&mut self, s: V, d: V) -> Result<(), GraphError<V>> {
        if self.is_edge(&s, &d)? {
            return Err(GraphError::DuplicateEdge(s, d));
        }
        self.add_edge(s, d).map(|_| ())
    }

    /// Removes `s -> d`. Returns `false` if there was no such edge.
    pub fn remove_edge(&mut self, s: &V, d: &V) -> Result<bool, GraphError<V>> {
        self.check_vertex(d)?;
        match self.adjacency.get_mut(s) {
            Some(adj) => Ok(adj.shift_remove(d)),
            None => Err(GraphError::UnknownVertex(s.clone())),
        }
    }

    /// A new graph on the same vertices with every edge flipped.
    pub fn reverse(&self) -> Self {
        let mut reversed = DiGraph {
            adjacency: self
                .adjacency
                .keys()
                .map(|v| (v.clone(), VertexSet::default()))
                .collect(),
        };
        for (s, d) in self.edges() {
            if let Some(adj) = reversed.adjacency.get_mut(d) {
                adj.insert(s.clone());
            }
        }
        reversed
    }

    /// Position of `v` in vertex order.
    pub fn index_of(&self, v: &V) -> Option<usize> {
        self.adjacency.get_index_of(v)
    }

    /// Vertex at position `i` in vertex order.
    pub fn vertex_at(&self, i: usize) -> Option<&V> {
        self.adjacency.get_index(i).map(|(v, _)| v)
    }

    /// Adjacency lists over vertex positions, preserving neighbour order.
    pub fn indexed_adjacency(&self) -> Vec<Vec<usize>> {
        self.adjacency
            .values()
            .map(|adj| {
                adj.iter()
                    .filter_map(|w| self.adjacency.get_index_of(w))
                    .collect()
            })
            .collect()
    }

    pub(crate) fn check_vertex(&self, v: &V) -> Result<(), GraphError<V>> {
        if self.is_vertex(v) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(v.clone()))
        }
    }

    fn adjacent(&self, v: &V) -> Result<&VertexSet<V>, GraphError<V>> {
        self.adjacency
            .get(v)
            .ok_or_else(|| GraphError::UnknownVertex(v.clone()))
    }
}

impl<V: Hash + Eq + Clone> Default for DiGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub mod test;
