//! # Netalgo
//!
//! Netalgo is a Rust library of classical graph and network algorithms over
//! vertices of any hashable type.
//!
//! It provides a directed graph with strongly connected component analysis,
//! weighted networks with Dijkstra and Bellman-Ford shortest paths (including
//! negative cycle extraction), flow networks with Edmonds-Karp maximum flow,
//! an undirected graph with the usual structural queries, a disjoint-set
//! forest, and two decrease-key priority queues used by the shortest path code.
//!
//! All containers keep their vertices in insertion order, so every algorithm
//! is deterministic for a given construction sequence.

pub mod arbitrage;
pub mod digraph;
pub mod disjoint_set;
pub mod flow;
pub mod graph;
pub mod heap;
pub mod network;
pub mod text;
pub mod weight;

/// Insertion-ordered map keyed by vertices.
pub type VertexMap<K, T> = indexmap::IndexMap<K, T, ahash::RandomState>;
/// Insertion-ordered vertex set.
pub type VertexSet<V> = indexmap::IndexSet<V, ahash::RandomState>;

pub use arbitrage::{ArbitrageError, RateMatrix};
pub use digraph::{scc::Components, DiGraph, GraphError};
pub use disjoint_set::{DisjointSet, SetError};
pub use flow::{Flow, FlowNetwork, MinCut};
pub use graph::{DepthFirst, Graph};
pub use heap::{pairing::PairingHeap, DaryHeap, HeapError, PriorityQueue};
pub use network::{
    shortest_path::{BellmanFord, ShortestPathTree},
    Network, WeightedEdge,
};
pub use text::TextError;
pub use weight::Weight;
