//! # Text Format
//!
//! Graphs are written as whitespace-separated tokens:
//!
//! ```text
//! n m
//! v_1 v_2 ... v_n
//! s_1 d_1 [w_1]
//! ...
//! s_m d_m [w_m]
//! ```
//!
//! Weights appear for [`Network`] and [`FlowNetwork`] only. For a flow
//! network the first two vertices are the source and the sink. An
//! undirected [`Graph`] lists every edge once.
//!
//! Vertex order is written as stored, so reading back what was written
//! rebuilds the same structure. Readers accept any whitespace between
//! tokens and reject anything left over after the last edge.

use std::fmt::{self, Display};
use std::hash::Hash;
use std::marker::PhantomData;
use std::str::{FromStr, SplitWhitespace};

use itertools::Itertools;

use crate::{
    digraph::{DiGraph, GraphError},
    flow::FlowNetwork,
    graph::Graph,
    network::Network,
    weight::Weight,
};

pub mod error;
pub use error::TextError;

struct Tokens<'a, V> {
    inner: SplitWhitespace<'a>,
    vertex: PhantomData<V>,
}

impl<'a, V: FromStr> Tokens<'a, V> {
    fn new(s: &'a str) -> Self {
        Tokens {
            inner: s.split_whitespace(),
            vertex: PhantomData,
        }
    }

    fn next(&mut self, what: &'static str) -> Result<&'a str, TextError<V>> {
        self.inner.next().ok_or(TextError::MissingToken(what))
    }

    fn count(&mut self, what: &'static str) -> Result<usize, TextError<V>> {
        let token = self.next(what)?;
        token.parse().map_err(|_| TextError::BadCount {
            what,
            token: token.to_owned(),
        })
    }

    fn vertex(&mut self) -> Result<V, TextError<V>> {
        let token = self.next("a vertex")?;
        token
            .parse()
            .map_err(|_| TextError::BadVertex(token.to_owned()))
    }

    fn weight<W: FromStr>(&mut self) -> Result<W, TextError<V>> {
        let token = self.next("a weight")?;
        token
            .parse()
            .map_err(|_| TextError::BadWeight(token.to_owned()))
    }

    /// Reads the `n m` header and the vertex line.
    fn header(&mut self) -> Result<(Vec<V>, usize), TextError<V>> {
        let n = self.count("vertex")?;
        let m = self.count("edge")?;
        let vertices = (0..n).map(|_| self.vertex()).collect::<Result<_, _>>()?;
        Ok((vertices, m))
    }

    fn finish(mut self) -> Result<(), TextError<V>> {
        match self.inner.next() {
            Some(token) => Err(TextError::TrailingInput(token.to_owned())),
            None => Ok(()),
        }
    }
}

/// Networks that can be filled from weighted edge lines.
trait WeightedBuilder<V, W> {
    fn insert_vertex(&mut self, v: V) -> Result<(), GraphError<V>>;
    fn insert_edge(&mut self, s: V, d: V, w: W) -> Result<(), GraphError<V>>;

    fn read_edges(
        &mut self,
        tokens: &mut Tokens<'_, V>,
        vertices: impl IntoIterator<Item = V>,
        m: usize,
    ) -> Result<(), TextError<V>>
    where
        V: FromStr,
        W: FromStr,
    {
        for v in vertices {
            self.insert_vertex(v)?;
        }
        for _ in 0..m {
            let s = tokens.vertex()?;
            let d = tokens.vertex()?;
            let w = tokens.weight()?;
            self.insert_edge(s, d, w)?;
        }
        Ok(())
    }
}

impl<V: Hash + Eq + Clone, W: Weight> WeightedBuilder<V, W> for Network<V, W> {
    fn insert_vertex(&mut self, v: V) -> Result<(), GraphError<V>> {
        self.add_vertex(v)
    }

    fn insert_edge(&mut self, s: V, d: V, w: W) -> Result<(), GraphError<V>> {
        self.add_edge(s, d, w)
    }
}

impl<V: Hash + Eq + Clone, W: Weight> WeightedBuilder<V, W> for FlowNetwork<V, W> {
    fn insert_vertex(&mut self, v: V) -> Result<(), GraphError<V>> {
        self.add_vertex(v)
    }

    fn insert_edge(&mut self, s: V, d: V, w: W) -> Result<(), GraphError<V>> {
        self.add_edge(s, d, w)
    }
}

fn write_vertices<'a, V: Display + 'a>(
    f: &mut fmt::Formatter<'_>,
    n: usize,
    m: usize,
    vertices: impl Iterator<Item = &'a V>,
) -> fmt::Result {
    writeln!(f, "{n} {m}")?;
    writeln!(f, "{}", vertices.format(" "))
}

impl<V: Hash + Eq + Clone + Display> Display for DiGraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_vertices(f, self.n(), self.m(), self.vertices())?;
        for (s, d) in self.edges() {
            writeln!(f, "{s} {d}")?;
        }
        Ok(())
    }
}

impl<V: Hash + Eq + Clone + FromStr> FromStr for DiGraph<V> {
    type Err = TextError<V>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(s);
        let (vertices, m) = tokens.header()?;
        let mut graph = DiGraph::new();
        for v in vertices {
            graph.add_vertex(v)?;
        }
        for _ in 0..m {
            let source = tokens.vertex()?;
            let destination = tokens.vertex()?;
            graph.add_edge(source, destination)?;
        }
        tokens.finish()?;
        Ok(graph)
    }
}

impl<V: Hash + Eq + Clone + Display, W: Weight> Display for Network<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_vertices(f, self.n(), self.m(), self.vertices())?;
        for (s, d) in self.digraph().edges() {
            let w = self.cost(s, d).map_err(|_| fmt::Error)?;
            writeln!(f, "{s} {d} {w}")?;
        }
        Ok(())
    }
}

impl<V, W> FromStr for Network<V, W>
where
    V: Hash + Eq + Clone + FromStr,
    W: Weight + FromStr,
{
    type Err = TextError<V>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(s);
        let (vertices, m) = tokens.header()?;
        let mut network = Network::new();
        network.read_edges(&mut tokens, vertices, m)?;
        tokens.finish()?;
        Ok(network)
    }
}

impl<V: Hash + Eq + Clone + Display, W: Weight> Display for FlowNetwork<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // source and sink are always the first two vertices
        Display::fmt(&**self, f)
    }
}

impl<V, W> FromStr for FlowNetwork<V, W>
where
    V: Hash + Eq + Clone + FromStr,
    W: Weight + FromStr,
{
    type Err = TextError<V>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(s);
        let (vertices, m) = tokens.header()?;
        let mut vertices = vertices.into_iter();
        let (Some(source), Some(sink)) = (vertices.next(), vertices.next()) else {
            return Err(TextError::NoTerminals);
        };
        let mut network = FlowNetwork::new(source, sink)?;
        network.read_edges(&mut tokens, vertices, m)?;
        tokens.finish()?;
        Ok(network)
    }
}

impl<V: Hash + Eq + Clone + Display> Display for Graph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_vertices(f, self.n(), self.m(), self.vertices())?;
        for (v, w) in self.edges() {
            writeln!(f, "{v} {w}")?;
        }
        Ok(())
    }
}

impl<V: Hash + Eq + Clone + FromStr> FromStr for Graph<V> {
    type Err = TextError<V>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(s);
        let (vertices, m) = tokens.header()?;
        let mut graph = Graph::new();
        for v in vertices {
            graph.add_vertex(v)?;
        }
        for _ in 0..m {
            let v = tokens.vertex()?;
            let w = tokens.vertex()?;
            graph.add_edge(v, w)?;
        }
        tokens.finish()?;
        Ok(graph)
    }
}
