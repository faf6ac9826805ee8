//! # Undirected Graphs
//!
//! [`Graph`] is a simple undirected graph: no self-loops, no parallel edges.
//! Each edge `{v, w}` is stored in both adjacency sets.

use std::collections::VecDeque;
use std::hash::Hash;

use tracing::debug;

use crate::{digraph::GraphError, VertexMap, VertexSet};

/// Everything a depth-first search records.
///
/// `tree` maps each child to its parent; `back` maps a vertex to the
/// last ancestor it reaches by a back edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthFirst<V: Hash + Eq> {
    pub pre: VertexMap<V, usize>,
    pub post: VertexMap<V, usize>,
    pub low: VertexMap<V, usize>,
    pub tree: VertexMap<V, V>,
    pub back: VertexMap<V, V>,
}

impl<V: Hash + Eq> Default for DepthFirst<V> {
    fn default() -> Self {
        DepthFirst {
            pre: VertexMap::default(),
            post: VertexMap::default(),
            low: VertexMap::default(),
            tree: VertexMap::default(),
            back: VertexMap::default(),
        }
    }
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
pub struct Graph<V: Hash + Eq> {
    adjacency: VertexMap<V, VertexSet<V>>,
}

impl<V: Hash + Eq + Clone> Graph<V> {
    pub fn new() -> Self {
        Graph {
            adjacency: VertexMap::default(),
        }
    }

    pub fn n(&self) -> usize {
        self.adjacency.len()
    }

    pub fn m(&self) -> usize {
        self.adjacency.values().map(|a| a.len()).sum::<usize>() / 2
    }

    pub fn is_vertex(&self, v: &V) -> bool {
        self.adjacency.contains_key(v)
    }

    pub fn is_edge(&self, v: &V, w: &V) -> Result<bool, GraphError<V>> {
        self.check_vertex(w)?;
        Ok(self.adjacent(v)?.contains(w))
    }

    pub fn degree(&self, v: &V) -> Result<usize, GraphError<V>> {
        Ok(self.adjacent(v)?.len())
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adjacency.keys()
    }

    pub fn neighbors(&self, v: &V) -> Result<impl Iterator<Item = &V>, GraphError<V>> {
        Ok(self.adjacent(v)?.iter())
    }

    /// Each edge once, as `(v, w)` with `v` added before `w`.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> {
        self.adjacency.iter().enumerate().flat_map(move |(i, (v, adj))| {
            adj.iter()
                .filter(move |w| self.adjacency.get_index_of(*w).is_some_and(|j| i < j))
                .map(move |w| (v, w))
        })
    }

    pub fn add_vertex(&mut self, v: V) -> Result<(), GraphError<V>> {
        if self.is_vertex(&v) {
            return Err(GraphError::DuplicateVertex(v));
        }
        self.adjacency.insert(v, VertexSet::default());
        Ok(())
    }

    /// Adds `{v, w}`. Returns `false` if it was already present.
    pub fn add_edge(&mut self, v: V, w: V) -> Result<bool, GraphError<V>> {
        self.check_vertex(&v)?;
        self.check_vertex(&w)?;
        if v == w {
            return Err(GraphError::SelfLoop(v));
        }
        let present = self.adjacency[&v].contains(&w);
        if let Some(adj) = self.adjacency.get_mut(&w) {
            adj.insert(v.clone());
        }
        if let Some(adj) = self.adjacency.get_mut(&v) {
            adj.insert(w);
        }
        Ok(!present)
    }

    /// Removes `{v, w}`. Returns `false` if there was no such edge.
    pub fn remove_edge(&mut self, v: &V, w: &V) -> Result<bool, GraphError<V>> {
        self.check_vertex(v)?;
        self.check_vertex(w)?;
        let removed = self
            .adjacency
            .get_mut(v)
            .is_some_and(|adj| adj.shift_remove(w));
        if let Some(adj) = self.adjacency.get_mut(w) {
            adj.shift_remove(v);
        }
        Ok(removed)
    }

    /// Breadth-first search from `source`. Every reached vertex is mapped to
    /// the vertex it was discovered from; the source maps to itself.
    pub fn bfs(&self, source: &V) -> Result<VertexMap<V, V>, GraphError<V>> {
        self.check_vertex(source)?;
        let mut parent = VertexMap::default();
        parent.insert(source.clone(), source.clone());
        let mut queue = VecDeque::from([source.clone()]);

        while let Some(front) = queue.pop_front() {
            for w in self.adjacent(&front)? {
                if !parent.contains_key(w) {
                    parent.insert(w.clone(), front.clone());
                    queue.push_back(w.clone());
                }
            }
        }
        Ok(parent)
    }

    /// Depth-first search from `source`, numbering vertices from zero.
    pub fn dfs(&self, source: &V) -> Result<DepthFirst<V>, GraphError<V>> {
        let mut search = DepthFirst::default();
        let mut time = 0;
        self.dfs_from(source, &mut time, &mut search)?;
        Ok(search)
    }

    /// Depth-first search from `source`, continuing the numbering at `time`
    /// and skipping anything already in `search`.
    ///
    /// A neighbour other than the tree parent that has already been numbered
    /// is a back edge. On return from a child the parent's low number takes
    /// the child's.
    pub fn dfs_from(
        &self,
        source: &V,
        time: &mut usize,
        search: &mut DepthFirst<V>,
    ) -> Result<(), GraphError<V>> {
        self.check_vertex(source)?;
        if search.pre.contains_key(source) {
            return Ok(());
        }

        struct Frame<V> {
            vertex: V,
            next: usize,
        }

        search.pre.insert(source.clone(), *time);
        search.low.insert(source.clone(), *time);
        *time += 1;
        let mut stack = vec![Frame {
            vertex: source.clone(),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let adj = self.adjacent(&frame.vertex)?;
            let Some(w) = adj.get_index(frame.next) else {
                let done = frame.vertex.clone();
                stack.pop();
                search.post.insert(done.clone(), *time);
                *time += 1;
                if let Some(parent) = stack.last() {
                    let child_low = search.low[&done];
                    let low = &mut search.low[&parent.vertex];
                    *low = (*low).min(child_low);
                }
                continue;
            };
            frame.next += 1;
            let v = frame.vertex.clone();

            if !search.pre.contains_key(w) {
                search.tree.insert(w.clone(), v);
                search.pre.insert(w.clone(), *time);
                search.low.insert(w.clone(), *time);
                *time += 1;
                stack.push(Frame {
                    vertex: w.clone(),
                    next: 0,
                });
            } else if search.tree.get(&v) != Some(w) {
                search.back.insert(v.clone(), w.clone());
                let pre_w = search.pre[w];
                let low = &mut search.low[&v];
                *low = (*low).min(pre_w);
            }
        }
        Ok(())
    }

    /// Number of connected components.
    pub fn components(&self) -> usize {
        let mut visited = VertexSet::default();
        let mut count = 0;
        for v in self.vertices() {
            if visited.contains(v) {
                continue;
            }
            count += 1;
            if let Ok(parent) = self.bfs(v) {
                visited.extend(parent.into_keys());
            }
        }
        count
    }

    pub fn is_connected(&self) -> bool {
        self.components() == 1
    }

    /// A forest has exactly `n - c` edges.
    pub fn is_acyclic(&self) -> bool {
        self.n() == self.m() + self.components()
    }

    pub fn is_tree(&self) -> bool {
        self.is_connected() && self.is_acyclic()
    }

    /// Two-colours every component breadth-first.
    pub fn is_bipartite(&self) -> bool {
        let mut colour: VertexMap<V, bool> = VertexMap::default();
        for start in self.vertices() {
            if colour.contains_key(start) {
                continue;
            }
            colour.insert(start.clone(), false);
            let mut queue = VecDeque::from([start]);
            while let Some(front) = queue.pop_front() {
                let side = colour[front];
                for w in &self.adjacency[front] {
                    match colour.get(w) {
                        None => {
                            colour.insert(w.clone(), !side);
                            queue.push_back(w);
                        }
                        Some(&c) if c == side => return false,
                        Some(_) => {}
                    }
                }
            }
        }
        true
    }

    pub fn is_complete(&self) -> bool {
        let n = self.n();
        2 * self.m() == n * n.saturating_sub(1)
    }

    /// Connected with every degree even.
    pub fn is_eulerian(&self) -> bool {
        self.adjacency.values().all(|adj| adj.len() % 2 == 0) && self.is_connected()
    }

    /// A closed walk using every edge exactly once, starting and ending at
    /// the first vertex.
    ///
    /// Hierholzer's algorithm on a copy of the graph: follow unused edges
    /// from the top of a stack, and emit a vertex once it has none left.
    pub fn eulerian_cycle(&self) -> Result<Vec<V>, GraphError<V>> {
        if !self.is_eulerian() {
            return Err(GraphError::NotEulerian);
        }
        let mut unused = self.clone();
        let Some(start) = self.vertices().next() else {
            return Err(GraphError::NotEulerian);
        };

        let mut cycle = Vec::with_capacity(self.m() + 1);
        let mut stack = vec![start.clone()];
        while let Some(top) = stack.last() {
            let top = top.clone();
            match unused.adjacent(&top)?.first().cloned() {
                Some(w) => {
                    unused.remove_edge(&top, &w)?;
                    stack.push(w);
                }
                None => {
                    stack.pop();
                    cycle.push(top);
                }
            }
        }
        debug!(
            vertices = self.n(),
            edges = self.m(),
            "eulerian cycle found"
        );
        Ok(cycle)
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

impl<V: Hash + Eq + Clone> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}
