//! # Disjoint Sets
//!
//! Union-find over arbitrary hashable values. Members live in a contiguous
//! arena; each member owns a node which is either the root of its set,
//! carrying the union-by-rank value, or a child pointing at its parent.
//!
//! Nodes are kept in [`Cell`]s so that [`DisjointSet::find`] can compress
//! paths through a shared reference.

use std::{cell::Cell, hash::Hash};

use ahash::AHashMap;
use derive_more::{From, Into};
use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct ParentPointer(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DsNode {
    Root { rank: usize },
    Child(ParentPointer),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetError<T> {
    #[error("{0:?} is already a member")]
    DuplicateSetMember(T),
    #[error("{0:?} is not a member")]
    UnknownSetMember(T),
}

#[derive(Debug, Clone)]
pub struct DisjointSet<T: Hash + Eq> {
    elements: Vec<T>,
    nodes: Vec<Cell<DsNode>>,
    index: AHashMap<T, ParentPointer>,
    n_sets: usize,
}

impl<T: Hash + Eq + Clone> DisjointSet<T> {
    pub fn new() -> Self {
        DisjointSet {
            elements: Vec::new(),
            nodes: Vec::new(),
            index: AHashMap::new(),
            n_sets: 0,
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of disjoint sets.
    pub fn n_sets(&self) -> usize {
        self.n_sets
    }

    pub fn contains(&self, x: &T) -> bool {
        self.index.contains_key(x)
    }

    /// Adds `x` as a singleton set.
    pub fn make_set(&mut self, x: T) -> Result<(), SetError<T>> {
        if self.contains(&x) {
            return Err(SetError::DuplicateSetMember(x));
        }
        let ptr = ParentPointer(self.elements.len());
        self.elements.push(x.clone());
        self.nodes.push(Cell::new(DsNode::Root { rank: 0 }));
        self.index.insert(x, ptr);
        self.n_sets += 1;
        Ok(())
    }

    /// The representative of the set containing `x`.
    pub fn find(&self, x: &T) -> Result<&T, SetError<T>> {
        let root = self.find_root(self.pointer(x)?);
        Ok(&self.elements[root.0])
    }

    /// Merges the sets containing `x` and `y`. Returns `false` if they were
    /// already the same set.
    ///
    /// The root of lower rank goes under the other. On equal ranks `y`'s
    /// root goes under `x`'s, whose rank grows by one.
    pub fn join(&mut self, x: &T, y: &T) -> Result<bool, SetError<T>> {
        let root_x = self.find_root(self.pointer(x)?);
        let root_y = self.find_root(self.pointer(y)?);
        if root_x == root_y {
            return Ok(false);
        }

        let rank_x = self.rank(root_x);
        let rank_y = self.rank(root_y);
        let (winner, loser) = if rank_x < rank_y {
            (root_y, root_x)
        } else {
            (root_x, root_y)
        };
        if rank_x == rank_y {
            self.nodes[winner.0].set(DsNode::Root { rank: rank_x + 1 });
        }
        self.nodes[loser.0].set(DsNode::Child(winner));
        self.n_sets -= 1;
        Ok(true)
    }

    pub fn same_set(&self, x: &T, y: &T) -> Result<bool, SetError<T>> {
        Ok(self.find_root(self.pointer(x)?) == self.find_root(self.pointer(y)?))
    }

    /// Members grouped by set, sets ordered by their first-added member.
    pub fn sets(&self) -> Vec<Vec<T>> {
        let groups = (0..self.elements.len())
            .map(|i| (self.find_root(ParentPointer(i)), self.elements[i].clone()))
            .into_group_map();
        groups
            .into_iter()
            .sorted_by_key(|(_, members)| {
                members
                    .first()
                    .and_then(|m| self.index.get(m))
                    .map(|p| p.0)
            })
            .map(|(_, members)| members)
            .collect()
    }

    fn pointer(&self, x: &T) -> Result<ParentPointer, SetError<T>> {
        self.index
            .get(x)
            .copied()
            .ok_or_else(|| SetError::UnknownSetMember(x.clone()))
    }

    fn rank(&self, root: ParentPointer) -> usize {
        match self.nodes[root.0].get() {
            DsNode::Root { rank } => rank,
            DsNode::Child(_) => unreachable!("rank is only read from roots"),
        }
    }

    /// Walks to the root, then points every node on the way directly at it.
    fn find_root(&self, x: ParentPointer) -> ParentPointer {
        let mut root = x;
        while let DsNode::Child(parent) = self.nodes[root.0].get() {
            root = parent;
        }

        let mut cursor = x;
        while let DsNode::Child(parent) = self.nodes[cursor.0].get() {
            self.nodes[cursor.0].set(DsNode::Child(root));
            cursor = parent;
        }
        root
    }
}

impl<T: Hash + Eq + Clone> Default for DisjointSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
