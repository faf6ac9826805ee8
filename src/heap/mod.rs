//! # Decrease-Key Priority Queues
//!
//! Min-priority queues over unique keys that support lowering a live key in
//! place. Both implementations keep an index from each live key to its
//! storage slot so that membership checks are O(1) and `decrease_key` never
//! has to search.
//!
//! - [`DaryHeap`]: implicit d-ary heap in a vector.
//! - [`pairing::PairingHeap`]: pairing heap in an index-addressed arena.

use std::hash::Hash;

use ahash::AHashMap;
use thiserror::Error;

pub mod pairing;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    #[error("key is already in the queue")]
    DuplicateKey,
    #[error("key is not in the queue")]
    UnknownKey,
    #[error("new key must be strictly smaller than the old key and not already queued")]
    InvalidDecreaseKey,
}

/// A min-priority queue with decrease-key over unique keys.
pub trait PriorityQueue<T> {
    /// Inserts a key that is not yet in the queue.
    fn push(&mut self, key: T) -> Result<(), HeapError>;

    /// The smallest live key, if any.
    fn min(&self) -> Option<&T>;

    /// Removes and returns the smallest key.
    fn pop_min(&mut self) -> Option<T>;

    /// Replaces the live key `old` with the strictly smaller `new`.
    fn decrease_key(&mut self, old: &T, new: T) -> Result<(), HeapError>;

    fn contains(&self, key: &T) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Checks the shared preconditions of `decrease_key`.
pub(crate) fn check_decrease<T: Ord>(
    old: &T,
    new: &T,
    old_live: bool,
    new_live: bool,
) -> Result<(), HeapError> {
    if !old_live {
        return Err(HeapError::UnknownKey);
    }
    if new >= old || new_live {
        return Err(HeapError::InvalidDecreaseKey);
    }
    Ok(())
}

/// Implicit d-ary min-heap.
///
/// `data[positions[k]] == k` holds for every live key `k` after each public
/// operation. The arity trades the number of levels against the number of
/// children compared per level when sifting down.
#[derive(Clone, Debug)]
pub struct DaryHeap<T> {
    data: Vec<T>,
    positions: AHashMap<T, usize>,
    arity: usize,
}

impl<T: Ord + Hash + Clone> DaryHeap<T> {
    pub fn new() -> Self {
        Self::with_arity(2)
    }

    /// Creates an empty heap where each node has up to `arity` children.
    pub fn with_arity(arity: usize) -> Self {
        assert!(arity >= 2, "heap arity must be at least 2");
        DaryHeap {
            data: Vec::new(),
            positions: AHashMap::new(),
            arity,
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    fn parent(&self, i: usize) -> usize {
        (i - 1) / self.arity
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.positions.insert(self.data[a].clone(), a);
        self.positions.insert(self.data[b].clone(), b);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = self.parent(i);
            if self.data[i] < self.data[parent] {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.data.len();
        // a node is internal while its leftmost child exists
        while i * self.arity + 1 < n {
            let first = i * self.arity + 1;
            let last = (first + self.arity).min(n);
            let mut smallest = first;
            for c in first + 1..last {
                if self.data[c] < self.data[smallest] {
                    smallest = c;
                }
            }

            if self.data[smallest] >= self.data[i] {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<T: Ord + Hash + Clone> Default for DaryHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Hash + Clone> PriorityQueue<T> for DaryHeap<T> {
    fn push(&mut self, key: T) -> Result<(), HeapError> {
        if self.positions.contains_key(&key) {
            return Err(HeapError::DuplicateKey);
        }
        let i = self.data.len();
        self.positions.insert(key.clone(), i);
        self.data.push(key);
        self.sift_up(i);
        Ok(())
    }

    fn min(&self) -> Option<&T> {
        self.data.first()
    }

    fn pop_min(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let min = self.data.swap_remove(0);
        self.positions.remove(&min);
        if let Some(root) = self.data.first() {
            self.positions.insert(root.clone(), 0);
            self.sift_down(0);
        }
        Some(min)
    }

    fn decrease_key(&mut self, old: &T, new: T) -> Result<(), HeapError> {
        check_decrease(
            old,
            &new,
            self.positions.contains_key(old),
            self.positions.contains_key(&new),
        )?;
        let Some(i) = self.positions.remove(old) else {
            unreachable!("checked above")
        };
        self.positions.insert(new.clone(), i);
        self.data[i] = new;
        // a smaller key can only move towards the root
        self.sift_up(i);
        Ok(())
    }

    fn contains(&self, key: &T) -> bool {
        self.positions.contains_key(key)
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
