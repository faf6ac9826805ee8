use std::hash::Hash;

use ahash::AHashMap;
use derive_more::{From, Into};

use super::{check_decrease, HeapError, PriorityQueue};

/// Slot of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct NodeSlot(pub usize);

#[derive(Debug, Clone)]
struct PairingNode<T> {
    /// `None` once the slot has been freed.
    key: Option<T>,
    parent: Option<NodeSlot>,
    child: Option<NodeSlot>,
    next: Option<NodeSlot>,
    prev: Option<NodeSlot>,
}

impl<T> PairingNode<T> {
    fn new(key: T) -> Self {
        PairingNode {
            key: Some(key),
            parent: None,
            child: None,
            next: None,
            prev: None,
        }
    }
}

/// Pairing heap whose nodes live in a vector and link to each other by slot.
///
/// Children of a node form a doubly linked sibling list starting at
/// `child`; every child records its parent so a subtree can be cut out in
/// O(1) by `decrease_key`. Freed slots are reused by later pushes.
#[derive(Debug, Clone)]
pub struct PairingHeap<T> {
    nodes: Vec<PairingNode<T>>,
    free: Vec<NodeSlot>,
    root: Option<NodeSlot>,
    positions: AHashMap<T, NodeSlot>,
}

impl<T: Ord + Hash + Clone> PairingHeap<T> {
    pub fn new() -> Self {
        PairingHeap {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            positions: AHashMap::new(),
        }
    }

    fn key(&self, slot: NodeSlot) -> &T {
        self.nodes[slot.0].key.as_ref().expect("live node has a key")
    }

    fn alloc(&mut self, key: T) -> NodeSlot {
        let node = PairingNode::new(key);
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot.0] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                NodeSlot(self.nodes.len() - 1)
            }
        }
    }

    /// Links two detached trees, the larger root becoming the first child
    /// of the smaller one.
    fn meld(&mut self, a: Option<NodeSlot>, b: Option<NodeSlot>) -> Option<NodeSlot> {
        let (a, b) = match (a, b) {
            (None, b) => return b,
            (a, None) => return a,
            (Some(a), Some(b)) => (a, b),
        };
        let (top, below) = if self.key(a) < self.key(b) {
            (a, b)
        } else {
            (b, a)
        };

        let first = self.nodes[top.0].child;
        if let Some(first) = first {
            self.nodes[first.0].prev = Some(below);
        }
        let node = &mut self.nodes[below.0];
        node.next = first;
        node.prev = None;
        node.parent = Some(top);
        self.nodes[top.0].child = Some(below);
        Some(top)
    }

    /// Detaches the subtree rooted at `slot` from its parent and siblings.
    fn cut(&mut self, slot: NodeSlot) {
        let PairingNode {
            parent, next, prev, ..
        } = self.nodes[slot.0];
        match (prev, parent) {
            (Some(prev), _) => self.nodes[prev.0].next = next,
            (None, Some(parent)) => self.nodes[parent.0].child = next,
            (None, None) => {}
        }
        if let Some(next) = next {
            self.nodes[next.0].prev = prev;
        }
        let node = &mut self.nodes[slot.0];
        node.parent = None;
        node.next = None;
        node.prev = None;
    }

    fn children(&self, slot: NodeSlot) -> Vec<NodeSlot> {
        let mut children = Vec::new();
        let mut cursor = self.nodes[slot.0].child;
        while let Some(c) = cursor {
            children.push(c);
            cursor = self.nodes[c.0].next;
        }
        children
    }
}

impl<T: Ord + Hash + Clone> Default for PairingHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Hash + Clone> PriorityQueue<T> for PairingHeap<T> {
    fn push(&mut self, key: T) -> Result<(), HeapError> {
        if self.positions.contains_key(&key) {
            return Err(HeapError::DuplicateKey);
        }
        let slot = self.alloc(key.clone());
        self.positions.insert(key, slot);
        self.root = self.meld(self.root, Some(slot));
        Ok(())
    }

    fn min(&self) -> Option<&T> {
        self.root.map(|r| self.key(r))
    }

    fn pop_min(&mut self) -> Option<T> {
        let root = self.root?;
        let children = self.children(root);
        for &c in &children {
            let node = &mut self.nodes[c.0];
            node.parent = None;
            node.next = None;
            node.prev = None;
        }

        // first pass pairs siblings left to right, second melds right to left
        let mut pairs = Vec::with_capacity(children.len().div_ceil(2));
        for chunk in children.chunks(2) {
            let pair = self.meld(Some(chunk[0]), chunk.get(1).copied());
            pairs.push(pair);
        }
        let mut merged = None;
        while let Some(pair) = pairs.pop() {
            merged = self.meld(pair, merged);
        }
        self.root = merged;

        let node = &mut self.nodes[root.0];
        node.child = None;
        let key = node.key.take().expect("root has a key");
        self.free.push(root);
        self.positions.remove(&key);
        Some(key)
    }

    fn decrease_key(&mut self, old: &T, new: T) -> Result<(), HeapError> {
        check_decrease(
            old,
            &new,
            self.positions.contains_key(old),
            self.positions.contains_key(&new),
        )?;
        let Some(slot) = self.positions.remove(old) else {
            unreachable!("checked above")
        };
        self.positions.insert(new.clone(), slot);
        self.nodes[slot.0].key = Some(new);

        if self.root != Some(slot) {
            self.cut(slot);
            self.root = self.meld(self.root, Some(slot));
        }
        Ok(())
    }

    fn contains(&self, key: &T) -> bool {
        self.positions.contains_key(key)
    }

    fn len(&self) -> usize {
        self.positions.len()
    }
}
