//! Ordered key-value map backed by a red-black tree.
//!
//! Nodes live in a per-tree arena and link to each other by index. Slot `0` of
//! every arena is that tree's nil sentinel: it is black, has no entry, and
//! stands for every missing child and for the parent of the root.
//!
//! ```
//! use redwood::Redwood;
//!
//! let mut tree = Redwood::new();
//! tree.insert(2, "two");
//! tree.insert(1, "one");
//! tree.insert(3, "three");
//!
//! assert_eq!(tree.get(&2), Some(&"two"));
//! assert_eq!(tree.min(), Ok(&1));
//! assert_eq!(tree.poll_max(), Ok((3, "three")));
//! assert!(tree.verify());
//! ```

extern crate alloc;

mod error;
mod insert;
mod iter;
mod map;
mod node;
mod remove;
mod rotate;
mod verify;

use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;
use log::debug;

pub use error::{InvariantViolation, RedwoodError};
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};

use node::{NodeIndex, RedwoodNode};

/*
vacated arena cells form a linked list threaded through their parent field. the head is stored in `free`:
- a new node takes the head cell, new head is storage[head].parent
- a removed node's cell gets storage[cell].parent = head, and then head = cell
*/

/// An ordered map from `K` to `V`.
///
/// Lookups, insertions and removals are `O(log n)`. Inserting a key that is
/// already present replaces its value.
#[derive(Clone)]
pub struct Redwood<K, V> {
    storage: Vec<RedwoodNode<K, V>>,
    root: NodeIndex,
    free: NodeIndex,
}

impl<K, V> Redwood<K, V> {
    pub(crate) const BLACK_NIL: NodeIndex = NodeIndex(0);

    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: alloc::vec![RedwoodNode::sentinel()],
            root: Self::BLACK_NIL,
            free: Self::BLACK_NIL,
        }
    }

    /// Creates an empty tree able to hold `capacity` entries before its arena
    /// reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut storage = Vec::with_capacity(capacity + 1);
        storage.push(RedwoodNode::sentinel());

        Self {
            storage,
            root: Self::BLACK_NIL,
            free: Self::BLACK_NIL,
        }
    }

    /// Reserves arena room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        debug!(
            "reserving {additional} node slots (current capacity {})",
            self.storage.capacity()
        );
        self.storage.reserve(additional);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.node(self.root).size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root == Self::BLACK_NIL
    }

    /// Drops every entry and releases all arena slots but the sentinel.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} entries", self.len());
        self.storage.truncate(1);
        self.storage[0] = RedwoodNode::sentinel();
        self.root = Self::BLACK_NIL;
        self.free = Self::BLACK_NIL;
    }

    /// Number of nodes on the longest path from the root down to a leaf, `0`
    /// for an empty tree.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut highest = 0;
        let mut stack = Vec::new();

        if self.root != Self::BLACK_NIL {
            stack.push((self.root, 1));
        }

        while let Some((idx, depth)) = stack.pop() {
            highest = highest.max(depth);
            let node = self.node(idx);

            for child in [node.left_child(), node.right_child()] {
                if child != Self::BLACK_NIL {
                    stack.push((child, depth + 1));
                }
            }
        }

        highest
    }

    /// Smallest key in the tree.
    pub fn min(&self) -> Result<&K, RedwoodError> {
        let idx = self.min_of(self.root)?;
        self.node(idx).key().ok_or(RedwoodError::EmptyTree)
    }

    /// Largest key in the tree.
    pub fn max(&self) -> Result<&K, RedwoodError> {
        let idx = self.max_of(self.root)?;
        self.node(idx).key().ok_or(RedwoodError::EmptyTree)
    }

    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let idx = self.min_of(self.root).ok()?;
        self.node(idx).entry.as_ref().map(|(k, v)| (k, v))
    }

    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let idx = self.max_of(self.root).ok()?;
        self.node(idx).entry.as_ref().map(|(k, v)| (k, v))
    }

    /// Linear scan over every value.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Leftmost node of the subtree rooted at `subtree`.
    pub(crate) fn min_of(&self, subtree: NodeIndex) -> Result<NodeIndex, RedwoodError> {
        if subtree == Self::BLACK_NIL {
            return Err(RedwoodError::EmptyTree);
        }

        let mut current = subtree;
        while self.node(current).left_child() != Self::BLACK_NIL {
            current = self.node(current).left_child();
        }

        Ok(current)
    }

    /// Rightmost node of the subtree rooted at `subtree`.
    pub(crate) fn max_of(&self, subtree: NodeIndex) -> Result<NodeIndex, RedwoodError> {
        if subtree == Self::BLACK_NIL {
            return Err(RedwoodError::EmptyTree);
        }

        let mut current = subtree;
        while self.node(current).right_child() != Self::BLACK_NIL {
            current = self.node(current).right_child();
        }

        Ok(current)
    }

    #[inline]
    pub(crate) fn node(&self, idx: NodeIndex) -> &RedwoodNode<K, V> {
        &self.storage[idx.0]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, idx: NodeIndex) -> &mut RedwoodNode<K, V> {
        &mut self.storage[idx.0]
    }

    #[inline]
    pub(crate) fn size_of(&self, idx: NodeIndex) -> usize {
        self.node(idx).size
    }

    pub(crate) fn is_left_child(&self, idx: NodeIndex) -> bool {
        let parent = self.node(idx).parent;
        idx != Self::BLACK_NIL && parent != Self::BLACK_NIL && self.node(parent).left == idx
    }

    pub(crate) fn is_right_child(&self, idx: NodeIndex) -> bool {
        let parent = self.node(idx).parent;
        idx != Self::BLACK_NIL && parent != Self::BLACK_NIL && self.node(parent).right == idx
    }

    /// Stores `node` in a vacated cell if there is one, otherwise at the end of
    /// the arena.
    pub(crate) fn allocate(&mut self, node: RedwoodNode<K, V>) -> NodeIndex {
        if self.free == Self::BLACK_NIL {
            self.storage.push(node);
            return NodeIndex(self.storage.len() - 1);
        }

        let cell = self.free;
        self.free = self.node(cell).parent;
        self.storage[cell.0] = node;

        cell
    }

    /// Vacates `idx`, handing back its entry.
    pub(crate) fn release(&mut self, idx: NodeIndex) -> Option<(K, V)> {
        let free_head = self.free;
        let node = self.node_mut(idx);
        let entry = node.entry.take();

        node.parent = free_head;
        node.left = Self::BLACK_NIL;
        node.right = Self::BLACK_NIL;
        node.size = 0;
        self.free = idx;

        entry
    }
}

impl<K: Ord, V> Redwood<K, V> {
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.node(self.find(key)).value()
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let idx = self.find(key);
        self.node_mut(idx).entry.as_mut().map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.node(self.find(key)).entry.as_ref().map(|(k, v)| (k, v))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key) != Self::BLACK_NIL
    }

    /// Node holding `key`, or the sentinel when it is absent.
    pub(crate) fn find<Q>(&self, key: &Q) -> NodeIndex
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current_node = self.root;

        while let Some(curr_key) = self.node(current_node).key() {
            let curr_node_storage = self.node(current_node);

            match key.cmp(curr_key.borrow()) {
                Ordering::Less => {
                    current_node = curr_node_storage.left;
                }
                Ordering::Equal => {
                    return current_node;
                }
                Ordering::Greater => {
                    current_node = curr_node_storage.right;
                }
            }
        }

        Self::BLACK_NIL
    }
}

impl<K, V> Default for Redwood<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
