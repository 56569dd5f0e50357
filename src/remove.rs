use core::borrow::Borrow;

use log::trace;

use crate::node::{NodeColor, NodeIndex};
use crate::{Redwood, RedwoodError};

impl<K: Ord, V> Redwood<K, V> {
    /// Removes `key` from the tree, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let idx = self.find(key);
        if idx == Self::BLACK_NIL {
            return None;
        }

        self.delete_node(idx)
    }
}

impl<K, V> Redwood<K, V> {
    /// Removes and returns the entry with the smallest key.
    pub fn poll_min(&mut self) -> Result<(K, V), RedwoodError> {
        let idx = self.min_of(self.root)?;
        self.delete_node(idx).ok_or(RedwoodError::EmptyTree)
    }

    /// Removes and returns the entry with the largest key.
    pub fn poll_max(&mut self) -> Result<(K, V), RedwoodError> {
        let idx = self.max_of(self.root)?;
        self.delete_node(idx).ok_or(RedwoodError::EmptyTree)
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.poll_min().ok()
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.poll_max().ok()
    }

    /// Unlinks the node at `target` and restores the red-black properties.
    ///
    /// A node with two children trades entries with its in-order successor,
    /// and the successor's cell is the one spliced out.
    fn delete_node(&mut self, target: NodeIndex) -> Option<(K, V)> {
        let target_node = self.node(target);
        let spliced = if target_node.left != Self::BLACK_NIL && target_node.right != Self::BLACK_NIL {
            let successor = self.min_of(target_node.right).ok()?;
            self.swap_entries(target, successor);
            successor
        } else {
            target
        };

        let spliced_node = self.node(spliced);
        let child = if spliced_node.left != Self::BLACK_NIL {
            spliced_node.left
        } else {
            spliced_node.right
        };
        let parent = spliced_node.parent;
        let spliced_color = spliced_node.color;

        trace!("splicing out {spliced:?}, child {child:?} moves under {parent:?}");

        self.replace_child(parent, spliced, child);
        if child != Self::BLACK_NIL {
            self.node_mut(child).parent = parent;
        }

        let mut ancestor = parent;
        while ancestor != Self::BLACK_NIL {
            let node = self.node_mut(ancestor);
            node.size -= 1;
            ancestor = node.parent;
        }

        let entry = self.release(spliced);

        if spliced_color == NodeColor::Black {
            self.fix_double_black(child, parent);
        }

        entry
    }

    fn swap_entries(&mut self, a: NodeIndex, b: NodeIndex) {
        let a_entry = self.node_mut(a).entry.take();
        let b_entry = core::mem::replace(&mut self.node_mut(b).entry, a_entry);
        self.node_mut(a).entry = b_entry;
    }

    /// Colors `idx`, leaving the sentinel black whatever is asked.
    fn paint(&mut self, idx: NodeIndex, color: NodeColor) {
        if idx != Self::BLACK_NIL {
            self.node_mut(idx).color = color;
        }
    }

    /// Restores uniform black height after a black node was spliced out from
    /// under `parent`, leaving `current` (possibly nil) one black short.
    ///
    /// `parent` is threaded explicitly because `current` may be the sentinel,
    /// whose parent link is never maintained.
    fn fix_double_black(&mut self, current: NodeIndex, parent: NodeIndex) {
        let mut curr_node = current;
        let mut parent_idx = parent;

        while curr_node != self.root && self.node(curr_node).is_black() {
            let is_left = self.node(parent_idx).left == curr_node;
            let mut sibling = if is_left {
                self.node(parent_idx).right
            } else {
                self.node(parent_idx).left
            };

            if self.node(sibling).is_red() {
                trace!("delete fixup under {parent_idx:?}: red sibling");

                self.paint(sibling, NodeColor::Black);
                self.paint(parent_idx, NodeColor::Red);
                if is_left {
                    self.rotate_left(parent_idx);
                    sibling = self.node(parent_idx).right;
                } else {
                    self.rotate_right(parent_idx);
                    sibling = self.node(parent_idx).left;
                }
            }

            let sibling_node = self.node(sibling);
            let (near, far) = if is_left {
                (sibling_node.left, sibling_node.right)
            } else {
                (sibling_node.right, sibling_node.left)
            };

            if self.node(near).is_black() && self.node(far).is_black() {
                trace!("delete fixup under {parent_idx:?}: black nephews, pushing up");

                self.paint(sibling, NodeColor::Red);
                curr_node = parent_idx;
                parent_idx = self.node(curr_node).parent;
                continue;
            }

            if self.node(far).is_black() {
                trace!("delete fixup under {parent_idx:?}: red near nephew");

                self.paint(near, NodeColor::Black);
                self.paint(sibling, NodeColor::Red);
                if is_left {
                    self.rotate_right(sibling);
                    sibling = self.node(parent_idx).right;
                } else {
                    self.rotate_left(sibling);
                    sibling = self.node(parent_idx).left;
                }
            }

            trace!("delete fixup under {parent_idx:?}: red far nephew, rotating parent");

            let parent_color = self.node(parent_idx).color;
            let far = if is_left {
                self.node(sibling).right
            } else {
                self.node(sibling).left
            };

            self.paint(sibling, parent_color);
            self.paint(parent_idx, NodeColor::Black);
            self.paint(far, NodeColor::Black);
            if is_left {
                self.rotate_left(parent_idx);
            } else {
                self.rotate_right(parent_idx);
            }

            curr_node = self.root;
        }

        self.paint(curr_node, NodeColor::Black);
    }
}
