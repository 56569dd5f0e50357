use core::cmp::Ordering;
use core::mem;

use log::trace;

use crate::Redwood;
use crate::node::{NodeColor, NodeIndex, RedwoodNode};

impl<K: Ord, V> Redwood<K, V> {
    /// Inserts `value` under `key`.
    ///
    /// If `key` is already present its value is overwritten in place and the
    /// previous value is returned; the shape of the tree does not change.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut current_node = self.root;
        let mut parent_node = Self::BLACK_NIL;
        let mut goes_left = false;

        while let Some(curr_key) = self.node(current_node).key() {
            match key.cmp(curr_key) {
                Ordering::Less => {
                    parent_node = current_node;
                    goes_left = true;
                    current_node = self.node(current_node).left;
                }
                Ordering::Equal => {
                    return self
                        .node_mut(current_node)
                        .entry
                        .as_mut()
                        .map(|(_, old)| mem::replace(old, value));
                }
                Ordering::Greater => {
                    parent_node = current_node;
                    goes_left = false;
                    current_node = self.node(current_node).right;
                }
            }
        }

        let new_node_pos = self.allocate(RedwoodNode::new_isolated(key, value, parent_node));

        if parent_node == Self::BLACK_NIL {
            self.root = new_node_pos;
        } else if goes_left {
            self.node_mut(parent_node).left = new_node_pos;
        } else {
            self.node_mut(parent_node).right = new_node_pos;
        }

        let mut ancestor = parent_node;
        while ancestor != Self::BLACK_NIL {
            let node = self.node_mut(ancestor);
            node.size += 1;
            ancestor = node.parent;
        }

        self.fix_red_violation(new_node_pos);

        None
    }

    fn fix_red_violation(&mut self, start_node_idx: NodeIndex) {
        let mut curr_node = start_node_idx;

        while self.node(self.node(curr_node).parent).is_red() {
            let parent_idx = self.node(curr_node).parent;
            let grandparent_idx = self.node(parent_idx).parent;

            // a red parent is never the root, so the grandparent is a real node
            let parent_is_right_child = self.is_right_child(parent_idx);
            let grandparent = self.node(grandparent_idx);
            let uncle = if parent_is_right_child {
                grandparent.left
            } else {
                grandparent.right
            };

            if self.node(uncle).is_red() {
                trace!("insert fixup at {curr_node:?}: red uncle, recoloring");

                self.node_mut(parent_idx).color = NodeColor::Black;
                self.node_mut(uncle).color = NodeColor::Black;
                self.node_mut(grandparent_idx).color = NodeColor::Red;

                curr_node = grandparent_idx;
                continue;
            }

            let is_inner_grandchild = if parent_is_right_child {
                self.is_left_child(curr_node)
            } else {
                self.is_right_child(curr_node)
            };

            if is_inner_grandchild {
                trace!("insert fixup at {curr_node:?}: inner grandchild, straightening");

                if parent_is_right_child {
                    self.rotate_right(parent_idx);
                } else {
                    self.rotate_left(parent_idx);
                }

                curr_node = parent_idx;
                continue;
            }

            trace!("insert fixup at {curr_node:?}: outer grandchild, rotating grandparent");

            self.node_mut(parent_idx).color = NodeColor::Black;
            self.node_mut(grandparent_idx).color = NodeColor::Red;

            if parent_is_right_child {
                self.rotate_left(grandparent_idx);
            } else {
                self.rotate_right(grandparent_idx);
            }
        }

        let root = self.root;
        self.node_mut(root).color = NodeColor::Black;
    }
}
