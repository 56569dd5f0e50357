use log::trace;

use crate::Redwood;
use crate::node::NodeIndex;

impl<K, V> Redwood<K, V> {
    /// Lifts the right child of `center` into its place.
    ///
    /// `center` must have a non-nil right child. Cached sizes of the two
    /// nodes that swap levels are recomputed, every other subtree is left
    /// untouched.
    pub(crate) fn rotate_left(&mut self, center: NodeIndex) {
        trace!("rotate left at {center:?}");

        let grandparent_idx = self.node(center).parent;
        let pivot_idx = self.node(center).right;
        let c_idx = self.node(pivot_idx).left;

        self.node_mut(center).right = c_idx;
        if c_idx != Self::BLACK_NIL {
            self.node_mut(c_idx).parent = center;
        }

        self.node_mut(pivot_idx).left = center;
        self.node_mut(center).parent = pivot_idx;
        self.node_mut(pivot_idx).parent = grandparent_idx;

        self.replace_child(grandparent_idx, center, pivot_idx);
        self.resize_after_rotation(center, pivot_idx);
    }

    /// Mirror of [`Self::rotate_left`].
    pub(crate) fn rotate_right(&mut self, center: NodeIndex) {
        trace!("rotate right at {center:?}");

        let grandparent_idx = self.node(center).parent;
        let pivot_idx = self.node(center).left;
        let c_idx = self.node(pivot_idx).right;

        self.node_mut(center).left = c_idx;
        if c_idx != Self::BLACK_NIL {
            self.node_mut(c_idx).parent = center;
        }

        self.node_mut(pivot_idx).right = center;
        self.node_mut(center).parent = pivot_idx;
        self.node_mut(pivot_idx).parent = grandparent_idx;

        self.replace_child(grandparent_idx, center, pivot_idx);
        self.resize_after_rotation(center, pivot_idx);
    }

    /// Points the link of `parent` that held `old` at `new`, or makes `new`
    /// the root when `parent` is nil.
    pub(crate) fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if parent == Self::BLACK_NIL {
            self.root = new;
        } else if self.node(parent).right == old {
            self.node_mut(parent).right = new;
        } else {
            self.node_mut(parent).left = new;
        }
    }

    fn resize_after_rotation(&mut self, lowered: NodeIndex, lifted: NodeIndex) {
        self.node_mut(lifted).size = self.size_of(lowered);

        let lowered_node = self.node(lowered);
        let size = self.size_of(lowered_node.left) + self.size_of(lowered_node.right) + 1;
        self.node_mut(lowered).size = size;
    }
}
