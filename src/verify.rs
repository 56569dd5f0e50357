use alloc::vec;
use alloc::vec::Vec;

use crate::node::NodeIndex;
use crate::{InvariantViolation, Redwood};

const MISMATCH: usize = usize::MAX;

impl<K, V> Redwood<K, V> {
    /// Audits the red-black coloring: the root is black, no red node has a red
    /// child, and every root-to-leaf path crosses the same number of black
    /// nodes. An empty tree is always valid.
    #[must_use]
    pub fn verify(&self) -> bool {
        if self.is_empty() {
            return true;
        }

        self.root_is_black() && self.no_red_red_edge() && self.black_height().is_some()
    }

    // 2: the root is black
    fn root_is_black(&self) -> bool {
        self.node(self.root).is_black()
    }

    // 3: the sentinel is black, keyless, and never linked anywhere
    fn sentinel_is_clean(&self) -> bool {
        let nil = self.node(Self::BLACK_NIL);
        nil.is_null_leaf() && nil.size == 0
    }

    // 4: a red node has two black children
    fn no_red_red_edge(&self) -> bool {
        self.postorder().into_iter().all(|idx| {
            let node = self.node(idx);
            node.is_black()
                || (self.node(node.left_child()).is_black()
                    && self.node(node.right_child()).is_black())
        })
    }

    // 5: uniform black height, `None` on a mismatch
    fn black_height(&self) -> Option<usize> {
        let mut heights = vec![0; self.storage.len()];

        for idx in self.postorder() {
            let node = self.node(idx);
            let left = heights[node.left_child().0];
            let right = heights[node.right_child().0];

            heights[idx.0] = if left == MISMATCH || left != right {
                MISMATCH
            } else {
                left + usize::from(node.is_black())
            };
        }

        let height = heights[self.root.0];
        (height != MISMATCH).then_some(height)
    }

    // 6: cached sizes match the subtrees
    fn sizes_match(&self) -> bool {
        self.postorder().into_iter().all(|idx| {
            let node = self.node(idx);
            node.size == self.size_of(node.left_child()) + self.size_of(node.right_child()) + 1
        })
    }

    fn parent_links_match(&self) -> bool {
        self.node(self.root).parent == Self::BLACK_NIL
            && self.postorder().into_iter().all(|idx| {
                let node = self.node(idx);
                [node.left_child(), node.right_child()]
                    .into_iter()
                    .all(|child| child == Self::BLACK_NIL || self.node(child).parent == idx)
            })
    }

    /// Reachable nodes, children before parents.
    fn postorder(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack = Vec::new();

        if self.root != Self::BLACK_NIL {
            stack.push(self.root);
        }

        // root-right-left preorder, reversed
        while let Some(idx) = stack.pop() {
            order.push(idx);
            let node = self.node(idx);

            for child in [node.left_child(), node.right_child()] {
                if child != Self::BLACK_NIL {
                    stack.push(child);
                }
            }
        }

        order.reverse();
        order
    }
}

impl<K: Ord, V> Redwood<K, V> {
    /// Full structural audit, reporting the first broken property.
    ///
    /// On top of [`Self::verify`] this checks key order, the sentinel, cached
    /// subtree sizes, and parent back-links.
    pub fn check(&self) -> Result<(), InvariantViolation> {
        if !self.sentinel_is_clean() {
            return Err(InvariantViolation::DirtySentinel);
        }

        if !self.keys().is_sorted_by(|a, b| a < b) {
            return Err(InvariantViolation::UnorderedKeys);
        }

        if self.is_empty() {
            return Ok(());
        }

        if !self.root_is_black() {
            return Err(InvariantViolation::RedRoot);
        }

        if !self.no_red_red_edge() {
            return Err(InvariantViolation::RedRedEdge);
        }

        if self.black_height().is_none() {
            return Err(InvariantViolation::BlackHeightMismatch);
        }

        if !self.parent_links_match() {
            return Err(InvariantViolation::BrokenParentLink);
        }

        if !self.sizes_match() {
            return Err(InvariantViolation::SizeMismatch);
        }

        Ok(())
    }
}
