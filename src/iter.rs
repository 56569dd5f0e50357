use core::iter::{Flatten, FusedIterator};

use alloc::vec;
use alloc::vec::Vec;

use crate::Redwood;
use crate::node::NodeIndex;

/// In-order walk over node indices, driven by an explicit stack.
struct InorderWalk<'a, K, V> {
    tree: &'a Redwood<K, V>,
    curr: NodeIndex,
    stack: Vec<NodeIndex>,
}

impl<'a, K, V> InorderWalk<'a, K, V> {
    fn new(tree: &'a Redwood<K, V>) -> Self {
        Self {
            tree,
            curr: tree.root,
            stack: Vec::new(),
        }
    }
}

impl<K, V> Iterator for InorderWalk<'_, K, V> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while self.curr != Redwood::<K, V>::BLACK_NIL {
            self.stack.push(self.curr);
            self.curr = self.tree.node(self.curr).left_child();
        }

        let node = self.stack.pop()?;
        self.curr = self.tree.node(node).right_child();

        Some(node)
    }
}

/// Borrowing iterator over the entries of a [`Redwood`], in ascending key
/// order.
pub struct Iter<'a, K, V> {
    walk: InorderWalk<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.walk.tree;
        let node = self.walk.next()?;
        self.remaining -= 1;

        tree.node(node).entry.as_ref().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Mutable iterator over the entries of a [`Redwood`], in ascending key
/// order.
///
/// The arena cells are handed out in storage order and placed by their
/// in-order rank up front, so no two yielded references alias.
pub struct IterMut<'a, K, V> {
    inner: Flatten<vec::IntoIter<Option<(&'a K, &'a mut V)>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        self.remaining -= 1;

        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

/// Owning iterator over the entries of a [`Redwood`], in ascending key order.
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> Redwood<K, V> {
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            walk: InorderWalk::new(self),
            remaining: self.len(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let len = self.len();
        let mut rank = vec![usize::MAX; self.storage.len()];
        for (position, node) in InorderWalk::new(self).enumerate() {
            rank[node.0] = position;
        }

        let mut slots: Vec<Option<(&K, &mut V)>> = (0..len).map(|_| None).collect();
        for (cell, node) in self.storage.iter_mut().enumerate() {
            if let (Some((k, v)), Some(slot)) = (node.entry.as_mut(), slots.get_mut(rank[cell])) {
                *slot = Some((&*k, v));
            }
        }

        IterMut {
            inner: slots.into_iter().flatten(),
            remaining: len,
        }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Moves every entry out of the arena in ascending key order.
    pub(crate) fn into_sorted_vec(mut self) -> Vec<(K, V)> {
        let order: Vec<NodeIndex> = InorderWalk::new(&self).collect();

        order
            .into_iter()
            .filter_map(|node| self.node_mut(node).entry.take())
            .collect()
    }
}

impl<K, V> IntoIterator for Redwood<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.into_sorted_vec().into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Redwood<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut Redwood<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
