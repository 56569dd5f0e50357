use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use alloc::collections::{BTreeSet, VecDeque};

use crate::Redwood;

/// Materialized views over the tree contents.
///
/// Each view is built by a single in-order walk; the lazy [`Redwood::keys`],
/// [`Redwood::values`] and [`Redwood::iter`] avoid the allocation.
impl<K: Ord, V> Redwood<K, V> {
    #[must_use]
    pub fn key_set(&self) -> BTreeSet<&K> {
        self.keys().collect()
    }

    /// Values queued in ascending key order.
    #[must_use]
    pub fn value_queue(&self) -> VecDeque<&V> {
        let mut queue = VecDeque::with_capacity(self.len());
        for value in self.values() {
            queue.push_back(value);
        }
        queue
    }

    #[must_use]
    pub fn entry_set(&self) -> BTreeSet<(&K, &V)>
    where
        V: Ord,
    {
        self.iter().collect()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Redwood<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Redwood<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for Redwood<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_iter(entries)
    }
}

impl<K, Q, V> Index<&Q> for Redwood<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Redwood<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Redwood<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Redwood<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
