#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum NodeColor {
    #[default]
    Red,
    Black,
}

/// Position of a node inside a tree's arena.
///
/// Index `0` is reserved for the tree's own nil sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeIndex(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) struct RedwoodNode<K, V> {
    pub(crate) entry: Option<(K, V)>,
    pub(crate) color: NodeColor,
    pub(crate) parent: NodeIndex,
    pub(crate) left: NodeIndex,
    pub(crate) right: NodeIndex,
    pub(crate) size: usize,
}

impl<K, V> RedwoodNode<K, V> {
    /// Freshly inserted nodes are red, childless and count only themselves.
    pub(crate) fn new_isolated(key: K, value: V, parent: NodeIndex) -> Self {
        Self {
            entry: Some((key, value)),
            color: NodeColor::default(),
            parent,
            left: NodeIndex(0),
            right: NodeIndex(0),
            size: 1,
        }
    }

    pub(crate) fn sentinel() -> Self {
        Self {
            entry: None,
            color: NodeColor::Black,
            parent: NodeIndex(0),
            left: NodeIndex(0),
            right: NodeIndex(0),
            size: 0,
        }
    }

    pub(crate) fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(|(k, _)| k)
    }

    pub(crate) fn value(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, v)| v)
    }

    #[inline]
    pub(crate) fn left_child(&self) -> NodeIndex {
        self.left
    }

    #[inline]
    pub(crate) fn right_child(&self) -> NodeIndex {
        self.right
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        matches!(self.color, NodeColor::Red)
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        matches!(self.color, NodeColor::Black)
    }

    /// A node whose both children are the sentinel.
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left == NodeIndex(0) && self.right == NodeIndex(0)
    }

    /// The sentinel shape: keyless, black, with nil links on both sides.
    #[inline]
    pub(crate) fn is_null_leaf(&self) -> bool {
        self.entry.is_none() && self.is_leaf() && self.is_black()
    }
}
