use core::fmt;

/// Failure of an operation that needs at least one entry in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedwoodError {
    /// `min`, `max`, `poll_min` or `poll_max` was called on an empty tree.
    EmptyTree,
}

impl fmt::Display for RedwoodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTree => f.write_str("operation requires a non-empty tree"),
        }
    }
}

impl core::error::Error for RedwoodError {}

/// First structural property found broken by [`Redwood::check`].
///
/// [`Redwood::check`]: crate::Redwood::check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// In-order traversal yielded two keys that are not strictly increasing.
    UnorderedKeys,
    /// The root node is red.
    RedRoot,
    /// The nil sentinel is not a black, keyless, zero-sized leaf.
    DirtySentinel,
    /// A red node has a red child.
    RedRedEdge,
    /// Two paths from the same node reach the sentinel through a different
    /// number of black nodes.
    BlackHeightMismatch,
    /// A node's cached subtree size disagrees with its actual subtree.
    SizeMismatch,
    /// A child does not point back to its parent.
    BrokenParentLink,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::UnorderedKeys => "keys are not strictly increasing in order",
            Self::RedRoot => "root node is red",
            Self::DirtySentinel => "nil sentinel is not a black empty leaf",
            Self::RedRedEdge => "red node has a red child",
            Self::BlackHeightMismatch => "black height differs between paths",
            Self::SizeMismatch => "cached subtree size is wrong",
            Self::BrokenParentLink => "child does not point back to its parent",
        };

        f.write_str(msg)
    }
}

impl core::error::Error for InvariantViolation {}
