//! Handles for trees and the nodes they own.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a single [`TransactionTree`](crate::tree::TransactionTree).
///
/// Every tree draws a fresh v4 UUID on construction, so node handles minted
/// by one tree are never mistaken for nodes of another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeId(Uuid);

impl TreeId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a node inside a [`TransactionTree`](crate::tree::TransactionTree).
///
/// A `NodeId` is a plain value: copying it does not keep the node alive, and
/// it never owns anything. Links between nodes are stored as `NodeId`s, which
/// is what lets a child point back at its predecessor without an ownership
/// cycle.
///
/// A handle is *absent* in a tree when the tree did not mint it or when the
/// node it names has been released. Every operation taking a handle rejects
/// absent ones with [`TreeError::InvalidArgument`](crate::tree::TreeError).
///
/// # Example
///
/// ```rust
/// use transaction_tree::tree::TransactionTree;
///
/// let mut tree = TransactionTree::new();
/// let root = tree.add_fixed(0_i32, None).unwrap();
///
/// assert_eq!(root.tree(), tree.id());
/// assert!(tree.contains(root));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    tree: TreeId,
    index: usize,
}

impl NodeId {
    pub(crate) fn new(tree: TreeId, index: usize) -> Self {
        Self { tree, index }
    }

    /// The tree that minted this handle.
    pub fn tree(&self) -> TreeId {
        self.tree
    }

    /// Slot index of the node within its tree.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_ids_are_unique() {
        assert_ne!(TreeId::new(), TreeId::new());
    }

    #[test]
    fn node_ids_compare_by_tree_and_index() {
        let tree = TreeId::new();
        let other = TreeId::new();

        assert_eq!(NodeId::new(tree, 3), NodeId::new(tree, 3));
        assert_ne!(NodeId::new(tree, 3), NodeId::new(tree, 4));
        assert_ne!(NodeId::new(tree, 3), NodeId::new(other, 3));
    }

    #[test]
    fn node_id_displays_index() {
        let id = NodeId::new(TreeId::new(), 7);
        assert_eq!(id.to_string(), "node#7");
    }

    #[test]
    fn node_id_serializes_correctly() {
        let id = NodeId::new(TreeId::new(), 12);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
