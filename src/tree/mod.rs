//! The transaction tree: an arena of nodes linked by predecessor/successor
//! handles.
//!
//! Every node has at most one predecessor and an unordered set of
//! successors. The tree keeps both directions of every link consistent:
//! `b` is in `a`'s successors exactly when `a` is `b`'s predecessor. Links can
//! only be changed through the operations in this module, and each of them
//! validates all of its arguments before touching a single link.

mod chain;
mod error;
mod topology;

pub use chain::ChainIter;
pub use error::{ArgumentIssue, Result, TreeError};

use crate::builder::TreeConfig;
use crate::core::{NodeId, Transaction, TreeId};
use std::collections::HashSet;
use tracing::trace;

#[derive(Debug)]
struct Slot<T> {
    transaction: Transaction<T>,
    predecessor: Option<NodeId>,
    successors: HashSet<NodeId>,
}

/// Borrowed view of a single live node.
#[derive(Debug)]
pub struct NodeRef<'a, T> {
    id: NodeId,
    slot: &'a Slot<T>,
}

impl<'a, T> NodeRef<'a, T> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn transaction(&self) -> &'a Transaction<T> {
        &self.slot.transaction
    }

    /// The node this one follows, `None` for a root.
    pub fn predecessor(&self) -> Option<NodeId> {
        self.slot.predecessor
    }

    /// The nodes following this one. Iteration order is unspecified.
    pub fn successors(&self) -> &'a HashSet<NodeId> {
        &self.slot.successors
    }

    pub fn is_root(&self) -> bool {
        self.slot.predecessor.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.slot.successors.is_empty()
    }

    /// Apply this node's transaction to the state.
    pub fn apply(&self, state: T) -> T
    where
        T: Clone,
    {
        self.slot.transaction.apply(state)
    }
}

/// A forest of transaction nodes.
///
/// The tree owns every node it creates; callers hold [`NodeId`] handles.
/// Nodes are never dropped behind the caller's back: relocating a node only
/// relinks it, and a node's storage is freed only by
/// [`release`](TransactionTree::release).
///
/// Composing the transactions along each root-to-leaf path gives one end
/// state per leaf, see [`apply_chain`](TransactionTree::apply_chain).
///
/// # Example
///
/// ```rust
/// use transaction_tree::tree::TransactionTree;
///
/// let mut tree = TransactionTree::new();
/// let root = tree.add_fixed(0, None).unwrap();
/// let step = tree.add_transform(|x: i32| x + 1, Some(root)).unwrap();
/// tree.add_transform(|x| x * 2, Some(step)).unwrap();
/// tree.add_transform(|x| x - 1, Some(step)).unwrap();
///
/// let mut end_states: Vec<i32> = tree.apply_chain(root, 99).unwrap().collect();
/// end_states.sort();
/// assert_eq!(end_states, vec![0, 2]);
/// ```
#[derive(Debug)]
pub struct TransactionTree<T> {
    id: TreeId,
    slots: Vec<Option<Slot<T>>>,
    live: usize,
    config: TreeConfig,
}

impl<T> Default for TransactionTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TransactionTree<T> {
    /// Create an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub(crate) fn with_config(config: TreeConfig) -> Self {
        Self {
            id: TreeId::new(),
            slots: Vec::with_capacity(config.capacity),
            live: 0,
            config,
        }
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Whether `node` names a live node of this tree.
    pub fn contains(&self, node: NodeId) -> bool {
        self.slot(node).is_some()
    }

    /// Add a node carrying `transaction`.
    ///
    /// With `Some(predecessor)` the new node is registered as one of its
    /// successors; with `None` it starts a new chain as a root.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transaction_tree::core::Transaction;
    /// use transaction_tree::tree::TransactionTree;
    ///
    /// let mut tree = TransactionTree::new();
    /// let root = tree.add_transaction(Transaction::fixed(1), None).unwrap();
    /// let child = tree
    ///     .add_transaction(Transaction::new(|x: u32| x + 1), Some(root))
    ///     .unwrap();
    ///
    /// assert_eq!(tree.predecessor(child).unwrap(), Some(root));
    /// assert!(tree.successors(root).unwrap().contains(&child));
    /// ```
    pub fn add_transaction(
        &mut self,
        transaction: Transaction<T>,
        predecessor: Option<NodeId>,
    ) -> Result<NodeId> {
        if let Some(predecessor) = predecessor {
            self.require("predecessor", predecessor)?;
        }

        let id = NodeId::new(self.id, self.slots.len());
        self.slots.push(Some(Slot {
            transaction,
            predecessor,
            successors: HashSet::new(),
        }));
        self.live += 1;

        if let Some(slot) = predecessor.and_then(|p| self.slot_mut(p)) {
            slot.successors.insert(id);
        }

        trace!(node = %id, predecessor = ?predecessor, "added transaction");
        Ok(id)
    }

    /// Add a node that applies `transform` to the incoming state.
    pub fn add_transform<F>(&mut self, transform: F, predecessor: Option<NodeId>) -> Result<NodeId>
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.add_transaction(Transaction::new(transform), predecessor)
    }

    /// Add a node that discards the incoming state and yields `state`.
    pub fn add_fixed(&mut self, state: T, predecessor: Option<NodeId>) -> Result<NodeId> {
        self.add_transaction(Transaction::fixed(state), predecessor)
    }

    /// Append `transactions` one after another below `parent`.
    ///
    /// Returns the last node added, or `parent` when `transactions` is empty.
    pub fn chain<I>(&mut self, parent: Option<NodeId>, transactions: I) -> Result<Option<NodeId>>
    where
        I: IntoIterator<Item = Transaction<T>>,
    {
        if let Some(parent) = parent {
            self.require("parent", parent)?;
        }

        let mut last = parent;
        for transaction in transactions {
            last = Some(self.add_transaction(transaction, last)?);
        }
        Ok(last)
    }

    /// Borrow a view of `node`.
    pub fn node(&self, node: NodeId) -> Result<NodeRef<'_, T>> {
        let slot = self.live_slot("node", node)?;
        Ok(NodeRef { id: node, slot })
    }

    pub fn transaction(&self, node: NodeId) -> Result<&Transaction<T>> {
        Ok(&self.live_slot("node", node)?.transaction)
    }

    pub fn predecessor(&self, node: NodeId) -> Result<Option<NodeId>> {
        Ok(self.live_slot("node", node)?.predecessor)
    }

    /// The successors of `node`. Iteration order is unspecified.
    pub fn successors(&self, node: NodeId) -> Result<&HashSet<NodeId>> {
        Ok(&self.live_slot("node", node)?.successors)
    }

    /// Whether `node` starts a chain (has no predecessor).
    pub fn is_root(&self, node: NodeId) -> Result<bool> {
        Ok(self.live_slot("node", node)?.predecessor.is_none())
    }

    /// Whether `node` ends a chain (has no successors).
    pub fn is_leaf(&self, node: NodeId) -> Result<bool> {
        Ok(self.live_slot("node", node)?.successors.is_empty())
    }

    /// Apply the single transaction held by `node`.
    pub fn apply(&self, node: NodeId, state: T) -> Result<T>
    where
        T: Clone,
    {
        Ok(self.live_slot("node", node)?.transaction.apply(state))
    }

    /// Every live node, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| NodeId::new(self.id, index))
    }

    /// Every live node without a predecessor, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Some(slot) if slot.predecessor.is_none() => Some(NodeId::new(self.id, index)),
                _ => None,
            })
    }

    /// Walk the predecessor links from `node` up to its root.
    ///
    /// `node` itself is not yielded.
    pub fn ancestors(&self, node: NodeId) -> Result<Ancestors<'_, T>> {
        let next = self.live_slot("node", node)?.predecessor;
        Ok(Ancestors { tree: self, next })
    }

    /// Number of leaves reachable from `node`, counting `node` itself when it
    /// is a leaf.
    ///
    /// This is also the number of end states [`apply_chain`](Self::apply_chain)
    /// yields from `node`.
    pub fn leaf_count(&self, node: NodeId) -> Result<usize> {
        self.require("node", node)?;

        let mut leaves = 0;
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            let Some(slot) = self.slot(id) else {
                continue;
            };
            if slot.successors.is_empty() {
                leaves += 1;
            } else {
                pending.extend(slot.successors.iter().copied());
            }
        }
        Ok(leaves)
    }

    fn slot(&self, node: NodeId) -> Option<&Slot<T>> {
        if node.tree() != self.id {
            return None;
        }
        self.slots.get(node.index()).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, node: NodeId) -> Option<&mut Slot<T>> {
        if node.tree() != self.id {
            return None;
        }
        self.slots.get_mut(node.index()).and_then(Option::as_mut)
    }

    fn live_slot(&self, argument: &'static str, node: NodeId) -> Result<&Slot<T>> {
        self.slot(node).ok_or_else(|| TreeError::absent(argument, node))
    }

    fn require(&self, argument: &'static str, node: NodeId) -> Result<()> {
        self.live_slot(argument, node).map(|_| ())
    }
}

/// Iterator over the ancestors of a node, nearest first.
pub struct Ancestors<'a, T> {
    tree: &'a TransactionTree<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.slot(current).and_then(|slot| slot.predecessor);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tree_is_empty() {
        let tree: TransactionTree<i32> = TransactionTree::new();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.roots().count(), 0);
    }

    #[test]
    fn add_without_predecessor_creates_root() {
        let mut tree = TransactionTree::new();
        let root = tree.add_fixed(1, None).unwrap();

        assert!(tree.is_root(root).unwrap());
        assert!(tree.is_leaf(root).unwrap());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.roots().collect::<Vec<_>>(), vec![root]);
    }

    #[test]
    fn add_with_predecessor_registers_successor() {
        let mut tree = TransactionTree::new();
        let root = tree.add_fixed(1, None).unwrap();
        let child = tree.add_transform(|x: i32| x + 1, Some(root)).unwrap();

        assert_eq!(tree.predecessor(child).unwrap(), Some(root));
        assert!(tree.successors(root).unwrap().contains(&child));
        assert!(!tree.is_leaf(root).unwrap());
        assert!(!tree.is_root(child).unwrap());
    }

    #[test]
    fn add_rejects_absent_predecessor() {
        let mut tree = TransactionTree::new();
        let mut other = TransactionTree::new();
        let foreign = other.add_fixed(0, None).unwrap();

        let result = tree.add_fixed(1, Some(foreign));

        assert_eq!(result, Err(TreeError::absent("predecessor", foreign)));
        assert!(tree.is_empty());
    }

    #[test]
    fn queries_reject_foreign_nodes() {
        let tree: TransactionTree<i32> = TransactionTree::new();
        let mut other = TransactionTree::new();
        let foreign = other.add_fixed(0, None).unwrap();

        assert!(!tree.contains(foreign));
        assert!(tree.is_root(foreign).is_err());
        assert!(tree.is_leaf(foreign).is_err());
        assert!(tree.node(foreign).is_err());
        assert!(tree.apply(foreign, 1).is_err());
    }

    #[test]
    fn node_view_reflects_links() {
        let mut tree = TransactionTree::new();
        let root = tree.add_fixed(3, None).unwrap();
        let child = tree.add_transform(|x: i32| x * 3, Some(root)).unwrap();

        let view = tree.node(child).unwrap();
        assert_eq!(view.id(), child);
        assert_eq!(view.predecessor(), Some(root));
        assert!(view.is_leaf());
        assert!(!view.is_root());
        assert_eq!(view.apply(4), 12);
        assert!(!view.transaction().is_fixed());

        let root_view = tree.node(root).unwrap();
        assert_eq!(root_view.transaction().fixed_state(), Some(&3));
        assert_eq!(root_view.successors().len(), 1);
    }

    #[test]
    fn chain_links_transactions_in_order() {
        let mut tree = TransactionTree::new();
        let root = tree.add_fixed(1, None).unwrap();

        let last = tree
            .chain(
                Some(root),
                vec![
                    Transaction::new(|x: i32| x + 1),
                    Transaction::new(|x: i32| x * 10),
                ],
            )
            .unwrap()
            .unwrap();

        assert_eq!(tree.ancestors(last).unwrap().count(), 2);
        assert_eq!(tree.ancestors(last).unwrap().last(), Some(root));
        assert_eq!(tree.apply_chain(root, 0).unwrap().collect::<Vec<_>>(), vec![20]);
    }

    #[test]
    fn empty_chain_returns_parent() {
        let mut tree: TransactionTree<i32> = TransactionTree::new();
        let root = tree.add_fixed(1, None).unwrap();

        assert_eq!(tree.chain(Some(root), Vec::new()).unwrap(), Some(root));
        assert_eq!(tree.chain(None, Vec::new()).unwrap(), None);
    }

    #[test]
    fn leaf_count_counts_reachable_leaves() {
        let mut tree = TransactionTree::new();
        let root = tree.add_fixed(0, None).unwrap();
        let a = tree.add_transform(|x: i32| x, Some(root)).unwrap();
        let b = tree.add_transform(|x| x, Some(root)).unwrap();
        tree.add_transform(|x| x, Some(a)).unwrap();
        tree.add_transform(|x| x, Some(a)).unwrap();

        assert_eq!(tree.leaf_count(root).unwrap(), 3);
        assert_eq!(tree.leaf_count(a).unwrap(), 2);
        assert_eq!(tree.leaf_count(b).unwrap(), 1);
    }

    #[test]
    fn nodes_lists_every_live_node() {
        let mut tree = TransactionTree::new();
        let root = tree.add_fixed(0, None).unwrap();
        let child = tree.add_transform(|x: i32| x, Some(root)).unwrap();
        let other_root = tree.add_fixed(5, None).unwrap();

        assert_eq!(tree.nodes().collect::<Vec<_>>(), vec![root, child, other_root]);
        assert_eq!(tree.roots().collect::<Vec<_>>(), vec![root, other_root]);
    }
}
