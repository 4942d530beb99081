//! Multi-path application of a transaction tree.

use super::{Result, TransactionTree};
use crate::core::NodeId;
use tracing::trace;

/// Lazy iterator over the end states below a node.
///
/// Produced by [`TransactionTree::apply_chain`]. Each call to `next` walks
/// depth-first until it reaches a leaf, applying one transaction per node,
/// and yields the state composed along that path. Sibling branches are
/// visited in the unspecified order of the successor set.
///
/// The iterator borrows the tree, so the tree cannot be mutated while a
/// traversal is in flight. If a transform panics, the panic unwinds out of
/// `next`; end states already yielded are unaffected.
pub struct ChainIter<'a, T> {
    tree: &'a TransactionTree<T>,
    pending: Vec<(NodeId, T)>,
}

impl<T: Clone> Iterator for ChainIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while let Some((node, state)) = self.pending.pop() {
            let Some(slot) = self.tree.slot(node) else {
                continue;
            };

            let next = slot.transaction.apply(state);
            let mut successors = slot.successors.iter().copied();
            let Some(first) = successors.next() else {
                return Some(next);
            };

            for successor in successors {
                self.pending.push((successor, next.clone()));
            }
            self.pending.push((first, next));
        }
        None
    }
}

impl<T> TransactionTree<T> {
    /// Apply `node` and everything after it to `state`, yielding every
    /// possible end state.
    ///
    /// Each root-to-leaf path below `node` contributes exactly one end state,
    /// so the iterator yields [`leaf_count`](Self::leaf_count) items, and a
    /// single item when `node` is a leaf. Nothing is memoized and nothing is
    /// consumed: calling this again on an unchanged tree recomputes the same
    /// multiset of end states.
    ///
    /// Fails with `InvalidArgument` when `node` is absent; the first
    /// transaction is not applied until the iterator is polled.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transaction_tree::tree::TransactionTree;
    ///
    /// let mut tree = TransactionTree::new();
    /// let start = tree.add_transform(|s: String| s + "a", None).unwrap();
    /// tree.add_transform(|s| s + "b", Some(start)).unwrap();
    /// tree.add_transform(|s| s + "c", Some(start)).unwrap();
    ///
    /// let mut end_states: Vec<String> = tree.apply_chain(start, String::new()).unwrap().collect();
    /// end_states.sort();
    /// assert_eq!(end_states, vec!["ab".to_string(), "ac".to_string()]);
    /// ```
    pub fn apply_chain(&self, node: NodeId, state: T) -> Result<ChainIter<'_, T>>
    where
        T: Clone,
    {
        self.require("node", node)?;
        trace!(node = %node, "applying chain");

        Ok(ChainIter {
            tree: self,
            pending: vec![(node, state)],
        })
    }
}
