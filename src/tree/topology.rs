//! Splice and relocate mutations.
//!
//! Each operation validates every argument first, then rewrites the two or
//! three affected link sets in one go. Because mutations take `&mut self`, no
//! traversal or query can observe a half-relinked tree.

use super::{Result, TransactionTree, TreeError};
use crate::core::{NodeId, Transaction};
use std::collections::HashSet;
use std::mem;
use tracing::{debug, warn};

impl<T> TransactionTree<T> {
    /// Move `node` together with its whole subtree below `target`.
    ///
    /// `node` is unlinked from its current predecessor (nothing to do for a
    /// root), then registered as a successor of `target`. With `target` set
    /// to `None` it becomes a new root. The successors of `node` are left
    /// untouched and travel with it.
    ///
    /// Under [`CyclePolicy::Reject`](crate::builder::CyclePolicy::Reject),
    /// moving a node below itself or below one of its own descendants fails
    /// with `InvalidArgument`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transaction_tree::tree::TransactionTree;
    ///
    /// let mut tree = TransactionTree::new();
    /// let a = tree.add_fixed(0, None).unwrap();
    /// let b = tree.add_transform(|x: i32| x + 1, Some(a)).unwrap();
    /// let c = tree.add_transform(|x| x + 1, Some(b)).unwrap();
    /// let target = tree.add_fixed(10, None).unwrap();
    ///
    /// tree.relocate_subtree(b, Some(target)).unwrap();
    ///
    /// assert_eq!(tree.predecessor(b).unwrap(), Some(target));
    /// assert_eq!(tree.predecessor(c).unwrap(), Some(b));
    /// assert!(tree.is_leaf(a).unwrap());
    /// ```
    pub fn relocate_subtree(&mut self, node: NodeId, target: Option<NodeId>) -> Result<()> {
        self.require("node", node)?;
        if let Some(target) = target {
            self.require("target", target)?;
            if self.config.rejects_cycles() && self.is_in_subtree(target, node) {
                warn!(node = %node, target = %target, "rejected relocation into own subtree");
                return Err(TreeError::cycle(node, target));
            }
        }

        let previous = self.detach(node);
        self.attach(node, target);

        debug!(
            node = %node,
            from = ?previous,
            to = ?target,
            "relocated subtree"
        );
        Ok(())
    }

    /// Cut `node` out of its chain and reattach it alone below `target`.
    ///
    /// The successors of `node` are handed to its former predecessor, so the
    /// chain stays continuous where `node` used to be (if `node` was a root,
    /// its successors become roots). `node` leaves with an empty successor
    /// set and is registered under `target`, or becomes a root when `target`
    /// is `None`.
    ///
    /// Every successor of a branching node ends up under the same former
    /// predecessor, so their branches share that ancestry from then on.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transaction_tree::tree::TransactionTree;
    ///
    /// let mut tree = TransactionTree::new();
    /// let a = tree.add_fixed(0, None).unwrap();
    /// let b = tree.add_transform(|x: i32| x + 1, Some(a)).unwrap();
    /// let c = tree.add_transform(|x| x * 2, Some(b)).unwrap();
    /// let target = tree.add_fixed(10, None).unwrap();
    ///
    /// tree.splice_out_and_relocate(b, Some(target)).unwrap();
    ///
    /// assert_eq!(tree.predecessor(c).unwrap(), Some(a));
    /// assert!(tree.successors(a).unwrap().contains(&c));
    /// assert!(!tree.successors(a).unwrap().contains(&b));
    /// assert_eq!(tree.predecessor(b).unwrap(), Some(target));
    /// assert!(tree.is_leaf(b).unwrap());
    /// ```
    pub fn splice_out_and_relocate(&mut self, node: NodeId, target: Option<NodeId>) -> Result<()> {
        self.require("node", node)?;
        if let Some(target) = target {
            self.require("target", target)?;
            if self.config.rejects_cycles() && target == node {
                warn!(node = %node, "rejected splice under itself");
                return Err(TreeError::cycle(node, target));
            }
        }

        let (previous, children) = self.splice_out(node);
        self.attach(node, target);

        debug!(
            node = %node,
            from = ?previous,
            to = ?target,
            handed_over = children,
            "spliced out and relocated"
        );
        Ok(())
    }

    /// Free `node`, handing its successors to its predecessor first.
    ///
    /// The handle becomes absent: every later operation given it fails with
    /// `InvalidArgument`. Slots are never reused, so a stale handle cannot
    /// alias a newer node.
    pub fn release(&mut self, node: NodeId) -> Result<Transaction<T>> {
        self.require("node", node)?;

        let (previous, children) = self.splice_out(node);
        let slot = self
            .slots
            .get_mut(node.index())
            .and_then(Option::take)
            .ok_or_else(|| TreeError::absent("node", node))?;
        self.live -= 1;

        debug!(node = %node, from = ?previous, handed_over = children, "released node");
        Ok(slot.transaction)
    }

    /// Unlink `node` from its predecessor, returning the old predecessor.
    fn detach(&mut self, node: NodeId) -> Option<NodeId> {
        let previous = self.slot_mut(node).and_then(|slot| slot.predecessor.take());
        if let Some(slot) = previous.and_then(|p| self.slot_mut(p)) {
            slot.successors.remove(&node);
        }
        previous
    }

    /// Link a detached `node` under `target`.
    fn attach(&mut self, node: NodeId, target: Option<NodeId>) {
        if let Some(slot) = self.slot_mut(node) {
            slot.predecessor = target;
        }
        if let Some(slot) = target.and_then(|t| self.slot_mut(t)) {
            slot.successors.insert(node);
        }
    }

    /// Detach `node` and move its successors to its old predecessor.
    ///
    /// Returns the old predecessor and how many successors were handed over.
    fn splice_out(&mut self, node: NodeId) -> (Option<NodeId>, usize) {
        let previous = self.detach(node);
        let children: HashSet<NodeId> = self
            .slot_mut(node)
            .map(|slot| mem::take(&mut slot.successors))
            .unwrap_or_default();

        for &child in &children {
            if let Some(slot) = self.slot_mut(child) {
                slot.predecessor = previous;
            }
        }
        let handed_over = children.len();
        if let Some(slot) = previous.and_then(|p| self.slot_mut(p)) {
            slot.successors.extend(children);
        }

        (previous, handed_over)
    }

    /// Whether `candidate` is `root` or lies below it.
    fn is_in_subtree(&self, candidate: NodeId, root: NodeId) -> bool {
        candidate == root
            || self
                .ancestors(candidate)
                .map(|mut ancestors| ancestors.any(|ancestor| ancestor == root))
                .unwrap_or(false)
    }
}
