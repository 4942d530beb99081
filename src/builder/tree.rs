//! Builder for constructing transaction trees.

use crate::builder::config::{CyclePolicy, TreeConfig};
use crate::tree::TransactionTree;
use std::marker::PhantomData;

/// Builder for configuring a [`TransactionTree`] with a fluent API.
pub struct TransactionTreeBuilder<T> {
    config: TreeConfig,
    _phantom: PhantomData<T>,
}

impl<T> TransactionTreeBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: TreeConfig::default(),
            _phantom: PhantomData,
        }
    }

    /// Preallocate room for `n` nodes.
    pub fn capacity(mut self, n: usize) -> Self {
        self.config.capacity = n;
        self
    }

    /// Set how cycle-closing mutations are handled.
    pub fn cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.config.cycle_policy = policy;
        self
    }

    /// Start from an existing configuration.
    pub fn config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the (empty) tree.
    pub fn build(self) -> TransactionTree<T> {
        TransactionTree::with_config(self.config)
    }
}

impl<T> Default for TransactionTreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_rejecting_cycles() {
        let tree: TransactionTree<i32> = TransactionTreeBuilder::new().build();

        assert_eq!(tree.config().cycle_policy, CyclePolicy::Reject);
        assert!(tree.config().rejects_cycles());
        assert!(tree.is_empty());
    }

    #[test]
    fn fluent_api_sets_config() {
        let tree: TransactionTree<i32> = TransactionTreeBuilder::new()
            .capacity(32)
            .cycle_policy(CyclePolicy::Permit)
            .build();

        assert_eq!(tree.config().capacity, 32);
        assert_eq!(tree.config().cycle_policy, CyclePolicy::Permit);
        assert!(!tree.config().rejects_cycles());
    }

    #[test]
    fn config_can_be_reused() {
        let config = TreeConfig {
            cycle_policy: CyclePolicy::Permit,
            capacity: 4,
        };

        let first: TransactionTree<u8> = TransactionTreeBuilder::new().config(config).build();
        let second: TransactionTree<u8> = TransactionTreeBuilder::new().config(config).build();

        assert_eq!(first.config(), second.config());
        assert_ne!(first.id(), second.id());
    }
}
