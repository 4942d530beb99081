//! Tree configuration.

/// How mutations treat a relink that would close a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Reject the mutation with `TreeError::InvalidArgument`
    #[default]
    Reject,

    /// Perform the mutation unchecked. A traversal that reaches the cycle
    /// never terminates.
    Permit,
}

/// Settings a [`TransactionTree`](crate::tree::TransactionTree) is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeConfig {
    pub cycle_policy: CyclePolicy,
    pub capacity: usize,
}

impl TreeConfig {
    pub fn rejects_cycles(&self) -> bool {
        self.cycle_policy == CyclePolicy::Reject
    }
}
