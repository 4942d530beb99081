//! Builder API for configuring transaction trees.
//!
//! ```
//! use transaction_tree::builder::{CyclePolicy, TransactionTreeBuilder};
//! use transaction_tree::tree::TransactionTree;
//!
//! let tree: TransactionTree<String> = TransactionTreeBuilder::new()
//!     .capacity(64)
//!     .cycle_policy(CyclePolicy::Reject)
//!     .build();
//!
//! assert!(tree.is_empty());
//! ```

pub mod config;
pub mod tree;

pub use config::{CyclePolicy, TreeConfig};
pub use tree::TransactionTreeBuilder;
