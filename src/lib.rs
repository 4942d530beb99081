//! Transaction Tree: a branching chain of state transformations
//!
//! A transaction tree holds one state transform per node. Every path from a
//! node down to a leaf is one possible sequence of transformations; applying
//! a node's chain composes the transforms along every such path and yields
//! one end state per leaf.
//!
//! # Core Concepts
//!
//! - **Transaction**: What a node does to the state, either a transform or a
//!   fixed state that discards its input
//! - **Tree**: An arena of nodes linked by predecessor/successor handles, kept
//!   consistent in both directions by every mutation
//! - **Chain**: Lazy depth-first composition of transforms along every branch
//!
//! # Example
//!
//! ```rust
//! use transaction_tree::TransactionTree;
//!
//! let mut tree = TransactionTree::new();
//!
//! // The root ignores its input and seeds every chain with 0.
//! let root = tree.add_fixed(0, None).unwrap();
//! let increment = tree.add_transform(|x: i32| x + 1, Some(root)).unwrap();
//! let double = tree.add_transform(|x| x * 2, Some(increment)).unwrap();
//! let decrement = tree.add_transform(|x| x - 1, Some(increment)).unwrap();
//!
//! let mut end_states: Vec<i32> = tree.apply_chain(root, 99).unwrap().collect();
//! end_states.sort();
//! assert_eq!(end_states, vec![0, 2]);
//!
//! // Move `decrement` under `double`: only one path is left.
//! tree.relocate_subtree(decrement, Some(double)).unwrap();
//! let end_states: Vec<i32> = tree.apply_chain(root, 99).unwrap().collect();
//! assert_eq!(end_states, vec![1]);
//! ```

pub mod builder;
pub mod core;
pub mod tree;

// Re-export commonly used types
pub use builder::{CyclePolicy, TransactionTreeBuilder, TreeConfig};
pub use crate::core::{NodeId, Transaction, TreeId};
pub use tree::{TransactionTree, TreeError};
