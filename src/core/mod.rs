//! Core node types of a transaction tree.
//!
//! This module contains the pieces that know nothing about topology:
//! - `Transaction`, the closed set of node behaviours (transform or fixed state)
//! - `NodeId` and `TreeId`, the handles used to address nodes in a tree
//!
//! Applying a transaction is pure with respect to the tree structure; only
//! the operations in [`crate::tree`] ever touch predecessor/successor links.

mod id;
mod transaction;

pub use id::{NodeId, TreeId};
pub use transaction::{Transaction, Transform};
