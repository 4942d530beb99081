//! Errors raised by tree operations.

use crate::core::NodeId;
use thiserror::Error;

/// Why an argument was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArgumentIssue {
    /// The handle does not name a live node of this tree
    #[error("{0} is not a live node of this tree")]
    Absent(NodeId),

    /// Linking `node` under `target` would make `node` its own ancestor
    #[error("moving {node} under {target} would create a cycle")]
    WouldCreateCycle { node: NodeId, target: NodeId },
}

/// Errors that can occur when querying or mutating a transaction tree.
///
/// All validation happens before the first link is touched, so a returned
/// error always means the tree is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: ArgumentIssue,
    },
}

impl TreeError {
    pub(crate) fn absent(argument: &'static str, node: NodeId) -> Self {
        TreeError::InvalidArgument {
            argument,
            reason: ArgumentIssue::Absent(node),
        }
    }

    pub(crate) fn cycle(node: NodeId, target: NodeId) -> Self {
        TreeError::InvalidArgument {
            argument: "target",
            reason: ArgumentIssue::WouldCreateCycle { node, target },
        }
    }

    /// The rejected argument's name.
    pub fn argument(&self) -> &'static str {
        match self {
            Self::InvalidArgument { argument, .. } => argument,
        }
    }

    pub fn reason(&self) -> ArgumentIssue {
        match self {
            Self::InvalidArgument { reason, .. } => *reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;
