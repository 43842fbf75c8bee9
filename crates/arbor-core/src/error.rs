use thiserror::Error;

use crate::status::Status;

/// Authoring and protocol defects. All fatal: the caller is expected to fix
/// the tree definition, not retry.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("a behavior tree cannot have more than one root")]
    DuplicateRoot,

    #[error("step() called on a tree with no root")]
    MissingRoot,

    #[error("illegal guard status {0:?}: guards must either succeed or fail in one step")]
    GuardProtocol(Status),

    #[error("no blackboard object attached")]
    Detached,

    #[error("cancel() called on a node with status {0:?}, not Running")]
    CancelPrecondition(Status),

    #[error("child index {index} out of bounds (child count {len})")]
    ChildIndex { index: usize, len: usize },

    #[error("guard chain would cycle")]
    GuardCycle,

    #[error("node is already attached as a root, child or guard")]
    AlreadyAttached,
}

pub type Result<T> = std::result::Result<T, TreeError>;
