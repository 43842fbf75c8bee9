#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The lifecycle status of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// Never run since construction or the last reset.
    Fresh,
    /// Needs to run again on a later step.
    Running,
    /// Finished with a success result.
    Succeeded,
    /// Finished with a failure result.
    Failed,
    /// Terminated by an ancestor.
    Cancelled,
}

impl Status {
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Succeeded, Failed or Cancelled. Terminal until the node is reset or
    /// re-activated by a fresh activation cycle of its parent.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Succeeded | Status::Failed | Status::Cancelled)
    }
}

/// The result a node's `run` reports for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    /// The node needs to run again on a later step.
    Running,
    Success,
    Failure,
}

impl Outcome {
    /// Swaps Success and Failure; Running is unchanged.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Outcome::Running => Outcome::Running,
            Outcome::Success => Outcome::Failure,
            Outcome::Failure => Outcome::Success,
        }
    }
}

impl From<Outcome> for Status {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Running => Status::Running,
            Outcome::Success => Status::Succeeded,
            Outcome::Failure => Status::Failed,
        }
    }
}
