#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::status::{Outcome, Status};
use crate::tree::Ctx;

/// Handle to a node in a tree's arena.
///
/// Handles are only meaningful for the tree that issued them and are
/// invalidated by `Tree::release`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Back-link from a node to whatever drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Not attached anywhere.
    Detached,
    /// Attached directly to the tree facade (the root).
    Tree,
    /// Attached to the tree's guard-evaluation context. Guard nodes never
    /// appear in any child list.
    GuardEval,
    /// Attached under a parent node.
    Node(NodeId),
}

/// The decision logic of a node.
///
/// The engine owns the state machine around these hooks: behaviors report an
/// [`Outcome`] from `run` and the engine takes care of status updates,
/// observer notification, guard evaluation and cancellation.
pub trait Behavior<E>: 'static {
    /// Called exactly once immediately before the first `run` of an
    /// activation. Composites re-initialize per-activation selection state
    /// here.
    fn start(&mut self, _ctx: &mut Ctx<'_, E>) -> Result<()> {
        Ok(())
    }

    /// One decision step. Returning `Outcome::Running` asks to be resumed on
    /// a later step; Success and Failure finish the activation.
    fn run(&mut self, ctx: &mut Ctx<'_, E>) -> Result<Outcome>;

    /// Called once on every transition into a terminal status (Succeeded,
    /// Failed or Cancelled), for cleanup symmetrical to `start`.
    fn end(&mut self, _ctx: &mut Ctx<'_, E>) {}

    /// Clear state the behavior holds across the steps of one activation.
    fn reset(&mut self) {}
}

pub(crate) struct Node<E> {
    pub(crate) behavior: Option<Box<dyn Behavior<E>>>,
    pub(crate) status: Status,
    pub(crate) control: Control,
    pub(crate) guard: Option<NodeId>,
    pub(crate) name: Option<String>,
    pub(crate) children: Vec<NodeId>,
}

impl<E> Node<E> {
    pub(crate) fn new(behavior: Box<dyn Behavior<E>>, name: Option<String>) -> Self {
        Self {
            behavior: Some(behavior),
            status: Status::Fresh,
            control: Control::Detached,
            guard: None,
            name,
            children: Vec::new(),
        }
    }
}
