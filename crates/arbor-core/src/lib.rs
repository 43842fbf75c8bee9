//! Stateful behavior tree engine for tick-driven and turn-based agents.
//!
//! One [`Tree::step`] call per decision interval drives a depth-first pass
//! from the root to the active leaf, resuming where the previous tick left
//! off. Nodes carry a five-valued status, an optional guard (precondition)
//! node, and report outcomes upward through the call stack; composites
//! decide which child runs next.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod composite;
pub mod decorator;
pub mod error;
pub mod leaf;
pub mod node;
pub mod observer;
pub mod status;
pub mod tree;

pub use composite::{ScoreSelector, Scorer, Selector, Sequence};
pub use decorator::{AlwaysSucceed, Invert};
pub use error::{Result, TreeError};
pub use leaf::{Action, Condition};
pub use node::{Behavior, Control, NodeId};
pub use observer::{Listener, ListenerId};
pub use status::{Outcome, Status};
pub use tree::{Ctx, Tree};
