use std::cell::RefCell;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use arbor_core::{NodeId, Status};

/// A recorded observer event.
///
/// Intentionally "dumb data": capture while the tree steps, render later
/// with whatever tooling wants it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeEvent {
    pub node: NodeId,
    pub kind: EventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventKind {
    StatusChanged { from: Status, to: Status },
    ChildAdded { index: usize },
}

pub trait EventSink {
    fn emit(&mut self, event: TreeEvent);
}

#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: TreeEvent) {}
}

/// Sink backed by shared storage, so events stay readable after the
/// listener that owns the sink moves into a tree.
#[derive(Debug, Clone, Default)]
pub struct SharedSink {
    events: Rc<RefCell<Vec<TreeEvent>>>,
}

impl SharedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Rc<RefCell<Vec<TreeEvent>>> {
        Rc::clone(&self.events)
    }

    /// Drains everything captured so far.
    pub fn take(&self) -> Vec<TreeEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl EventSink for SharedSink {
    fn emit(&mut self, event: TreeEvent) {
        self.events.borrow_mut().push(event);
    }
}
