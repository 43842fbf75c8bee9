//! Tooling primitives for behavior tree debugging: observer event capture
//! and logging listeners.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod event;
pub mod listen;

pub use event::{EventKind, EventSink, NullSink, SharedSink, TreeEvent};
pub use listen::{EventRecorder, LogListener};
