use arbor_core::{Listener, NodeId, Status};

use crate::event::{EventKind, EventSink, TreeEvent};

/// Forwards both observer events into an [`EventSink`].
pub struct EventRecorder<S> {
    sink: S,
}

impl<S: EventSink> EventRecorder<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: EventSink + 'static> Listener for EventRecorder<S> {
    fn status_updated(&mut self, node: NodeId, previous: Status, current: Status) {
        self.sink.emit(TreeEvent {
            node,
            kind: EventKind::StatusChanged {
                from: previous,
                to: current,
            },
        });
    }

    fn child_added(&mut self, node: NodeId, index: usize) {
        self.sink.emit(TreeEvent {
            node,
            kind: EventKind::ChildAdded { index },
        });
    }
}

/// Emits one `tracing` event per observer callback.
#[derive(Debug, Default)]
pub struct LogListener;

impl Listener for LogListener {
    fn status_updated(&mut self, node: NodeId, previous: Status, current: Status) {
        tracing::trace!(?node, ?previous, ?current, "status updated");
    }

    fn child_added(&mut self, node: NodeId, index: usize) {
        tracing::trace!(?node, index, "child added");
    }
}
