use crate::node::NodeId;
use crate::status::Status;

/// External subscriber to a tree's status changes and structural edits.
///
/// Callbacks run synchronously on the calling thread, inside `step()` and
/// the attach operations. A listener must not add or remove nodes of the
/// tree it is observing from its own callback.
pub trait Listener: 'static {
    /// A node's status changed. Running nodes report again on every step
    /// they are resumed.
    fn status_updated(&mut self, _node: NodeId, _previous: Status, _current: Status) {}

    /// A node was attached as a child (the root included), at `index`.
    fn child_added(&mut self, _node: NodeId, _index: usize) {}
}

/// Handle returned by `Tree::add_listener`, used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
