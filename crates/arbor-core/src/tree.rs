use std::mem;

use crate::error::{Result, TreeError};
use crate::node::{Behavior, Control, Node, NodeId};
use crate::observer::{Listener, ListenerId};
use crate::status::{Outcome, Status};

/// The single-root container that owns the node graph, the blackboard
/// reference and the observer list, and drives execution.
///
/// One `step()` call per decision interval performs a full depth-first pass
/// from the root to whichever node is currently active. The tree is driven
/// by exactly one external call site per tick; concurrent `step()` calls on
/// the same tree must be serialized by the caller.
pub struct Tree<E> {
    nodes: Vec<Node<E>>,
    root: Option<NodeId>,
    object: Option<E>,
    listeners: Vec<(ListenerId, Box<dyn Listener>)>,
    next_listener: u64,
    status: Status,
}

impl<E: 'static> Default for Tree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Tree<E> {
    /// Creates a tree with no root and no blackboard object. Both must be
    /// set before the first `step()` that needs them.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            object: None,
            listeners: Vec::new(),
            next_listener: 0,
            status: Status::Fresh,
        }
    }

    pub fn with_object(object: E) -> Self {
        let mut tree = Self::new();
        tree.object = Some(object);
        tree
    }

    // ---- authoring ----

    /// Allocates a detached node for `behavior`.
    pub fn insert(&mut self, behavior: impl Behavior<E>) -> NodeId {
        self.insert_boxed(Box::new(behavior), None)
    }

    /// Allocates a detached node with a display name.
    pub fn insert_named(&mut self, behavior: impl Behavior<E>, name: impl Into<String>) -> NodeId {
        self.insert_boxed(Box::new(behavior), Some(name.into()))
    }

    fn insert_boxed(&mut self, behavior: Box<dyn Behavior<E>>, name: Option<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(behavior, name));
        id
    }

    /// Attaches the single root. Returns the assigned index (always 0) and
    /// fires the child-added event.
    pub fn add_root(&mut self, id: NodeId) -> Result<usize> {
        if self.root.is_some() {
            return Err(TreeError::DuplicateRoot);
        }
        self.ensure_detached(id)?;
        self.root = Some(id);
        self.nodes[id.index()].control = Control::Tree;
        self.notify_child_added(id, 0);
        Ok(0)
    }

    /// Appends `child` to `parent`'s ordered child list. Returns the
    /// assigned index and fires the child-added event.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<usize> {
        self.ensure_detached(child)?;
        self.nodes[child.index()].control = Control::Node(parent);
        let children = &mut self.nodes[parent.index()].children;
        children.push(child);
        let index = children.len() - 1;
        self.notify_child_added(child, index);
        Ok(index)
    }

    /// Makes `guard` the precondition of `host`. The guard is attached to
    /// the guard-evaluation context and never appears in any child list.
    pub fn set_guard(&mut self, host: NodeId, guard: NodeId) -> Result<()> {
        self.ensure_detached(guard)?;
        // The new link may not make `host` reachable along guard references.
        let mut cursor = Some(guard);
        let mut steps = 0usize;
        while let Some(link) = cursor {
            if link == host || steps > self.nodes.len() {
                return Err(TreeError::GuardCycle);
            }
            steps += 1;
            cursor = self.nodes[link.index()].guard;
        }
        self.nodes[guard.index()].control = Control::GuardEval;
        self.nodes[host.index()].guard = Some(guard);
        Ok(())
    }

    fn ensure_detached(&self, id: NodeId) -> Result<()> {
        if self.root == Some(id) || self.nodes[id.index()].control != Control::Detached {
            return Err(TreeError::AlreadyAttached);
        }
        Ok(())
    }

    // ---- lookups ----

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The tree's own status: the root's most recent reported result.
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn node_status(&self, id: NodeId) -> Status {
        self.nodes[id.index()].status
    }

    pub fn control(&self, id: NodeId) -> Control {
        self.nodes[id.index()].control
    }

    pub fn guard(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].guard
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.index()].name.as_deref()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.nodes[id.index()].children.len()
    }

    pub fn child(&self, parent: NodeId, index: usize) -> Result<NodeId> {
        let children = &self.nodes[parent.index()].children;
        children
            .get(index)
            .copied()
            .ok_or(TreeError::ChildIndex { index, len: children.len() })
    }

    // ---- blackboard ----

    pub fn set_object(&mut self, object: E) {
        self.object = Some(object);
    }

    pub fn object(&self) -> Result<&E> {
        self.object.as_ref().ok_or(TreeError::Detached)
    }

    pub fn object_mut(&mut self) -> Result<&mut E> {
        self.object.as_mut().ok_or(TreeError::Detached)
    }

    pub fn take_object(&mut self) -> Option<E> {
        self.object.take()
    }

    // ---- observers ----

    pub fn add_listener(&mut self, listener: impl Listener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes one listener; returns whether it was present.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn remove_listeners(&mut self) {
        self.listeners.clear();
    }

    fn notify_status(&mut self, id: NodeId, previous: Status, current: Status) {
        if self.listeners.is_empty() {
            return;
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener.status_updated(id, previous, current);
        }
    }

    fn notify_child_added(&mut self, id: NodeId, index: usize) {
        if self.listeners.is_empty() {
            return;
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener.child_added(id, index);
        }
    }

    // ---- stepping ----

    /// One decision step. A Running root is resumed directly, with no guard
    /// re-check. Otherwise the root is re-attached and started, its guard
    /// chain is evaluated against the tree, and it either runs or is failed
    /// outright: a root-level guard failure fails the whole tree for this
    /// tick.
    pub fn step(&mut self) -> Result<Status> {
        let root = self.root.ok_or(TreeError::MissingRoot)?;
        let outcome = if self.nodes[root.index()].status == Status::Running {
            self.run_node(root)?
        } else {
            self.nodes[root.index()].control = Control::Tree;
            self.start_node(root)?;
            if self.check_guard(root)? {
                self.run_node(root)?
            } else {
                self.force_fail(root)
            }
        };
        self.status = outcome.into();
        Ok(self.status)
    }

    /// Cancels a Running node: all Running children first, depth-first and
    /// left to right, then the node itself.
    pub fn cancel(&mut self, id: NodeId) -> Result<()> {
        let status = self.nodes[id.index()].status;
        if status != Status::Running {
            return Err(TreeError::CancelPrecondition(status));
        }
        self.cancel_running_children(id, 0)?;
        self.update_status(id, Status::Cancelled);
        self.end_node(id);
        Ok(())
    }

    pub(crate) fn cancel_running_children(&mut self, id: NodeId, start: usize) -> Result<()> {
        let children: Vec<NodeId> = self.nodes[id.index()]
            .children
            .get(start..)
            .map(<[NodeId]>::to_vec)
            .unwrap_or_default();
        for child in children {
            if self.nodes[child.index()].status == Status::Running {
                self.cancel(child)?;
            }
        }
        Ok(())
    }

    /// Returns a subtree to a reusable state: a Running node is cancelled
    /// first, every child is reset recursively, and the node ends up Fresh
    /// and detached. Guards are not children and keep their residual status.
    pub fn reset_node(&mut self, id: NodeId) -> Result<()> {
        if self.nodes[id.index()].status == Status::Running {
            self.cancel(id)?;
        }
        let children: Vec<NodeId> = self.nodes[id.index()].children.clone();
        for child in children {
            self.reset_node(child)?;
        }
        let node = &mut self.nodes[id.index()];
        node.status = Status::Fresh;
        node.control = Control::Detached;
        if let Some(behavior) = node.behavior.as_mut() {
            behavior.reset();
        }
        Ok(())
    }

    /// Resets the whole tree via the root.
    pub fn reset(&mut self) -> Result<()> {
        if let Some(root) = self.root {
            self.reset_node(root)?;
        }
        self.status = Status::Fresh;
        Ok(())
    }

    /// Returns the tree to an empty, reusable state: nodes, root, blackboard
    /// and listeners are all dropped. Outstanding `NodeId`s become invalid.
    pub fn release(&mut self) {
        self.remove_listeners();
        self.nodes.clear();
        self.root = None;
        self.object = None;
        self.status = Status::Fresh;
    }

    // ---- engine internals ----

    fn update_status(&mut self, id: NodeId, status: Status) {
        let previous = mem::replace(&mut self.nodes[id.index()].status, status);
        self.notify_status(id, previous, status);
    }

    fn with_behavior<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Behavior<E>, &mut Ctx<'_, E>) -> R,
    ) -> R {
        let mut behavior = self.nodes[id.index()]
            .behavior
            .take()
            .expect("node behavior re-entered during its own execution");
        let result = f(&mut *behavior, &mut Ctx { tree: &mut *self, id });
        self.nodes[id.index()].behavior = Some(behavior);
        result
    }

    fn start_node(&mut self, id: NodeId) -> Result<()> {
        self.with_behavior(id, |behavior, ctx| behavior.start(ctx))
    }

    fn end_node(&mut self, id: NodeId) {
        self.with_behavior(id, |behavior, ctx| behavior.end(ctx));
    }

    /// Runs a node's behavior once and applies the reported outcome: status
    /// update and observer notification first, then the terminal `end` hook,
    /// and only then does the caller see the result.
    fn run_node(&mut self, id: NodeId) -> Result<Outcome> {
        let outcome = self.with_behavior(id, |behavior, ctx| behavior.run(ctx))?;
        match outcome {
            Outcome::Running => self.update_status(id, Status::Running),
            Outcome::Success => {
                self.update_status(id, Status::Succeeded);
                self.end_node(id);
            }
            Outcome::Failure => {
                self.update_status(id, Status::Failed);
                self.end_node(id);
            }
        }
        Ok(outcome)
    }

    fn force_fail(&mut self, id: NodeId) -> Outcome {
        self.update_status(id, Status::Failed);
        self.end_node(id);
        Outcome::Failure
    }

    /// Evaluates the guard chain of `id`. A guard whose own precondition is
    /// unsatisfied is itself unsatisfied. The guard runs once against the
    /// guard-evaluation context and must resolve immediately; its resulting
    /// status is left as-is for the next check.
    fn check_guard(&mut self, id: NodeId) -> Result<bool> {
        let Some(guard) = self.nodes[id.index()].guard else {
            return Ok(true);
        };
        if !self.check_guard(guard)? {
            return Ok(false);
        }
        self.nodes[guard.index()].control = Control::GuardEval;
        self.start_node(guard)?;
        match self.run_node(guard)? {
            Outcome::Success => Ok(true),
            Outcome::Failure => Ok(false),
            Outcome::Running => Err(TreeError::GuardProtocol(Status::Running)),
        }
    }

    /// Fresh activation of a child: attach, `start`, guard-check, then run.
    /// A failed guard fails the child outright without running it.
    fn activate_child(&mut self, parent: NodeId, index: usize) -> Result<Outcome> {
        let child = self.child(parent, index)?;
        self.nodes[child.index()].control = Control::Node(parent);
        self.start_node(child)?;
        if self.check_guard(child)? {
            self.run_node(child)
        } else {
            Ok(self.force_fail(child))
        }
    }

    /// Resumes an in-flight child directly: no re-attach, no `start`, no
    /// guard re-check.
    fn resume_child(&mut self, parent: NodeId, index: usize) -> Result<Outcome> {
        let child = self.child(parent, index)?;
        self.run_node(child)
    }
}

/// Mutable view a behavior receives while the engine drives it.
pub struct Ctx<'a, E> {
    tree: &'a mut Tree<E>,
    id: NodeId,
}

impl<E: 'static> Ctx<'_, E> {
    /// The node being driven.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Read-only view of the whole tree, for lookups (status, names,
    /// children of other nodes).
    pub fn tree(&self) -> &Tree<E> {
        self.tree
    }

    /// The shared blackboard object.
    pub fn object(&mut self) -> Result<&mut E> {
        self.tree.object.as_mut().ok_or(TreeError::Detached)
    }

    pub fn child_count(&self) -> usize {
        self.tree.child_count(self.id)
    }

    pub fn child(&self, index: usize) -> Result<NodeId> {
        self.tree.child(self.id, index)
    }

    /// Freshly activates the child at `index` and runs it within this step.
    pub fn run_child(&mut self, index: usize) -> Result<Outcome> {
        self.tree.activate_child(self.id, index)
    }

    /// Resumes the child at `index`, which reported Running on an earlier
    /// step of the current activation.
    pub fn resume_child(&mut self, index: usize) -> Result<Outcome> {
        self.tree.resume_child(self.id, index)
    }

    /// Cancels Running children from `start` up to the end of the child
    /// list, recursively.
    pub fn cancel_running_children(&mut self, start: usize) -> Result<()> {
        self.tree.cancel_running_children(self.id, start)
    }
}
