use arbor_core::{
    Behavior, Control, Ctx, Outcome, Result, Selector, Status, Tree, TreeError,
};

#[derive(Default)]
struct Probe {
    log: Vec<String>,
}

fn log(tree: &Tree<Probe>) -> Vec<String> {
    tree.object().unwrap().log.clone()
}

struct Emit {
    name: &'static str,
    outcome: Outcome,
}

impl Emit {
    fn new(name: &'static str, outcome: Outcome) -> Self {
        Self { name, outcome }
    }
}

impl Behavior<Probe> for Emit {
    fn run(&mut self, ctx: &mut Ctx<'_, Probe>) -> Result<Outcome> {
        ctx.object()?.log.push(format!("run {}", self.name));
        Ok(self.outcome)
    }

    fn end(&mut self, ctx: &mut Ctx<'_, Probe>) {
        if let Ok(probe) = ctx.object() {
            probe.log.push(format!("end {}", self.name));
        }
    }
}

struct NeverDone {
    name: &'static str,
}

impl Behavior<Probe> for NeverDone {
    fn run(&mut self, ctx: &mut Ctx<'_, Probe>) -> Result<Outcome> {
        ctx.object()?.log.push(format!("run {}", self.name));
        Ok(Outcome::Running)
    }

    fn end(&mut self, ctx: &mut Ctx<'_, Probe>) {
        if let Ok(probe) = ctx.object() {
            probe.log.push(format!("end {}", self.name));
        }
    }
}

#[test]
fn reset_returns_the_tree_to_fresh_and_detached() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(Selector::new());
    let a = tree.insert(Emit::new("a", Outcome::Failure));
    let b = tree.insert(Emit::new("b", Outcome::Success));
    tree.add_root(root).unwrap();
    tree.add_child(root, a).unwrap();
    tree.add_child(root, b).unwrap();

    assert_eq!(tree.step().unwrap(), Status::Succeeded);

    tree.reset().unwrap();
    assert_eq!(tree.status(), Status::Fresh);
    for id in [root, a, b] {
        assert_eq!(tree.node_status(id), Status::Fresh);
        assert_eq!(tree.control(id), Control::Detached);
    }

    // The tree re-attaches everything on the next activation.
    assert_eq!(tree.step().unwrap(), Status::Succeeded);
}

#[test]
fn reset_cancels_running_nodes_first() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(NeverDone { name: "root" });
    tree.add_root(root).unwrap();

    assert_eq!(tree.step().unwrap(), Status::Running);

    tree.reset().unwrap();
    assert_eq!(tree.node_status(root), Status::Fresh);
    assert!(log(&tree).iter().any(|e| e.as_str() == "end root"));
}

#[test]
fn reset_clears_composite_cursors() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(Selector::new());
    let a = tree.insert(Emit::new("a", Outcome::Failure));
    let b = tree.insert(NeverDone { name: "b" });
    tree.add_root(root).unwrap();
    tree.add_child(root, a).unwrap();
    tree.add_child(root, b).unwrap();

    assert_eq!(tree.step().unwrap(), Status::Running);
    tree.reset().unwrap();

    // A fresh activation starts the walk over from the first child.
    assert_eq!(tree.step().unwrap(), Status::Running);
    assert_eq!(
        log(&tree).iter().filter(|e| e.as_str() == "run a").count(),
        2
    );
}

#[test]
fn reset_node_only_touches_its_subtree() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(Selector::new());
    let a = tree.insert(Emit::new("a", Outcome::Success));
    tree.add_root(root).unwrap();
    tree.add_child(root, a).unwrap();

    assert_eq!(tree.step().unwrap(), Status::Succeeded);

    tree.reset_node(a).unwrap();
    assert_eq!(tree.node_status(a), Status::Fresh);
    assert_eq!(tree.control(a), Control::Detached);
    assert_eq!(tree.node_status(root), Status::Succeeded);
    assert_eq!(tree.control(root), Control::Tree);
}

#[test]
fn release_clears_listeners_blackboard_and_nodes() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(Emit::new("root", Outcome::Success));
    tree.add_root(root).unwrap();
    tree.step().unwrap();

    tree.release();
    assert_eq!(tree.root(), None);
    assert_eq!(tree.status(), Status::Fresh);
    assert!(matches!(tree.object(), Err(TreeError::Detached)));
    assert!(matches!(tree.step(), Err(TreeError::MissingRoot)));
}
