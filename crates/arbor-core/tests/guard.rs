use arbor_core::{
    Behavior, Condition, Ctx, Outcome, Result, Selector, Status, Tree, TreeError,
};

#[derive(Default)]
struct Probe {
    log: Vec<String>,
    open: bool,
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
}

struct NeverDone;

impl Behavior<Probe> for NeverDone {
    fn run(&mut self, _ctx: &mut Ctx<'_, Probe>) -> Result<Outcome> {
        Ok(Outcome::Running)
    }
}

#[test]
fn guard_pass_lets_the_node_run() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(Emit::new("root", Outcome::Success));
    let guard = tree.insert(Emit::new("guard", Outcome::Success));
    tree.add_root(root).unwrap();
    tree.set_guard(root, guard).unwrap();

    assert_eq!(tree.step().unwrap(), Status::Succeeded);
    assert_eq!(log(&tree), ["run guard", "run root"]);
}

#[test]
fn a_guards_own_guard_is_checked_first() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(Emit::new("root", Outcome::Success));
    let guard = tree.insert(Emit::new("guard", Outcome::Success));
    let inner = tree.insert(Emit::new("inner", Outcome::Failure));
    tree.add_root(root).unwrap();
    tree.set_guard(root, guard).unwrap();
    tree.set_guard(guard, inner).unwrap();

    // The unsatisfied inner guard fails the outer guard without running it.
    assert_eq!(tree.step().unwrap(), Status::Failed);
    assert_eq!(log(&tree), ["run inner"]);
    assert_eq!(tree.node_status(root), Status::Failed);
}

#[test]
fn guards_must_resolve_in_one_step() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(Emit::new("root", Outcome::Success));
    let guard = tree.insert(NeverDone);
    tree.add_root(root).unwrap();
    tree.set_guard(root, guard).unwrap();

    assert!(matches!(
        tree.step(),
        Err(TreeError::GuardProtocol(Status::Running))
    ));
}

#[test]
fn guard_keeps_its_residual_status_and_re_evaluates_each_check() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(Emit::new("root", Outcome::Success));
    let guard = tree.insert(Emit::new("guard", Outcome::Success));
    tree.add_root(root).unwrap();
    tree.set_guard(root, guard).unwrap();

    assert_eq!(tree.step().unwrap(), Status::Succeeded);
    assert_eq!(tree.node_status(guard), Status::Succeeded);

    // Next activation re-evaluates from the residual Succeeded status.
    assert_eq!(tree.step().unwrap(), Status::Succeeded);
    assert_eq!(
        log(&tree)
            .iter()
            .filter(|e| e.as_str() == "run guard")
            .count(),
        2
    );
}

#[test]
fn guard_decision_is_stable_until_the_blackboard_changes() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(Emit::new("root", Outcome::Success));
    let guard = tree.insert(Condition::new(|probe: &mut Probe| probe.open));
    tree.add_root(root).unwrap();
    tree.set_guard(root, guard).unwrap();

    assert_eq!(tree.step().unwrap(), Status::Failed);
    assert_eq!(tree.step().unwrap(), Status::Failed);

    tree.object_mut().unwrap().open = true;
    assert_eq!(tree.step().unwrap(), Status::Succeeded);
}

#[test]
fn guard_cycles_are_rejected_at_construction() {
    let mut tree = Tree::with_object(Probe::default());
    let a = tree.insert(Emit::new("a", Outcome::Success));
    let b = tree.insert(Emit::new("b", Outcome::Success));
    let c = tree.insert(Emit::new("c", Outcome::Success));

    tree.set_guard(a, b).unwrap();
    tree.set_guard(b, c).unwrap();
    assert!(matches!(tree.set_guard(c, a), Err(TreeError::GuardCycle)));

    let x = tree.insert(Emit::new("x", Outcome::Success));
    let y = tree.insert(Emit::new("y", Outcome::Success));
    tree.set_guard(x, y).unwrap();
    assert!(matches!(tree.set_guard(y, x), Err(TreeError::GuardCycle)));

    let z = tree.insert(Emit::new("z", Outcome::Success));
    assert!(matches!(tree.set_guard(z, z), Err(TreeError::GuardCycle)));
}

#[test]
fn attached_nodes_cannot_become_guards() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(Selector::new());
    let child = tree.insert(Emit::new("child", Outcome::Success));
    tree.add_root(root).unwrap();
    tree.add_child(root, child).unwrap();

    let host = tree.insert(Emit::new("host", Outcome::Success));
    assert!(matches!(
        tree.set_guard(host, child),
        Err(TreeError::AlreadyAttached)
    ));
}

#[test]
fn guards_never_appear_in_the_child_list() {
    let mut tree = Tree::with_object(Probe::default());
    let root = tree.insert(Emit::new("root", Outcome::Success));
    let guard = tree.insert(Emit::new("guard", Outcome::Success));
    tree.add_root(root).unwrap();
    tree.set_guard(root, guard).unwrap();

    assert_eq!(tree.child_count(root), 0);
    assert_eq!(tree.guard(root), Some(guard));
}
