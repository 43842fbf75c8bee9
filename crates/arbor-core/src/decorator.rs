use crate::error::Result;
use crate::node::Behavior;
use crate::status::Outcome;
use crate::tree::Ctx;

/// Drives the single child of a decorator, resuming it while it reports
/// Running and re-activating it otherwise.
fn tick_only_child<E: 'static>(running: &mut bool, ctx: &mut Ctx<'_, E>) -> Result<Outcome> {
    let outcome = if std::mem::take(running) {
        ctx.resume_child(0)?
    } else {
        ctx.run_child(0)?
    };
    *running = outcome == Outcome::Running;
    Ok(outcome)
}

/// Swaps the child's success and failure; Running passes through.
#[derive(Debug, Default)]
pub struct Invert {
    child_running: bool,
}

impl Invert {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: 'static> Behavior<E> for Invert {
    fn start(&mut self, _ctx: &mut Ctx<'_, E>) -> Result<()> {
        self.child_running = false;
        Ok(())
    }

    fn run(&mut self, ctx: &mut Ctx<'_, E>) -> Result<Outcome> {
        Ok(tick_only_child(&mut self.child_running, ctx)?.invert())
    }

    fn reset(&mut self) {
        self.child_running = false;
    }
}

/// Succeeds whatever the child reports; Running passes through.
#[derive(Debug, Default)]
pub struct AlwaysSucceed {
    child_running: bool,
}

impl AlwaysSucceed {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: 'static> Behavior<E> for AlwaysSucceed {
    fn start(&mut self, _ctx: &mut Ctx<'_, E>) -> Result<()> {
        self.child_running = false;
        Ok(())
    }

    fn run(&mut self, ctx: &mut Ctx<'_, E>) -> Result<Outcome> {
        Ok(match tick_only_child(&mut self.child_running, ctx)? {
            Outcome::Running => Outcome::Running,
            _ => Outcome::Success,
        })
    }

    fn reset(&mut self) {
        self.child_running = false;
    }
}
