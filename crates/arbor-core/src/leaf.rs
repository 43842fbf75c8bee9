use crate::error::Result;
use crate::node::Behavior;
use crate::status::Outcome;
use crate::tree::Ctx;

/// Predicate leaf over the blackboard: succeeds when the closure returns
/// `true`, fails otherwise. Always resolves in one step, which also makes
/// it suitable as a guard.
pub struct Condition<F> {
    predicate: F,
}

impl<F> Condition<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<E: 'static, F> Behavior<E> for Condition<F>
where
    F: FnMut(&mut E) -> bool + 'static,
{
    fn run(&mut self, ctx: &mut Ctx<'_, E>) -> Result<Outcome> {
        Ok(if (self.predicate)(ctx.object()?) {
            Outcome::Success
        } else {
            Outcome::Failure
        })
    }
}

/// General closure leaf: reports an explicit outcome on every step it runs.
pub struct Action<F> {
    action: F,
}

impl<F> Action<F> {
    pub fn new(action: F) -> Self {
        Self { action }
    }
}

impl<E: 'static, F> Behavior<E> for Action<F>
where
    F: FnMut(&mut E) -> Outcome + 'static,
{
    fn run(&mut self, ctx: &mut Ctx<'_, E>) -> Result<Outcome> {
        Ok((self.action)(ctx.object()?))
    }
}
