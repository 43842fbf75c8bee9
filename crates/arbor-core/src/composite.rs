use crate::error::Result;
use crate::node::Behavior;
use crate::status::Outcome;
use crate::tree::Ctx;

/// Per-activation cursor state shared by the ordered composites: the next
/// candidate position and the position of the child currently Running (at
/// most one at a time).
#[derive(Debug, Default)]
struct SelectionState {
    cursor: usize,
    running: Option<usize>,
}

impl SelectionState {
    fn clear(&mut self) {
        self.cursor = 0;
        self.running = None;
    }
}

/// Which child outcome completes an ordered composite. The opposite outcome
/// advances the cursor and retries immediately within the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompleteOn {
    Success,
    Failure,
}

/// The shared selection loop. A saved Running child is resumed directly
/// (no guard re-check); otherwise the cursor child goes through the full
/// activation protocol. Exhausting the children completes with the outcome
/// opposite to `complete_on`.
fn run_ordered<E: 'static>(
    state: &mut SelectionState,
    ctx: &mut Ctx<'_, E>,
    order: Option<&[usize]>,
    complete_on: CompleteOn,
) -> Result<Outcome> {
    let len = order.map_or(ctx.child_count(), |order| order.len());
    loop {
        let (position, resume) = match state.running.take() {
            Some(position) => (position, true),
            None if state.cursor < len => (state.cursor, false),
            None => {
                return Ok(match complete_on {
                    CompleteOn::Success => Outcome::Failure,
                    CompleteOn::Failure => Outcome::Success,
                });
            }
        };
        let index = order.map_or(position, |order| order[position]);
        let outcome = if resume {
            ctx.resume_child(index)?
        } else {
            ctx.run_child(index)?
        };
        match (outcome, complete_on) {
            (Outcome::Running, _) => {
                state.running = Some(position);
                return Ok(Outcome::Running);
            }
            (Outcome::Success, CompleteOn::Success) => return Ok(Outcome::Success),
            (Outcome::Failure, CompleteOn::Failure) => return Ok(Outcome::Failure),
            _ => state.cursor = position + 1,
        }
    }
}

/// Ordered selector: the first child to succeed makes the selector succeed;
/// a failing child advances to the next one within the same step; running
/// out of children fails.
#[derive(Debug, Default)]
pub struct Selector {
    state: SelectionState,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: 'static> Behavior<E> for Selector {
    fn start(&mut self, _ctx: &mut Ctx<'_, E>) -> Result<()> {
        self.state.clear();
        Ok(())
    }

    fn run(&mut self, ctx: &mut Ctx<'_, E>) -> Result<Outcome> {
        run_ordered(&mut self.state, ctx, None, CompleteOn::Success)
    }

    fn reset(&mut self) {
        self.state.clear();
    }
}

/// Ordered sequence: the first child to fail makes the sequence fail; a
/// succeeding child advances to the next one within the same step; running
/// out of children succeeds.
#[derive(Debug, Default)]
pub struct Sequence {
    state: SelectionState,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: 'static> Behavior<E> for Sequence {
    fn start(&mut self, _ctx: &mut Ctx<'_, E>) -> Result<()> {
        self.state.clear();
        Ok(())
    }

    fn run(&mut self, ctx: &mut Ctx<'_, E>) -> Result<Outcome> {
        run_ordered(&mut self.state, ctx, None, CompleteOn::Failure)
    }

    fn reset(&mut self) {
        self.state.clear();
    }
}

/// Per-activation scoring hook for [`ScoreSelector`]. How children are
/// scored is up to the implementation: by name lookup, by blackboard
/// inspection, or anything else reachable through the context.
pub trait Scorer<E>: 'static {
    /// Child indices in activation order, highest priority first.
    /// Out-of-range and repeated indices are discarded; an empty ordering
    /// falls back to the declared child order.
    fn order(&mut self, ctx: &mut Ctx<'_, E>) -> Vec<usize>;
}

impl<E, F> Scorer<E> for F
where
    F: for<'a, 'b> FnMut(&'a mut Ctx<'b, E>) -> Vec<usize> + 'static,
{
    fn order(&mut self, ctx: &mut Ctx<'_, E>) -> Vec<usize> {
        self(ctx)
    }
}

/// Selector that re-prioritizes its children once per activation, before
/// any child runs. Selection then walks the scored working list exactly
/// like [`Selector`] walks the declared child list.
pub struct ScoreSelector<E> {
    state: SelectionState,
    scorer: Box<dyn Scorer<E>>,
    order: Vec<usize>,
}

impl<E: 'static> ScoreSelector<E> {
    pub fn new(scorer: impl Scorer<E>) -> Self {
        Self {
            state: SelectionState::default(),
            scorer: Box::new(scorer),
            order: Vec::new(),
        }
    }

    /// The working order computed for the current activation.
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}

impl<E: 'static> Behavior<E> for ScoreSelector<E> {
    fn start(&mut self, ctx: &mut Ctx<'_, E>) -> Result<()> {
        self.state.clear();
        let child_count = ctx.child_count();
        let mut order = self.scorer.order(ctx);
        let mut seen = vec![false; child_count];
        order.retain(|&index| index < child_count && !std::mem::replace(&mut seen[index], true));
        if order.is_empty() {
            order = (0..child_count).collect();
        }
        self.order = order;
        Ok(())
    }

    fn run(&mut self, ctx: &mut Ctx<'_, E>) -> Result<Outcome> {
        run_ordered(&mut self.state, ctx, Some(&self.order), CompleteOn::Success)
    }

    fn reset(&mut self) {
        self.state.clear();
        self.order.clear();
    }
}
