//! Priority-based task trait for mob AI.

use super::context::AiContext;

/// How a task shares the entity with other tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Drives movement. Only one runs at a time.
    Movement,
    /// Looking, swimming. Any number run side by side.
    Passive,
    /// Picks the attack target. Only one runs at a time.
    TargetSelector,
}

/// A single task in a [`TaskList`](super::scheduler::TaskList).
pub trait AiTask: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> TaskKind;

    /// Lower runs first.
    fn priority(&self) -> u32;

    fn can_start(&self, ctx: &AiContext) -> bool;

    fn should_continue(&self, ctx: &AiContext) -> bool {
        self.can_start(ctx)
    }

    /// Called once when the task activates.
    fn start(&mut self, _ctx: &mut AiContext) {}

    /// Called every tick while active, including the tick it started.
    fn tick(&mut self, ctx: &mut AiContext);

    /// Called once when the task deactivates.
    fn stop(&mut self, _ctx: &mut AiContext) {}
}
