//! TaskList: a mob's prioritized AI tasks and which of them are running.

use tracing::trace;

use super::context::AiContext;
use super::task::{AiTask, TaskKind};

/// Movement and target-selector tasks are exclusive per kind: the
/// highest-priority task that may run wins and preempts the current one.
/// Passive tasks run side by side.
pub struct TaskList {
    tasks: Vec<Box<dyn AiTask>>,
    active_movement: Option<usize>,
    active_target_selector: Option<usize>,
    active_passives: Vec<usize>,
}

impl TaskList {
    pub fn new(tasks: Vec<Box<dyn AiTask>>) -> Self {
        Self {
            tasks,
            active_movement: None,
            active_target_selector: None,
            active_passives: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn count_by_kind(&self, kind: TaskKind) -> usize {
        self.tasks.iter().filter(|t| t.kind() == kind).count()
    }

    /// Number of tasks currently running.
    pub fn running(&self) -> usize {
        self.active_movement.iter().count()
            + self.active_target_selector.iter().count()
            + self.active_passives.len()
    }

    /// Run one scheduling step: stop, start and tick tasks.
    pub fn update(&mut self, ctx: &mut AiContext) {
        let selector = self.select_exclusive(TaskKind::TargetSelector, self.active_target_selector, ctx);
        self.active_target_selector = self.transition(self.active_target_selector, selector, ctx);

        let movement = self.select_exclusive(TaskKind::Movement, self.active_movement, ctx);
        self.active_movement = self.transition(self.active_movement, movement, ctx);

        let mut next = Vec::new();
        for (i, task) in self.tasks.iter().enumerate() {
            if task.kind() != TaskKind::Passive {
                continue;
            }
            let was_active = self.active_passives.contains(&i);
            if (was_active && task.should_continue(ctx)) || (!was_active && task.can_start(ctx)) {
                next.push(i);
            }
        }
        for &old in &self.active_passives {
            if !next.contains(&old) {
                self.tasks[old].stop(ctx);
            }
        }
        for &i in &next {
            if !self.active_passives.contains(&i) {
                self.tasks[i].start(ctx);
            }
            self.tasks[i].tick(ctx);
        }
        self.active_passives = next;
    }

    /// Best task of `kind`: the running one may continue, others must be able to start.
    fn select_exclusive(
        &self,
        kind: TaskKind,
        active: Option<usize>,
        ctx: &AiContext,
    ) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (i, task) in self.tasks.iter().enumerate() {
            if task.kind() != kind {
                continue;
            }
            let eligible = if active == Some(i) {
                task.should_continue(ctx)
            } else {
                task.can_start(ctx)
            };
            if eligible && best.map_or(true, |(_, p)| task.priority() < p) {
                best = Some((i, task.priority()));
            }
        }
        best.map(|(i, _)| i)
    }

    fn transition(
        &mut self,
        old: Option<usize>,
        new: Option<usize>,
        ctx: &mut AiContext,
    ) -> Option<usize> {
        if old != new {
            if let Some(i) = old {
                self.tasks[i].stop(ctx);
            }
            if let Some(i) = new {
                self.tasks[i].start(ctx);
            }
            trace!(runtime_id = ctx.runtime_id, ?old, ?new, "task switched");
        }
        if let Some(i) = new {
            self.tasks[i].tick(ctx);
        }
        new
    }
}

impl std::fmt::Debug for TaskList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskList")
            .field("task_count", &self.tasks.len())
            .field("active_movement", &self.active_movement)
            .field("active_target_selector", &self.active_target_selector)
            .field("active_passives", &self.active_passives)
            .finish()
    }
}
