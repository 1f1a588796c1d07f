//! Mob AI: tasks, navigation and the helpers that turn intent into steering.

pub mod context;
pub mod helpers;
pub mod mob_tasks;
pub mod navigator;
pub mod scheduler;
pub mod species;
pub mod task;
pub mod tasks;

use context::AiContext;
use helpers::{
    DefaultJumpHelper, DefaultLookHelper, DefaultMoveHelper, JumpHelper, LookHelper, MoveHelper,
};
use navigator::{GroundNavigator, Navigator};
use scheduler::TaskList;
use species::Species;

/// The AI subsystems a living entity owns for its lifetime.
#[derive(Debug)]
pub struct AiHelpers {
    pub target_tasks: TaskList,
    pub tasks: TaskList,
    pub navigator: Box<dyn Navigator>,
    pub move_helper: Box<dyn MoveHelper>,
    pub look_helper: Box<dyn LookHelper>,
    pub jump_helper: Box<dyn JumpHelper>,
}

impl Default for AiHelpers {
    fn default() -> Self {
        Self::new(TaskList::empty(), TaskList::empty())
    }
}

impl AiHelpers {
    /// Default navigator and helpers around the given task lists.
    pub fn new(target_tasks: TaskList, tasks: TaskList) -> Self {
        Self {
            target_tasks,
            tasks,
            navigator: Box::new(GroundNavigator::new()),
            move_helper: Box::new(DefaultMoveHelper),
            look_helper: Box::new(DefaultLookHelper),
            jump_helper: Box::new(DefaultJumpHelper),
        }
    }

    /// One coordination cycle. Later stages read what earlier ones wrote, so
    /// the order is fixed: target tasks, tasks, navigator, species hook, move,
    /// look, jump.
    pub fn run_cycle(&mut self, species: &mut dyn Species, ctx: &mut AiContext) {
        self.target_tasks.update(ctx);
        self.tasks.update(ctx);
        self.navigator.update(ctx);
        species.update_ai(ctx);
        self.move_helper.update(ctx);
        self.look_helper.update(ctx);
        self.jump_helper.update(ctx);
    }
}
