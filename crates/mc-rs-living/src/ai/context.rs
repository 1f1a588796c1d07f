//! What AI helpers see and write during one coordination cycle.

use bevy_ecs::entity::Entity;

use crate::aggro::AggroTracker;
use crate::components::{Position, Rotation};
use crate::sensors::Surroundings;
use crate::world::LivingWorld;

/// Steering intent consumed by the movement integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Steering {
    pub strafe: f32,
    pub forward: f32,
    /// Speed the grounded integrator uses (blocks/tick before slip scaling).
    pub move_speed: f32,
    pub jumping: bool,
    pub sprinting: bool,
}

/// Walk toward `target` at `speed` × the movement speed attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    pub target: Position,
    pub speed: f32,
}

/// Turn the head toward `target`, at most `yaw_step`/`pitch_step` degrees per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookRequest {
    pub target: Position,
    pub yaw_step: f32,
    pub pitch_step: f32,
}

/// A swing at `target`, resolved by the world driver after the entity's tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeRequest {
    pub target: Entity,
    pub damage: f32,
}

/// Per-tick mailbox between tasks, the navigator and the helpers.
///
/// Tasks post path/look/jump/melee requests; the navigator turns a path into a
/// move request; each helper consumes its own slot.
#[derive(Debug, Default)]
pub struct AiRequests {
    pub path_to: Option<MoveRequest>,
    pub stop_navigation: bool,
    pub move_to: Option<MoveRequest>,
    pub look_at: Option<LookRequest>,
    pub jump: bool,
    pub melee: Vec<MeleeRequest>,
}

/// Mutable view of one entity's AI-relevant state for a single cycle.
pub struct AiContext<'a> {
    pub runtime_id: u64,
    pub current_tick: u64,
    pub position: Position,
    pub eye_height: f32,
    pub surroundings: Surroundings,
    /// Effective attribute values.
    pub movement_speed: f32,
    pub attack_damage: f32,
    pub follow_range: f32,
    pub rotation: &'a mut Rotation,
    pub steering: &'a mut Steering,
    pub aggro: &'a mut AggroTracker,
    pub requests: &'a mut AiRequests,
    pub world: &'a dyn LivingWorld,
}

impl AiContext<'_> {
    pub fn eye_position(&self) -> Position {
        self.position.offset_y(self.eye_height)
    }

    /// Current attack target and its position, if it is still alive.
    pub fn live_attack_target(&self) -> Option<(Entity, Position)> {
        let target = self.aggro.attack_target()?;
        if !self.world.entity_alive(target) {
            return None;
        }
        self.world.entity_position(target).map(|p| (target, p))
    }
}
