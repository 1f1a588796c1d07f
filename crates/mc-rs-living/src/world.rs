//! The world as seen from inside a living entity's tick.
//!
//! A [`LivingWorld`] is handed to every operation that needs to look outside
//! the entity: block lookups, other entities' liveness and positions, item
//! drops, observer broadcasts and event listeners.
//!
//! Precondition: the driver ticks entities strictly one after another. Nothing
//! here takes locks; an entity mutates only its own state and reaches the rest
//! of the world through this trait.

use bevy_ecs::entity::Entity;
use bevy_ecs::prelude::Resource;
use serde::Deserialize;

use crate::block::{Block, BlockPos};
use crate::components::Position;
use crate::error::LivingError;
use crate::event::{DamageEvent, DeathEvent, EntityEventKind, ItemDrop, RegainHealthEvent};

pub trait LivingWorld {
    /// Block at `pos`. Fails only if the position is not available at all.
    fn block_at(&self, pos: BlockPos) -> Result<Block, LivingError>;

    fn entity_alive(&self, entity: Entity) -> bool;

    fn entity_position(&self, entity: Entity) -> Option<Position>;

    /// Nearest living player within `range` blocks (XZ) of `from`.
    fn nearest_player(&self, from: Position, range: f32) -> Option<(Entity, Position)>;

    /// Hand an item to the world at `position`.
    fn drop_item(&mut self, position: Position, item: ItemDrop);

    /// Fire-and-forget visual event to everyone observing `runtime_id`.
    fn broadcast(&mut self, runtime_id: u64, event: EntityEventKind);

    fn call_damage(&mut self, _event: &mut DamageEvent) {}

    fn call_regain_health(&mut self, _event: &mut RegainHealthEvent) {}

    fn call_death(&mut self, _event: &mut DeathEvent) {}
}

/// World difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Peaceful,
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn level(self) -> i32 {
        match self {
            Difficulty::Peaceful => 0,
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// World-wide switches read once per tick.
#[derive(Resource, Debug, Clone, Copy, Deserialize)]
pub struct WorldSettings {
    #[serde(default = "default_ai_enabled")]
    pub ai_enabled: bool,
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_ai_enabled() -> bool {
    true
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            ai_enabled: default_ai_enabled(),
            difficulty: Difficulty::default(),
        }
    }
}

/// Per-tick values passed explicitly instead of read from global state.
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    pub current_tick: u64,
    pub difficulty: Difficulty,
    pub ai_enabled: bool,
}

impl TickContext {
    pub fn new(current_tick: u64, settings: &WorldSettings) -> Self {
        Self {
            current_tick,
            difficulty: settings.difficulty,
            ai_enabled: settings.ai_enabled,
        }
    }
}
