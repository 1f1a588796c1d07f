//! In-memory world collaborator for unit tests.

use std::collections::{HashMap, HashSet};

use bevy_ecs::entity::Entity;

use crate::aggro::AggroTracker;
use crate::ai::context::{AiContext, AiRequests, Steering};
use crate::block::{Block, BlockKind, BlockPos};
use crate::components::{Position, Rotation};
use crate::error::LivingError;
use crate::event::{DamageEvent, DeathEvent, EntityEventKind, ItemDrop, RegainHealthEvent};
use crate::level::{FlatLevel, Level};
use crate::sensors::Surroundings;
use crate::world::LivingWorld;

pub(crate) struct TestWorld {
    pub level: FlatLevel,
    pub positions: HashMap<Entity, Position>,
    pub dead: HashSet<Entity>,
    pub players: Vec<Entity>,
    pub broadcasts: Vec<(u64, EntityEventKind)>,
    pub drops: Vec<(Position, ItemDrop)>,
    pub death_events: usize,
    pub damage_calls: usize,
    /// Listener verdict forced onto every damage event, if any.
    pub damage_verdict: Option<bool>,
    pub cancel_heals: bool,
    /// Drops a death listener appends.
    pub extra_drop: Option<ItemDrop>,
}

impl TestWorld {
    /// All air.
    pub fn new() -> Self {
        Self::on_level(FlatLevel::empty())
    }

    /// Default flat floor; feet rest at y = 4.
    pub fn with_floor() -> Self {
        Self::on_level(FlatLevel::new())
    }

    fn on_level(level: FlatLevel) -> Self {
        Self {
            level,
            positions: HashMap::new(),
            dead: HashSet::new(),
            players: Vec::new(),
            broadcasts: Vec::new(),
            drops: Vec::new(),
            death_events: 0,
            damage_calls: 0,
            damage_verdict: None,
            cancel_heals: false,
            extra_drop: None,
        }
    }

    pub fn set_block(&mut self, pos: BlockPos, kind: BlockKind) {
        self.level.set_block(pos, kind);
    }

    pub fn unload_beyond(&mut self, radius: i32) {
        self.level = std::mem::take(&mut self.level).with_loaded_radius(radius);
    }

    pub fn add_entity(&mut self, entity: Entity, position: Position) {
        self.positions.insert(entity, position);
    }

    pub fn add_player(&mut self, entity: Entity, position: Position) {
        self.add_entity(entity, position);
        self.players.push(entity);
    }

    pub fn kill_entity(&mut self, entity: Entity) {
        self.dead.insert(entity);
    }

    pub fn count_broadcasts(&self, kind: EntityEventKind) -> usize {
        self.broadcasts.iter().filter(|(_, k)| *k == kind).count()
    }
}

impl LivingWorld for TestWorld {
    fn block_at(&self, pos: BlockPos) -> Result<Block, LivingError> {
        self.level.block_at(pos)
    }

    fn entity_alive(&self, entity: Entity) -> bool {
        self.positions.contains_key(&entity) && !self.dead.contains(&entity)
    }

    fn entity_position(&self, entity: Entity) -> Option<Position> {
        self.positions.get(&entity).copied()
    }

    fn nearest_player(&self, from: Position, range: f32) -> Option<(Entity, Position)> {
        self.players
            .iter()
            .filter(|e| !self.dead.contains(e))
            .filter_map(|e| self.positions.get(e).map(|p| (*e, *p)))
            .filter(|(_, p)| from.distance_xz(p) <= range)
            .min_by(|a, b| {
                from.distance_xz(&a.1)
                    .partial_cmp(&from.distance_xz(&b.1))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    fn drop_item(&mut self, position: Position, item: ItemDrop) {
        self.drops.push((position, item));
    }

    fn broadcast(&mut self, runtime_id: u64, event: EntityEventKind) {
        self.broadcasts.push((runtime_id, event));
    }

    fn call_damage(&mut self, event: &mut DamageEvent) {
        self.damage_calls += 1;
        if let Some(cancelled) = self.damage_verdict {
            event.set_cancelled(cancelled);
        }
    }

    fn call_regain_health(&mut self, event: &mut RegainHealthEvent) {
        if self.cancel_heals {
            event.set_cancelled(true);
        }
    }

    fn call_death(&mut self, event: &mut DeathEvent) {
        self.death_events += 1;
        if let Some(extra) = &self.extra_drop {
            event.drops.push(extra.clone());
        }
    }
}

/// Loose parts of an AI context, owned by the test.
pub(crate) struct AiFixture {
    pub world: TestWorld,
    pub current_tick: u64,
    pub position: Position,
    pub surroundings: Surroundings,
    pub rotation: Rotation,
    pub steering: Steering,
    pub aggro: AggroTracker,
    pub requests: AiRequests,
}

impl AiFixture {
    /// Standing on the default floor at (0.5, 4, 0.5), tick 100.
    pub fn new() -> Self {
        Self {
            world: TestWorld::with_floor(),
            current_tick: 100,
            position: Position::new(0.5, 4.0, 0.5),
            surroundings: Surroundings {
                on_ground: true,
                ..Default::default()
            },
            rotation: Rotation::default(),
            steering: Steering::default(),
            aggro: AggroTracker::new(),
            requests: AiRequests::default(),
        }
    }

    /// Movement speed 0.25, attack damage 3, follow range 16, eyes at 1.62.
    pub fn ctx(&mut self) -> AiContext<'_> {
        AiContext {
            runtime_id: 1,
            current_tick: self.current_tick,
            position: self.position,
            eye_height: 1.62,
            surroundings: self.surroundings,
            movement_speed: 0.25,
            attack_damage: 3.0,
            follow_range: 16.0,
            rotation: &mut self.rotation,
            steering: &mut self.steering,
            aggro: &mut self.aggro,
            requests: &mut self.requests,
            world: &self.world,
        }
    }
}
