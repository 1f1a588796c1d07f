//! The living entity: health, combat, breathing, AI-driven movement.
//!
//! [`LivingEntity::base_tick`] is the per-tick entry point. It reaches the rest
//! of the world only through a [`LivingWorld`], so every entity's tick must run
//! to completion before the next one starts.

mod combat;
mod movement;
mod persist;
mod survival;

use bevy_ecs::prelude::Component;
use tracing::trace;

use crate::aggro::AggroTracker;
use crate::ai::context::{AiContext, AiRequests, MeleeRequest, Steering};
use crate::ai::mob_tasks;
use crate::ai::scheduler::TaskList;
use crate::ai::species::{DropTable, Species};
use crate::ai::AiHelpers;
use crate::attributes::{AttributeKind, AttributeMap};
use crate::block::{Block, BlockKind};
use crate::components::{Position, Rotation, Velocity};
use crate::effects::ActiveEffects;
use crate::error::LivingError;
use crate::event::{DamageCause, DamageEvent};
use crate::mob_registry::{Locomotion, MobDefinition};
use crate::raycast;
use crate::sensors::Surroundings;
use crate::world::{LivingWorld, TickContext};

pub use movement::{
    AIR_FRICTION, GROUND_FRICTION, JUMP_MOVEMENT_FACTOR, JUMP_UPWARD_MOTION, LIQUID_FLOW_STRENGTH,
};
pub use persist::migrate_health;
pub use survival::{MAX_AIR, MIN_AIR};

/// Hit cooldown after an accepted hit (0.5 s).
pub const ATTACK_COOLDOWN_TICKS: u32 = 10;

/// Steering intent is multiplied by this once per AI tick.
pub const STEERING_DECAY: f32 = 0.98;

const DEFAULT_EYE_HEIGHT: f32 = 1.62;

#[derive(Component, Debug)]
pub struct LivingEntity {
    runtime_id: u64,
    locomotion: Locomotion,
    position: Position,
    rotation: Rotation,
    velocity: Velocity,
    on_ground: bool,
    /// Only meaningful for player-controlled entities.
    flying: bool,
    eye_height: f32,
    health: f32,
    attributes: AttributeMap,
    attack_cooldown: u32,
    invulnerability_ticks: u32,
    fire_ticks: u32,
    air_supply: i32,
    breathing: bool,
    jump_cooldown: u32,
    steering: Steering,
    aggro: AggroTracker,
    effects: ActiveEffects,
    last_damage: Option<DamageEvent>,
    surroundings: Surroundings,
    ai: AiHelpers,
    requests: AiRequests,
    species: Box<dyn Species>,
}

impl LivingEntity {
    /// A living entity with default attributes, no AI tasks and no drops.
    pub fn new(runtime_id: u64, locomotion: Locomotion, position: Position) -> Self {
        let attributes = AttributeMap::new();
        let health = attributes.get(AttributeKind::Health).max();
        let move_speed = attributes.value(AttributeKind::MovementSpeed);
        Self {
            runtime_id,
            locomotion,
            position,
            rotation: Rotation::default(),
            velocity: Velocity::default(),
            on_ground: false,
            flying: false,
            eye_height: DEFAULT_EYE_HEIGHT,
            health,
            attributes,
            attack_cooldown: 0,
            invulnerability_ticks: 0,
            fire_ticks: 0,
            air_supply: MAX_AIR,
            breathing: true,
            jump_cooldown: 0,
            steering: Steering {
                move_speed,
                ..Default::default()
            },
            aggro: AggroTracker::new(),
            effects: ActiveEffects::default(),
            last_damage: None,
            surroundings: Surroundings::default(),
            ai: AiHelpers::default(),
            requests: AiRequests::default(),
            species: Box::new(DropTable::default()),
        }
    }

    /// A mob built from its registry definition, at full health.
    pub fn from_definition(runtime_id: u64, def: &MobDefinition, position: Position) -> Self {
        let mut living = Self::new(runtime_id, def.locomotion, position)
            .with_eye_height(def.eye_height)
            .with_ai(AiHelpers::new(
                TaskList::new(mob_tasks::create_target_tasks(def)),
                TaskList::new(mob_tasks::create_tasks(def)),
            ))
            .with_species(mob_tasks::create_species(def));
        living.set_max_health(def.max_health);
        living.health = living.max_health();
        living.attributes.set_base(AttributeKind::MovementSpeed, def.movement_speed);
        living.attributes.set_base(AttributeKind::AttackDamage, def.attack_damage);
        living.attributes.set_base(AttributeKind::FollowRange, def.follow_range);
        living.steering.move_speed = def.movement_speed;
        living
    }

    pub fn with_ai(mut self, ai: AiHelpers) -> Self {
        self.ai = ai;
        self
    }

    pub fn with_species(mut self, species: Box<dyn Species>) -> Self {
        self.species = species;
        self
    }

    pub fn with_eye_height(mut self, eye_height: f32) -> Self {
        self.eye_height = eye_height;
        self
    }

    pub fn runtime_id(&self) -> u64 {
        self.runtime_id
    }

    pub fn locomotion(&self) -> Locomotion {
        self.locomotion
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn eye_position(&self) -> Position {
        self.position.offset_y(self.eye_height)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn set_on_ground(&mut self, on_ground: bool) {
        self.on_ground = on_ground;
    }

    /// Flight makes a player-controlled entity move as if in open air.
    pub fn set_flying(&mut self, flying: bool) {
        self.flying = flying;
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.attributes.get(AttributeKind::Health).max()
    }

    pub fn set_max_health(&mut self, max_health: f32) {
        let attr = self.attributes.get_mut(AttributeKind::Health);
        attr.set_max(max_health);
        attr.set_base(max_health);
        self.health = self.health.min(self.max_health());
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attributes
    }

    pub fn attack_cooldown(&self) -> u32 {
        self.attack_cooldown
    }

    pub fn invulnerability_ticks(&self) -> u32 {
        self.invulnerability_ticks
    }

    /// Set by the owning framework (e.g. after a respawn).
    pub fn set_invulnerability_ticks(&mut self, ticks: u32) {
        self.invulnerability_ticks = ticks;
    }

    pub fn air_supply(&self) -> i32 {
        self.air_supply
    }

    pub fn set_air_supply(&mut self, air: i32) {
        self.air_supply = air.clamp(MIN_AIR, MAX_AIR);
    }

    /// False while the eyes are under water.
    pub fn is_breathing(&self) -> bool {
        self.breathing
    }

    pub fn fire_ticks(&self) -> u32 {
        self.fire_ticks
    }

    pub fn is_on_fire(&self) -> bool {
        self.fire_ticks > 0
    }

    /// Burn for at least `seconds`.
    pub fn set_on_fire(&mut self, seconds: u32) {
        self.fire_ticks = self.fire_ticks.max(seconds.saturating_mul(20));
    }

    pub fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut ActiveEffects {
        &mut self.effects
    }

    pub fn steering(&self) -> Steering {
        self.steering
    }

    pub fn set_steering(&mut self, strafe: f32, forward: f32) {
        self.steering.strafe = strafe;
        self.steering.forward = forward;
    }

    /// Sets both the grounded move speed and the forward intent.
    pub fn set_ai_move_speed(&mut self, speed: f32) {
        self.steering.move_speed = speed;
        self.steering.forward = speed;
    }

    pub fn set_jumping(&mut self, jumping: bool) {
        self.steering.jumping = jumping;
    }

    pub fn set_sprinting(&mut self, sprinting: bool) {
        self.steering.sprinting = sprinting;
    }

    pub fn jump_cooldown(&self) -> u32 {
        self.jump_cooldown
    }

    pub fn aggro(&self) -> &AggroTracker {
        &self.aggro
    }

    pub fn aggro_mut(&mut self) -> &mut AggroTracker {
        &mut self.aggro
    }

    /// The last hit that was accepted.
    pub fn last_damage(&self) -> Option<&DamageEvent> {
        self.last_damage.as_ref()
    }

    pub fn surroundings(&self) -> Surroundings {
        self.surroundings
    }

    pub fn ai(&self) -> &AiHelpers {
        &self.ai
    }

    /// Melee swings requested by AI since the last call.
    pub fn take_melee_requests(&mut self) -> Vec<MeleeRequest> {
        std::mem::take(&mut self.requests.melee)
    }

    /// Re-read the environment sensors at the current position.
    pub fn sense(&mut self, world: &dyn LivingWorld) -> Result<Surroundings, LivingError> {
        self.surroundings = Surroundings::sense(self.position, self.eye_height, self.on_ground, world)?;
        Ok(self.surroundings)
    }

    /// One simulation step. Returns whether anything worth persisting or
    /// broadcasting changed.
    pub fn base_tick(
        &mut self,
        tick_diff: u32,
        ctx: &TickContext,
        world: &mut dyn LivingWorld,
    ) -> Result<bool, LivingError> {
        let tick_diff = tick_diff.max(1);
        self.sense(world)?;
        self.breathing = !self.surroundings.in_water;
        if self.jump_cooldown > 0 {
            self.jump_cooldown -= 1;
        }

        let mut has_update = self.entity_base_tick(tick_diff, ctx, world);

        let ai_driven = ctx.ai_enabled && self.locomotion != Locomotion::PlayerControlled;
        if ai_driven {
            has_update |= self.update_action_state(ctx, world);
            self.steering.strafe *= STEERING_DECAY;
            self.steering.forward *= STEERING_DECAY;
            let before = self.position;
            self.move_with_heading(self.steering.strafe, self.steering.forward, world)?;
            has_update |= self.position != before;
            self.sense(world)?;
        }

        if self.is_alive() {
            if self.surroundings.in_solid {
                has_update = true;
                let mut event = DamageEvent::new(DamageCause::Suffocation, 1.0);
                self.apply_damage(&mut event, ctx, world);
            }
            has_update |= self.update_air_supply(tick_diff, ctx, world);
            if ctx.ai_enabled {
                self.dispatch_jump();
            }
        }

        if ai_driven && self.aggro.expire_revenge(ctx.current_tick, world) {
            has_update = true;
        }

        self.attack_cooldown = self.attack_cooldown.saturating_sub(tick_diff);
        Ok(has_update)
    }

    /// Drive the AI helpers once. Returns whether steering, rotation or the
    /// attack target changed.
    pub fn update_action_state(&mut self, ctx: &TickContext, world: &dyn LivingWorld) -> bool {
        let before = (self.steering, self.rotation, self.aggro.attack_target());

        let mut cx = AiContext {
            runtime_id: self.runtime_id,
            current_tick: ctx.current_tick,
            position: self.position,
            eye_height: self.eye_height,
            surroundings: self.surroundings,
            movement_speed: self.attributes.value(AttributeKind::MovementSpeed),
            attack_damage: self.attributes.value(AttributeKind::AttackDamage),
            follow_range: self.attributes.value(AttributeKind::FollowRange),
            rotation: &mut self.rotation,
            steering: &mut self.steering,
            aggro: &mut self.aggro,
            requests: &mut self.requests,
            world,
        };
        self.ai.run_cycle(self.species.as_mut(), &mut cx);

        let changed = before != (self.steering, self.rotation, self.aggro.attack_target());
        trace!(runtime_id = self.runtime_id, changed, "ai cycle");
        changed
    }

    /// Blocks along the facing direction from the eyes, up to the first
    /// non-transparent one. `max_length` 0 keeps all of them.
    pub fn line_of_sight(
        &self,
        world: &dyn LivingWorld,
        max_distance: f32,
        max_length: usize,
        transparent: &[BlockKind],
    ) -> Result<Vec<Block>, LivingError> {
        raycast::line_of_sight(
            world,
            self.eye_position(),
            self.rotation.direction(),
            max_distance,
            max_length,
            transparent,
        )
    }

    /// The block being looked at, if the ray found any.
    pub fn target_block(
        &self,
        world: &dyn LivingWorld,
        max_distance: f32,
        transparent: &[BlockKind],
    ) -> Result<Option<Block>, LivingError> {
        Ok(self
            .line_of_sight(world, max_distance, 1, transparent)?
            .into_iter()
            .next())
    }
}
