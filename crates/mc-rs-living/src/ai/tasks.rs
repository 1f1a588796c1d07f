//! Task implementations for mob AI.

use rand::Rng;

use crate::components::Position;

use super::context::{AiContext, LookRequest, MeleeRequest, MoveRequest};
use super::navigator::yaw_toward;
use super::task::{AiTask, TaskKind};

// ---------------------------------------------------------------------------
// Swim (Passive, priority 0): keep the head above liquid
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Swim {
    /// Chance per tick to request a jump (upward stroke).
    stroke_chance: f64,
}

impl Default for Swim {
    fn default() -> Self {
        Self { stroke_chance: 0.8 }
    }
}

impl Swim {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AiTask for Swim {
    fn kind(&self) -> TaskKind {
        TaskKind::Passive
    }

    fn priority(&self) -> u32 {
        0
    }

    fn can_start(&self, ctx: &AiContext) -> bool {
        ctx.surroundings.in_water || ctx.surroundings.in_lava
    }

    fn tick(&mut self, ctx: &mut AiContext) {
        if rand::thread_rng().gen_bool(self.stroke_chance) {
            ctx.requests.jump = true;
        }
    }
}

// ---------------------------------------------------------------------------
// HurtByTarget (TargetSelector, priority 0): go after whoever hurt us
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct HurtByTarget;

impl HurtByTarget {
    pub fn new() -> Self {
        Self
    }
}

impl AiTask for HurtByTarget {
    fn kind(&self) -> TaskKind {
        TaskKind::TargetSelector
    }

    fn priority(&self) -> u32 {
        0
    }

    fn can_start(&self, ctx: &AiContext) -> bool {
        match ctx.aggro.revenge_target() {
            Some(attacker) => {
                ctx.aggro.attack_target() != Some(attacker) && ctx.world.entity_alive(attacker)
            }
            None => false,
        }
    }

    fn should_continue(&self, ctx: &AiContext) -> bool {
        ctx.live_attack_target()
            .map(|(_, pos)| ctx.position.distance_xz(&pos) <= ctx.follow_range)
            .unwrap_or(false)
    }

    fn start(&mut self, ctx: &mut AiContext) {
        let attacker = ctx.aggro.revenge_target();
        ctx.aggro.set_attack_target(attacker);
    }

    fn tick(&mut self, _ctx: &mut AiContext) {}

    fn stop(&mut self, ctx: &mut AiContext) {
        ctx.aggro.set_attack_target(None);
    }
}

// ---------------------------------------------------------------------------
// NearestAttackableTarget (TargetSelector, priority 1)
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct NearestAttackableTarget {
    /// Maximum detection range.
    range: f32,
}

impl NearestAttackableTarget {
    pub fn new(range: f32) -> Self {
        Self { range }
    }
}

impl AiTask for NearestAttackableTarget {
    fn kind(&self) -> TaskKind {
        TaskKind::TargetSelector
    }

    fn priority(&self) -> u32 {
        1
    }

    fn can_start(&self, ctx: &AiContext) -> bool {
        ctx.aggro.attack_target().is_none()
            && ctx.world.nearest_player(ctx.position, self.range).is_some()
    }

    fn should_continue(&self, ctx: &AiContext) -> bool {
        // Keep targeting while the target lives and stays within 2× range
        ctx.live_attack_target()
            .map(|(_, pos)| ctx.position.distance_xz(&pos) <= self.range * 2.0)
            .unwrap_or(false)
    }

    fn start(&mut self, ctx: &mut AiContext) {
        let player = ctx.world.nearest_player(ctx.position, self.range);
        ctx.aggro.set_attack_target(player.map(|(e, _)| e));
    }

    fn tick(&mut self, _ctx: &mut AiContext) {}

    fn stop(&mut self, ctx: &mut AiContext) {
        ctx.aggro.set_attack_target(None);
    }
}

// ---------------------------------------------------------------------------
// MeleeAttack (Movement, priority 2): chase and hit the attack target
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct MeleeAttack {
    /// Ticks between swings.
    attack_interval: u64,
    /// Tick of the last swing.
    last_attack_tick: u64,
    speed: f32,
    reach: f32,
}

impl MeleeAttack {
    pub fn new(attack_interval: u64) -> Self {
        Self {
            attack_interval,
            last_attack_tick: 0,
            speed: 1.0,
            reach: 2.0,
        }
    }
}

impl AiTask for MeleeAttack {
    fn kind(&self) -> TaskKind {
        TaskKind::Movement
    }

    fn priority(&self) -> u32 {
        2
    }

    fn can_start(&self, ctx: &AiContext) -> bool {
        ctx.live_attack_target().is_some()
    }

    fn tick(&mut self, ctx: &mut AiContext) {
        let Some((target, pos)) = ctx.live_attack_target() else {
            return;
        };

        ctx.requests.path_to = Some(MoveRequest {
            target: pos,
            speed: self.speed,
        });
        ctx.requests.look_at = Some(LookRequest {
            target: pos.offset_y(ctx.eye_height),
            yaw_step: 30.0,
            pitch_step: 30.0,
        });

        let dist = ctx.position.distance_xz(&pos);
        if dist <= self.reach
            && ctx.current_tick.saturating_sub(self.last_attack_tick) >= self.attack_interval
        {
            ctx.requests.melee.push(MeleeRequest {
                target,
                damage: ctx.attack_damage,
            });
            self.last_attack_tick = ctx.current_tick;
        }
    }

    fn stop(&mut self, ctx: &mut AiContext) {
        ctx.requests.stop_navigation = true;
    }
}

// ---------------------------------------------------------------------------
// Wander (Movement, priority 7): stroll to random nearby spots
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Wander {
    /// Current stroll destination, if any.
    goal: Option<Position>,
    /// Tick the stroll gives up at.
    give_up_at: u64,
    /// Tick when a new destination may be picked.
    cooldown_until: u64,
}

impl Wander {
    pub fn new() -> Self {
        Self::default()
    }

    fn rest(&mut self, current_tick: u64) {
        self.goal = None;
        self.cooldown_until = current_tick + rand::thread_rng().gen_range(40..120);
    }
}

impl AiTask for Wander {
    fn kind(&self) -> TaskKind {
        TaskKind::Movement
    }

    fn priority(&self) -> u32 {
        7
    }

    fn can_start(&self, ctx: &AiContext) -> bool {
        ctx.surroundings.on_ground && ctx.current_tick >= self.cooldown_until && self.goal.is_none()
    }

    fn should_continue(&self, _ctx: &AiContext) -> bool {
        self.goal.is_some()
    }

    fn start(&mut self, ctx: &mut AiContext) {
        let mut rng = rand::thread_rng();
        let goal = Position::new(
            ctx.position.x + rng.gen_range(-10.0..10.0),
            ctx.position.y,
            ctx.position.z + rng.gen_range(-10.0..10.0),
        );
        self.goal = Some(goal);
        self.give_up_at = ctx.current_tick + 200;
        ctx.requests.path_to = Some(MoveRequest {
            target: goal,
            speed: 1.0,
        });
    }

    fn tick(&mut self, ctx: &mut AiContext) {
        let Some(goal) = self.goal else {
            return;
        };
        if ctx.position.distance_xz(&goal) < 0.5 || ctx.current_tick >= self.give_up_at {
            self.rest(ctx.current_tick);
        }
    }

    fn stop(&mut self, ctx: &mut AiContext) {
        self.goal = None;
        ctx.requests.stop_navigation = true;
    }
}

// ---------------------------------------------------------------------------
// WatchClosest (Passive, priority 8): face the nearest player
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct WatchClosest {
    /// Maximum detection range (blocks).
    range: f32,
}

impl WatchClosest {
    pub fn new(range: f32) -> Self {
        Self { range }
    }
}

impl AiTask for WatchClosest {
    fn kind(&self) -> TaskKind {
        TaskKind::Passive
    }

    fn priority(&self) -> u32 {
        8
    }

    fn can_start(&self, ctx: &AiContext) -> bool {
        ctx.world.nearest_player(ctx.position, self.range).is_some()
    }

    fn tick(&mut self, ctx: &mut AiContext) {
        // a chase already aims the head
        if ctx.requests.look_at.is_some() {
            return;
        }
        if let Some((_, player)) = ctx.world.nearest_player(ctx.position, self.range) {
            ctx.requests.look_at = Some(LookRequest {
                target: player.offset_y(ctx.eye_height),
                yaw_step: 10.0,
                pitch_step: 40.0,
            });
            // standing still: turn the whole body
            if ctx.steering.forward.abs() < 0.001 {
                ctx.rotation.yaw = yaw_toward(&ctx.position, &player);
            }
        }
    }
}
