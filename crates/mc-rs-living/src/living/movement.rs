//! Movement integrator: steering intent to velocity and position, per medium.

use tracing::trace;

use crate::components::Position;
use crate::error::LivingError;
use crate::mob_registry::Locomotion;
use crate::world::LivingWorld;

use super::LivingEntity;

/// Horizontal friction in air.
pub const AIR_FRICTION: f32 = 0.91;
/// Horizontal friction on the ground. Same as air until surfaces carry their own slipperiness.
pub const GROUND_FRICTION: f32 = 0.91;
/// Steering speed while airborne.
pub const JUMP_MOVEMENT_FACTOR: f32 = 0.02;
pub const JUMP_UPWARD_MOTION: f32 = 0.42;
/// Current pushing an entity along in liquid. No flow model exists yet.
pub const LIQUID_FLOW_STRENGTH: f32 = 0.0;

const SLIP_NUMERATOR: f32 = 0.16277136;
const TERMINAL_SINK: f32 = -0.1;
const VERTICAL_DRAG: f32 = 0.98;
const LIQUID_FRICTION: f32 = 0.8;
const LIQUID_SPEED: f32 = 0.02;
const LIQUID_VERTICAL_DRAG: f32 = 0.8;
const LIQUID_SINK: f32 = 0.02;
const LAVA_SPEED: f32 = 0.02;
const LAVA_DRAG: f32 = 0.5;
const SWIM_UP_IMPULSE: f32 = 0.04;
const SPRINT_JUMP_BOOST: f32 = 0.2;
const JUMP_COOLDOWN_TICKS: u32 = 10;

impl LivingEntity {
    /// Apply steering and advance one step in the current medium.
    pub fn move_with_heading(
        &mut self,
        strafe: f32,
        forward: f32,
        world: &dyn LivingWorld,
    ) -> Result<(), LivingError> {
        let flying = self.locomotion == Locomotion::PlayerControlled && self.flying;
        let in_water = self.surroundings.in_water && !flying;
        let in_lava = self.surroundings.in_lava && !flying;

        if in_water {
            self.move_in_water(strafe, forward, world)
        } else if in_lava {
            self.move_in_lava(strafe, forward, world)
        } else {
            self.move_in_air(strafe, forward, world)
        }
    }

    fn move_in_air(
        &mut self,
        strafe: f32,
        forward: f32,
        world: &dyn LivingWorld,
    ) -> Result<(), LivingError> {
        let friction = if self.on_ground {
            GROUND_FRICTION
        } else {
            AIR_FRICTION
        };
        let slip = SLIP_NUMERATOR / (friction * friction * friction);
        let speed = if self.on_ground {
            self.steering.move_speed * slip
        } else {
            JUMP_MOVEMENT_FACTOR
        };

        self.move_flying(strafe, forward, speed);
        self.move_by(world)?;

        // Not gravity: a slow sink above y = 0, a hard stop below it.
        self.velocity.y = if self.position.y > 0.0 {
            TERMINAL_SINK
        } else {
            0.0
        };
        self.velocity.y *= VERTICAL_DRAG;
        self.velocity.x *= friction;
        self.velocity.z *= friction;
        Ok(())
    }

    fn move_in_lava(
        &mut self,
        strafe: f32,
        forward: f32,
        world: &dyn LivingWorld,
    ) -> Result<(), LivingError> {
        self.move_flying(strafe, forward, LAVA_SPEED);
        self.move_by(world)?;
        self.velocity.x *= LAVA_DRAG;
        self.velocity.y *= LAVA_DRAG;
        self.velocity.z *= LAVA_DRAG;
        self.velocity.y -= LIQUID_SINK;
        trace!(runtime_id = self.runtime_id, "moved through lava");
        Ok(())
    }

    fn move_in_water(
        &mut self,
        strafe: f32,
        forward: f32,
        world: &dyn LivingWorld,
    ) -> Result<(), LivingError> {
        let mut friction = LIQUID_FRICTION;
        let mut speed = LIQUID_SPEED;
        let mut flow = LIQUID_FLOW_STRENGTH.min(3.0);
        if !self.on_ground {
            flow *= 0.5;
        }
        if flow > 0.0 {
            friction += (0.54600006 - friction) * flow / 3.0;
            speed += (self.steering.move_speed - speed) * flow / 3.0;
        }

        self.move_flying(strafe, forward, speed);
        self.move_by(world)?;
        self.velocity.x *= friction;
        self.velocity.y *= LIQUID_VERTICAL_DRAG;
        self.velocity.z *= friction;
        self.velocity.y -= LIQUID_SINK;
        trace!(runtime_id = self.runtime_id, "moved through water");
        Ok(())
    }

    /// Add steering to velocity: the intent is rotated by the body yaw and
    /// scaled so its length is at most `speed`.
    pub fn move_flying(&mut self, strafe: f32, forward: f32, speed: f32) {
        let mut f = strafe * strafe + forward * forward;
        if f < 1.0e-4 {
            return;
        }
        f = f.sqrt().max(1.0);
        f = speed / f;
        let strafe = strafe * f;
        let forward = forward * f;
        let (sin, cos) = self.rotation.yaw.to_radians().sin_cos();
        self.velocity.x += strafe * cos - forward * sin;
        self.velocity.z += forward * cos + strafe * sin;
    }

    /// Advance the position by velocity. Solid blocks stop horizontal motion
    /// axis by axis and catch a falling entity on their top face.
    fn move_by(&mut self, world: &dyn LivingWorld) -> Result<(), LivingError> {
        let start = self.position;
        let mut next = start;

        next.x += self.velocity.x;
        if self.body_blocked(next, world)? {
            next.x = start.x;
            self.velocity.x = 0.0;
        }
        next.z += self.velocity.z;
        if self.body_blocked(next, world)? {
            next.z = start.z;
            self.velocity.z = 0.0;
        }

        next.y += self.velocity.y;
        if self.velocity.y < 0.0 {
            let floor = world.block_at(next.block_pos())?;
            if floor.kind.is_solid() {
                next.y = (floor.pos.y + 1) as f32;
                self.velocity.y = 0.0;
                self.on_ground = true;
            } else {
                self.on_ground = false;
            }
        } else if self.velocity.y > 0.0 {
            self.on_ground = false;
        }

        self.position = next;
        Ok(())
    }

    fn body_blocked(&self, at: Position, world: &dyn LivingWorld) -> Result<bool, LivingError> {
        if at.block_pos() == self.position.block_pos() {
            return Ok(false);
        }
        Ok(world.block_at(at.block_pos())?.kind.is_solid())
    }

    /// Act on the jumping flag for the current medium.
    pub(super) fn dispatch_jump(&mut self) {
        if !self.steering.jumping {
            self.jump_cooldown = 0;
            return;
        }
        if self.surroundings.in_water {
            self.swim_up();
        } else if self.surroundings.in_lava {
            self.handle_jump_lava();
        } else if self.on_ground && self.jump_cooldown == 0 {
            self.do_jump();
            self.jump_cooldown = JUMP_COOLDOWN_TICKS;
        }
    }

    fn swim_up(&mut self) {
        self.velocity.y += SWIM_UP_IMPULSE;
    }

    fn handle_jump_lava(&mut self) {
        self.velocity.y += SWIM_UP_IMPULSE;
    }

    /// Leave the ground; sprinting adds a boost along the heading.
    pub fn do_jump(&mut self) {
        self.velocity.y = JUMP_UPWARD_MOTION;
        if self.steering.sprinting {
            let (sin, cos) = self.rotation.yaw.to_radians().sin_cos();
            self.velocity.x -= sin * SPRINT_JUMP_BOOST;
            self.velocity.z += cos * SPRINT_JUMP_BOOST;
        }
    }
}
