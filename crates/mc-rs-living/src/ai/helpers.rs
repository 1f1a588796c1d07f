//! Move, look and jump helpers: the last AI stages before physics.

use super::context::AiContext;
use super::navigator::{approach_angle, pitch_toward, yaw_toward};

/// Most the body turns toward a move target per tick (degrees).
pub const MAX_TURN_PER_TICK: f32 = 30.0;

/// Head yaw drifts back toward the body this many degrees per tick when idle.
pub const HEAD_RETURN_STEP: f32 = 10.0;

/// Squared distances below this are "already there".
const ARRIVED_SQ: f32 = 2.5e-7;

pub trait MoveHelper: Send + Sync + std::fmt::Debug {
    fn update(&mut self, ctx: &mut AiContext);
}

pub trait LookHelper: Send + Sync + std::fmt::Debug {
    fn update(&mut self, ctx: &mut AiContext);
}

pub trait JumpHelper: Send + Sync + std::fmt::Debug {
    fn update(&mut self, ctx: &mut AiContext);
}

/// Turns the body toward a pending move request and sets forward intent.
#[derive(Debug, Default)]
pub struct DefaultMoveHelper;

impl MoveHelper for DefaultMoveHelper {
    fn update(&mut self, ctx: &mut AiContext) {
        let Some(request) = ctx.requests.move_to.take() else {
            return;
        };
        let dx = request.target.x - ctx.position.x;
        let dy = request.target.y - ctx.position.y;
        let dz = request.target.z - ctx.position.z;
        let horizontal_sq = dx * dx + dz * dz;
        if horizontal_sq + dy * dy < ARRIVED_SQ {
            return;
        }

        let yaw = yaw_toward(&ctx.position, &request.target);
        ctx.rotation.yaw = approach_angle(ctx.rotation.yaw, yaw, MAX_TURN_PER_TICK).rem_euclid(360.0);

        let speed = request.speed * ctx.movement_speed;
        ctx.steering.move_speed = speed;
        ctx.steering.forward = speed;

        if dy > 0.0 && horizontal_sq < 1.0 {
            ctx.requests.jump = true;
        }
    }
}

/// Eases head yaw and pitch toward a look request.
#[derive(Debug, Default)]
pub struct DefaultLookHelper;

impl LookHelper for DefaultLookHelper {
    fn update(&mut self, ctx: &mut AiContext) {
        match ctx.requests.look_at.take() {
            Some(request) => {
                let eye = ctx.eye_position();
                let yaw = yaw_toward(&eye, &request.target);
                let pitch = pitch_toward(&eye, &request.target);
                ctx.rotation.head_yaw =
                    approach_angle(ctx.rotation.head_yaw, yaw, request.yaw_step).rem_euclid(360.0);
                ctx.rotation.pitch = approach_angle(ctx.rotation.pitch, pitch, request.pitch_step);
            }
            None => {
                let body = ctx.rotation.yaw;
                ctx.rotation.head_yaw =
                    approach_angle(ctx.rotation.head_yaw, body, HEAD_RETURN_STEP).rem_euclid(360.0);
            }
        }
    }
}

/// Copies this tick's jump request into the jumping flag.
#[derive(Debug, Default)]
pub struct DefaultJumpHelper;

impl JumpHelper for DefaultJumpHelper {
    fn update(&mut self, ctx: &mut AiContext) {
        ctx.steering.jumping = std::mem::take(&mut ctx.requests.jump);
    }
}
