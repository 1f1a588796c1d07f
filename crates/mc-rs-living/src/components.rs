//! ECS components shared by living entities and players.

use bevy_ecs::prelude::*;

use crate::block::BlockPos;

/// Network identity for an entity.
#[derive(Component, Debug, Clone)]
pub struct EntityId {
    pub unique_id: i64,
    pub runtime_id: u64,
}

/// Position of an entity's feet in the world.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Block containing this point.
    pub fn block_pos(&self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }

    /// Same point raised by `dy` (e.g. eye height).
    pub fn offset_y(&self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..*self
        }
    }

    /// Distance in the XZ plane.
    pub fn distance_xz(&self, other: &Position) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Rotation angles in degrees.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
}

impl Rotation {
    /// Unit vector the entity is facing, from yaw and pitch.
    ///
    /// Yaw 0 faces +Z, 90 faces -X; positive pitch looks down.
    pub fn direction(&self) -> (f32, f32, f32) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let horizontal = pitch.cos();
        (-yaw.sin() * horizontal, -pitch.sin(), yaw.cos() * horizontal)
    }
}

/// Velocity in blocks per tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Velocity {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_moving(&self) -> bool {
        self.x.abs() > 0.001 || self.y.abs() > 0.001 || self.z.abs() > 0.001
    }
}

/// Health points.
#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Whether the entity is standing on the ground.
#[derive(Component, Debug, Clone, Copy)]
pub struct OnGround(pub bool);

/// Whether the entity is currently burning.
#[derive(Component, Debug, Clone, Copy)]
pub struct Burning(pub bool);

/// The Bedrock identifier type string, e.g. `"minecraft:zombie"`.
#[derive(Component, Debug, Clone)]
pub struct MobType(pub String);

/// Marker: this entity is a mob (non-player).
#[derive(Component, Debug)]
pub struct Mob;

/// Marker: this entity is a player.
#[derive(Component, Debug)]
pub struct Player;

/// Marker: this entity is dead (pending cleanup).
#[derive(Component, Debug)]
pub struct Dead;
