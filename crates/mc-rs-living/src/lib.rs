//! Living-entity core: health and damage, knockback, movement through air,
//! water and lava, breathing, AI coordination and aggro, plus an ECS game
//! world that ticks living entities one after another.

pub mod aggro;
pub mod ai;
pub mod attributes;
pub mod block;
pub mod components;
pub mod effects;
pub mod error;
pub mod event;
pub mod game_world;
pub mod level;
pub mod living;
pub mod mob_registry;
pub mod raycast;
pub mod sensors;
pub mod world;

#[cfg(test)]
mod test_support;
