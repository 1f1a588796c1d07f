//! Built-in mob types and the table custom ones are added to.
//!
//! A definition carries the stats a living entity is created with, how it
//! moves and breathes, and what it drops on death.

use rand::Rng;

use crate::event::ItemDrop;

/// Decides the default task lists for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobCategory {
    Passive,
    Hostile,
    Aquatic,
}

/// How an entity moves and breathes, fixed when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locomotion {
    /// Walks; drowns under water.
    #[default]
    Grounded,
    /// Swims; suffocates out of water.
    Aquatic,
    /// Moved by a client. Never AI-driven.
    PlayerControlled,
}

/// One entry of a drop table; the count is rolled in `min..=max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropSpec {
    pub item: String,
    pub min: u8,
    pub max: u8,
}

impl DropSpec {
    pub fn new(item: impl Into<String>, min: u8, max: u8) -> Self {
        Self {
            item: item.into(),
            min,
            max: max.max(min),
        }
    }

    /// Roll a stack; `None` when the roll is zero.
    pub fn roll(&self, rng: &mut impl Rng) -> Option<ItemDrop> {
        let count = rng.gen_range(self.min..=self.max);
        (count > 0).then(|| ItemDrop::new(self.item.clone(), count))
    }
}

#[derive(Debug, Clone)]
pub struct MobDefinition {
    /// Namespaced identifier such as `minecraft:zombie`.
    pub type_id: String,
    pub category: MobCategory,
    pub locomotion: Locomotion,
    pub max_health: f32,
    /// Zero for mobs that never attack.
    pub attack_damage: f32,
    pub movement_speed: f32,
    pub follow_range: f32,
    pub eye_height: f32,
    pub drops: Vec<DropSpec>,
}

impl MobDefinition {
    /// A grounded, harmless type with a 16 block follow range and 1.62 eyes.
    /// Aquatic types also get aquatic locomotion.
    pub fn new(
        type_id: impl Into<String>,
        category: MobCategory,
        max_health: f32,
        movement_speed: f32,
    ) -> Self {
        let locomotion = match category {
            MobCategory::Aquatic => Locomotion::Aquatic,
            MobCategory::Passive | MobCategory::Hostile => Locomotion::Grounded,
        };
        Self {
            type_id: type_id.into(),
            category,
            locomotion,
            max_health,
            attack_damage: 0.0,
            movement_speed,
            follow_range: 16.0,
            eye_height: 1.62,
            drops: Vec::new(),
        }
    }

    pub fn attack_damage(mut self, damage: f32) -> Self {
        self.attack_damage = damage;
        self
    }

    pub fn follow_range(mut self, range: f32) -> Self {
        self.follow_range = range;
        self
    }

    pub fn eye_height(mut self, height: f32) -> Self {
        self.eye_height = height;
        self
    }

    pub fn with_drop(mut self, item: &str, min: u8, max: u8) -> Self {
        self.drops.push(DropSpec::new(item, min, max));
        self
    }
}

fn builtin() -> Vec<MobDefinition> {
    use MobCategory::*;
    vec![
        MobDefinition::new("minecraft:zombie", Hostile, 20.0, 0.23)
            .attack_damage(3.0)
            .follow_range(35.0)
            .eye_height(1.74)
            .with_drop("minecraft:rotten_flesh", 0, 2),
        MobDefinition::new("minecraft:skeleton", Hostile, 20.0, 0.25)
            .attack_damage(2.0)
            .eye_height(1.74)
            .with_drop("minecraft:bone", 0, 2)
            .with_drop("minecraft:arrow", 0, 2),
        MobDefinition::new("minecraft:cow", Passive, 10.0, 0.2)
            .eye_height(1.3)
            .with_drop("minecraft:leather", 0, 2)
            .with_drop("minecraft:beef", 1, 3),
        MobDefinition::new("minecraft:pig", Passive, 10.0, 0.25)
            .eye_height(0.8)
            .with_drop("minecraft:porkchop", 1, 3),
        MobDefinition::new("minecraft:chicken", Passive, 4.0, 0.25)
            .eye_height(0.6)
            .with_drop("minecraft:feather", 0, 2)
            .with_drop("minecraft:chicken", 1, 1),
        MobDefinition::new("minecraft:squid", Aquatic, 10.0, 0.2)
            .eye_height(0.7)
            .with_drop("minecraft:ink_sac", 1, 3),
    ]
}

/// Known mob types, keyed by identifier.
pub struct MobRegistry {
    mobs: Vec<MobDefinition>,
}

impl Default for MobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MobRegistry {
    pub fn new() -> Self {
        Self { mobs: builtin() }
    }

    pub fn get(&self, type_id: &str) -> Option<&MobDefinition> {
        self.mobs.iter().find(|m| m.type_id == type_id)
    }

    pub fn all(&self) -> &[MobDefinition] {
        &self.mobs
    }

    /// Add a type, replacing any with the same identifier.
    pub fn register_mob(&mut self, def: MobDefinition) {
        self.mobs.retain(|m| m.type_id != def.type_id);
        self.mobs.push(def);
    }
}
