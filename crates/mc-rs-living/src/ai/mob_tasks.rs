//! Per-mob-category task lists.

use crate::mob_registry::{MobCategory, MobDefinition};

use super::species::{DropTable, Species, Squid};
use super::task::AiTask;
use super::tasks::*;

/// Target-selector tasks for a mob type.
pub fn create_target_tasks(def: &MobDefinition) -> Vec<Box<dyn AiTask>> {
    match def.category {
        MobCategory::Hostile => vec![
            Box::new(HurtByTarget::new()),
            Box::new(NearestAttackableTarget::new(def.follow_range.min(16.0))),
        ],
        MobCategory::Passive | MobCategory::Aquatic => Vec::new(),
    }
}

/// Movement and passive tasks for a mob type.
pub fn create_tasks(def: &MobDefinition) -> Vec<Box<dyn AiTask>> {
    match def.category {
        MobCategory::Hostile => vec![
            Box::new(Swim::new()),
            Box::new(MeleeAttack::new(20)),
            Box::new(Wander::new()),
            Box::new(WatchClosest::new(8.0)),
        ],
        MobCategory::Passive => vec![
            Box::new(Swim::new()),
            Box::new(Wander::new()),
            Box::new(WatchClosest::new(6.0)),
        ],
        // squids steer themselves
        MobCategory::Aquatic => Vec::new(),
    }
}

pub fn create_species(def: &MobDefinition) -> Box<dyn Species> {
    match def.type_id.as_str() {
        "minecraft:squid" => Box::new(Squid::new(def.drops.clone())),
        _ => Box::new(DropTable::new(def.drops.clone())),
    }
}
