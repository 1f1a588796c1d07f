//! Per-species hooks: an extra AI stage and the death drop table.

use rand::Rng;

use crate::event::ItemDrop;
use crate::mob_registry::DropSpec;

use super::context::AiContext;

pub trait Species: Send + Sync + std::fmt::Debug {
    /// Runs after the navigator and before the move helper.
    fn update_ai(&mut self, _ctx: &mut AiContext) {}

    /// Items handed to the world on death.
    fn drops(&self) -> Vec<ItemDrop> {
        Vec::new()
    }
}

/// A species with no AI stage of its own and a rolled drop table.
#[derive(Debug, Clone, Default)]
pub struct DropTable {
    drops: Vec<DropSpec>,
}

impl DropTable {
    pub fn new(drops: Vec<DropSpec>) -> Self {
        Self { drops }
    }
}

fn roll_all(specs: &[DropSpec]) -> Vec<ItemDrop> {
    let mut rng = rand::thread_rng();
    specs.iter().filter_map(|d| d.roll(&mut rng)).collect()
}

impl Species for DropTable {
    fn drops(&self) -> Vec<ItemDrop> {
        roll_all(&self.drops)
    }
}

/// Drifts in a random direction while submerged, picking a new heading now and then.
#[derive(Debug, Clone)]
pub struct Squid {
    drops: Vec<DropSpec>,
    next_turn: u64,
}

impl Squid {
    /// Swim intent while submerged.
    pub const SWIM_SPEED: f32 = 0.05;

    pub fn new(drops: Vec<DropSpec>) -> Self {
        Self {
            drops,
            next_turn: 0,
        }
    }
}

impl Species for Squid {
    fn update_ai(&mut self, ctx: &mut AiContext) {
        if !ctx.surroundings.in_water {
            ctx.steering.forward = 0.0;
            return;
        }
        if ctx.current_tick >= self.next_turn {
            let mut rng = rand::thread_rng();
            ctx.rotation.yaw = rng.gen_range(0.0..360.0);
            ctx.rotation.pitch = rng.gen_range(-20.0..20.0);
            self.next_turn = ctx.current_tick + rng.gen_range(40..100);
        }
        ctx.steering.move_speed = Self::SWIM_SPEED;
        ctx.steering.forward = Self::SWIM_SPEED;
    }

    fn drops(&self) -> Vec<ItemDrop> {
        roll_all(&self.drops)
    }
}
