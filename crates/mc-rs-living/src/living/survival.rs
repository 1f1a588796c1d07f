//! Timers that run every tick regardless of AI: invulnerability, effects,
//! burning, the void and breathing.

use tracing::trace;

use crate::effects::EffectKind;
use crate::event::{DamageCause, DamageEvent};
use crate::mob_registry::Locomotion;
use crate::world::{LivingWorld, TickContext};

use super::LivingEntity;

pub const MAX_AIR: i32 = 400;
pub const MIN_AIR: i32 = -20;

const VOID_Y: f32 = -16.0;
const VOID_DAMAGE: f32 = 10.0;
const AIR_DAMAGE: f32 = 2.0;

impl LivingEntity {
    /// Entity-level upkeep that precedes the living tick.
    pub(super) fn entity_base_tick(
        &mut self,
        tick_diff: u32,
        ctx: &TickContext,
        world: &mut dyn LivingWorld,
    ) -> bool {
        let mut has_update = false;

        self.invulnerability_ticks = self.invulnerability_ticks.saturating_sub(tick_diff);
        self.effects.tick(tick_diff);

        if self.fire_ticks > 0 {
            if !self.effects.has(EffectKind::FireResistance)
                && (self.fire_ticks % 20 == 0 || tick_diff > 20)
            {
                let mut event = DamageEvent::new(DamageCause::FireTick, 1.0);
                self.apply_damage(&mut event, ctx, world);
            }
            self.fire_ticks = self.fire_ticks.saturating_sub(tick_diff);
            has_update = true;
        }

        if self.position.y <= VOID_Y && self.is_alive() {
            let mut event = DamageEvent::new(DamageCause::Void, VOID_DAMAGE);
            self.apply_damage(&mut event, ctx, world);
            has_update = true;
        }

        has_update
    }

    /// Count air down while it cannot be breathed and hurt at the bottom.
    /// Returns whether the air supply or health changed.
    pub(super) fn update_air_supply(
        &mut self,
        tick_diff: u32,
        ctx: &TickContext,
        world: &mut dyn LivingWorld,
    ) -> bool {
        let before = self.air_supply;
        let (losing_air, cause) = match self.locomotion {
            Locomotion::Aquatic => (!self.surroundings.in_water, DamageCause::Suffocation),
            Locomotion::Grounded | Locomotion::PlayerControlled => (
                !self.breathing && !self.effects.has(EffectKind::WaterBreathing),
                DamageCause::Drowning,
            ),
        };

        if !losing_air {
            self.air_supply = MAX_AIR;
            return self.air_supply != before;
        }

        let diff = i32::try_from(tick_diff).unwrap_or(i32::MAX);
        self.air_supply = self.air_supply.saturating_sub(diff).max(MIN_AIR);
        if self.air_supply <= MIN_AIR {
            self.air_supply = 0;
            trace!(runtime_id = self.runtime_id, ?cause, "out of air");
            let mut event = DamageEvent::new(cause, AIR_DAMAGE);
            self.apply_damage(&mut event, ctx, world);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockKind, BlockPos};
    use crate::components::Position;
    use crate::event::EntityEventKind;
    use crate::test_support::TestWorld;
    use crate::world::{Difficulty, WorldSettings};

    fn ctx(tick: u64) -> TickContext {
        TickContext::new(
            tick,
            &WorldSettings {
                ai_enabled: false,
                difficulty: Difficulty::Normal,
            },
        )
    }

    fn standing(world: &TestWorld, locomotion: Locomotion) -> LivingEntity {
        let mut living = LivingEntity::new(1, locomotion, Position::new(0.5, 4.0, 0.5));
        living.set_on_ground(true);
        living.sense(world).unwrap();
        living
    }

    fn submerged_world() -> TestWorld {
        let mut world = TestWorld::with_floor();
        world.set_block(BlockPos::new(0, 4, 0), BlockKind::Water);
        world.set_block(BlockPos::new(0, 5, 0), BlockKind::Water);
        world
    }

    #[test]
    fn drowns_after_420_ticks_under_water() {
        let mut world = submerged_world();
        let mut living = standing(&world, Locomotion::Grounded);

        for tick in 1..420 {
            living.base_tick(1, &ctx(tick), &mut world).unwrap();
        }
        assert_eq!(living.air_supply(), -19);
        assert_eq!(living.health(), 20.0);

        living.base_tick(1, &ctx(420), &mut world).unwrap();
        assert_eq!(living.air_supply(), 0);
        assert_eq!(living.health(), 18.0);
        assert_eq!(
            living.last_damage().map(|e| e.cause()),
            Some(DamageCause::Drowning)
        );
    }

    #[test]
    fn water_breathing_keeps_air() {
        let mut world = submerged_world();
        let mut living = standing(&world, Locomotion::Grounded);
        living.effects_mut().add(EffectKind::WaterBreathing, 1000);
        for tick in 1..=50 {
            living.base_tick(1, &ctx(tick), &mut world).unwrap();
        }
        assert_eq!(living.air_supply(), MAX_AIR);
    }

    #[test]
    fn surfacing_refills_air() {
        let mut world = submerged_world();
        let mut living = standing(&world, Locomotion::Grounded);
        living.base_tick(10, &ctx(10), &mut world).unwrap();
        assert_eq!(living.air_supply(), MAX_AIR - 10);

        let mut dry = TestWorld::with_floor();
        assert!(living.base_tick(1, &ctx(11), &mut dry).unwrap());
        assert_eq!(living.air_supply(), MAX_AIR);
    }

    #[test]
    fn aquatic_breathes_only_in_water() {
        let mut world = submerged_world();
        let mut squid = standing(&world, Locomotion::Aquatic);
        squid.set_air_supply(100);
        squid.base_tick(1, &ctx(1), &mut world).unwrap();
        assert_eq!(squid.air_supply(), MAX_AIR);

        let mut dry = TestWorld::with_floor();
        squid.set_air_supply(MIN_AIR + 1);
        squid.sense(&dry).unwrap();
        squid.base_tick(1, &ctx(2), &mut dry).unwrap();
        assert_eq!(squid.air_supply(), 0);
        assert_eq!(
            squid.last_damage().map(|e| e.cause()),
            Some(DamageCause::Suffocation)
        );
    }

    #[test]
    fn burning_hurts_once_per_second() {
        let mut world = TestWorld::with_floor();
        let mut living = standing(&world, Locomotion::Grounded);
        living.set_on_fire(1);
        for tick in 1..=20 {
            assert!(living.base_tick(1, &ctx(tick), &mut world).unwrap());
        }
        assert!(!living.is_on_fire());
        assert_eq!(living.health(), 19.0);
        assert_eq!(world.count_broadcasts(EntityEventKind::Hurt), 1);
    }

    #[test]
    fn fire_resistance_prevents_burn_damage() {
        let mut world = TestWorld::with_floor();
        let mut living = standing(&world, Locomotion::Grounded);
        living.effects_mut().add(EffectKind::FireResistance, 100);
        living.set_on_fire(1);
        for tick in 1..=20 {
            living.base_tick(1, &ctx(tick), &mut world).unwrap();
        }
        assert!(!living.is_on_fire());
        assert_eq!(living.health(), 20.0);
    }

    #[test]
    fn void_deals_heavy_damage() {
        let mut world = TestWorld::new();
        let mut living = LivingEntity::new(1, Locomotion::Grounded, Position::new(0.5, -20.0, 0.5));
        assert!(living.base_tick(1, &ctx(1), &mut world).unwrap());
        assert_eq!(living.health(), 10.0);
        assert_eq!(
            living.last_damage().map(|e| e.cause()),
            Some(DamageCause::Void)
        );
    }

    #[test]
    fn invulnerability_counts_down() {
        let mut world = TestWorld::with_floor();
        let mut living = standing(&world, Locomotion::Grounded);
        living.set_invulnerability_ticks(5);
        living.base_tick(3, &ctx(3), &mut world).unwrap();
        assert_eq!(living.invulnerability_ticks(), 2);
        living.base_tick(3, &ctx(6), &mut world).unwrap();
        assert_eq!(living.invulnerability_ticks(), 0);
    }
}
