//! Damage, healing, death and knockback.

use tracing::debug;

use crate::attributes::AttributeKind;
use crate::event::{DamageEvent, DeathEvent, EntityEventKind, RegainHealthEvent};
use crate::world::{LivingWorld, TickContext};

use super::{LivingEntity, ATTACK_COOLDOWN_TICKS};

impl LivingEntity {
    /// Run a hit through cooldown, listeners and the health pipeline.
    ///
    /// While the hit cooldown or invulnerability is active, a hit no stronger
    /// than the last accepted one arrives pre-cancelled. Listeners see every
    /// event and may flip the verdict. A cancelled hit changes nothing.
    ///
    /// A burning attacker sets this entity on fire for `2 × difficulty`
    /// seconds, not ticks.
    pub fn apply_damage(
        &mut self,
        event: &mut DamageEvent,
        ctx: &TickContext,
        world: &mut dyn LivingWorld,
    ) {
        if self.attack_cooldown > 0 || self.invulnerability_ticks > 0 {
            if let Some(last) = &self.last_damage {
                if last.raw_amount() >= event.raw_amount() {
                    event.set_cancelled(true);
                }
            }
        }

        world.call_damage(event);
        if event.is_cancelled() {
            debug!(
                runtime_id = self.runtime_id,
                cause = ?event.cause(),
                amount = event.raw_amount(),
                "damage cancelled"
            );
            return;
        }

        let mut amount = event.final_amount();
        let absorption = self.attributes.value(AttributeKind::Absorption);
        if absorption > 0.0 {
            let soaked = absorption.min(amount);
            self.attributes
                .set_base(AttributeKind::Absorption, absorption - soaked);
            amount -= soaked;
        }
        let remaining = (self.health - amount).clamp(0.0, self.max_health());
        if remaining > 0.0 {
            self.health = remaining;
        }
        self.last_damage = Some(event.clone());

        if let Some(damager) = event.damager().copied() {
            let (source, burning) = match damager.child {
                Some(child) => (child.position, child.on_fire),
                None => (damager.position, damager.on_fire),
            };
            if burning {
                let seconds = 2 * ctx.difficulty.level().max(0) as u32;
                self.set_on_fire(seconds);
            }
            let resistance = self.attributes.value(AttributeKind::KnockbackResistance);
            if resistance > 0.0 {
                event.set_knockback(event.knockback() * (1.0 - resistance).max(0.0));
            }
            if event.knockback() > 0.0 {
                let dx = self.position.x - source.x;
                let dz = self.position.z - source.z;
                self.knock_back(amount, dx, dz, event.knockback());
            }
            self.aggro
                .set_revenge_target(Some(damager.entity), ctx.current_tick);
        }

        let kind = if remaining > 0.0 {
            EntityEventKind::Hurt
        } else {
            self.kill(world);
            EntityEventKind::Death
        };
        world.broadcast(self.runtime_id, kind);

        self.attack_cooldown = ATTACK_COOLDOWN_TICKS;
        debug!(
            runtime_id = self.runtime_id,
            cause = ?event.cause(),
            amount,
            health = self.health,
            "damage applied"
        );
    }

    /// Regain health. An accepted heal also clears the hit cooldown.
    pub fn heal(&mut self, event: &mut RegainHealthEvent, world: &mut dyn LivingWorld) {
        world.call_regain_health(event);
        if event.is_cancelled() {
            return;
        }
        self.set_health(self.health + event.amount, world);
        self.attack_cooldown = 0;
    }

    /// Set health, clamped to `[0, max]`. Dropping a living entity to zero
    /// kills it; coming back from zero broadcasts a respawn.
    pub fn set_health(&mut self, amount: f32, world: &mut dyn LivingWorld) {
        let was_alive = self.is_alive();
        let amount = amount.clamp(0.0, self.max_health());
        if was_alive && amount <= 0.0 {
            self.kill(world);
            return;
        }
        self.health = amount;
        if !was_alive && self.is_alive() {
            world.broadcast(self.runtime_id, EntityEventKind::Respawn);
            debug!(runtime_id = self.runtime_id, health = self.health, "revived");
        }
    }

    /// Raise the death event and drop its items. No-op once dead.
    pub fn kill(&mut self, world: &mut dyn LivingWorld) {
        if !self.is_alive() {
            return;
        }
        self.health = 0.0;
        self.aggro.set_attack_target(None);

        let mut event = DeathEvent {
            runtime_id: self.runtime_id,
            drops: self.species.drops(),
        };
        world.call_death(&mut event);
        let drops = event.drops.len();
        for item in event.drops {
            world.drop_item(self.position, item);
        }
        debug!(runtime_id = self.runtime_id, drops, "died");
    }

    /// Push away along `(dx, dz)`. `damage` does not scale the push.
    pub fn knock_back(&mut self, _damage: f32, dx: f32, dz: f32, base: f32) {
        let len = (dx * dx + dz * dz).sqrt();
        if len <= 0.0 {
            return;
        }
        let f = 1.0 / len;
        self.velocity.x = self.velocity.x / 2.0 + dx * f * base;
        self.velocity.y = (self.velocity.y / 2.0 + base).min(base);
        self.velocity.z = self.velocity.z / 2.0 + dz * f * base;
    }

}

#[cfg(test)]
mod tests {
    use bevy_ecs::entity::Entity;

    use super::*;
    use crate::ai::species::DropTable;
    use crate::components::{Position, Velocity};
    use crate::event::{
        ChildDamager, DamageCause, Damager, ItemDrop, RegainReason, DEFAULT_KNOCKBACK,
    };
    use crate::mob_registry::{DropSpec, Locomotion};
    use crate::test_support::TestWorld;
    use crate::world::{Difficulty, WorldSettings};

    const EPS: f32 = 1e-5;

    fn ctx(tick: u64) -> TickContext {
        TickContext::new(
            tick,
            &WorldSettings {
                ai_enabled: true,
                difficulty: Difficulty::Normal,
            },
        )
    }

    fn living() -> LivingEntity {
        LivingEntity::new(1, Locomotion::Grounded, Position::new(0.5, 4.0, 0.5))
    }

    fn hit(amount: f32) -> DamageEvent {
        DamageEvent::new(DamageCause::EntityAttack, amount)
    }

    fn attacker(x: f32, on_fire: bool) -> Damager {
        Damager {
            entity: Entity::from_raw(7),
            position: Position::new(x, 4.0, 0.5),
            on_fire,
            child: None,
        }
    }

    #[test]
    fn hit_then_weaker_hit_in_cooldown() {
        let mut world = TestWorld::new();
        let mut living = living();

        let mut first = hit(5.0);
        living.apply_damage(&mut first, &ctx(1), &mut world);
        assert!(!first.is_cancelled());
        assert!((living.health() - 15.0).abs() < EPS);
        assert_eq!(living.attack_cooldown(), ATTACK_COOLDOWN_TICKS);
        assert_eq!(world.count_broadcasts(EntityEventKind::Hurt), 1);

        let mut second = hit(3.0);
        living.apply_damage(&mut second, &ctx(2), &mut world);
        assert!(second.is_cancelled());
        assert!((living.health() - 15.0).abs() < EPS);
        assert_eq!(world.count_broadcasts(EntityEventKind::Hurt), 1);
    }

    #[test]
    fn cooldown_blocks_equal_but_not_stronger_hits() {
        let mut world = TestWorld::new();
        let mut living = living();
        living.apply_damage(&mut hit(4.0), &ctx(1), &mut world);

        let mut equal = hit(4.0);
        living.apply_damage(&mut equal, &ctx(2), &mut world);
        assert!(equal.is_cancelled());

        let mut stronger = hit(6.0);
        living.apply_damage(&mut stronger, &ctx(3), &mut world);
        assert!(!stronger.is_cancelled());
        assert!((living.health() - 10.0).abs() < EPS);
    }

    #[test]
    fn invulnerability_also_blocks_weaker_hits() {
        let mut world = TestWorld::new();
        let mut living = living();
        living.apply_damage(&mut hit(2.0), &ctx(1), &mut world);
        living.attack_cooldown = 0;
        living.set_invulnerability_ticks(5);

        let mut weak = hit(1.0);
        living.apply_damage(&mut weak, &ctx(2), &mut world);
        assert!(weak.is_cancelled());
    }

    #[test]
    fn listener_can_uncancel() {
        let mut world = TestWorld::new();
        let mut living = living();
        living.apply_damage(&mut hit(5.0), &ctx(1), &mut world);

        world.damage_verdict = Some(false);
        let mut weak = hit(1.0);
        living.apply_damage(&mut weak, &ctx(2), &mut world);
        assert!(!weak.is_cancelled());
        assert!((living.health() - 14.0).abs() < EPS);
        assert_eq!(world.damage_calls, 2);
    }

    #[test]
    fn cancelled_hit_changes_nothing() {
        let mut world = TestWorld::new();
        world.damage_verdict = Some(true);
        let mut living = living();
        let mut event = DamageEvent::by_entity(attacker(-1.0, true), DamageCause::EntityAttack, 5.0);
        living.apply_damage(&mut event, &ctx(1), &mut world);

        assert_eq!(living.health(), 20.0);
        assert_eq!(living.attack_cooldown(), 0);
        assert_eq!(living.velocity(), Velocity::default());
        assert!(!living.is_on_fire());
        assert!(living.last_damage().is_none());
        assert!(world.broadcasts.is_empty());
    }

    #[test]
    fn absorption_soaks_first() {
        let mut world = TestWorld::new();
        let mut living = living();
        living
            .attributes_mut()
            .set_base(AttributeKind::Absorption, 4.0);
        living.apply_damage(&mut hit(6.0), &ctx(1), &mut world);
        assert!((living.health() - 18.0).abs() < EPS);
        assert_eq!(living.attributes().value(AttributeKind::Absorption), 0.0);
    }

    #[test]
    fn entity_hit_knocks_back_and_sets_revenge() {
        let mut world = TestWorld::new();
        let mut living = living();
        let mut event = DamageEvent::by_entity(attacker(-0.5, false), DamageCause::EntityAttack, 2.0);
        living.apply_damage(&mut event, &ctx(42), &mut world);

        let v = living.velocity();
        assert!((v.x - 0.4).abs() < EPS);
        assert!((v.y - 0.4).abs() < EPS);
        assert!(v.z.abs() < EPS);
        assert_eq!(living.aggro().revenge_target(), Some(Entity::from_raw(7)));
        assert_eq!(living.aggro().revenge_set_at(), 42);
        assert!(!living.is_on_fire());
    }

    #[test]
    fn burning_attacker_ignites_by_difficulty() {
        let mut world = TestWorld::new();
        let mut living = living();
        let mut event = DamageEvent::by_entity(attacker(-0.5, true), DamageCause::EntityAttack, 2.0);
        living.apply_damage(&mut event, &ctx(1), &mut world);
        // normal difficulty: 4 seconds
        assert_eq!(living.fire_ticks(), 80);
    }

    #[test]
    fn projectile_position_and_fire_win_over_shooter() {
        let mut world = TestWorld::new();
        let mut living = living();
        let mut shooter = attacker(-10.0, false);
        shooter.child = Some(ChildDamager {
            entity: Entity::from_raw(8),
            position: Position::new(0.5, 4.0, 1.5),
            on_fire: true,
        });
        let mut event = DamageEvent::by_entity(shooter, DamageCause::Projectile, 2.0);
        living.apply_damage(&mut event, &ctx(1), &mut world);

        let v = living.velocity();
        assert!(v.x.abs() < EPS);
        assert!((v.z + 0.4).abs() < EPS);
        assert!(living.is_on_fire());
        assert_eq!(living.aggro().revenge_target(), Some(Entity::from_raw(7)));
    }

    #[test]
    fn lethal_hit_kills_once() {
        let mut world = TestWorld::new();
        let mut living = living().with_species(Box::new(DropTable::new(vec![DropSpec::new(
            "minecraft:bone",
            2,
            2,
        )])));
        living.set_max_health(4.0);
        living.apply_damage(&mut hit(10.0), &ctx(1), &mut world);

        assert_eq!(living.health(), 0.0);
        assert!(!living.is_alive());
        assert_eq!(world.count_broadcasts(EntityEventKind::Death), 1);
        assert_eq!(world.count_broadcasts(EntityEventKind::Hurt), 0);
        assert_eq!(world.death_events, 1);
        assert_eq!(world.drops.len(), 1);
        assert_eq!(world.drops[0].1, ItemDrop::new("minecraft:bone", 2));
    }

    #[test]
    fn kill_twice_is_noop() {
        let mut world = TestWorld::new();
        world.extra_drop = Some(ItemDrop::new("minecraft:emerald", 1));
        let mut living = living();
        living.kill(&mut world);
        living.kill(&mut world);
        assert_eq!(world.death_events, 1);
        assert_eq!(world.drops.len(), 1);
        assert_eq!(world.drops[0].0, Position::new(0.5, 4.0, 0.5));
    }

    #[test]
    fn zero_health_kills_and_later_kill_is_noop() {
        let mut world = TestWorld::new();
        world.extra_drop = Some(ItemDrop::new("minecraft:emerald", 1));
        let mut living = living();
        living.set_health(0.0, &mut world);
        assert!(!living.is_alive());
        assert_eq!(world.death_events, 1);
        assert_eq!(world.drops.len(), 1);

        living.kill(&mut world);
        living.set_health(-5.0, &mut world);
        assert_eq!(world.death_events, 1);
        assert_eq!(world.drops.len(), 1);
    }

    #[test]
    fn revive_broadcasts_respawn() {
        let mut world = TestWorld::new();
        let mut living = living();
        living.kill(&mut world);
        living.set_health(30.0, &mut world);
        assert_eq!(living.health(), 20.0);
        assert!(living.is_alive());
        assert_eq!(world.count_broadcasts(EntityEventKind::Respawn), 1);

        living.set_health(10.0, &mut world);
        assert_eq!(world.count_broadcasts(EntityEventKind::Respawn), 1);
    }

    #[test]
    fn heal_clears_cooldown() {
        let mut world = TestWorld::new();
        let mut living = living();
        living.apply_damage(&mut hit(5.0), &ctx(1), &mut world);
        let mut heal = RegainHealthEvent::new(2.0, RegainReason::Eating);
        living.heal(&mut heal, &mut world);
        assert!((living.health() - 17.0).abs() < EPS);
        assert_eq!(living.attack_cooldown(), 0);
    }

    #[test]
    fn cancelled_heal_keeps_cooldown() {
        let mut world = TestWorld::new();
        world.cancel_heals = true;
        let mut living = living();
        living.apply_damage(&mut hit(5.0), &ctx(1), &mut world);
        let mut heal = RegainHealthEvent::new(2.0, RegainReason::Magic);
        living.heal(&mut heal, &mut world);
        assert!(heal.is_cancelled());
        assert!((living.health() - 15.0).abs() < EPS);
        assert_eq!(living.attack_cooldown(), ATTACK_COOLDOWN_TICKS);
    }

    #[test]
    fn knockback_without_direction_is_noop() {
        let mut living = living();
        living.set_velocity(Velocity::new(0.3, -0.2, 0.1));
        living.knock_back(5.0, 0.0, 0.0, DEFAULT_KNOCKBACK);
        assert_eq!(living.velocity(), Velocity::new(0.3, -0.2, 0.1));
    }

    #[test]
    fn knockback_halves_then_adds() {
        let mut living = living();
        living.set_velocity(Velocity::new(0.2, 0.6, 0.0));
        living.knock_back(1.0, 1.0, 0.0, 0.4);
        let v = living.velocity();
        assert!((v.x - (0.5 * 0.2 + 0.4)).abs() < EPS);
        assert!((v.y - 0.4).abs() < EPS);
        assert!(v.z.abs() < EPS);
    }

    #[test]
    fn knockback_formula_ignores_resistance() {
        let mut living = living();
        living
            .attributes_mut()
            .set_base(AttributeKind::KnockbackResistance, 0.5);
        living.set_velocity(Velocity::new(0.2, 0.0, 0.0));
        living.knock_back(1.0, 1.0, 0.0, 0.4);
        let v = living.velocity();
        assert!((v.x - 0.5).abs() < EPS);
        assert!((v.y - 0.4).abs() < EPS);
    }

    #[test]
    fn resistance_weakens_hit_strength() {
        let mut world = TestWorld::new();
        let mut living = living();
        living
            .attributes_mut()
            .set_base(AttributeKind::KnockbackResistance, 0.5);
        let mut event = DamageEvent::by_entity(attacker(-0.5, false), DamageCause::EntityAttack, 2.0);
        living.apply_damage(&mut event, &ctx(1), &mut world);
        assert!((event.knockback() - 0.2).abs() < EPS);
        let v = living.velocity();
        assert!((v.x - 0.2).abs() < EPS);
        assert!((v.y - 0.2).abs() < EPS);
    }

    #[test]
    fn full_resistance_holds_still() {
        let mut world = TestWorld::new();
        let mut living = living();
        living
            .attributes_mut()
            .set_base(AttributeKind::KnockbackResistance, 1.0);
        let mut event = DamageEvent::by_entity(attacker(-0.5, false), DamageCause::EntityAttack, 2.0);
        living.apply_damage(&mut event, &ctx(1), &mut world);
        assert_eq!(living.velocity(), Velocity::default());
        assert_eq!(living.aggro().revenge_target(), Some(Entity::from_raw(7)));
    }
}
