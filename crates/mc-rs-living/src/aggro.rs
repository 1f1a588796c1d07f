//! Attack and revenge targets.

use bevy_ecs::entity::Entity;
use tracing::debug;

use crate::world::LivingWorld;

/// Ticks after which a revenge target is forgotten.
pub const REVENGE_TIMEOUT_TICKS: u64 = 100;

/// Weak handles to the entities this one is pursuing or retaliating against.
///
/// Handles are never dereferenced here; liveness is asked of the world.
#[derive(Debug, Clone, Default)]
pub struct AggroTracker {
    attack_target: Option<Entity>,
    revenge_target: Option<Entity>,
    revenge_set_at: u64,
}

impl AggroTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attack_target(&self) -> Option<Entity> {
        self.attack_target
    }

    pub fn set_attack_target(&mut self, target: Option<Entity>) {
        self.attack_target = target;
    }

    pub fn revenge_target(&self) -> Option<Entity> {
        self.revenge_target
    }

    /// Tick at which the revenge target was last recorded.
    pub fn revenge_set_at(&self) -> u64 {
        self.revenge_set_at
    }

    pub fn set_revenge_target(&mut self, attacker: Option<Entity>, current_tick: u64) {
        self.revenge_target = attacker;
        self.revenge_set_at = current_tick;
    }

    /// Forget the revenge target once it died or timed out. Returns whether it was cleared.
    pub fn expire_revenge(&mut self, current_tick: u64, world: &dyn LivingWorld) -> bool {
        let Some(target) = self.revenge_target else {
            return false;
        };
        let timed_out = current_tick.saturating_sub(self.revenge_set_at) > REVENGE_TIMEOUT_TICKS;
        if !world.entity_alive(target) || timed_out {
            debug!(?target, timed_out, "revenge target cleared");
            self.set_revenge_target(None, current_tick);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Position;
    use crate::test_support::TestWorld;

    fn tracked(world: &mut TestWorld) -> (AggroTracker, Entity) {
        let attacker = Entity::from_raw(7);
        world.add_entity(attacker, Position::new(1.0, 4.0, 1.0));
        let mut aggro = AggroTracker::new();
        aggro.set_revenge_target(Some(attacker), 1000);
        (aggro, attacker)
    }

    #[test]
    fn kept_at_exactly_timeout() {
        let mut world = TestWorld::new();
        let (mut aggro, attacker) = tracked(&mut world);
        assert!(!aggro.expire_revenge(1000 + REVENGE_TIMEOUT_TICKS, &world));
        assert_eq!(aggro.revenge_target(), Some(attacker));
    }

    #[test]
    fn cleared_after_timeout() {
        let mut world = TestWorld::new();
        let (mut aggro, _) = tracked(&mut world);
        assert!(aggro.expire_revenge(1000 + REVENGE_TIMEOUT_TICKS + 1, &world));
        assert_eq!(aggro.revenge_target(), None);
    }

    #[test]
    fn cleared_when_target_dies() {
        let mut world = TestWorld::new();
        let (mut aggro, attacker) = tracked(&mut world);
        world.kill_entity(attacker);
        assert!(aggro.expire_revenge(1001, &world));
        assert_eq!(aggro.revenge_target(), None);
    }

    #[test]
    fn attack_target_never_expires() {
        let world = TestWorld::new();
        let mut aggro = AggroTracker::new();
        aggro.set_attack_target(Some(Entity::from_raw(3)));
        assert!(!aggro.expire_revenge(u64::MAX, &world));
        assert_eq!(aggro.attack_target(), Some(Entity::from_raw(3)));
    }
}
