//! Cancellable events raised by living entities: damage, healing, death.
//!
//! Listeners receive `&mut` access and may cancel (or un-cancel) an event
//! before the base pipeline acts on it.

use bevy_ecs::entity::Entity;

use crate::components::Position;

/// Default horizontal knockback strength of an entity-sourced hit.
pub const DEFAULT_KNOCKBACK: f32 = 0.4;

/// Why damage was dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    EntityAttack,
    Projectile,
    Suffocation,
    Drowning,
    Fall,
    Fire,
    FireTick,
    Lava,
    Void,
    Magic,
    Custom,
}

/// Named adjustments applied on top of the raw amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageModifier {
    Armor,
    Resistance,
    Strength,
    Weakness,
    Critical,
}

/// Snapshot of the entity responsible for a hit.
///
/// `child` is the projectile (arrow, snowball) when the damage was dealt
/// through one; knockback then pushes away from the child's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Damager {
    pub entity: Entity,
    pub position: Position,
    pub on_fire: bool,
    pub child: Option<ChildDamager>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildDamager {
    pub entity: Entity,
    pub position: Position,
    pub on_fire: bool,
}

#[derive(Debug, Clone)]
pub struct DamageEvent {
    cause: DamageCause,
    raw_amount: f32,
    modifiers: Vec<(DamageModifier, f32)>,
    knockback: f32,
    damager: Option<Damager>,
    cancelled: bool,
}

impl DamageEvent {
    /// Environmental damage with no responsible entity.
    pub fn new(cause: DamageCause, raw_amount: f32) -> Self {
        Self {
            cause,
            raw_amount,
            modifiers: Vec::new(),
            knockback: DEFAULT_KNOCKBACK,
            damager: None,
            cancelled: false,
        }
    }

    /// Damage dealt by another entity.
    pub fn by_entity(damager: Damager, cause: DamageCause, raw_amount: f32) -> Self {
        Self {
            damager: Some(damager),
            ..Self::new(cause, raw_amount)
        }
    }

    pub fn cause(&self) -> DamageCause {
        self.cause
    }

    pub fn raw_amount(&self) -> f32 {
        self.raw_amount
    }

    pub fn set_modifier(&mut self, modifier: DamageModifier, amount: f32) {
        match self.modifiers.iter_mut().find(|(m, _)| *m == modifier) {
            Some(slot) => slot.1 = amount,
            None => self.modifiers.push((modifier, amount)),
        }
    }

    pub fn modifier(&self, modifier: DamageModifier) -> f32 {
        self.modifiers
            .iter()
            .find(|(m, _)| *m == modifier)
            .map(|(_, a)| *a)
            .unwrap_or(0.0)
    }

    /// Raw amount plus all modifiers, never negative.
    pub fn final_amount(&self) -> f32 {
        let total: f32 = self.modifiers.iter().map(|(_, a)| a).sum();
        (self.raw_amount + total).max(0.0)
    }

    pub fn knockback(&self) -> f32 {
        self.knockback
    }

    pub fn set_knockback(&mut self, knockback: f32) {
        self.knockback = knockback;
    }

    pub fn damager(&self) -> Option<&Damager> {
        self.damager.as_ref()
    }

    pub fn child_damager(&self) -> Option<&ChildDamager> {
        self.damager.as_ref().and_then(|d| d.child.as_ref())
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// Why health is being restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegainReason {
    Regeneration,
    Eating,
    Magic,
    Custom,
}

#[derive(Debug, Clone)]
pub struct RegainHealthEvent {
    pub amount: f32,
    pub reason: RegainReason,
    cancelled: bool,
}

impl RegainHealthEvent {
    pub fn new(amount: f32, reason: RegainReason) -> Self {
        Self {
            amount,
            reason,
            cancelled: false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// An item stack handed to the world when an entity dies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDrop {
    pub item: String,
    pub count: u8,
}

impl ItemDrop {
    pub fn new(item: impl Into<String>, count: u8) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }
}

/// Raised once when a living entity dies. Listeners may edit the drops.
#[derive(Debug, Clone)]
pub struct DeathEvent {
    pub runtime_id: u64,
    pub drops: Vec<ItemDrop>,
}

/// Visual state changes broadcast to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityEventKind {
    Hurt,
    Death,
    Respawn,
}

/// Receives living-entity events before the base pipeline applies them.
pub trait LivingListener: Send + Sync {
    fn on_damage(&mut self, _event: &mut DamageEvent) {}

    fn on_regain_health(&mut self, _event: &mut RegainHealthEvent) {}

    fn on_death(&mut self, _event: &mut DeathEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_amount_sums_modifiers() {
        let mut ev = DamageEvent::new(DamageCause::EntityAttack, 10.0);
        ev.set_modifier(DamageModifier::Armor, -4.0);
        ev.set_modifier(DamageModifier::Strength, 1.5);
        assert!((ev.final_amount() - 7.5).abs() < 0.001);
        assert!((ev.raw_amount() - 10.0).abs() < 0.001);
    }

    #[test]
    fn final_amount_never_negative() {
        let mut ev = DamageEvent::new(DamageCause::Fall, 2.0);
        ev.set_modifier(DamageModifier::Armor, -8.0);
        assert_eq!(ev.final_amount(), 0.0);
    }

    #[test]
    fn modifier_is_replaced_not_stacked() {
        let mut ev = DamageEvent::new(DamageCause::EntityAttack, 5.0);
        ev.set_modifier(DamageModifier::Armor, -1.0);
        ev.set_modifier(DamageModifier::Armor, -2.0);
        assert!((ev.modifier(DamageModifier::Armor) + 2.0).abs() < 0.001);
        assert!((ev.final_amount() - 3.0).abs() < 0.001);
    }

    #[test]
    fn cancel_and_uncancel() {
        let mut ev = DamageEvent::new(DamageCause::Drowning, 2.0);
        assert!(!ev.is_cancelled());
        ev.set_cancelled(true);
        assert!(ev.is_cancelled());
        ev.set_cancelled(false);
        assert!(!ev.is_cancelled());
    }

    #[test]
    fn child_damager_accessor() {
        let shooter = Entity::from_raw(1);
        let arrow = Entity::from_raw(2);
        let ev = DamageEvent::by_entity(
            Damager {
                entity: shooter,
                position: Position::new(0.0, 0.0, 0.0),
                on_fire: false,
                child: Some(ChildDamager {
                    entity: arrow,
                    position: Position::new(1.0, 0.0, 0.0),
                    on_fire: true,
                }),
            },
            DamageCause::Projectile,
            4.0,
        );
        assert_eq!(ev.damager().map(|d| d.entity), Some(shooter));
        assert_eq!(ev.child_damager().map(|c| c.entity), Some(arrow));
        assert!((ev.knockback() - DEFAULT_KNOCKBACK).abs() < 0.001);
    }
}
