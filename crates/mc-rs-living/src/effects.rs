//! Timed status effects that change survival rules.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// No air loss under water.
    WaterBreathing,
    /// No damage from burning.
    FireResistance,
}

/// Remaining duration per active effect.
#[derive(Debug, Clone, Default)]
pub struct ActiveEffects {
    remaining: HashMap<EffectKind, u32>,
}

impl ActiveEffects {
    /// Add an effect, keeping the longer of the old and new durations.
    pub fn add(&mut self, kind: EffectKind, ticks: u32) {
        let slot = self.remaining.entry(kind).or_insert(0);
        *slot = (*slot).max(ticks);
    }

    pub fn remove(&mut self, kind: EffectKind) {
        self.remaining.remove(&kind);
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.remaining.contains_key(&kind)
    }

    pub fn remaining(&self, kind: EffectKind) -> Option<u32> {
        self.remaining.get(&kind).copied()
    }

    /// Count every effect down; expired ones are dropped.
    pub fn tick(&mut self, tick_diff: u32) {
        self.remaining.retain(|_, ticks| {
            *ticks = ticks.saturating_sub(tick_diff);
            *ticks > 0
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_duration() {
        let mut effects = ActiveEffects::default();
        effects.add(EffectKind::WaterBreathing, 3);
        effects.tick(2);
        assert_eq!(effects.remaining(EffectKind::WaterBreathing), Some(1));
        effects.tick(1);
        assert!(!effects.has(EffectKind::WaterBreathing));
    }

    #[test]
    fn longer_duration_wins() {
        let mut effects = ActiveEffects::default();
        effects.add(EffectKind::FireResistance, 100);
        effects.add(EffectKind::FireResistance, 20);
        assert_eq!(effects.remaining(EffectKind::FireResistance), Some(100));
        effects.remove(EffectKind::FireResistance);
        assert!(!effects.has(EffectKind::FireResistance));
    }
}
