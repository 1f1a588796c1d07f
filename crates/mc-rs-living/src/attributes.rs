//! Named numeric stats of a living entity.
//!
//! Each attribute has a base value and a list of modifiers. The effective value
//! is `(base + Σadd) × (1 + Σmultiply_base) × Π(1 + multiply)`, clamped to the
//! attribute's range.

use std::collections::HashMap;

/// The fixed set of attributes every living entity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Health,
    FollowRange,
    KnockbackResistance,
    MovementSpeed,
    AttackDamage,
    Absorption,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 6] = [
        AttributeKind::Health,
        AttributeKind::FollowRange,
        AttributeKind::KnockbackResistance,
        AttributeKind::MovementSpeed,
        AttributeKind::AttackDamage,
        AttributeKind::Absorption,
    ];

    /// Bedrock network name.
    pub fn name(self) -> &'static str {
        match self {
            AttributeKind::Health => "minecraft:health",
            AttributeKind::FollowRange => "minecraft:follow_range",
            AttributeKind::KnockbackResistance => "minecraft:knockback_resistance",
            AttributeKind::MovementSpeed => "minecraft:movement",
            AttributeKind::AttackDamage => "minecraft:attack_damage",
            AttributeKind::Absorption => "minecraft:absorption",
        }
    }

    /// `(min, max, default)` for this attribute.
    fn range(self) -> (f32, f32, f32) {
        match self {
            AttributeKind::Health => (0.0, 20.0, 20.0),
            AttributeKind::FollowRange => (0.0, 2048.0, 16.0),
            AttributeKind::KnockbackResistance => (0.0, 1.0, 0.0),
            AttributeKind::MovementSpeed => (0.0, f32::MAX, 0.1),
            AttributeKind::AttackDamage => (0.0, f32::MAX, 1.0),
            AttributeKind::Absorption => (0.0, f32::MAX, 0.0),
        }
    }
}

/// How a modifier combines with the base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierOperation {
    Add,
    MultiplyBase,
    Multiply,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeModifier {
    pub name: String,
    pub amount: f32,
    pub operation: ModifierOperation,
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub kind: AttributeKind,
    min: f32,
    max: f32,
    base: f32,
    modifiers: Vec<AttributeModifier>,
}

impl Attribute {
    pub fn new(kind: AttributeKind) -> Self {
        let (min, max, default) = kind.range();
        Self {
            kind,
            min,
            max,
            base: default,
            modifiers: Vec::new(),
        }
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Set the base value, clamped to the attribute range.
    pub fn set_base(&mut self, value: f32) {
        self.base = value.clamp(self.min, self.max);
    }

    /// Raise the upper bound (e.g. max health beyond 20).
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(self.min);
        self.base = self.base.min(self.max);
    }

    /// Add a modifier, replacing any existing one with the same name.
    pub fn add_modifier(&mut self, modifier: AttributeModifier) {
        self.modifiers.retain(|m| m.name != modifier.name);
        self.modifiers.push(modifier);
    }

    pub fn remove_modifier(&mut self, name: &str) {
        self.modifiers.retain(|m| m.name != name);
    }

    /// Effective value after all modifiers.
    pub fn value(&self) -> f32 {
        let mut add = 0.0;
        let mut multiply_base = 0.0;
        let mut multiply = 1.0;
        for m in &self.modifiers {
            match m.operation {
                ModifierOperation::Add => add += m.amount,
                ModifierOperation::MultiplyBase => multiply_base += m.amount,
                ModifierOperation::Multiply => multiply *= 1.0 + m.amount,
            }
        }
        ((self.base + add) * (1.0 + multiply_base) * multiply).clamp(self.min, self.max)
    }
}

/// Mapping from attribute kind to its current state.
#[derive(Debug, Clone)]
pub struct AttributeMap {
    attributes: HashMap<AttributeKind, Attribute>,
}

impl Default for AttributeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeMap {
    /// All six living attributes at their defaults.
    pub fn new() -> Self {
        Self {
            attributes: AttributeKind::ALL
                .iter()
                .map(|&kind| (kind, Attribute::new(kind)))
                .collect(),
        }
    }

    pub fn get(&self, kind: AttributeKind) -> &Attribute {
        // Every kind is inserted by `new` and never removed.
        &self.attributes[&kind]
    }

    pub fn get_mut(&mut self, kind: AttributeKind) -> &mut Attribute {
        self.attributes
            .entry(kind)
            .or_insert_with(|| Attribute::new(kind))
    }

    /// Shorthand for the effective value of `kind`.
    pub fn value(&self, kind: AttributeKind) -> f32 {
        self.get(kind).value()
    }

    pub fn set_base(&mut self, kind: AttributeKind, value: f32) {
        self.get_mut(kind).set_base(value);
    }
}
