//! Saved state as a loose JSON object.
//!
//! Keys: `Health` (integer), `Air`, `Fire`, `Pos` (`[x, y, z]`) and
//! `Rotation` (`[yaw, pitch]`). Older saves carry a float `HealF` instead of
//! `Health`; it is migrated on load.

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::components::{Position, Rotation};

use super::survival::{MAX_AIR, MIN_AIR};
use super::LivingEntity;

/// Normalize the health field in place and return it.
///
/// `HealF` wins and is removed; otherwise a missing or non-integer `Health`
/// is replaced by `max_health`.
pub fn migrate_health(tag: &mut Map<String, Value>, max_health: f32) -> i16 {
    if let Some(legacy) = tag.remove("HealF") {
        let health = match legacy.as_f64() {
            Some(h) => h as i16,
            None => {
                warn!(value = %legacy, "HealF is not a number");
                max_health as i16
            }
        };
        tag.insert("Health".into(), json!(health));
        return health;
    }

    let saved = tag
        .get("Health")
        .and_then(Value::as_i64)
        .and_then(|h| i16::try_from(h).ok());
    match saved {
        Some(health) => health,
        None => {
            if let Some(bad) = tag.get("Health") {
                warn!(value = %bad, "Health is not an integer");
            }
            let health = max_health as i16;
            tag.insert("Health".into(), json!(health));
            health
        }
    }
}

fn read_f32_array<const N: usize>(tag: &Map<String, Value>, key: &str) -> Option<[f32; N]> {
    let values = tag.get(key)?.as_array()?;
    if values.len() != N {
        warn!(key, len = values.len(), "wrong array length");
        return None;
    }
    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = value.as_f64()? as f32;
    }
    Some(out)
}

impl LivingEntity {
    /// Restore saved state, migrating legacy fields in `tag`.
    pub fn load_saved(&mut self, tag: &mut Map<String, Value>) {
        let health = migrate_health(tag, self.max_health());
        self.health = f32::from(health).clamp(0.0, self.max_health());

        if let Some(air) = tag.get("Air").and_then(Value::as_i64) {
            self.air_supply = air.clamp(i64::from(MIN_AIR), i64::from(MAX_AIR)) as i32;
        }
        if let Some(fire) = tag.get("Fire").and_then(Value::as_u64) {
            self.fire_ticks = u32::try_from(fire).unwrap_or(u32::MAX);
        }
        if let Some([x, y, z]) = read_f32_array::<3>(tag, "Pos") {
            self.position = Position::new(x, y, z);
        }
        if let Some([yaw, pitch]) = read_f32_array::<2>(tag, "Rotation") {
            self.rotation = Rotation {
                yaw,
                pitch,
                head_yaw: yaw,
            };
        }
    }

    /// Write the persistent fields into `tag`.
    pub fn save_to(&self, tag: &mut Map<String, Value>) {
        // Rounded up so a living entity never saves as dead.
        tag.insert("Health".into(), json!(self.health.ceil() as i16));
        tag.insert("Air".into(), json!(self.air_supply));
        tag.insert("Fire".into(), json!(self.fire_ticks));
        tag.insert(
            "Pos".into(),
            json!([self.position.x, self.position.y, self.position.z]),
        );
        tag.insert(
            "Rotation".into(),
            json!([self.rotation.yaw, self.rotation.pitch]),
        );
    }
}
