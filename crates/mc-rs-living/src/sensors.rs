//! Environment sensors: what medium an entity is in.

use crate::block::BlockKind;
use crate::components::Position;
use crate::error::LivingError;
use crate::world::LivingWorld;

/// Snapshot of an entity's surroundings, taken at a point in its tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Surroundings {
    /// Eyes are in water.
    pub in_water: bool,
    /// Feet are in lava.
    pub in_lava: bool,
    /// Eyes are inside a solid block.
    pub in_solid: bool,
    pub on_ground: bool,
}

impl Surroundings {
    pub fn sense(
        position: Position,
        eye_height: f32,
        on_ground: bool,
        world: &dyn LivingWorld,
    ) -> Result<Self, LivingError> {
        let eye = world.block_at(position.offset_y(eye_height).block_pos())?;
        let feet = world.block_at(position.block_pos())?;
        Ok(Self {
            in_water: eye.kind == BlockKind::Water,
            in_lava: feet.kind == BlockKind::Lava,
            in_solid: eye.kind.is_solid(),
            on_ground,
        })
    }

    /// Neither water nor lava.
    pub fn in_air(&self) -> bool {
        !self.in_water && !self.in_lava
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockPos;
    use crate::test_support::TestWorld;

    #[test]
    fn open_air() {
        let world = TestWorld::with_floor();
        let s = Surroundings::sense(Position::new(0.5, 4.0, 0.5), 1.62, true, &world).unwrap();
        assert!(s.in_air());
        assert!(!s.in_solid);
        assert!(s.on_ground);
    }

    #[test]
    fn water_is_tested_at_eye_height() {
        let mut world = TestWorld::with_floor();
        // water at the feet only: not submerged
        world.set_block(BlockPos::new(0, 4, 0), BlockKind::Water);
        let s = Surroundings::sense(Position::new(0.5, 4.0, 0.5), 1.62, true, &world).unwrap();
        assert!(!s.in_water);

        world.set_block(BlockPos::new(0, 5, 0), BlockKind::Water);
        let s = Surroundings::sense(Position::new(0.5, 4.0, 0.5), 1.62, true, &world).unwrap();
        assert!(s.in_water);
    }

    #[test]
    fn lava_is_tested_at_feet() {
        let mut world = TestWorld::with_floor();
        world.set_block(BlockPos::new(0, 4, 0), BlockKind::Lava);
        let s = Surroundings::sense(Position::new(0.5, 4.0, 0.5), 1.62, false, &world).unwrap();
        assert!(s.in_lava);
        assert!(!s.in_air());
    }

    #[test]
    fn buried_head_is_in_solid() {
        let mut world = TestWorld::with_floor();
        world.set_block(BlockPos::new(0, 5, 0), BlockKind::Sand);
        let s = Surroundings::sense(Position::new(0.5, 4.0, 0.5), 1.62, true, &world).unwrap();
        assert!(s.in_solid);
    }

    #[test]
    fn unloaded_position_fails() {
        let mut world = TestWorld::with_floor();
        world.unload_beyond(0);
        let result = Surroundings::sense(Position::new(100.0, 4.0, 0.5), 1.62, true, &world);
        assert!(result.is_err());
    }
}
