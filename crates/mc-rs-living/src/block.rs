//! Block kinds and positions as seen by living entities.

/// Integer block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chunk column coordinates `(cx, cz)` containing this block.
    pub const fn chunk(&self) -> (i32, i32) {
        (self.x >> 4, self.z >> 4)
    }

    pub const fn below(&self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }
}

/// The kinds of block the living core distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Air,
    Bedrock,
    Stone,
    Dirt,
    Grass,
    Sand,
    Glass,
    Leaves,
    TallGrass,
    Water,
    Lava,
}

impl BlockKind {
    /// Bedrock identifier.
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Air => "minecraft:air",
            BlockKind::Bedrock => "minecraft:bedrock",
            BlockKind::Stone => "minecraft:stone",
            BlockKind::Dirt => "minecraft:dirt",
            BlockKind::Grass => "minecraft:grass_block",
            BlockKind::Sand => "minecraft:sand",
            BlockKind::Glass => "minecraft:glass",
            BlockKind::Leaves => "minecraft:oak_leaves",
            BlockKind::TallGrass => "minecraft:short_grass",
            BlockKind::Water => "minecraft:water",
            BlockKind::Lava => "minecraft:lava",
        }
    }

    /// Full collision cube (entities inside it suffocate).
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            BlockKind::Bedrock
                | BlockKind::Stone
                | BlockKind::Dirt
                | BlockKind::Grass
                | BlockKind::Sand
                | BlockKind::Glass
                | BlockKind::Leaves
        )
    }

    pub fn is_liquid(self) -> bool {
        matches!(self, BlockKind::Water | BlockKind::Lava)
    }
}

/// A block at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub pos: BlockPos,
}

impl Block {
    pub const fn new(kind: BlockKind, pos: BlockPos) -> Self {
        Self { kind, pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_of_negative_block() {
        assert_eq!(BlockPos::new(-1, 0, 17).chunk(), (-1, 1));
        assert_eq!(BlockPos::new(15, 0, 0).chunk(), (0, 0));
    }

    #[test]
    fn liquids_are_not_solid() {
        assert!(BlockKind::Water.is_liquid());
        assert!(!BlockKind::Water.is_solid());
        assert!(!BlockKind::TallGrass.is_solid());
        assert!(BlockKind::Glass.is_solid());
    }
}
