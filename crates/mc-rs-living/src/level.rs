//! Block storage backing a game world.
//!
//! [`FlatLevel`] is an in-memory flat world: layered floor columns (bedrock,
//! dirt, grass by default) with per-position overrides.

use std::collections::HashMap;

use crate::block::{Block, BlockKind, BlockPos};
use crate::components::Position;
use crate::error::LivingError;
use crate::event::ItemDrop;

/// Block lookup and item sink.
pub trait Level: Send + Sync {
    fn block_at(&self, pos: BlockPos) -> Result<Block, LivingError>;

    fn drop_item(&mut self, position: Position, item: ItemDrop);
}

/// An item lying in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedItem {
    pub position: Position,
    pub item: ItemDrop,
}

/// A flat world with optional block overrides.
#[derive(Debug, Clone)]
pub struct FlatLevel {
    /// Layers from y = 0 upward.
    layers: Vec<BlockKind>,
    overrides: HashMap<BlockPos, BlockKind>,
    /// Chunk radius around (0, 0) that is loaded; `None` = everything.
    loaded_radius: Option<i32>,
    dropped: Vec<DroppedItem>,
}

impl Default for FlatLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatLevel {
    /// Default Bedrock flat world: bedrock, dirt, dirt, grass; feet rest at y = 4.
    pub fn new() -> Self {
        Self::with_layers(vec![
            BlockKind::Bedrock,
            BlockKind::Dirt,
            BlockKind::Dirt,
            BlockKind::Grass,
        ])
    }

    /// Flat world whose floor top is grass at `floor_y - 1`.
    pub fn with_floor(floor_y: i32) -> Self {
        let height = floor_y.max(0) as usize;
        let mut layers = vec![BlockKind::Dirt; height];
        if let Some(first) = layers.first_mut() {
            *first = BlockKind::Bedrock;
        }
        if height > 1 {
            if let Some(last) = layers.last_mut() {
                *last = BlockKind::Grass;
            }
        }
        Self::with_layers(layers)
    }

    /// Nothing but air.
    pub fn empty() -> Self {
        Self::with_layers(Vec::new())
    }

    pub fn with_layers(layers: Vec<BlockKind>) -> Self {
        Self {
            layers,
            overrides: HashMap::new(),
            loaded_radius: None,
            dropped: Vec::new(),
        }
    }

    /// Restrict lookups to chunks within `radius` of the origin chunk.
    pub fn with_loaded_radius(mut self, radius: i32) -> Self {
        self.loaded_radius = Some(radius);
        self
    }

    pub fn set_block(&mut self, pos: BlockPos, kind: BlockKind) {
        self.overrides.insert(pos, kind);
    }

    /// Fill an axis-aligned box (inclusive) with `kind`.
    pub fn fill(&mut self, from: BlockPos, to: BlockPos, kind: BlockKind) {
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                for z in from.z.min(to.z)..=from.z.max(to.z) {
                    self.overrides.insert(BlockPos::new(x, y, z), kind);
                }
            }
        }
    }

    pub fn dropped_items(&self) -> &[DroppedItem] {
        &self.dropped
    }

    fn layer_at(&self, y: i32) -> BlockKind {
        usize::try_from(y)
            .ok()
            .and_then(|i| self.layers.get(i).copied())
            .unwrap_or(BlockKind::Air)
    }
}

impl Level for FlatLevel {
    fn block_at(&self, pos: BlockPos) -> Result<Block, LivingError> {
        if let Some(radius) = self.loaded_radius {
            let (cx, cz) = pos.chunk();
            if cx.abs() > radius || cz.abs() > radius {
                return Err(LivingError::ChunkNotLoaded { x: cx, z: cz });
            }
        }
        let kind = self
            .overrides
            .get(&pos)
            .copied()
            .unwrap_or_else(|| self.layer_at(pos.y));
        Ok(Block::new(kind, pos))
    }

    fn drop_item(&mut self, position: Position, item: ItemDrop) {
        self.dropped.push(DroppedItem { position, item });
    }
}
