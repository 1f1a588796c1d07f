//! Ray stepping through the block grid.
//!
//! [`BlockIterator`] walks every block a ray passes through (voxel traversal),
//! starting with the block containing the origin. [`line_of_sight`] looks each
//! stepped block up and keeps a sliding window of the most recent ones.

use std::collections::VecDeque;

use crate::block::{Block, BlockKind, BlockPos};
use crate::components::Position;
use crate::error::LivingError;
use crate::world::LivingWorld;

/// Sight distances beyond this are clamped.
pub const MAX_SIGHT_DISTANCE: f32 = 120.0;

/// Iterator over the block positions crossed by a ray.
#[derive(Debug, Clone)]
pub struct BlockIterator {
    current: BlockPos,
    step: [i32; 3],
    t_max: [f32; 3],
    t_delta: [f32; 3],
    max_distance: f32,
    started: bool,
}

impl BlockIterator {
    /// `direction` need not be normalized; a zero direction yields only the origin block.
    pub fn new(origin: Position, direction: (f32, f32, f32), max_distance: f32) -> Self {
        let (dx, dy, dz) = direction;
        let len = (dx * dx + dy * dy + dz * dz).sqrt();
        let dir = if len > 0.0 {
            [dx / len, dy / len, dz / len]
        } else {
            [0.0; 3]
        };
        let start = [origin.x, origin.y, origin.z];
        let current = origin.block_pos();
        let cell = [current.x, current.y, current.z];

        let mut step = [0; 3];
        let mut t_max = [f32::INFINITY; 3];
        let mut t_delta = [f32::INFINITY; 3];
        for axis in 0..3 {
            let d = dir[axis];
            if d > 0.0 {
                step[axis] = 1;
                t_delta[axis] = 1.0 / d;
                t_max[axis] = ((cell[axis] + 1) as f32 - start[axis]) / d;
            } else if d < 0.0 {
                step[axis] = -1;
                t_delta[axis] = -1.0 / d;
                t_max[axis] = (cell[axis] as f32 - start[axis]) / d;
            }
        }

        Self {
            current,
            step,
            t_max,
            t_delta,
            max_distance,
            started: false,
        }
    }
}

impl Iterator for BlockIterator {
    type Item = BlockPos;

    fn next(&mut self) -> Option<BlockPos> {
        if !self.started {
            self.started = true;
            return Some(self.current);
        }

        let axis = if self.t_max[0] <= self.t_max[1] && self.t_max[0] <= self.t_max[2] {
            0
        } else if self.t_max[1] <= self.t_max[2] {
            1
        } else {
            2
        };

        if !self.t_max[axis].is_finite() || self.t_max[axis] > self.max_distance {
            return None;
        }

        self.t_max[axis] += self.t_delta[axis];
        match axis {
            0 => self.current.x += self.step[0],
            1 => self.current.y += self.step[1],
            _ => self.current.z += self.step[2],
        }
        Some(self.current)
    }
}

/// Blocks along a ray until the first non-transparent one (inclusive).
///
/// With an empty `transparent` list only air is see-through. When
/// `max_length` is non-zero only the last `max_length` blocks are kept, but
/// stepping continues until the ray stops.
pub fn line_of_sight(
    world: &dyn LivingWorld,
    origin: Position,
    direction: (f32, f32, f32),
    max_distance: f32,
    max_length: usize,
    transparent: &[BlockKind],
) -> Result<Vec<Block>, LivingError> {
    let max_distance = max_distance.min(MAX_SIGHT_DISTANCE);
    let mut blocks: VecDeque<Block> = VecDeque::new();

    for pos in BlockIterator::new(origin, direction, max_distance) {
        let block = world.block_at(pos)?;
        blocks.push_back(block);

        if max_length != 0 && blocks.len() > max_length {
            blocks.pop_front();
        }

        let see_through = if transparent.is_empty() {
            block.kind == BlockKind::Air
        } else {
            transparent.contains(&block.kind)
        };
        if !see_through {
            break;
        }
    }

    Ok(blocks.into())
}
