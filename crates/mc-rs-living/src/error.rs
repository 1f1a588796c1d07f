//! Living-entity error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LivingError {
    #[error("chunk ({x}, {z}) is not loaded")]
    ChunkNotLoaded { x: i32, z: i32 },

    #[error("unknown mob type: {0}")]
    UnknownMobType(String),

    #[error("no living entity with runtime id {0}")]
    EntityNotFound(u64),

    #[error("saved {0} has no health left")]
    DeadOnLoad(String),

    #[error("malformed saved entity data: {0}")]
    Persistence(#[from] serde_json::Error),
}
