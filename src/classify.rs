//! Block classification for locomotion.
//!
//! Maps a queried voxel to `{safe, physical}` given the current hazard set.
//! Pure function of world state at query time: the world mutates between
//! queries, so results are never cached.

use std::collections::HashSet;

use crate::core::{BlockPos, BlockProperties};
use crate::world::{CollisionShape, WorldQuery};

/// Classifies voxels against a world query and a hazard set.
///
/// Borrows both for the duration of one search so a mid-search hazard
/// reconfiguration cannot produce a half-updated route.
pub struct BlockClassifier<'a, W: WorldQuery> {
    world: &'a W,
    hazards: &'a HashSet<u16>,
}

impl<'a, W: WorldQuery> BlockClassifier<'a, W> {
    pub fn new(world: &'a W, hazards: &'a HashSet<u16>) -> Self {
        Self { world, hazards }
    }

    /// Classify the block at `position`.
    ///
    /// `safe` holds iff the collision shape is empty and the type is not a
    /// hazard; `physical` holds iff the shape is a full block. An unloaded
    /// cell is neither.
    pub fn classify(&self, position: BlockPos) -> BlockProperties {
        match self.world.block_at(position) {
            Some(block) => BlockProperties {
                safe: block.shape == CollisionShape::Empty
                    && !self.hazards.contains(&block.block_type),
                physical: block.shape == CollisionShape::Full,
            },
            None => BlockProperties::UNLOADED,
        }
    }

    /// Raw block type at `position`, if loaded.
    pub fn block_type(&self, position: BlockPos) -> Option<u16> {
        self.world.block_at(position).map(|b| b.block_type)
    }
}
