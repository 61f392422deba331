//! Core types for grid navigation.
//!
//! Positions come in two flavors: [`BlockPos`] is the integer (floored)
//! grid cell the agent's feet occupy, and [`Point3`] is the continuous
//! agent-space point reported by the host. A [`Node`] is the search state:
//! a cell plus the wading exposure accumulated on the way there.

use serde::{Deserialize, Serialize};

/// Classic numeric block-type ids used by the default hazard and liquid sets.
pub mod block_types {
    /// Still water.
    pub const WATER: u16 = 0x08;
    /// Flowing water.
    pub const WATER_FLOWING: u16 = 0x09;
    /// Still lava.
    pub const LAVA: u16 = 10;
    /// Flowing lava.
    pub const LAVA_FLOWING: u16 = 11;
    /// Fire.
    pub const FIRE: u16 = 51;
    /// Crops (trampling them is considered a hazard).
    pub const CROPS: u16 = 59;

    /// True for the liquid types that accumulate wading depth.
    pub fn is_liquid(block_type: u16) -> bool {
        block_type == WATER || block_type == WATER_FLOWING
    }
}

/// A continuous 3D point in agent space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: &Point3) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Component-wise difference `other - self`.
    #[inline]
    pub fn delta_to(&self, other: &Point3) -> Point3 {
        Point3::new(other.x - self.x, other.y - self.y, other.z - self.z)
    }

    /// The grid cell containing this point.
    #[inline]
    pub fn floored(&self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

/// An integer grid cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset by a delta in each axis.
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Euclidean distance between cell origins.
    #[inline]
    pub fn distance_to(&self, other: &BlockPos) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        let dz = (other.z - self.z) as f32;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Cell center the agent walks toward (+0.5 horizontally, y unchanged).
    #[inline]
    pub fn center(&self) -> Point3 {
        Point3::new(self.x as f32 + 0.5, self.y as f32, self.z as f32 + 0.5)
    }
}

/// The four cardinal horizontal directions, as (dx, dz) unit offsets.
pub const CARDINAL_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A search state: grid cell plus accumulated wading exposure.
///
/// Two nodes at the same cell with different water depth are distinct
/// states: deeper wading carries a different path cost, so they must not
/// merge in the search's visited set. Equality and hashing cover both
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub position: BlockPos,
    pub water_depth: u32,
}

impl Node {
    #[inline]
    pub fn new(position: BlockPos, water_depth: u32) -> Self {
        Self {
            position,
            water_depth,
        }
    }

    /// A fresh search start at a cell (no wading accumulated).
    #[inline]
    pub fn start(position: BlockPos) -> Self {
        Self::new(position, 0)
    }
}

/// Classification of a single voxel for locomotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockProperties {
    /// Unobstructed, standable-through space that is not in the hazard set.
    pub safe: bool,
    /// Solid enough to bear the agent's weight.
    pub physical: bool,
}

impl BlockProperties {
    /// The classification of an unloaded or absent block.
    pub const UNLOADED: BlockProperties = BlockProperties {
        safe: false,
        physical: false,
    };
}
