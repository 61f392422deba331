//! Capability traits at the host boundary.
//!
//! The engine never talks to a host object directly: a [`Navigator`] is
//! constructed with a [`WorldQuery`] for block lookup and an
//! [`AgentControl`] for position reporting and actuation. Both are assumed
//! synchronous and side-effect-free except where actuation is the point.
//!
//! [`Navigator`]: crate::Navigator

use crate::core::{BlockPos, Point3};

/// Collision shape of a block as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionShape {
    /// No collision volume; the agent can occupy this cell.
    Empty,
    /// Partial volume (slabs, fences). Neither standable-through nor
    /// reliably weight-bearing.
    Partial,
    /// Full-cube volume; can bear the agent's weight.
    Full,
}

/// Host-reported block data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    pub shape: CollisionShape,
    pub block_type: u16,
}

impl BlockInfo {
    #[inline]
    pub fn new(shape: CollisionShape, block_type: u16) -> Self {
        Self { shape, block_type }
    }
}

/// Read access to the voxel world.
///
/// Returning `None` means the cell is outside the loaded world; the
/// classifier treats it as neither safe nor physical.
pub trait WorldQuery {
    fn block_at(&self, position: BlockPos) -> Option<BlockInfo>;
}

/// Position reporting and movement actuation for the agent.
pub trait AgentControl {
    /// Continuous position of the agent's feet.
    fn position(&self) -> Point3;

    /// Eye height above the feet, used when orienting the look direction.
    fn eye_height(&self) -> f32;

    /// Orient the agent's view toward a point.
    fn set_look(&mut self, target: Point3);

    /// Engage or release forward movement.
    fn set_forward(&mut self, on: bool);

    /// Engage or release the jump control.
    fn set_jump(&mut self, on: bool);

    /// Release every movement control at once.
    fn clear_all_controls(&mut self);
}
