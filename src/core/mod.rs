//! Foundation types shared by every layer (no internal deps).

pub mod path;
pub mod types;

pub use path::Path;
pub use types::{
    block_types, BlockPos, BlockProperties, Node, Point3, CARDINAL_DIRECTIONS,
};
