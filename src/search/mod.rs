//! Path search: the best-first primitive, the locomotion model that feeds
//! it, and the planner that ties them together.

pub mod best_first;
mod neighbors;
mod planner;

pub use best_first::{best_first_search, SearchOutcome};
pub use neighbors::{Candidate, MoveKind, NeighborGenerator};
pub use planner::{PathFinder, PathResult};
