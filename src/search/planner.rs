//! Path search: drives the best-first primitive with the locomotion model.
//!
//! Handles the too-far segmentation policy (searching toward an
//! intermediate progress waypoint when the goal is distant), the wall-clock
//! timeout, and closest-approach tracking for partial-failure reporting.

use tracing::{debug, info, warn};

use crate::config::{NavConfig, NavigationOptions};
use crate::core::{BlockPos, Node, Path, Point3};
use crate::search::best_first::{best_first_search, SearchOutcome};
use crate::search::neighbors::NeighborGenerator;
use crate::world::WorldQuery;

/// Outcome of a path search.
#[derive(Debug, Clone)]
pub enum PathResult {
    /// The goal test was satisfied; the route runs all the way there.
    Success(Path),
    /// The goal was beyond the too-far horizon; the route covers a leg of
    /// solid progress and the caller should replan on arrival.
    TooFar(Path),
    /// The reachable space was exhausted without satisfying any goal test.
    NoPath(Option<BlockPos>),
    /// The wall-clock budget ran out first.
    Timeout(Option<BlockPos>),
}

impl PathResult {
    /// The closest-approached cell for the two "cannot reach" outcomes.
    pub fn closest(&self) -> Option<BlockPos> {
        match self {
            PathResult::NoPath(c) | PathResult::Timeout(c) => *c,
            _ => None,
        }
    }

    /// True for outcomes carrying a followable path.
    pub fn is_reachable(&self) -> bool {
        matches!(self, PathResult::Success(_) | PathResult::TooFar(_))
    }
}

/// Plans routes through the voxel world.
pub struct PathFinder<'a, W: WorldQuery> {
    world: &'a W,
    config: &'a NavConfig,
}

impl<'a, W: WorldQuery> PathFinder<'a, W> {
    pub fn new(world: &'a W, config: &'a NavConfig) -> Self {
        Self { world, config }
    }

    /// Find a route from the agent's current position to `goal`.
    ///
    /// `start_point` is the agent's continuous position; the search starts
    /// from the cell containing it.
    pub fn find_path(
        &self,
        start_point: Point3,
        goal: BlockPos,
        options: &NavigationOptions,
    ) -> PathResult {
        let start = start_point.floored();
        let timeout = options.timeout.unwrap_or_else(|| self.config.timeout());
        let end_radius = options.end_radius.unwrap_or(self.config.end_radius);
        let too_far_threshold = options
            .too_far_threshold
            .unwrap_or(self.config.too_far_threshold);
        let hazards = options
            .hazard_overrides
            .as_ref()
            .unwrap_or(&self.config.hazard_types);

        let generator = NeighborGenerator::new(self.world, hazards, self.config.max_water_depth);

        let goal_distance = start.distance_to(&goal);
        let too_far = goal_distance > too_far_threshold;
        // Distant terrain data is stale; commit only to a leg of solid
        // progress and replan from there.
        let progress_distance = too_far_threshold * self.config.too_far_fraction;

        info!(
            "Searching for path from {:?} to {:?} ({:.1} blocks{})",
            start,
            goal,
            goal_distance,
            if too_far { ", segmenting" } else { "" }
        );

        let is_goal = |node: &Node| -> bool {
            if too_far {
                node.water_depth == 0 && start.distance_to(&node.position) >= progress_distance
            } else if let Some(predicate) = &options.goal {
                predicate(node)
            } else {
                node.position.distance_to(&goal) <= end_radius
            }
        };

        // Track the closest-approached cell over every expanded node so a
        // failed search can still report best effort. Ties keep the node
        // seen first.
        let mut closest: Option<(BlockPos, f32)> = None;
        let neighbors = |node: &Node| -> Vec<Node> {
            let distance = node.position.distance_to(&goal);
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((node.position, distance));
            }
            generator.expand(node)
        };

        let outcome = best_first_search(
            Node::start(start),
            neighbors,
            |a: &Node, b: &Node| a.position.distance_to(&b.position),
            |node: &Node| node.position.distance_to(&goal) + 5.0 * node.water_depth as f32,
            is_goal,
            timeout,
        );

        let closest = closest.map(|(pos, _)| pos);

        match outcome {
            SearchOutcome::Found(nodes) => {
                let path = Path::from_nodes(&nodes);
                debug!(
                    "Path found: {} waypoints, {:.1} blocks",
                    path.len(),
                    path.total_length()
                );
                if too_far {
                    PathResult::TooFar(path)
                } else {
                    PathResult::Success(path)
                }
            }
            SearchOutcome::Exhausted => {
                warn!("Search space exhausted, closest approach {:?}", closest);
                PathResult::NoPath(closest)
            }
            SearchOutcome::TimedOut => {
                warn!(
                    "Search timed out after {:?}, closest approach {:?}",
                    timeout, closest
                );
                PathResult::Timeout(closest)
            }
        }
    }
}
