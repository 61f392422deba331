//! Path types for navigation.
//!
//! A [`Path`] is the output of the planner: an ordered queue of cell-center
//! waypoints the movement controller consumes from the front. The waypoint
//! queue is owned exclusively by the active controller while a course is
//! running; callers must not mutate it externally.

use std::collections::VecDeque;

use super::types::{Node, Point3};

/// An ordered sequence of waypoints from start to goal.
#[derive(Debug, Clone, Default)]
pub struct Path {
    waypoints: VecDeque<Point3>,
    /// Wading depth accumulated at the terminal node, for diagnostics.
    terminal_water_depth: u32,
}

impl Path {
    /// Build a path from search nodes, mapping each cell to its center.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        Self {
            waypoints: nodes.iter().map(|n| n.position.center()).collect(),
            terminal_water_depth: nodes.last().map(|n| n.water_depth).unwrap_or(0),
        }
    }

    /// Build a path directly from waypoints (for caller-supplied courses).
    pub fn from_waypoints(waypoints: Vec<Point3>) -> Self {
        Self {
            waypoints: waypoints.into(),
            terminal_water_depth: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// The next waypoint to reach, if any.
    #[inline]
    pub fn front(&self) -> Option<&Point3> {
        self.waypoints.front()
    }

    /// The final waypoint (goal), if any.
    #[inline]
    pub fn last(&self) -> Option<&Point3> {
        self.waypoints.back()
    }

    /// Pop the front waypoint once it has been reached.
    #[inline]
    pub fn advance(&mut self) -> Option<Point3> {
        self.waypoints.pop_front()
    }

    /// Iterate over the remaining waypoints front to back.
    pub fn waypoints(&self) -> impl Iterator<Item = &Point3> {
        self.waypoints.iter()
    }

    /// Wading depth at the terminal node of the planned route.
    #[inline]
    pub fn terminal_water_depth(&self) -> u32 {
        self.terminal_water_depth
    }

    /// Total length along the waypoint sequence.
    pub fn total_length(&self) -> f32 {
        let mut length = 0.0;
        let mut prev: Option<&Point3> = None;
        for wp in &self.waypoints {
            if let Some(p) = prev {
                length += p.distance_to(wp);
            }
            prev = Some(wp);
        }
        length
    }
}
