//! Movement controller: converts a planned path into actuation.
//!
//! The host drives [`MovementController::tick`] at a fixed cadence (see
//! [`ControllerConfig::tick_interval_ms`], canonically 40 ms). Each tick
//! pops waypoints as they are reached, decides whether to jump from the
//! vertical and horizontal deltas to the next waypoint, orients the look
//! direction at eye height, and keeps forward movement engaged. A watchdog
//! declares the course obstructed when no waypoint progress happens within
//! its window.
//!
//! Exactly one course may be active at a time; starting a new one
//! implicitly stops the previous course first.
//!
//! [`ControllerConfig::tick_interval_ms`]: crate::config::ControllerConfig::tick_interval_ms

use std::time::Instant;

use tracing::{debug, warn};

use crate::config::ControllerConfig;
use crate::core::{Path, Point3};
use crate::world::AgentControl;

/// Terminal outcome of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseOutcome {
    /// Every waypoint was reached.
    Arrived,
    /// The course was cancelled by an explicit stop (or displaced by a new
    /// start).
    Interrupted,
    /// The watchdog fired: no waypoint progress within its window.
    Obstructed,
}

/// A course currently being executed.
struct ActiveCourse {
    path: Path,
    last_progress: Instant,
}

/// Drives the agent along a path, one tick at a time.
pub struct MovementController {
    config: ControllerConfig,
    course: Option<ActiveCourse>,
}

impl MovementController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            course: None,
        }
    }

    /// Whether a course is currently active.
    #[inline]
    pub fn is_following(&self) -> bool {
        self.course.is_some()
    }

    /// Begin executing a path, displacing any active course.
    ///
    /// Returns the outcome of the displaced course (`Interrupted`) when one
    /// was active. An empty path is refused; the caller decides what an
    /// empty course means.
    pub fn start<A: AgentControl>(&mut self, path: Path, agent: &mut A) -> Option<CourseOutcome> {
        let displaced = self.stop(agent);

        if path.is_empty() {
            warn!("start: refusing empty path");
            return displaced;
        }

        debug!(
            "Starting course: {} waypoints, {:.1} blocks",
            path.len(),
            path.total_length()
        );
        self.course = Some(ActiveCourse {
            path,
            last_progress: Instant::now(),
        });
        displaced
    }

    /// Cancel the active course, releasing all movement controls.
    ///
    /// Idempotent: stopping while idle does nothing and reports nothing.
    pub fn stop<A: AgentControl>(&mut self, agent: &mut A) -> Option<CourseOutcome> {
        if self.course.take().is_some() {
            agent.clear_all_controls();
            debug!("Course interrupted");
            Some(CourseOutcome::Interrupted)
        } else {
            None
        }
    }

    /// Advance the course by one control period.
    ///
    /// Returns `Some` exactly once per course, when it terminates; the
    /// course is already torn down (tick cleared, controls released) by the
    /// time the outcome is reported.
    pub fn tick<A: AgentControl>(&mut self, agent: &mut A) -> Option<CourseOutcome> {
        let course = self.course.as_mut()?;

        let position = agent.position();
        let mut next = match course.path.front() {
            Some(wp) => *wp,
            // A path is never empty while a course is active.
            None => {
                self.course = None;
                agent.clear_all_controls();
                return Some(CourseOutcome::Arrived);
            }
        };

        if position.distance_to(&next) <= self.config.waypoint_radius {
            course.last_progress = Instant::now();
            course.path.advance();
            match course.path.front() {
                None => {
                    debug!("Course complete");
                    self.course = None;
                    agent.clear_all_controls();
                    return Some(CourseOutcome::Arrived);
                }
                Some(wp) => next = *wp,
            }
        }

        let delta = position.delta_to(&next);
        // Cardinal moves keep one horizontal component zero, so the sum is
        // the signed horizontal distance.
        let horizontal = (delta.x + delta.z).abs();
        let jump = if delta.y > 0.1 {
            // Step up once close enough for the rise to land.
            horizontal < 1.75
        } else if delta.y >= -0.1 {
            // Clear a level gap.
            1.5 < horizontal && horizontal < 2.5
        } else {
            // Clear a jump-and-drop gap.
            2.4 < horizontal && horizontal < 2.7
        };
        agent.set_jump(jump);

        let look = Point3::new(next.x, position.y + agent.eye_height(), next.z);
        agent.set_look(look);
        agent.set_forward(true);

        if course.last_progress.elapsed() > self.config.watchdog() {
            warn!(
                "No waypoint progress for {:?}, course obstructed",
                self.config.watchdog()
            );
            self.course = None;
            agent.clear_all_controls();
            return Some(CourseOutcome::Obstructed);
        }

        None
    }
}
