//! High-level navigation: plan, follow, replan.
//!
//! [`Navigator`] owns the world view, the agent controls, and the movement
//! controller, and glues them together: `navigate_to` plans a route and
//! starts following it, the host calls `update` at the controller cadence,
//! and everything noteworthy is reported on an event channel.
//!
//! When a search was segmented because the goal lay beyond the too-far
//! horizon, arriving at the end of the partial leg triggers an automatic
//! replan toward the true goal. An obstructed course never replans on its
//! own; the host decides how to recover.

use std::collections::HashSet;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, info, warn};

use crate::config::{NavConfig, NavigationOptions};
use crate::controller::{CourseOutcome, MovementController};
use crate::core::{BlockPos, Path};
use crate::search::{PathFinder, PathResult};
use crate::world::{AgentControl, WorldQuery};

/// Why a course stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The final waypoint was reached.
    Arrived,
    /// An explicit stop, or displacement by a new request.
    Interrupted,
    /// The progress watchdog fired.
    Obstructed,
}

/// Events published on the navigator's channel.
#[derive(Debug, Clone)]
pub enum NavigationEvent {
    /// A complete route to the goal was found and is being followed.
    PathFound(Path),
    /// A partial route was found; the navigator will replan on arrival.
    PathPartFound(Path),
    /// No route exists (or the search ran out of time); carries the
    /// closest-approached cell when one is known.
    CannotFind(Option<BlockPos>),
    /// The agent reached the end of its route.
    Arrived,
    /// A course ended, for any reason. Emitted alongside the dedicated
    /// `Arrived`/`Obstructed` events.
    Stopped(StopReason),
    /// The progress watchdog fired mid-course.
    Obstructed,
}

/// A navigation request being executed, kept for replanning.
struct ActiveNavigation {
    goal: BlockPos,
    options: NavigationOptions,
    /// The current leg only reaches partway; replan on arrival.
    partial: bool,
}

/// Plans and follows routes through the world.
pub struct Navigator<W: WorldQuery, A: AgentControl> {
    world: W,
    agent: A,
    config: NavConfig,
    controller: MovementController,
    events_tx: Sender<NavigationEvent>,
    events_rx: Receiver<NavigationEvent>,
    active: Option<ActiveNavigation>,
}

impl<W: WorldQuery, A: AgentControl> Navigator<W, A> {
    pub fn new(world: W, agent: A, config: NavConfig) -> Self {
        let controller = MovementController::new(config.controller.clone());
        let (events_tx, events_rx) = unbounded();
        Self {
            world,
            agent,
            config,
            controller,
            events_tx,
            events_rx,
            active: None,
        }
    }

    /// Receiver for navigation events. Intended for a single consumer.
    pub fn events(&self) -> Receiver<NavigationEvent> {
        self.events_rx.clone()
    }

    /// Whether a course is currently being followed.
    pub fn is_navigating(&self) -> bool {
        self.controller.is_following()
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Mutable access to the default hazard set, taking effect on the next
    /// plan. A search in progress keeps the set it started with.
    pub fn hazards_mut(&mut self) -> &mut HashSet<u16> {
        &mut self.config.hazard_types
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut A {
        &mut self.agent
    }

    /// Plan a route without starting to follow it.
    pub fn find_path(&self, goal: BlockPos, options: &NavigationOptions) -> PathResult {
        let finder = PathFinder::new(&self.world, &self.config);
        finder.find_path(self.agent.position(), goal, options)
    }

    /// Plan a route to `goal` and start following it.
    ///
    /// Any active course is interrupted first. The outcome is reported on
    /// the event channel: `PathFound` or `PathPartFound` when following
    /// begins, `CannotFind` when planning fails.
    pub fn navigate_to(&mut self, goal: BlockPos, options: NavigationOptions) {
        self.stop();

        let finder = PathFinder::new(&self.world, &self.config);
        let result = finder.find_path(self.agent.position(), goal, &options);

        match result {
            PathResult::Success(path) => {
                info!("Navigating to {:?}: {} waypoints", goal, path.len());
                self.emit(NavigationEvent::PathFound(path.clone()));
                self.controller.start(path, &mut self.agent);
                self.active = Some(ActiveNavigation {
                    goal,
                    options,
                    partial: false,
                });
            }
            PathResult::TooFar(path) => {
                info!(
                    "Navigating to {:?} via partial leg: {} waypoints",
                    goal,
                    path.len()
                );
                self.emit(NavigationEvent::PathPartFound(path.clone()));
                self.controller.start(path, &mut self.agent);
                self.active = Some(ActiveNavigation {
                    goal,
                    options,
                    partial: true,
                });
            }
            PathResult::NoPath(closest) | PathResult::Timeout(closest) => {
                warn!("No route to {:?}, closest approach {:?}", goal, closest);
                self.emit(NavigationEvent::CannotFind(closest));
            }
        }
    }

    /// Follow a pre-computed path without any replanning.
    ///
    /// An empty path counts as already arrived.
    pub fn walk(&mut self, path: Path) {
        self.stop();

        if path.is_empty() {
            debug!("walk: empty path, already arrived");
            self.emit(NavigationEvent::Stopped(StopReason::Arrived));
            self.emit(NavigationEvent::Arrived);
            return;
        }

        self.controller.start(path, &mut self.agent);
    }

    /// Interrupt the active course, if any. Idempotent.
    pub fn stop(&mut self) {
        self.active = None;
        if self.controller.stop(&mut self.agent).is_some() {
            self.emit(NavigationEvent::Stopped(StopReason::Interrupted));
        }
    }

    /// Advance the active course by one control period.
    ///
    /// The host calls this at the controller cadence
    /// ([`crate::config::ControllerConfig::tick_interval_ms`]).
    pub fn update(&mut self) {
        let outcome = match self.controller.tick(&mut self.agent) {
            Some(outcome) => outcome,
            None => return,
        };

        match outcome {
            CourseOutcome::Arrived => {
                match self.active.take() {
                    Some(nav) if nav.partial => {
                        // End of a partial leg: push on toward the true
                        // goal without reporting arrival.
                        debug!("Partial leg complete, replanning to {:?}", nav.goal);
                        self.navigate_to(nav.goal, nav.options);
                    }
                    _ => {
                        self.emit(NavigationEvent::Stopped(StopReason::Arrived));
                        self.emit(NavigationEvent::Arrived);
                    }
                }
            }
            CourseOutcome::Obstructed => {
                self.active = None;
                self.emit(NavigationEvent::Stopped(StopReason::Obstructed));
                self.emit(NavigationEvent::Obstructed);
            }
            CourseOutcome::Interrupted => {
                self.active = None;
                self.emit(NavigationEvent::Stopped(StopReason::Interrupted));
            }
        }
    }

    fn emit(&self, event: NavigationEvent) {
        // The navigator holds a receiver, so the channel never closes.
        let _ = self.events_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point3;
    use crate::world::{BlockInfo, CollisionShape};
    use std::collections::HashMap;

    struct TestWorld {
        min: BlockPos,
        max: BlockPos,
        blocks: HashMap<BlockPos, BlockInfo>,
    }

    impl TestWorld {
        fn flat(min: BlockPos, max: BlockPos) -> Self {
            let mut blocks = HashMap::new();
            for x in min.x..=max.x {
                for z in min.z..=max.z {
                    blocks.insert(BlockPos::new(x, 0, z), BlockInfo::new(CollisionShape::Full, 1));
                }
            }
            Self { min, max, blocks }
        }
    }

    impl WorldQuery for TestWorld {
        fn block_at(&self, p: BlockPos) -> Option<BlockInfo> {
            if p.x < self.min.x
                || p.y < self.min.y
                || p.z < self.min.z
                || p.x > self.max.x
                || p.y > self.max.y
                || p.z > self.max.z
            {
                return None;
            }
            Some(
                self.blocks
                    .get(&p)
                    .copied()
                    .unwrap_or(BlockInfo::new(CollisionShape::Empty, 0)),
            )
        }
    }

    struct TestAgent {
        position: Point3,
    }

    impl AgentControl for TestAgent {
        fn position(&self) -> Point3 {
            self.position
        }
        fn eye_height(&self) -> f32 {
            1.62
        }
        fn set_look(&mut self, _target: Point3) {}
        fn set_forward(&mut self, _on: bool) {}
        fn set_jump(&mut self, _on: bool) {}
        fn clear_all_controls(&mut self) {}
    }

    fn drain(rx: &Receiver<NavigationEvent>) -> Vec<NavigationEvent> {
        rx.try_iter().collect()
    }

    #[test]
    fn test_navigate_and_arrive() {
        let world = TestWorld::flat(BlockPos::new(-2, -5, -2), BlockPos::new(7, 5, 2));
        let agent = TestAgent {
            position: Point3::new(0.5, 1.0, 0.5),
        };
        let mut nav = Navigator::new(world, agent, NavConfig::default());
        let events = nav.events();

        nav.navigate_to(BlockPos::new(4, 1, 0), NavigationOptions::default());
        assert!(nav.is_navigating());

        let planned = drain(&events);
        let waypoints: Vec<Point3> = match planned.as_slice() {
            [NavigationEvent::PathFound(path)] => path.waypoints().copied().collect(),
            other => panic!("expected PathFound, got {:?}", other),
        };

        // Walk the route by teleporting onto each waypoint in turn.
        for wp in &waypoints {
            nav.agent_mut().position = *wp;
            nav.update();
        }

        assert!(!nav.is_navigating());
        let ended = drain(&events);
        assert!(matches!(
            ended.as_slice(),
            [
                NavigationEvent::Stopped(StopReason::Arrived),
                NavigationEvent::Arrived
            ]
        ));
    }

    #[test]
    fn test_unreachable_goal_emits_cannot_find() {
        // No floor anywhere below the start cell's neighbors.
        let world = TestWorld::flat(BlockPos::new(0, -5, 0), BlockPos::new(0, 5, 0));
        let agent = TestAgent {
            position: Point3::new(0.5, 1.0, 0.5),
        };
        let mut nav = Navigator::new(world, agent, NavConfig::default());
        let events = nav.events();

        nav.navigate_to(BlockPos::new(10, 1, 0), NavigationOptions::default());

        assert!(!nav.is_navigating());
        assert!(matches!(
            drain(&events).as_slice(),
            [NavigationEvent::CannotFind(Some(_))]
        ));
    }

    #[test]
    fn test_stop_interrupts_once() {
        let world = TestWorld::flat(BlockPos::new(-2, -5, -2), BlockPos::new(7, 5, 2));
        let agent = TestAgent {
            position: Point3::new(0.5, 1.0, 0.5),
        };
        let mut nav = Navigator::new(world, agent, NavConfig::default());
        let events = nav.events();

        nav.navigate_to(BlockPos::new(4, 1, 0), NavigationOptions::default());
        drain(&events);

        nav.stop();
        nav.stop();

        assert!(!nav.is_navigating());
        assert!(matches!(
            drain(&events).as_slice(),
            [NavigationEvent::Stopped(StopReason::Interrupted)]
        ));
    }

    #[test]
    fn test_new_request_displaces_active_course() {
        let world = TestWorld::flat(BlockPos::new(-5, -5, -5), BlockPos::new(7, 5, 5));
        let agent = TestAgent {
            position: Point3::new(0.5, 1.0, 0.5),
        };
        let mut nav = Navigator::new(world, agent, NavConfig::default());
        let events = nav.events();

        nav.navigate_to(BlockPos::new(4, 1, 0), NavigationOptions::default());
        drain(&events);

        nav.navigate_to(BlockPos::new(0, 1, 4), NavigationOptions::default());
        assert!(nav.is_navigating());

        let evs = drain(&events);
        assert!(matches!(
            evs.as_slice(),
            [
                NavigationEvent::Stopped(StopReason::Interrupted),
                NavigationEvent::PathFound(_)
            ]
        ));
    }

    #[test]
    fn test_walk_empty_path_is_arrival() {
        let world = TestWorld::flat(BlockPos::new(-2, -5, -2), BlockPos::new(2, 5, 2));
        let agent = TestAgent {
            position: Point3::new(0.5, 1.0, 0.5),
        };
        let mut nav = Navigator::new(world, agent, NavConfig::default());
        let events = nav.events();

        nav.walk(Path::from_waypoints(Vec::new()));

        assert!(!nav.is_navigating());
        assert!(matches!(
            drain(&events).as_slice(),
            [
                NavigationEvent::Stopped(StopReason::Arrived),
                NavigationEvent::Arrived
            ]
        ));
    }
}
