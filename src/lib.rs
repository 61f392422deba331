//! VoxNav - Physics-aware path planning and following for voxel worlds
//!
//! # Architecture
//!
//! The crate is organized into 4 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   navigator                         │  ← Orchestration
//! │          (plan, follow, replan, events)             │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │               search/ + controller                  │  ← Core algorithms
//! │      (best-first, neighbors, planner, follower)     │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                world + classify                     │  ← World interface
//! │       (WorldQuery, AgentControl, safe/physical)     │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                 (types, path)                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The host supplies the two capability traits in [`world`]: a
//! [`WorldQuery`](world::WorldQuery) for block lookups and an
//! [`AgentControl`](world::AgentControl) for actuation. Everything above
//! them is host-agnostic.
//!
//! # Usage
//!
//! ```no_run
//! use voxnav::{NavConfig, NavigationOptions, Navigator};
//! use voxnav::core::BlockPos;
//! # use voxnav::world::{AgentControl, BlockInfo, WorldQuery};
//! # use voxnav::core::Point3;
//! # struct MyWorld;
//! # impl WorldQuery for MyWorld {
//! #     fn block_at(&self, _p: BlockPos) -> Option<BlockInfo> { None }
//! # }
//! # struct MyAgent;
//! # impl AgentControl for MyAgent {
//! #     fn position(&self) -> Point3 { Point3::new(0.0, 0.0, 0.0) }
//! #     fn eye_height(&self) -> f32 { 1.62 }
//! #     fn set_look(&mut self, _t: Point3) {}
//! #     fn set_forward(&mut self, _on: bool) {}
//! #     fn set_jump(&mut self, _on: bool) {}
//! #     fn clear_all_controls(&mut self) {}
//! # }
//!
//! let mut nav = Navigator::new(MyWorld, MyAgent, NavConfig::default());
//! let events = nav.events();
//!
//! nav.navigate_to(BlockPos::new(120, 64, -35), NavigationOptions::default());
//! loop {
//!     nav.update();
//!     for event in events.try_iter() {
//!         println!("{:?}", event);
//!     }
//!     std::thread::sleep(nav.config().controller.tick_interval());
//!     # break;
//! }
//! ```

pub mod classify;
pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod navigator;
pub mod search;
pub mod world;

pub use config::{ControllerConfig, NavConfig, NavigationOptions};
pub use controller::{CourseOutcome, MovementController};
pub use error::{NavError, Result};
pub use navigator::{NavigationEvent, Navigator, StopReason};
pub use search::{PathFinder, PathResult};
