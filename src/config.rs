//! Configuration for the navigation engine.
//!
//! [`NavConfig`] holds the crate-wide defaults and is loadable from a TOML
//! file; [`NavigationOptions`] carries per-call overrides for a single
//! `navigate_to`/`find_path` invocation.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::core::{block_types, Node};
use crate::error::{NavError, Result};

/// Engine-wide configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct NavConfig {
    /// Wall-clock budget for a single path search (milliseconds).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Distance from the goal at which the default goal test is satisfied.
    #[serde(default = "default_end_radius")]
    pub end_radius: f32,

    /// Beyond this start-to-goal distance, search toward an intermediate
    /// waypoint instead of the true goal and replan on arrival.
    #[serde(default = "default_too_far_threshold")]
    pub too_far_threshold: f32,

    /// Fraction of the too-far threshold the intermediate waypoint must
    /// cover before the partial route is accepted.
    #[serde(default = "default_too_far_fraction")]
    pub too_far_fraction: f32,

    /// Hard ceiling on consecutive wading steps along a route.
    #[serde(default = "default_max_water_depth")]
    pub max_water_depth: u32,

    /// Block types the agent refuses to pass through.
    #[serde(default = "default_hazard_types")]
    pub hazard_types: HashSet<u16>,

    #[serde(default)]
    pub controller: ControllerConfig,
}

/// Movement controller tuning.
#[derive(Clone, Debug, Deserialize)]
pub struct ControllerConfig {
    /// Fixed period at which the host drives the controller tick (ms).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Distance at which a waypoint counts as reached.
    #[serde(default = "default_waypoint_radius")]
    pub waypoint_radius: f32,

    /// Watchdog window: no waypoint progress for this long means the
    /// course is obstructed (milliseconds).
    #[serde(default = "default_watchdog_ms")]
    pub watchdog_ms: u64,
}

impl ControllerConfig {
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[inline]
    pub fn watchdog(&self) -> Duration {
        Duration::from_millis(self.watchdog_ms)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            waypoint_radius: default_waypoint_radius(),
            watchdog_ms: default_watchdog_ms(),
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            end_radius: default_end_radius(),
            too_far_threshold: default_too_far_threshold(),
            too_far_fraction: default_too_far_fraction(),
            max_water_depth: default_max_water_depth(),
            hazard_types: default_hazard_types(),
            controller: ControllerConfig::default(),
        }
    }
}

// Default value functions
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_end_radius() -> f32 {
    0.1
}
fn default_too_far_threshold() -> f32 {
    150.0
}
fn default_too_far_fraction() -> f32 {
    0.66
}
fn default_max_water_depth() -> u32 {
    20
}
fn default_hazard_types() -> HashSet<u16> {
    [
        block_types::FIRE,
        block_types::CROPS,
        block_types::LAVA,
        block_types::LAVA_FLOWING,
    ]
    .into_iter()
    .collect()
}
fn default_tick_interval_ms() -> u64 {
    40
}
fn default_waypoint_radius() -> f32 {
    0.2
}
fn default_watchdog_ms() -> u64 {
    1_500
}

impl NavConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NavError::Config(format!("Failed to read config file: {}", e)))?;
        let config: NavConfig = toml::from_str(&content)?;
        Ok(config)
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Per-call overrides for a single navigation request.
///
/// Unset fields fall back to the [`NavConfig`] values.
#[derive(Default)]
pub struct NavigationOptions {
    /// Search budget override.
    pub timeout: Option<Duration>,

    /// Goal radius override.
    pub end_radius: Option<f32>,

    /// Too-far horizon override.
    pub too_far_threshold: Option<f32>,

    /// Custom goal predicate replacing the distance-based test.
    pub goal: Option<Box<dyn Fn(&Node) -> bool + Send>>,

    /// Hazard set override for this request only.
    pub hazard_overrides: Option<HashSet<u16>>,
}

impl std::fmt::Debug for NavigationOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationOptions")
            .field("timeout", &self.timeout)
            .field("end_radius", &self.end_radius)
            .field("too_far_threshold", &self.too_far_threshold)
            .field("goal", &self.goal.as_ref().map(|_| "<predicate>"))
            .field("hazard_overrides", &self.hazard_overrides)
            .finish()
    }
}
