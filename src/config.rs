//! Simulation tunables.
//!
//! A [`SimulationConfig`] is fixed for the lifetime of a run. The
//! [`Simulation`](crate::Simulation) owns it and hands each phase a shared
//! reference, so no phase can observe a value changing mid-tick.
//!
//! # Example
//!
//! ```ignore
//! use shoal::prelude::*;
//!
//! let config = SimulationConfig::default()
//!     .with_bounds(Vec3::splat(80.0))
//!     .with_perception_radius(6.0)
//!     .with_cohesion_weight(1.0);
//! ```
//!
//! Configs can also be stored as JSON. Omitted fields keep their defaults:
//!
//! ```ignore
//! let config = SimulationConfig::from_json_str(r#"{ "max_speed": 12.0 }"#)?;
//! ```

use crate::error::ConfigError;
use crate::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;
use tracing::debug;

/// Tuning parameters for the flocking, collision and integration phases.
///
/// Values are not validated. Negative or extreme weights are accepted and
/// simply produce unusual motion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Full extents of the containment box, centered on the spawn center.
    pub bounds: Vec3,
    /// Neighbors closer than this contribute to separation, alignment and cohesion.
    pub perception_radius: f32,
    /// Hard cap on velocity magnitude after integration.
    pub max_speed: f32,
    /// Cap on the magnitude of each steering correction.
    pub max_force: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    /// Off by default.
    pub cohesion_weight: f32,
    pub goal_weight: f32,
    /// Pair distance below which hard repulsion kicks in.
    pub min_collision_distance: f32,
    /// Force per unit of overlap.
    pub repulsion_strength: f32,
    /// Velocity multiplier applied once per tick after force integration.
    pub damping: f32,
    /// Radius used to keep agents inside the walls.
    pub agent_radius: f32,
    /// Magnitude of the random wander vector added to each agent's acceleration.
    pub wander_jitter: f32,
    /// Agents spawn uniformly inside a sphere of this radius around the center.
    pub spawn_radius: f32,
    /// Initial speed is drawn uniformly from this range.
    pub spawn_speed: Range<f32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bounds: Vec3::splat(50.0),
            perception_radius: 10.0,
            max_speed: 8.0,
            max_force: 0.5,
            separation_weight: 5.5,
            alignment_weight: 0.5,
            cohesion_weight: 0.0,
            goal_weight: 5.5,
            min_collision_distance: 5.25,
            repulsion_strength: 80.0,
            damping: 0.98,
            agent_radius: 0.5,
            wander_jitter: 0.1,
            spawn_radius: 20.0,
            spawn_speed: 3.0..8.0,
        }
    }
}

impl SimulationConfig {
    /// Set the box extents (full size along each axis).
    pub fn with_bounds(mut self, bounds: Vec3) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_perception_radius(mut self, radius: f32) -> Self {
        self.perception_radius = radius;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_max_force(mut self, max_force: f32) -> Self {
        self.max_force = max_force;
        self
    }

    pub fn with_separation_weight(mut self, weight: f32) -> Self {
        self.separation_weight = weight;
        self
    }

    pub fn with_alignment_weight(mut self, weight: f32) -> Self {
        self.alignment_weight = weight;
        self
    }

    pub fn with_cohesion_weight(mut self, weight: f32) -> Self {
        self.cohesion_weight = weight;
        self
    }

    pub fn with_goal_weight(mut self, weight: f32) -> Self {
        self.goal_weight = weight;
        self
    }

    /// Set the collision distance and the repulsion gain together.
    pub fn with_collision(mut self, min_distance: f32, repulsion_strength: f32) -> Self {
        self.min_collision_distance = min_distance;
        self.repulsion_strength = repulsion_strength;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_agent_radius(mut self, radius: f32) -> Self {
        self.agent_radius = radius;
        self
    }

    pub fn with_wander_jitter(mut self, jitter: f32) -> Self {
        self.wander_jitter = jitter;
        self
    }

    /// Set the spawn sphere radius and the initial speed range.
    pub fn with_spawn(mut self, radius: f32, speed: Range<f32>) -> Self {
        self.spawn_radius = radius;
        self.spawn_speed = speed;
        self
    }

    /// Half extents of the region an agent's center may occupy.
    ///
    /// This is `bounds / 2 - agent_radius` per axis.
    #[inline]
    pub fn wall_limits(&self) -> Vec3 {
        self.bounds * 0.5 - Vec3::splat(self.agent_radius)
    }

    /// Parse a config from JSON. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), "loaded simulation config");
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
