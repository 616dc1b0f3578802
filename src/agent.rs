//! The per-fish state record.

use crate::Vec3;
use bytemuck::{Pod, Zeroable};

/// A single simulated fish.
///
/// Agents are plain data: the [`Simulation`](crate::Simulation) owns them and
/// only the integrator writes to them. The layout is `#[repr(C)]` and
/// [`Pod`], so a slice of agents can be handed to a renderer as raw bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Agent {
    /// World-space position.
    pub position: Vec3,
    /// Velocity in units per second.
    pub velocity: Vec3,
}

impl Agent {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    /// Current speed (velocity magnitude).
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Direction of travel, or `None` when the agent is stationary.
    ///
    /// Renderers use this to orient the fish model along its motion.
    #[inline]
    pub fn heading(&self) -> Option<Vec3> {
        self.velocity.try_normalize()
    }
}
