//! Moving goal for hosts that do not supply their own.
//!
//! The core only needs a goal position per tick. [`GoalPath`] reproduces the
//! figure-eight the reference scene sweeps its target along, which is
//! handy for the headless runner and for benchmarks.

use crate::Vec3;
use serde::{Deserialize, Serialize};

/// Figure-eight path parameterized by time.
///
/// At time `t`:
///
/// ```text
/// x = A sin t
/// y = B sin t cos t
/// z = (A / B) cos t sin t tan t
/// ```
///
/// The `z` term grows without bound near `t = π/2 + kπ`, where `tan` does.
/// The walls keep agents contained while they chase it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalPath {
    pub amplitude_x: f32,
    pub amplitude_y: f32,
    /// Offset added to every sampled point.
    pub origin: Vec3,
}

impl Default for GoalPath {
    fn default() -> Self {
        Self {
            amplitude_x: 50.0,
            amplitude_y: 50.0,
            origin: Vec3::ZERO,
        }
    }
}

impl GoalPath {
    pub fn new(amplitude_x: f32, amplitude_y: f32) -> Self {
        Self {
            amplitude_x,
            amplitude_y,
            origin: Vec3::ZERO,
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Goal position at time `t` seconds.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let (s, c) = t.sin_cos();
        let a = self.amplitude_x;
        let b = self.amplitude_y;
        self.origin + Vec3::new(a * s, b * s * c, (a / b) * c * s * t.tan())
    }
}
