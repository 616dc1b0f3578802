//! Seeded randomness for spawning and wander.
//!
//! Every random draw the simulation makes goes through a [`Sampler`], which
//! wraps a seeded [`SmallRng`]. Two simulations built with the same seed,
//! config and inputs therefore produce the same trajectories.

use crate::agent::Agent;
use crate::config::SimulationConfig;
use crate::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Seedable random source with helpers for the shapes the simulation needs.
#[derive(Clone, Debug)]
pub struct Sampler {
    rng: SmallRng,
}

impl Sampler {
    /// Create a sampler from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    // ========== Direction helpers ==========

    /// Random unit vector, uniformly distributed on the unit sphere.
    pub fn random_direction(&mut self) -> Vec3 {
        // Uniform z with uniform azimuth is area-preserving on the sphere.
        let z = self.rng.gen_range(-1.0f32..=1.0);
        let theta = self.rng.gen_range(0.0..TAU);
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * theta.cos(), r * theta.sin(), z)
    }

    /// Random point inside a sphere of given radius, centered at origin.
    ///
    /// Distribution is uniform throughout the volume.
    pub fn random_in_sphere(&mut self, radius: f32) -> Vec3 {
        let direction = self.random_direction();
        // Cube root for uniform volume distribution
        let r = radius * self.rng.gen::<f32>().cbrt();
        direction * r
    }

    /// Small random acceleration added each tick so schools never lock into
    /// a perfectly rigid formation.
    #[inline]
    pub fn wander(&mut self, magnitude: f32) -> Vec3 {
        self.random_in_sphere(1.0) * magnitude
    }
}

/// Create `count` agents around `center`.
///
/// Positions are uniform inside a sphere of `config.spawn_radius`; velocities
/// point in a random direction with a speed drawn from `config.spawn_speed`.
pub fn spawn_agents(
    center: Vec3,
    count: usize,
    config: &SimulationConfig,
    sampler: &mut Sampler,
) -> Vec<Agent> {
    (0..count)
        .map(|_| {
            let position = center + sampler.random_in_sphere(config.spawn_radius);
            let speed = sampler.random_range(config.spawn_speed.start, config.spawn_speed.end);
            let velocity = sampler.random_direction() * speed;
            Agent::new(position, velocity)
        })
        .collect()
}
