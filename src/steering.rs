//! Steering model.
//!
//! Turns aggregated neighbor data and the goal position into one staged
//! acceleration per agent. Nothing here touches velocity; the integrator
//! applies the acceleration together with collision forces.
//!
//! | component  | applies when     | formula |
//! |------------|------------------|---------|
//! | separation | `total > 0`      | averaged distance-weighted push, not renormalized |
//! | alignment  | `total > 0`      | `clamp(normalize(avg velocity) * max_speed - v, max_force)` |
//! | cohesion   | `total > 0`      | `avg position - position` |
//! | goal       | always           | `clamp(normalize(goal - p) * max_speed - v, max_force)` |

use crate::agent::Agent;
use crate::config::SimulationConfig;
use crate::neighbors::NeighborSums;
use crate::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scale `v` down to length `max` if it is longer, otherwise return it unchanged.
#[inline]
pub fn clamp_magnitude(v: Vec3, max: f32) -> Vec3 {
    let len = v.length();
    if len > max {
        v * (max / len)
    } else {
        v
    }
}

/// Unweighted steering components for one agent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SteeringForces {
    pub separation: Vec3,
    pub alignment: Vec3,
    pub cohesion: Vec3,
    pub goal: Vec3,
}

impl SteeringForces {
    /// Compute each component for `agent`.
    pub fn compute(agent: &Agent, sums: &NeighborSums, goal: Vec3, config: &SimulationConfig) -> Self {
        let mut forces = Self::default();

        if sums.has_neighbors() {
            let inv_total = 1.0 / sums.total as f32;

            forces.separation = sums.separation * inv_total;

            let target = (sums.alignment * inv_total).normalize_or_zero() * config.max_speed;
            forces.alignment = clamp_magnitude(target - agent.velocity, config.max_force);

            forces.cohesion = sums.position * inv_total - agent.position;
        }

        // An agent sitting on the goal gets no goal steering at all.
        if let Some(direction) = (goal - agent.position).try_normalize() {
            let desired = direction * config.max_speed;
            forces.goal = clamp_magnitude(desired - agent.velocity, config.max_force);
        }

        forces
    }

    /// Weighted sum of the components.
    #[inline]
    pub fn weighted(&self, config: &SimulationConfig) -> Vec3 {
        self.separation * config.separation_weight
            + self.alignment * config.alignment_weight
            + self.cohesion * config.cohesion_weight
            + self.goal * config.goal_weight
    }
}

/// Staged acceleration for one agent: weighted steering plus `jitter`.
#[inline]
pub fn steer(agent: &Agent, sums: &NeighborSums, goal: Vec3, jitter: Vec3, config: &SimulationConfig) -> Vec3 {
    SteeringForces::compute(agent, sums, goal, config).weighted(config) + jitter
}

/// Fill `out` with the staged acceleration of every agent.
///
/// `sums` and `jitter` must be indexed like `agents`.
pub fn compute_accelerations_into(
    agents: &[Agent],
    sums: &[NeighborSums],
    jitter: &[Vec3],
    goal: Vec3,
    config: &SimulationConfig,
    out: &mut Vec<Vec3>,
) {
    debug_assert_eq!(agents.len(), sums.len());
    debug_assert_eq!(agents.len(), jitter.len());

    out.clear();
    out.resize(agents.len(), Vec3::ZERO);

    #[cfg(feature = "parallel")]
    out.par_iter_mut()
        .enumerate()
        .for_each(|(i, acc)| *acc = steer(&agents[i], &sums[i], goal, jitter[i], config));

    #[cfg(not(feature = "parallel"))]
    for (i, acc) in out.iter_mut().enumerate() {
        *acc = steer(&agents[i], &sums[i], goal, jitter[i], config);
    }
}
