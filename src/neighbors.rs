//! Neighbor aggregation.
//!
//! For every agent, scan every other agent and accumulate the raw sums the
//! steering phase needs. The scan is exhaustive (`O(n²)`); a spatial index
//! could replace [`sums_for`] without changing what it returns.

use crate::agent::Agent;
use crate::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Running sums over the neighbors of one agent.
///
/// When `total == 0` every sum is zero and must be read as "no neighbors",
/// not as a steering target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NeighborSums {
    /// Sum of `(self - other).normalize() / distance`.
    pub separation: Vec3,
    /// Sum of neighbor velocities.
    pub alignment: Vec3,
    /// Sum of neighbor positions.
    pub position: Vec3,
    /// Number of neighbors found.
    pub total: u32,
}

impl NeighborSums {
    #[inline]
    pub fn has_neighbors(&self) -> bool {
        self.total > 0
    }
}

/// Accumulate neighbor sums for the agent at `index`.
///
/// Agents at exactly zero distance are skipped; their direction is undefined.
pub fn sums_for(index: usize, agents: &[Agent], perception_radius: f32) -> NeighborSums {
    let me = agents[index];
    let mut sums = NeighborSums::default();

    for (j, other) in agents.iter().enumerate() {
        if j == index {
            continue;
        }

        let diff = me.position - other.position;
        let dist = diff.length();
        if dist > 0.0 && dist < perception_radius {
            sums.separation += diff / dist / dist;
            sums.alignment += other.velocity;
            sums.position += other.position;
            sums.total += 1;
        }
    }

    sums
}

/// Fill `out` with one [`NeighborSums`] per agent.
///
/// Only reads `agents`, so each slot can be computed independently.
pub fn aggregate_into(agents: &[Agent], perception_radius: f32, out: &mut Vec<NeighborSums>) {
    out.clear();
    out.resize(agents.len(), NeighborSums::default());

    #[cfg(feature = "parallel")]
    out.par_iter_mut()
        .enumerate()
        .for_each(|(i, slot)| *slot = sums_for(i, agents, perception_radius));

    #[cfg(not(feature = "parallel"))]
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = sums_for(i, agents, perception_radius);
    }
}

/// Convenience wrapper around [`aggregate_into`] that allocates.
pub fn aggregate(agents: &[Agent], perception_radius: f32) -> Vec<NeighborSums> {
    let mut out = Vec::with_capacity(agents.len());
    aggregate_into(agents, perception_radius, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, vx: f32) -> Agent {
        Agent::new(Vec3::new(x, 0.0, 0.0), Vec3::new(vx, 0.0, 0.0))
    }

    #[test]
    fn test_single_agent_has_no_neighbors() {
        let sums = aggregate(&[at(0.0, 1.0)], 10.0);
        assert_eq!(sums.len(), 1);
        assert!(!sums[0].has_neighbors());
        assert_eq!(sums[0].separation, Vec3::ZERO);
        assert_eq!(sums[0].alignment, Vec3::ZERO);
    }

    #[test]
    fn test_separation_weighted_by_inverse_distance() {
        let agents = [at(0.0, 0.0), at(2.0, 3.0)];
        let sums = aggregate(&agents, 10.0);

        // Agent 0 is pushed along -X by 1/2.
        assert!((sums[0].separation - Vec3::new(-0.5, 0.0, 0.0)).length() < 1e-6);
        assert!((sums[1].separation - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
        assert_eq!(sums[0].alignment, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(sums[0].position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(sums[0].total, 1);
    }

    #[test]
    fn test_perception_radius_is_exclusive() {
        let agents = [at(0.0, 0.0), at(10.0, 0.0), at(9.5, 0.0)];
        let sums = aggregate(&agents, 10.0);
        assert_eq!(sums[0].total, 1);
    }

    #[test]
    fn test_coincident_agents_are_ignored() {
        let agents = [at(1.0, 1.0), at(1.0, -1.0)];
        let sums = aggregate(&agents, 10.0);
        assert_eq!(sums[0].total, 0);
        assert_eq!(sums[1].total, 0);
        assert!(sums[0].separation.is_finite());
    }

    #[test]
    fn test_aggregate_into_reuses_buffer() {
        let mut out = vec![NeighborSums { total: 9, ..Default::default() }; 5];
        aggregate_into(&[at(0.0, 0.0), at(1.0, 0.0)], 5.0, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].total, 1);
        assert_eq!(out[1].total, 1);
    }
}
