//! Hard pairwise collision response.
//!
//! Every unique pair closer than `min_collision_distance` pushes apart with a
//! force proportional to the overlap. The force on `i` is exactly the
//! negation of the force on `j`.

use crate::agent::Agent;
use crate::config::SimulationConfig;
use crate::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Summary of one collision pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Number of overlapping pairs that produced a force.
    pub pairs: usize,
}

/// Repulsion acting on `a` because of `b`, if they overlap.
///
/// Returns `None` when the pair is far enough apart or exactly coincident.
#[inline]
pub fn pair_repulsion(a: Vec3, b: Vec3, min_distance: f32, strength: f32) -> Option<Vec3> {
    let diff = a - b;
    let distance = diff.length();
    if distance > 0.0 && distance < min_distance {
        let overlap = min_distance - distance;
        Some(diff / distance * overlap * strength)
    } else {
        None
    }
}

/// Accumulate the repulsion on agent `i` from every `j > i` into `forces`,
/// applying the opposite force to `j`.
#[inline]
fn accumulate_row(i: usize, agents: &[Agent], config: &SimulationConfig, forces: &mut [Vec3]) -> usize {
    let mut pairs = 0;
    let a = agents[i].position;
    for j in (i + 1)..agents.len() {
        if let Some(repulsion) = pair_repulsion(
            a,
            agents[j].position,
            config.min_collision_distance,
            config.repulsion_strength,
        ) {
            forces[i] += repulsion;
            forces[j] -= repulsion;
            pairs += 1;
        }
    }
    pairs
}

/// Fill `forces` with the total collision force on each agent.
pub fn resolve_into(agents: &[Agent], config: &SimulationConfig, forces: &mut Vec<Vec3>) -> CollisionStats {
    let n = agents.len();
    forces.clear();
    forces.resize(n, Vec3::ZERO);

    #[cfg(feature = "parallel")]
    let pairs = {
        // Each worker accumulates into its own array; the arrays are summed
        // afterwards. Summation is commutative, so the result only differs
        // from the serial pass by floating-point rounding.
        let (partial, pairs) = (0..n)
            .into_par_iter()
            .fold(
                || (vec![Vec3::ZERO; n], 0usize),
                |(mut local, count), i| {
                    let found = accumulate_row(i, agents, config, &mut local);
                    (local, count + found)
                },
            )
            .reduce(
                || (vec![Vec3::ZERO; n], 0usize),
                |(mut a, ca), (b, cb)| {
                    for (x, y) in a.iter_mut().zip(b) {
                        *x += y;
                    }
                    (a, ca + cb)
                },
            );
        forces.copy_from_slice(&partial);
        pairs
    };

    #[cfg(not(feature = "parallel"))]
    let pairs: usize = (0..n).map(|i| accumulate_row(i, agents, config, forces)).sum();

    CollisionStats { pairs }
}

/// Convenience wrapper around [`resolve_into`] that allocates.
pub fn resolve(agents: &[Agent], config: &SimulationConfig) -> (Vec<Vec3>, CollisionStats) {
    let mut forces = Vec::with_capacity(agents.len());
    let stats = resolve_into(agents, config, &mut forces);
    (forces, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(p: Vec3) -> Agent {
        Agent::new(p, Vec3::ZERO)
    }

    #[test]
    fn test_overlapping_pair_repels_symmetrically() {
        let config = SimulationConfig::default().with_collision(5.25, 80.0);
        let agents = [still(Vec3::ZERO), still(Vec3::new(3.0, 0.0, 0.0))];
        let (forces, stats) = resolve(&agents, &config);

        assert_eq!(stats.pairs, 1);
        assert!((forces[0].length() - 180.0).abs() < 1e-3);
        assert!((forces[1].length() - 180.0).abs() < 1e-3);
        assert!((forces[0] + forces[1]).length() < 1e-4);
        // Agent 0 sits at smaller x, so it is pushed toward -X.
        assert!(forces[0].x < 0.0);
    }

    #[test]
    fn test_distant_pair_is_untouched() {
        let config = SimulationConfig::default();
        let agents = [still(Vec3::ZERO), still(Vec3::new(0.0, 6.0, 0.0))];
        let (forces, stats) = resolve(&agents, &config);
        assert_eq!(stats.pairs, 0);
        assert_eq!(forces, vec![Vec3::ZERO; 2]);
    }

    #[test]
    fn test_coincident_pair_is_skipped() {
        assert!(pair_repulsion(Vec3::ONE, Vec3::ONE, 5.0, 10.0).is_none());
    }

    #[test]
    fn test_forces_sum_to_zero() {
        let config = SimulationConfig::default();
        let agents: Vec<Agent> = (0..12)
            .map(|i| {
                let t = i as f32;
                still(Vec3::new(t.sin() * 3.0, t.cos() * 2.0, t * 0.4))
            })
            .collect();
        let (forces, stats) = resolve(&agents, &config);
        assert!(stats.pairs > 0);
        let net: Vec3 = forces.iter().copied().sum();
        assert!(net.length() < 1e-2);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial_sum() {
        let config = SimulationConfig::default();
        let agents: Vec<Agent> = (0..200)
            .map(|i| {
                let t = i as f32 * 0.37;
                still(Vec3::new(t.sin() * 6.0, t.cos() * 4.0, (t * 1.3).sin() * 5.0))
            })
            .collect();

        let mut expected = vec![Vec3::ZERO; agents.len()];
        let mut expected_pairs = 0;
        for i in 0..agents.len() {
            for j in (i + 1)..agents.len() {
                if let Some(r) = pair_repulsion(
                    agents[i].position,
                    agents[j].position,
                    config.min_collision_distance,
                    config.repulsion_strength,
                ) {
                    expected[i] += r;
                    expected[j] -= r;
                    expected_pairs += 1;
                }
            }
        }

        let (forces, stats) = resolve(&agents, &config);
        assert!(expected_pairs > 0);
        assert_eq!(stats.pairs, expected_pairs);
        for (got, want) in forces.iter().zip(&expected) {
            assert!((*got - *want).length() < 1e-2 * want.length().max(1.0));
        }
    }
}
