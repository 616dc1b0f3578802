//! Velocity and position integration with reflective walls.

use crate::agent::Agent;
use crate::config::SimulationConfig;
use crate::steering::clamp_magnitude;
use crate::Vec3;

/// Axis-aligned reflective box.
///
/// An agent's center is kept within `center ± limits`, where the limits are
/// half the configured bounds minus the agent radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Walls {
    pub center: Vec3,
    pub limits: Vec3,
}

impl Walls {
    pub fn new(center: Vec3, config: &SimulationConfig) -> Self {
        Self {
            center,
            limits: config.wall_limits(),
        }
    }

    /// Clamp each axis independently, flipping the velocity on every axis
    /// that was out of range. Speed is unchanged.
    pub fn reflect(&self, agent: &mut Agent) {
        for axis in 0..3 {
            let offset = agent.position[axis] - self.center[axis];
            let limit = self.limits[axis];
            if offset.abs() > limit {
                agent.position[axis] = self.center[axis] + limit * offset.signum();
                agent.velocity[axis] = -agent.velocity[axis];
            }
        }
    }

    /// Whether `position` lies inside the walls, allowing `eps` slack.
    pub fn contains(&self, position: Vec3, eps: f32) -> bool {
        let rel = (position - self.center).abs();
        rel.cmple(self.limits + Vec3::splat(eps)).all()
    }
}

/// Advance one agent by `dt`.
///
/// `dt` must already be non-negative; the simulation sanitizes it.
#[inline]
pub fn integrate(
    agent: &mut Agent,
    acceleration: Vec3,
    force: Vec3,
    dt: f32,
    config: &SimulationConfig,
    walls: &Walls,
) {
    agent.velocity += (acceleration + force) * dt;
    agent.velocity *= config.damping;
    agent.velocity = clamp_magnitude(agent.velocity, config.max_speed);
    agent.position += agent.velocity * dt;
    walls.reflect(agent);
}

/// Advance every agent and return the highest resulting speed.
pub fn integrate_all(
    agents: &mut [Agent],
    accelerations: &[Vec3],
    forces: &[Vec3],
    dt: f32,
    config: &SimulationConfig,
    walls: &Walls,
) -> f32 {
    debug_assert_eq!(agents.len(), accelerations.len());
    debug_assert_eq!(agents.len(), forces.len());

    let mut max_speed = 0.0f32;
    for ((agent, &acc), &force) in agents.iter_mut().zip(accelerations).zip(forces) {
        integrate(agent, acc, force, dt, config, walls);
        max_speed = max_speed.max(agent.speed());
    }
    max_speed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> (SimulationConfig, Walls) {
        let config = SimulationConfig::default()
            .with_bounds(Vec3::splat(10.0))
            .with_agent_radius(0.5)
            .with_damping(1.0);
        let walls = Walls::new(Vec3::ZERO, &config);
        (config, walls)
    }

    #[test]
    fn test_reflect_clamps_and_flips_one_axis() {
        let (_, walls) = unit_box();
        let mut agent = Agent::new(Vec3::new(4.7, 1.0, 0.0), Vec3::new(2.0, 1.0, 0.0));
        walls.reflect(&mut agent);

        assert_eq!(agent.position, Vec3::new(4.5, 1.0, 0.0));
        assert_eq!(agent.velocity, Vec3::new(-2.0, 1.0, 0.0));
    }

    #[test]
    fn test_reflect_corner_handles_axes_independently() {
        let (_, walls) = unit_box();
        let mut agent = Agent::new(Vec3::new(-5.0, 6.0, 0.0), Vec3::new(-1.0, 3.0, 2.0));
        let speed = agent.speed();
        walls.reflect(&mut agent);

        assert_eq!(agent.position, Vec3::new(-4.5, 4.5, 0.0));
        assert_eq!(agent.velocity, Vec3::new(1.0, -3.0, 2.0));
        assert!((agent.speed() - speed).abs() < 1e-6);
    }

    #[test]
    fn test_walls_follow_center() {
        let config = SimulationConfig::default().with_bounds(Vec3::splat(10.0));
        let walls = Walls::new(Vec3::new(100.0, 0.0, 0.0), &config);
        let mut agent = Agent::new(Vec3::new(104.9, 0.0, 0.0), Vec3::X);
        walls.reflect(&mut agent);
        assert_eq!(agent.position.x, 104.5);
        assert!(walls.contains(agent.position, 0.0));
        assert!(!walls.contains(Vec3::ZERO, 0.0));
    }

    #[test]
    fn test_integrate_order() {
        let (config, walls) = unit_box();
        let config = config.with_damping(0.5).with_max_speed(100.0);
        let mut agent = Agent::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        integrate(&mut agent, Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 1.0, &config, &walls);

        // (2 + 2) * 0.5 = 2, then position moves by 2.
        assert_eq!(agent.velocity, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(agent.position, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_integrate_caps_speed() {
        let (config, walls) = unit_box();
        let config = config.with_max_speed(3.0);
        let mut agent = Agent::new(Vec3::ZERO, Vec3::ZERO);
        integrate(&mut agent, Vec3::new(0.0, 1000.0, 0.0), Vec3::ZERO, 0.1, &config, &walls);
        assert!((agent.speed() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_dt_keeps_position() {
        let (config, walls) = unit_box();
        let mut agent = Agent::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 1.0, 1.0));
        integrate(&mut agent, Vec3::splat(50.0), Vec3::splat(-20.0), 0.0, &config, &walls);
        assert_eq!(agent.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_integrate_all_reports_max_speed() {
        let (config, walls) = unit_box();
        let mut agents = [
            Agent::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)),
            Agent::new(Vec3::ONE, Vec3::new(0.0, 4.0, 0.0)),
        ];
        let zero = [Vec3::ZERO; 2];
        let top = integrate_all(&mut agents, &zero, &zero, 0.01, &config, &walls);
        assert!((top - 4.0).abs() < 1e-6);
    }
}
