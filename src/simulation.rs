//! Simulation state and the per-tick orchestrator.

use crate::agent::Agent;
use crate::collision;
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::integrator::{self, Walls};
use crate::neighbors::{self, NeighborSums};
use crate::spawn::{spawn_agents, Sampler};
use crate::steering;
use crate::Vec3;
use tracing::{info, trace, warn};

/// Counters describing the last completed tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickStats {
    /// Ticks completed so far, including this one.
    pub tick: u64,
    /// Sum over agents of neighbors within the perception radius.
    pub neighbor_links: u64,
    /// Overlapping pairs that produced a collision force.
    pub collision_pairs: usize,
    /// Highest agent speed after integration.
    pub max_speed: f32,
}

/// A fixed-size school of agents and everything needed to advance it.
///
/// Each call to [`step`](Self::step) runs the phases in order for the
/// whole population:
///
/// 1. neighbor aggregation (reads last tick's agents)
/// 2. steering (writes staged accelerations)
/// 3. collision (writes per-agent forces)
/// 4. integration (the only phase that mutates agents)
///
/// No phase sees a partially updated agent array.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    center: Vec3,
    walls: Walls,
    agents: Vec<Agent>,
    sampler: Sampler,
    tick: u64,
    last_stats: TickStats,

    // Per-tick scratch, reused to avoid reallocating every step.
    sums: Vec<NeighborSums>,
    jitter: Vec<Vec3>,
    accelerations: Vec<Vec3>,
    forces: Vec<Vec3>,
}

impl Simulation {
    /// Spawn `count` agents around `center`.
    ///
    /// The walls are centered on `center`. `seed` drives both the spawn and
    /// the per-tick wander, so equal seeds and inputs give equal runs.
    pub fn new(center: Vec3, count: usize, config: SimulationConfig, seed: u64) -> Result<Self, SimulationError> {
        if count == 0 {
            return Err(SimulationError::EmptyPopulation);
        }

        let mut sampler = Sampler::new(seed);
        let agents = spawn_agents(center, count, &config, &mut sampler);
        info!(count, seed, "spawned school");
        Ok(Self::assemble(center, agents, config, sampler))
    }

    /// Build a simulation from explicitly placed agents.
    pub fn from_agents(
        center: Vec3,
        agents: Vec<Agent>,
        config: SimulationConfig,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        if agents.is_empty() {
            return Err(SimulationError::EmptyPopulation);
        }

        info!(count = agents.len(), seed, "loaded school");
        Ok(Self::assemble(center, agents, config, Sampler::new(seed)))
    }

    fn assemble(center: Vec3, mut agents: Vec<Agent>, config: SimulationConfig, sampler: Sampler) -> Self {
        let n = agents.len();
        let walls = Walls::new(center, &config);
        // Spawn spheres larger than the box would otherwise leave agents
        // outside until the first tick.
        for agent in &mut agents {
            walls.reflect(agent);
        }

        Self {
            walls,
            config,
            center,
            agents,
            sampler,
            tick: 0,
            last_stats: TickStats::default(),
            sums: Vec::with_capacity(n),
            jitter: Vec::with_capacity(n),
            accelerations: Vec::with_capacity(n),
            forces: Vec::with_capacity(n),
        }
    }

    /// Advance the school by `dt` seconds toward `goal`.
    ///
    /// Negative `dt` is treated as zero, so positions never move backwards.
    /// Non-finite `dt` is also treated as zero.
    pub fn step(&mut self, goal: Vec3, dt: f32) {
        let dt = if dt.is_finite() {
            dt.max(0.0)
        } else {
            warn!(dt, "non-finite time step, treating as zero");
            0.0
        };
        let config = &self.config;

        neighbors::aggregate_into(&self.agents, config.perception_radius, &mut self.sums);

        // Drawn serially so the parallel steering pass stays reproducible.
        self.jitter.clear();
        for _ in 0..self.agents.len() {
            self.jitter.push(self.sampler.wander(config.wander_jitter));
        }

        steering::compute_accelerations_into(
            &self.agents,
            &self.sums,
            &self.jitter,
            goal,
            config,
            &mut self.accelerations,
        );

        let collisions = collision::resolve_into(&self.agents, config, &mut self.forces);

        let max_speed = integrator::integrate_all(
            &mut self.agents,
            &self.accelerations,
            &self.forces,
            dt,
            config,
            &self.walls,
        );

        self.tick += 1;
        self.last_stats = TickStats {
            tick: self.tick,
            neighbor_links: self.sums.iter().map(|s| s.total as u64).sum(),
            collision_pairs: collisions.pairs,
            max_speed,
        };
        trace!(stats = ?self.last_stats, "tick complete");
    }

    // ========== Read access ==========

    /// Agent positions as of the last completed tick.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.agents.iter().map(|a| a.position)
    }

    /// Agent velocities as of the last completed tick.
    pub fn velocities(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.agents.iter().map(|a| a.velocity)
    }

    /// Direction of travel per agent; `None` for stationary agents.
    pub fn headings(&self) -> impl ExactSizeIterator<Item = Option<Vec3>> + '_ {
        self.agents.iter().map(Agent::heading)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Raw agent bytes, ready for a vertex or storage buffer upload.
    ///
    /// Layout per agent: `position: [f32; 3]`, `velocity: [f32; 3]`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.agents)
    }

    /// Population size. Fixed for the lifetime of the simulation.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Always `false`; a simulation cannot be built without agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn last_stats(&self) -> TickStats {
        self.last_stats
    }
}
