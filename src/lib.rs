//! # Shoal
//!
//! A CPU fish-school simulation: classic flocking (separation, alignment,
//! optional cohesion) plus goal seeking, hard pairwise collision response and
//! a reflective bounding box, advanced one tick at a time.
//!
//! Shoal only owns the numeric state. Rendering, input and the source of the
//! goal position belong to the host, which calls [`Simulation::step`] once per
//! frame and reads positions back for drawing.
//!
//! ## Quick Start
//!
//! ```ignore
//! use shoal::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     let config = SimulationConfig::default();
//!     let mut sim = Simulation::new(Vec3::ZERO, 100, config, 42)?;
//!     let path = GoalPath::default();
//!     let mut time = Time::new();
//!     time.set_fixed_delta(Some(1.0 / 60.0));
//!
//!     for _ in 0..600 {
//!         let dt = time.update();
//!         sim.step(path.position_at(time.elapsed()), dt);
//!     }
//!
//!     for p in sim.positions() {
//!         println!("{p}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Tick Phases
//!
//! | Phase | Module | Writes |
//! |-------|--------|--------|
//! | Neighbor aggregation | [`neighbors`] | per-agent sums |
//! | Steering | [`steering`] | staged acceleration |
//! | Collision | [`collision`] | per-agent force |
//! | Integration | [`integrator`] | agent velocity and position |
//!
//! Both neighbor and collision passes compare every pair of agents. That is
//! fine for schools of a few thousand; larger populations want a spatial
//! index behind [`neighbors::sums_for`].
//!
//! ## Features
//!
//! - `parallel` - run aggregation, steering and collision on the rayon pool.

pub mod agent;
pub mod collision;
pub mod config;
pub mod error;
pub mod goal;
pub mod integrator;
pub mod neighbors;
mod simulation;
pub mod spawn;
pub mod steering;
pub mod time;

pub use agent::Agent;
pub use config::SimulationConfig;
pub use error::{ConfigError, SimulationError};
pub use glam::Vec3;
pub use goal::GoalPath;
pub use simulation::{Simulation, TickStats};
pub use spawn::Sampler;
pub use time::Time;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use shoal::prelude::*;
/// ```
pub mod prelude {
    pub use crate::agent::Agent;
    pub use crate::config::SimulationConfig;
    pub use crate::error::{ConfigError, SimulationError};
    pub use crate::goal::GoalPath;
    pub use crate::simulation::{Simulation, TickStats};
    pub use crate::time::Time;
    pub use glam::Vec3;
}
