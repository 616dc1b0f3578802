//! Error types for Shoal.
//!
//! Stepping a simulation never fails. Errors only arise when building one
//! (an empty population) or when loading a stored configuration.

use thiserror::Error;

/// Errors that can occur when creating a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The requested population was empty.
    #[error("population must contain at least one agent")]
    EmptyPopulation,
}

/// Errors that can occur when loading or saving a [`SimulationConfig`](crate::SimulationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The JSON was malformed or had a field of the wrong type.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
