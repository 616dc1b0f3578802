//! Host-side clock for driving [`Simulation::step`](crate::Simulation::step).
//!
//! The simulation itself holds no timer. Hosts feed it a delta each tick;
//! [`Time`] turns wall-clock (or caller-supplied) deltas into simulation
//! deltas, applying pause, time scale and an optional fixed step.
//!
//! # Example
//!
//! ```ignore
//! use shoal::prelude::*;
//!
//! let mut time = Time::new();
//! time.set_fixed_delta(Some(1.0 / 60.0));
//!
//! loop {
//!     let dt = time.update();
//!     sim.step(path.position_at(time.elapsed()), dt);
//! }
//! ```

use std::time::Instant;

/// Simulation clock.
///
/// `elapsed()` is simulation time: it only advances by the deltas this clock
/// hands out, so it stops while paused and runs faster or slower with the
/// time scale.
#[derive(Debug)]
pub struct Time {
    /// When the last wall-clock update occurred.
    last_update: Instant,
    /// Accumulated simulation time in seconds.
    elapsed_secs: f32,
    /// Delta handed out by the last update.
    delta_secs: f32,
    /// Updates since start (paused updates are not counted).
    frame_count: u64,
    paused: bool,
    /// Fixed delta time for deterministic updates (optional).
    fixed_delta: Option<f32>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

impl Time {
    /// Create a new clock starting from now.
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Measure wall-clock time since the previous update and advance by it.
    ///
    /// Returns the delta to pass to `step`.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;
        self.advance(raw)
    }

    /// Advance by a caller-measured `raw_delta` in seconds.
    ///
    /// Returns the delta to pass to `step`: zero while paused, otherwise the
    /// fixed delta (if set) or `raw_delta`, multiplied by the time scale.
    pub fn advance(&mut self, raw_delta: f32) -> f32 {
        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta).max(0.0) * self.time_scale;
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;
        self.delta_secs
    }

    /// Total simulation time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Delta handed out by the last update.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Pause time progression.
    ///
    /// While paused, updates return 0 and `elapsed()` stops increasing.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume time progression after pausing.
    ///
    /// The wall-clock gap spent paused is not handed out as a delta.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_update = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Set a fixed delta time for deterministic updates.
    ///
    /// Pass `None` to use measured frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed (slow motion)
    /// - `2.0` = double speed
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Reset the clock to its initial state, keeping scale and fixed delta.
    pub fn reset(&mut self) {
        self.last_update = Instant::now();
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
        self.paused = false;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
