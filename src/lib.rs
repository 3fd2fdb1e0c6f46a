//! Rover Field - a sensor-driven rover crossing a field of obstacles
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (geometry, entities, signals, collisions, loop)
//! - `vehicle`: Control policy interface and a reactive demo policy
//! - `renderer`: Render adapter interface and a terminal renderer
//! - `config`: Data-driven field layout

pub mod config;
pub mod error;
pub mod logging;
pub mod renderer;
pub mod sim;
pub mod vehicle;

pub use config::FieldConfig;
pub use error::{Result, SimError};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (time units per tick)
    pub const SIM_DT: f64 = 0.1;
    /// Pacing scale: each tick sleeps `PACING_SCALE * dt` milliseconds
    pub const PACING_SCALE: f64 = 100.0;

    /// Radius given to any entity that isn't explicitly sized
    pub const DEFAULT_RADIUS: f64 = 10.0;
    /// Smallest radius an obstacle or the target may have
    pub const MIN_FIXED_RADIUS: f64 = 1.0;

    /// Rover-to-target clearance below which the run is over
    pub const TARGET_REACHED_CLEARANCE: f64 = 1.0;

    /// Banner shown once the target is reached
    pub const TARGET_REACHED_BANNER: &str = "Target Reached!";
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Normalize an angle in degrees to [-180, 180]
#[inline]
pub fn normalize_signed_degrees(angle: f64) -> f64 {
    normalize_degrees(angle + 180.0) - 180.0
}
