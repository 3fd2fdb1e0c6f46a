//! Error types for setup and the simulation loop

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a field from being set up or a run from continuing.
#[derive(Debug, Error)]
pub enum SimError {
    /// An obstacle was configured with a radius below the minimum.
    #[error("obstacle {index} has invalid radius {radius} (must be >= 1)")]
    InvalidObstacleRadius { index: usize, radius: f64 },

    #[error("target has invalid radius {0} (must be >= 1)")]
    InvalidTargetRadius(f64),

    #[error("rover has negative radius {0}")]
    NegativeRoverRadius(f64),

    /// A configured coordinate, radius or angle is NaN or infinite.
    #[error("non-finite value in configuration: {what}")]
    NonFinite { what: String },

    #[error("timestep must be finite and positive, got {0}")]
    InvalidTimestep(f64),

    #[error("pacing scale must be finite and non-negative, got {0}")]
    InvalidPacing(f64),

    /// `pacing_scale * dt` milliseconds doesn't fit in a `Duration`.
    #[error("pacing of {0} ms per tick is out of range")]
    PacingOutOfRange(f64),

    /// The vehicle reported a state that can't be synchronized onto the rover.
    #[error("vehicle broke its contract in `{operation}`: position ({x}, {y}), orientation {orientation}")]
    PolicyContract {
        operation: &'static str,
        x: f64,
        y: f64,
        orientation: f64,
    },

    #[error("simulation already terminated")]
    AlreadyTerminated,

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
