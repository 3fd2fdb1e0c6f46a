//! Field layout and loop timing
//!
//! Loaded once at setup from JSON (or the built-in layout) and never changed
//! while the simulation is running.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

fn default_dt() -> f64 {
    SIM_DT
}

fn default_pacing_scale() -> f64 {
    PACING_SCALE
}

/// A circular obstacle, immovable once placed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl ObstacleSpec {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            radius: DEFAULT_RADIUS,
        }
    }

    pub fn with_radius(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

/// Rover start state; orientation in degrees, counter-clockwise from +x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoverSpec {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub orientation: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

/// Complete description of a field and its loop timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Obstacles in iteration order
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    pub target: TargetSpec,
    pub rover: RoverSpec,
    /// Time advanced per tick
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Each tick is paced by `pacing_scale * dt` milliseconds; 0 disables pacing
    #[serde(default = "default_pacing_scale")]
    pub pacing_scale: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            obstacles: vec![
                ObstacleSpec::new(65.0, 7.0),
                ObstacleSpec::new(80.0, -10.0),
                ObstacleSpec::new(60.0, 30.0),
                ObstacleSpec::with_radius(-60.0, 60.0, 15.0),
                ObstacleSpec::with_radius(-100.0, -40.0, 20.0),
                ObstacleSpec::with_radius(-120.0, 70.0, 15.0),
                ObstacleSpec::with_radius(-160.0, 0.0, 25.0),
                ObstacleSpec::new(-200.0, -100.0),
            ],
            target: TargetSpec {
                x: 200.0,
                y: 30.0,
                radius: DEFAULT_RADIUS,
            },
            rover: RoverSpec {
                x: 0.0,
                y: 0.0,
                orientation: 90.0,
                radius: DEFAULT_RADIUS,
            },
            dt: SIM_DT,
            pacing_scale: PACING_SCALE,
        }
    }
}

impl FieldConfig {
    /// Parse and validate a JSON layout
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON layout from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded field from {} ({} obstacles)",
            path.display(),
            config.obstacles.len()
        );
        Ok(config)
    }

    /// Reject layouts the simulation can't start from
    pub fn validate(&self) -> Result<()> {
        for (index, obstacle) in self.obstacles.iter().enumerate() {
            finite(&format!("obstacle {index} position"), &[obstacle.x, obstacle.y])?;
            finite(&format!("obstacle {index} radius"), &[obstacle.radius])?;
            if obstacle.radius < MIN_FIXED_RADIUS {
                return Err(SimError::InvalidObstacleRadius {
                    index,
                    radius: obstacle.radius,
                });
            }
        }

        finite("target", &[self.target.x, self.target.y, self.target.radius])?;
        if self.target.radius < MIN_FIXED_RADIUS {
            return Err(SimError::InvalidTargetRadius(self.target.radius));
        }

        finite(
            "rover",
            &[
                self.rover.x,
                self.rover.y,
                self.rover.orientation,
                self.rover.radius,
            ],
        )?;
        if self.rover.radius < 0.0 {
            return Err(SimError::NegativeRoverRadius(self.rover.radius));
        }

        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidTimestep(self.dt));
        }
        if !self.pacing_scale.is_finite() || self.pacing_scale < 0.0 {
            return Err(SimError::InvalidPacing(self.pacing_scale));
        }
        self.pacing()?;

        Ok(())
    }

    /// Milliseconds to pause between ticks
    pub fn pacing_millis(&self) -> f64 {
        self.pacing_scale * self.dt
    }

    /// Pause between ticks
    pub fn pacing(&self) -> Result<Duration> {
        let millis = self.pacing_millis();
        Duration::try_from_secs_f64(millis / 1000.0).map_err(|_| SimError::PacingOutOfRange(millis))
    }
}

fn finite(what: &str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SimError::NonFinite {
            what: what.to_string(),
        })
    }
}
