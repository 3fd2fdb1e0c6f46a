//! Plane geometry for the field
//!
//! Positions are plain values: copying one is a snapshot, assigning one back
//! is a rollback.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::normalize_degrees;

/// A point in the shared field plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to `other`
    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        self.as_vec().distance(other.as_vec())
    }

    /// Direction of `other` seen from here, in degrees [0, 360)
    ///
    /// 0 points along +x and angles grow counter-clockwise.
    #[inline]
    pub fn bearing(self, other: Position) -> f64 {
        let d = other.as_vec() - self.as_vec();
        normalize_degrees(d.y.atan2(d.x).to_degrees())
    }

    /// Point `distance` away along `heading` degrees
    #[inline]
    pub fn offset(self, heading: f64, distance: f64) -> Position {
        let rad = heading.to_radians();
        Position::from(self.as_vec() + DVec2::new(rad.cos(), rad.sin()) * distance)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Position> for DVec2 {
    fn from(p: Position) -> Self {
        p.as_vec()
    }
}

/// Free-function form of [`Position::distance`]
#[inline]
pub fn distance(p: Position, q: Position) -> f64 {
    p.distance(q)
}

/// Free-function form of [`Position::bearing`]
#[inline]
pub fn bearing(p: Position, q: Position) -> f64 {
    p.bearing(q)
}
