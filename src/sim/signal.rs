//! Per-tick perception records handed to the vehicle

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::normalize_signed_degrees;

/// What the rover senses about one other entity on one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Surface-to-surface clearance; negative when overlapping
    pub distance: f64,
    /// Bearing relative to the rover's heading, degrees in [-180, 180]
    pub angle: f64,
    pub target: bool,
}

impl Signal {
    pub fn new(distance: f64, angle: f64, target: bool) -> Self {
        Self {
            distance,
            angle,
            target,
        }
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    pub fn is_target(&self) -> bool {
        self.target
    }
}

/// Bearing of `other` in the rover's own frame, degrees in [-180, 180]
///
/// 0 is dead ahead, positive is to the rover's left (counter-clockwise).
pub fn relative_bearing(rover: &Entity, other: &Entity) -> f64 {
    let absolute = rover.position.bearing(other.position);
    let heading = rover.orientation().unwrap_or(0.0);
    normalize_signed_degrees(absolute - heading)
}

/// Build the signal `rover` receives about `other`
pub fn signal_for(rover: &Entity, other: &Entity) -> Signal {
    Signal::new(
        rover.clearance_to(other),
        relative_bearing(rover, other),
        other.is_target(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_signal_ahead_and_behind() {
        let rover = Entity::rover(0.0, 0.0, 90.0);

        let ahead = signal_for(&rover, &Entity::obstacle(0.0, 50.0));
        assert!(ahead.angle().abs() < 1e-9);
        assert!((ahead.distance() - 30.0).abs() < 1e-9);
        assert!(!ahead.is_target());

        let left = signal_for(&rover, &Entity::target(-50.0, 0.0));
        assert!((left.angle() - 90.0).abs() < 1e-9);
        assert!(left.is_target());

        let right = signal_for(&rover, &Entity::obstacle(50.0, 0.0));
        assert!((right.angle() + 90.0).abs() < 1e-9);

        let behind = signal_for(&rover, &Entity::obstacle(0.0, -50.0));
        assert!((behind.angle().abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_gives_negative_distance() {
        let rover = Entity::rover(0.0, 0.0, 0.0);
        let signal = signal_for(&rover, &Entity::obstacle(15.0, 0.0));
        assert!((signal.distance() + 5.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn angle_always_in_range(
            orientation in -1080.0..1080.0f64,
            x in -500.0..500.0f64,
            y in -500.0..500.0f64,
        ) {
            let rover = Entity::rover(0.0, 0.0, orientation);
            let signal = signal_for(&rover, &Entity::obstacle(x, y));
            prop_assert!(signal.angle() >= -180.0 && signal.angle() <= 180.0);
        }
    }
}
