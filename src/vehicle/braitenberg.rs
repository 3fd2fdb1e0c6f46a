//! Reactive steering policy
//!
//! Each tick the vehicle turns toward the target and away from obstacles in
//! front of it, weighted by how close they are, then rolls forward at a
//! constant speed, easing off on the final approach. After a bounce it spins by a random angle drawn from a
//! seeded RNG, so a given seed always produces the same run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::Vehicle;
use crate::normalize_degrees;
use crate::sim::{Position, Signal};

/// Steering parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleTuning {
    /// Forward speed (units per time unit)
    pub speed: f64,
    /// Maximum turn rate (degrees per time unit)
    pub max_turn_rate: f64,
    /// Fraction of the target bearing corrected per time unit
    pub target_gain: f64,
    /// Obstacles further away than this are ignored
    pub sensor_range: f64,
    /// Obstacles outside +/- this bearing are ignored
    pub sensor_half_angle: f64,
    /// Turn rate contributed by an obstacle at zero clearance
    pub avoid_gain: f64,
    /// Bounce recovery turn, degrees (min, max); direction is random
    pub bounce_turn: (f64, f64),
    /// Target clearance to stop short at, so the last step never overshoots
    pub arrival_margin: f64,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            speed: 20.0,
            max_turn_rate: 240.0,
            target_gain: 4.0,
            sensor_range: 40.0,
            sensor_half_angle: 75.0,
            avoid_gain: 600.0,
            bounce_turn: (60.0, 150.0),
            arrival_margin: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BraitenbergVehicle {
    position: Position,
    orientation: f64,
    tuning: VehicleTuning,
    rng: Pcg32,
    /// Signals received since the last `drive`
    inbox: Vec<Signal>,
}

impl BraitenbergVehicle {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, VehicleTuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: VehicleTuning) -> Self {
        Self {
            position: Position::ORIGIN,
            orientation: 0.0,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            inbox: Vec::new(),
        }
    }

    /// Desired turn rate (degrees per time unit) from this tick's signals
    fn steering(&self) -> f64 {
        let t = &self.tuning;
        let mut turn = 0.0;

        for signal in &self.inbox {
            if signal.is_target() {
                turn += signal.angle() * t.target_gain;
                continue;
            }
            if signal.distance() > t.sensor_range || signal.angle().abs() > t.sensor_half_angle {
                continue;
            }
            // Closer and more head-on obstacles push harder
            let proximity = 1.0 - signal.distance().max(0.0) / t.sensor_range;
            let facing = signal.angle().to_radians().cos();
            let away = if signal.angle() >= 0.0 { -1.0 } else { 1.0 };
            turn += away * proximity * facing * t.avoid_gain;
        }

        turn.clamp(-t.max_turn_rate, t.max_turn_rate)
    }
}

impl Vehicle for BraitenbergVehicle {
    fn place(&mut self, position: Position, orientation: f64) {
        self.position = position;
        self.orientation = normalize_degrees(orientation);
        self.inbox.clear();
    }

    fn perceive(&mut self, signal: Signal) {
        self.inbox.push(signal);
    }

    fn drive(&mut self, dt: f64) -> Position {
        let turn = self.steering() * dt;
        let mut step = self.tuning.speed * dt;
        if let Some(target) = self.inbox.iter().find(|s| s.is_target()) {
            step = step.min((target.distance() - self.tuning.arrival_margin).max(0.0));
        }
        self.inbox.clear();

        self.orientation = normalize_degrees(self.orientation + turn);
        self.position = self.position.offset(self.orientation, step);
        self.position
    }

    fn bounce_back(&mut self, previous: Position) {
        self.position = previous;

        let (min, max) = self.tuning.bounce_turn;
        let magnitude = if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        };
        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.orientation = normalize_degrees(self.orientation + direction * magnitude);
        log::debug!(
            "Bounced back to ({:.1}, {:.1}), new heading {:.1}",
            previous.x,
            previous.y,
            self.orientation
        );
    }

    fn position(&self) -> Position {
        self.position
    }

    fn orientation(&self) -> f64 {
        self.orientation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drives_straight_without_signals() {
        let mut vehicle = BraitenbergVehicle::new(1);
        vehicle.place(Position::ORIGIN, 90.0);
        let p = vehicle.drive(0.1);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
        assert_eq!(vehicle.position(), p);
    }

    #[test]
    fn test_turns_toward_target() {
        let mut vehicle = BraitenbergVehicle::new(1);
        vehicle.place(Position::ORIGIN, 90.0);
        // Target 30 degrees to the right
        vehicle.perceive(Signal::new(100.0, -30.0, true));
        vehicle.drive(0.1);
        assert!(vehicle.orientation() < 90.0);
    }

    #[test]
    fn test_turns_away_from_obstacle() {
        let mut vehicle = BraitenbergVehicle::new(1);
        vehicle.place(Position::ORIGIN, 90.0);
        // Obstacle close, slightly to the left
        vehicle.perceive(Signal::new(5.0, 10.0, false));
        vehicle.drive(0.1);
        assert!(vehicle.orientation() < 90.0);
    }

    #[test]
    fn test_slows_down_on_arrival() {
        let mut vehicle = BraitenbergVehicle::new(1);
        vehicle.place(Position::ORIGIN, 0.0);
        vehicle.perceive(Signal::new(1.5, 0.0, true));
        let p = vehicle.drive(0.1);
        assert!((p.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ignores_obstacles_behind() {
        let mut vehicle = BraitenbergVehicle::new(1);
        vehicle.place(Position::ORIGIN, 90.0);
        vehicle.perceive(Signal::new(5.0, 170.0, false));
        vehicle.drive(0.1);
        assert!((vehicle.orientation() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_inbox_cleared_after_drive() {
        let mut vehicle = BraitenbergVehicle::new(1);
        vehicle.place(Position::ORIGIN, 90.0);
        vehicle.perceive(Signal::new(100.0, -30.0, true));
        vehicle.drive(0.1);
        let heading = vehicle.orientation();
        vehicle.drive(0.1);
        assert!((vehicle.orientation() - heading).abs() < 1e-9);
    }

    #[test]
    fn test_bounce_restores_position_and_turns() {
        let mut vehicle = BraitenbergVehicle::new(7);
        vehicle.place(Position::new(3.0, 4.0), 0.0);
        let previous = vehicle.position();
        vehicle.drive(0.1);
        vehicle.bounce_back(previous);
        assert_eq!(vehicle.position(), previous);

        let turned = vehicle.orientation().min(360.0 - vehicle.orientation());
        assert!((60.0..=150.0).contains(&turned));
    }

    #[test]
    fn test_same_seed_same_bounces() {
        let mut a = BraitenbergVehicle::new(42);
        let mut b = BraitenbergVehicle::new(42);
        for _ in 0..10 {
            a.bounce_back(Position::ORIGIN);
            b.bounce_back(Position::ORIGIN);
            assert_eq!(a.orientation(), b.orientation());
        }
    }
}
