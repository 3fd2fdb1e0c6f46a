//! Control policies
//!
//! A vehicle owns the rover's motion state. The simulation feeds it signals,
//! asks it to drive, and tells it to back off when the move it chose would
//! overlap something. Afterwards the rover entity is synced from the vehicle,
//! never the other way round.

pub mod braitenberg;

pub use braitenberg::{BraitenbergVehicle, VehicleTuning};

use crate::sim::{Position, Signal};

pub trait Vehicle {
    /// Put the vehicle at its start state; called once during setup
    fn place(&mut self, position: Position, orientation: f64);

    /// Receive one signal; called once per non-rover entity each tick,
    /// in field order, before `drive`
    fn perceive(&mut self, signal: Signal);

    /// Advance by `dt` and return the new position
    fn drive(&mut self, dt: f64) -> Position;

    /// The last move overlapped something; restore a consistent position,
    /// normally `previous`
    fn bounce_back(&mut self, previous: Position);

    fn position(&self) -> Position;

    /// Heading in degrees, counter-clockwise from +x
    fn orientation(&self) -> f64;
}

impl<V: Vehicle + ?Sized> Vehicle for Box<V> {
    fn place(&mut self, position: Position, orientation: f64) {
        (**self).place(position, orientation)
    }

    fn perceive(&mut self, signal: Signal) {
        (**self).perceive(signal)
    }

    fn drive(&mut self, dt: f64) -> Position {
        (**self).drive(dt)
    }

    fn bounce_back(&mut self, previous: Position) {
        (**self).bounce_back(previous)
    }

    fn position(&self) -> Position {
        (**self).position()
    }

    fn orientation(&self) -> f64 {
        (**self).orientation()
    }
}
