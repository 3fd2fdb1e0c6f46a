//! Deterministic simulation module
//!
//! Everything that decides where the rover ends up lives here:
//! - Fixed timestep only
//! - Stable iteration order (entity collection order)
//! - No rendering or platform dependencies beyond the adapter traits

pub mod collision;
pub mod entity;
pub mod geometry;
pub mod signal;
pub mod tick;
pub mod world;

pub use collision::{clearances, first_overlap, overlap};
pub use entity::{Color, Entity, EntityKind};
pub use geometry::{Position, bearing, distance};
pub use signal::{Signal, relative_bearing, signal_for};
pub use tick::{NoPacing, Pacer, RunOutcome, SimPhase, Simulation, ThreadPacer, TickOutcome};
pub use world::World;
