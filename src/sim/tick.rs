//! Fixed timestep simulation loop
//!
//! Each tick: check for arrival, feed signals to the vehicle, let it drive,
//! roll the move back if it overlaps anything, sync the rover, render, pace.

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::geometry::Position;
use super::world::World;
use crate::config::FieldConfig;
use crate::consts::{TARGET_REACHED_BANNER, TARGET_REACHED_CLEARANCE};
use crate::error::{Result, SimError};
use crate::renderer::Renderer;
use crate::vehicle::Vehicle;

/// Lifecycle of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Field being laid out and the vehicle bound
    Setup,
    /// Ticking
    Running,
    /// Stopped; no more signals, motion or collision checks
    Terminated,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The rover moved (or was bounced back to where it was)
    Advanced { bounced: bool },
    /// The target was reached; the banner has been rendered
    Terminated,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    TargetReached { ticks: u64 },
    /// The renderer asked to stop; its resources have been released
    Cancelled { ticks: u64 },
    /// Tick limit hit before the target was reached
    Stopped { ticks: u64 },
}

/// Pauses between ticks
pub trait Pacer {
    fn pace(&mut self, duration: Duration);
}

/// Sleeps the current thread; an early wake-up is simply ignored
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pace(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

/// Runs ticks back to back
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pace(&mut self, _duration: Duration) {}
}

/// Owns the field and drives the vehicle and renderer through the tick cycle
pub struct Simulation<V, R> {
    world: World,
    vehicle: V,
    renderer: R,
    pacer: Box<dyn Pacer>,
    phase: SimPhase,
    dt: f64,
    pacing: Duration,
    /// Ticks that moved (or bounced) the rover
    ticks: u64,
    bounces: u64,
}

impl<V: Vehicle, R: Renderer> Simulation<V, R> {
    /// Lay out the field, bind the vehicle and start running
    pub fn new(config: &FieldConfig, mut vehicle: V, renderer: R) -> Result<Self> {
        let world = World::from_config(config)?;
        let rover = world.rover();
        vehicle.place(rover.position, world.rover_orientation());

        let mut sim = Self {
            world,
            vehicle,
            renderer,
            pacer: Box::new(ThreadPacer),
            phase: SimPhase::Setup,
            dt: config.dt,
            pacing: config.pacing()?,
            ticks: 0,
            bounces: 0,
        };
        // Start from whatever the vehicle settled on
        sim.sync_rover("place")?;

        sim.phase = SimPhase::Running;
        log::info!(
            "Field ready: {} entities, dt {}, pacing {:?}",
            sim.world.entities().len(),
            sim.dt,
            sim.pacing
        );
        Ok(sim)
    }

    /// Replace the default thread-sleeping pacer
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn vehicle(&self) -> &V {
        &self.vehicle
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn bounces(&self) -> u64 {
        self.bounces
    }

    pub fn into_parts(self) -> (World, V, R) {
        (self.world, self.vehicle, self.renderer)
    }

    /// Run one tick
    pub fn tick(&mut self) -> Result<TickOutcome> {
        if self.phase != SimPhase::Running {
            return Err(SimError::AlreadyTerminated);
        }

        // Arrival is judged on the state rendered last tick
        if self.world.target_clearance() < TARGET_REACHED_CLEARANCE {
            self.phase = SimPhase::Terminated;
            log::info!(
                "Target reached after {} ticks ({} bounces)",
                self.ticks,
                self.bounces
            );
            self.renderer.render_frame(self.world.entities());
            self.renderer.render_banner(TARGET_REACHED_BANNER);
            return Ok(TickOutcome::Terminated);
        }

        for signal in self.world.signals() {
            self.vehicle.perceive(signal);
        }

        let previous = self.vehicle.position();
        let candidate = self.vehicle.drive(self.dt);
        if !candidate.is_finite() {
            let orientation = self.vehicle.orientation();
            return Err(self.contract_violation("drive", candidate, orientation));
        }
        self.world.set_rover_position(candidate);

        let bounced = match self.world.first_overlap() {
            Some(index) => {
                log::debug!(
                    "Tick {}: move to ({:.2}, {:.2}) overlaps entity {index}, bouncing back",
                    self.ticks,
                    candidate.x,
                    candidate.y
                );
                self.vehicle.bounce_back(previous);
                self.bounces += 1;
                true
            }
            None => false,
        };

        if let Err(e) = self.sync_rover(if bounced { "bounce_back" } else { "drive" }) {
            // Don't leave the rejected candidate on the rover
            self.world.set_rover_position(previous);
            return Err(e);
        }
        self.ticks += 1;
        log::trace!(
            "Tick {}: rover at ({:.2}, {:.2}) heading {:.1}",
            self.ticks,
            self.world.rover().position.x,
            self.world.rover().position.y,
            self.world.rover_orientation()
        );

        self.renderer.render_frame(self.world.entities());
        self.pacer.pace(self.pacing);

        Ok(TickOutcome::Advanced { bounced })
    }

    /// Tick until the target is reached or the renderer asks to stop
    ///
    /// The renderer is released on cancellation and on a fatal error.
    pub fn run(&mut self) -> Result<RunOutcome> {
        self.run_until(None)
    }

    /// Like [`Simulation::run`], but give up after `max_ticks` ticks
    pub fn run_for(&mut self, max_ticks: u64) -> Result<RunOutcome> {
        self.run_until(Some(max_ticks))
    }

    fn run_until(&mut self, limit: Option<u64>) -> Result<RunOutcome> {
        let mut executed = 0;
        loop {
            if limit.is_some_and(|max| executed >= max) {
                log::info!("Stopped after {executed} ticks without reaching the target");
                return Ok(RunOutcome::Stopped { ticks: self.ticks });
            }

            match self.tick() {
                Ok(TickOutcome::Terminated) => {
                    return Ok(RunOutcome::TargetReached { ticks: self.ticks });
                }
                Ok(TickOutcome::Advanced { .. }) => {}
                Err(e) => {
                    // Fatal: nothing will be drawn again
                    self.renderer.release();
                    return Err(e);
                }
            }
            executed += 1;

            if self.renderer.cancel_requested() {
                log::info!("Cancelled after {} ticks", self.ticks);
                self.renderer.release();
                return Ok(RunOutcome::Cancelled { ticks: self.ticks });
            }
        }
    }

    /// Copy the vehicle's state onto the rover entity
    fn sync_rover(&mut self, operation: &'static str) -> Result<()> {
        let position = self.vehicle.position();
        let orientation = self.vehicle.orientation();
        if !position.is_finite() || !orientation.is_finite() {
            return Err(self.contract_violation(operation, position, orientation));
        }
        self.world.set_rover_position(position);
        self.world.set_rover_orientation(orientation);
        Ok(())
    }

    fn contract_violation(
        &mut self,
        operation: &'static str,
        position: Position,
        orientation: f64,
    ) -> SimError {
        self.phase = SimPhase::Terminated;
        log::error!("Vehicle returned invalid state from {operation}, stopping");
        SimError::PolicyContract {
            operation,
            x: position.x,
            y: position.y,
            orientation,
        }
    }
}
