//! Rover Field entry point
//!
//! Loads a field, binds the reactive demo vehicle and runs the loop in the
//! terminal until the rover reaches its target.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rover_field::FieldConfig;
use rover_field::renderer::{AsciiRenderer, NullRenderer, Renderer, Viewport};
use rover_field::sim::{NoPacing, RunOutcome, Simulation};
use rover_field::vehicle::BraitenbergVehicle;

/// Drive a sensor-guided rover through an obstacle field to its target
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Field layout as JSON (built-in layout when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the vehicle's bounce recovery
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Give up after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Run ticks back to back instead of pacing them
    #[arg(long)]
    no_pacing: bool,

    /// Don't draw the field, only log
    #[arg(long)]
    headless: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    rover_field::logging::init(args.verbose);
    log::info!("Rover Field starting...");

    let config = match &args.config {
        Some(path) => FieldConfig::load(path)
            .with_context(|| format!("loading field from {}", path.display()))?,
        None => FieldConfig::default(),
    };

    let vehicle = BraitenbergVehicle::new(args.seed);
    let outcome = if args.headless {
        run(&args, &config, vehicle, NullRenderer)?
    } else {
        let renderer = AsciiRenderer::new(io::stdout(), Viewport::default()).clear_screen(true);
        run(&args, &config, vehicle, renderer)?
    };

    match outcome {
        RunOutcome::TargetReached { ticks } => log::info!("Target reached in {ticks} ticks"),
        RunOutcome::Cancelled { ticks } => log::info!("Output closed after {ticks} ticks"),
        RunOutcome::Stopped { ticks } => log::info!("Gave up after {ticks} ticks"),
    }
    Ok(())
}

fn run<R: Renderer>(
    args: &Args,
    config: &FieldConfig,
    vehicle: BraitenbergVehicle,
    renderer: R,
) -> anyhow::Result<RunOutcome> {
    let mut sim = Simulation::new(config, vehicle, renderer).context("setting up the field")?;
    if args.no_pacing {
        sim = sim.with_pacer(NoPacing);
    }

    // Cancelled and failed runs release the renderer themselves
    let outcome = match args.max_ticks {
        Some(max) => sim.run_for(max),
        None => sim.run(),
    }
    .context("running the simulation")?;

    if !matches!(outcome, RunOutcome::Cancelled { .. }) {
        let (_, _, mut renderer) = sim.into_parts();
        renderer.release();
    }
    Ok(outcome)
}
