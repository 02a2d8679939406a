//! Command-line entry point for the Wa-Tor simulation.

mod cli;
mod render;
mod runner;
mod stats;
mod telemetry;

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use tracing::info;
use wator_world::World;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    // Initialize telemetry
    telemetry::init_telemetry(args.log_json)?;

    // Configuration errors end the run before anything is simulated
    let config = args.into_run_config()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runner::write_banner(&mut out, &config)?;
    out.flush()?;

    info!(
        grid_size = config.sim.grid_size,
        threads = config.sim.threads,
        steps = config.steps,
        "Starting Wa-Tor simulation"
    );

    let mut world = World::new(config.sim.clone())?;
    let summary = runner::run(&config, &mut world, &mut out)?;

    info!(
        event = "run_summary",
        steps = summary.steps,
        final_fish = summary.final_counts.fish,
        final_sharks = summary.final_counts.sharks,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "Run complete"
    );

    Ok(())
}
