//! Text-mode run loop.

use crate::render;
use crate::stats::StatsLog;
use anyhow::{Context, Result};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};
use wator_core::{PopulationCounts, RunConfig};
use wator_world::{RandomSource, World};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub final_counts: PopulationCounts,
    pub elapsed: Duration,
}

/// Print the parameter banner shown before a run.
pub fn write_banner<W: Write>(out: &mut W, config: &RunConfig) -> std::io::Result<()> {
    let sim = &config.sim;
    writeln!(out, "Wa-Tor Simulation")?;
    writeln!(out, "-----------------")?;
    writeln!(out, "Sharks      : {}", sim.num_shark)?;
    writeln!(out, "Fish        : {}", sim.num_fish)?;
    writeln!(out, "FishBreed   : {}", sim.fish_breed)?;
    writeln!(out, "SharkBreed  : {}", sim.shark_breed)?;
    writeln!(out, "Starve      : {}", sim.starve)?;
    writeln!(out, "GridSize    : {} x {}", sim.grid_size, sim.grid_size)?;
    writeln!(out, "Threads     : {}", sim.threads)?;
    writeln!(out, "Steps       : {}", config.steps)?;
    writeln!(out, "PrintEvery  : {}", config.print_every)?;
    if let Some(path) = &config.csv_path {
        writeln!(out, "CSV output  : {}", path.display())?;
    }
    writeln!(out, "Mode        : text")
}

/// Run `config.steps` chronons on `world`, rendering to `out` and recording
/// statistics when configured. Each CSV row holds the counts before its step.
#[instrument(skip_all, fields(steps = config.steps, threads = config.sim.threads))]
pub fn run<W: Write, R: RandomSource>(
    config: &RunConfig,
    world: &mut World<R>,
    out: &mut W,
) -> Result<RunSummary> {
    let mut stats = config
        .csv_path
        .as_deref()
        .map(StatsLog::create)
        .transpose()
        .context("failed to create CSV file")?;

    let frame_delay = Duration::from_millis(config.frame_delay_ms);
    let start = Instant::now();

    for step in 0..config.steps {
        let counts = world.counts();

        if let Some(stats) = stats.as_mut() {
            stats.record(step, counts).context("failed to write CSV row")?;
        }

        if config.print_every > 0 && step % config.print_every == 0 {
            render::draw_frame(out, world, step)?;
            if !frame_delay.is_zero() {
                std::thread::sleep(frame_delay);
            }
        }

        world.advance();

        if step % 100 == 0 {
            debug!(step, fish = counts.fish, sharks = counts.sharks, "Progress");
        }
    }

    if let Some(stats) = stats {
        stats.finish().context("failed to flush CSV file")?;
    }

    let elapsed = start.elapsed();
    let final_counts = world.counts();
    writeln!(out, "\nSimulation finished in {elapsed:?}")?;

    Ok(RunSummary {
        steps: config.steps,
        final_counts,
        elapsed,
    })
}
