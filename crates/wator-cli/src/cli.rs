//! Command-line arguments.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use wator_core::RunConfig;

/// Wa-Tor predator-prey simulation on a toroidal ocean
#[derive(Debug, Parser)]
#[command(name = "wator", version, about)]
pub struct Args {
    /// JSON run configuration; flags below override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Starting population of sharks
    #[arg(long = "num-shark", alias = "numShark")]
    pub num_shark: Option<usize>,

    /// Starting population of fish
    #[arg(long = "num-fish", alias = "numFish")]
    pub num_fish: Option<usize>,

    /// Chronons before a fish can reproduce
    #[arg(long = "fish-breed", alias = "fishBreed")]
    pub fish_breed: Option<u32>,

    /// Chronons before a shark can reproduce
    #[arg(long = "shark-breed", alias = "sharkBreed")]
    pub shark_breed: Option<u32>,

    /// Chronons a shark can live without food
    #[arg(long)]
    pub starve: Option<u32>,

    /// Grid dimension (NxN)
    #[arg(long = "grid-size", alias = "gridSize")]
    pub grid_size: Option<usize>,

    /// Number of worker threads per chronon
    #[arg(long)]
    pub threads: Option<usize>,

    /// Number of simulation steps (chronons)
    #[arg(long)]
    pub steps: Option<u64>,

    /// How often to print the grid (0 = never)
    #[arg(long = "print-every", alias = "printEvery")]
    pub print_every: Option<u64>,

    /// CSV file to write population statistics to
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Random seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause after each printed frame, in milliseconds
    #[arg(long = "frame-delay-ms")]
    pub frame_delay_ms: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long = "log-json")]
    pub log_json: bool,
}

impl Args {
    /// Merge file configuration, defaults and flags, then validate.
    pub fn into_run_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => RunConfig::default(),
        };

        let sim = &mut config.sim;
        if let Some(value) = self.num_shark {
            sim.num_shark = value;
        }
        if let Some(value) = self.num_fish {
            sim.num_fish = value;
        }
        if let Some(value) = self.fish_breed {
            sim.fish_breed = value;
        }
        if let Some(value) = self.shark_breed {
            sim.shark_breed = value;
        }
        if let Some(value) = self.starve {
            sim.starve = value;
        }
        if let Some(value) = self.grid_size {
            sim.grid_size = value;
        }
        if let Some(value) = self.threads {
            sim.threads = value;
        }
        if self.seed.is_some() {
            sim.seed = self.seed;
        }
        if let Some(value) = self.steps {
            config.steps = value;
        }
        if let Some(value) = self.print_every {
            config.print_every = value;
        }
        if self.csv.is_some() {
            config.csv_path = self.csv;
        }
        if let Some(value) = self.frame_delay_ms {
            config.frame_delay_ms = value;
        }

        config.validate().context("invalid parameter values")?;
        Ok(config)
    }
}
