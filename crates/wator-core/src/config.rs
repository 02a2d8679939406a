//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parameters that shape a world. Immutable for the lifetime of a `World`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Starting population of fish
    pub num_fish: usize,
    /// Starting population of sharks
    pub num_shark: usize,
    /// Chronons before a fish can reproduce
    pub fish_breed: u32,
    /// Chronons before a shark can reproduce
    pub shark_breed: u32,
    /// Chronons a shark can live without food; also its full energy
    pub starve: u32,
    /// Side of the square toroidal grid
    pub grid_size: usize,
    /// Number of workers per step (1 = sequential)
    pub threads: usize,
    /// Random seed for reproducibility, `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_fish: 200,
            num_shark: 100,
            fish_breed: 3,
            shark_breed: 5,
            starve: 3,
            grid_size: 20,
            threads: 1,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Check the invariants a world relies on before anything is placed.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(Error::Validation("grid size must be > 0".to_string()));
        }
        let fits = self
            .grid_size
            .checked_mul(self.grid_size)
            .is_some_and(|cells| i32::try_from(cells).is_ok());
        if !fits {
            return Err(Error::Validation(format!(
                "grid size {} is too large",
                self.grid_size
            )));
        }
        let population = self.num_fish.saturating_add(self.num_shark);
        if population > self.cell_count() {
            return Err(Error::Validation(format!(
                "more creatures than cells in the grid ({} > {})",
                population,
                self.cell_count()
            )));
        }
        if self.fish_breed == 0 {
            return Err(Error::Validation("fish breed time must be > 0".to_string()));
        }
        if self.shark_breed == 0 {
            return Err(Error::Validation("shark breed time must be > 0".to_string()));
        }
        if self.starve == 0 {
            return Err(Error::Validation("starve time must be > 0".to_string()));
        }
        if self.threads == 0 {
            return Err(Error::Validation("thread count must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Settings for one command-line run around a world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// World parameters
    pub sim: SimConfig,
    /// Number of chronons to simulate
    pub steps: u64,
    /// Print the grid every N steps (0 = never)
    pub print_every: u64,
    /// Optional CSV file for population statistics
    pub csv_path: Option<PathBuf>,
    /// Pause after each printed frame so the animation is visible
    pub frame_delay_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            steps: 200,
            print_every: 20,
            csv_path: None,
            frame_delay_ms: 50,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        self.sim.validate()?;
        if self.steps == 0 {
            return Err(Error::Validation("steps must be > 0".to_string()));
        }
        Ok(())
    }

    /// Load a run configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), "Loaded run configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let sim = SimConfig::default();
        assert_eq!(sim.grid_size, 20);
        assert_eq!(sim.num_fish, 200);
        assert_eq!(sim.num_shark, 100);
        assert!(sim.validate().is_ok());

        let run = RunConfig::default();
        assert_eq!(run.steps, 200);
        assert!(run.validate().is_ok());
    }

    #[test]
    fn test_overpopulation_rejected() {
        let config = SimConfig {
            grid_size: 3,
            num_fish: 6,
            num_shark: 4,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("more creatures than cells"));
    }

    #[test]
    fn test_grid_must_be_indexable() {
        let largest = SimConfig {
            grid_size: 46_340,
            ..Default::default()
        };
        assert!(largest.validate().is_ok());

        let too_large = SimConfig {
            grid_size: 46_341,
            ..Default::default()
        };
        let err = too_large.validate().unwrap_err();
        assert!(err.to_string().contains("too large"));

        let overflowing = SimConfig {
            grid_size: usize::MAX,
            ..Default::default()
        };
        assert!(overflowing.validate().is_err());
    }

    #[test]
    fn test_full_grid_accepted() {
        let config = SimConfig {
            grid_size: 3,
            num_fish: 5,
            num_shark: 4,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let zero_grid = SimConfig {
            grid_size: 0,
            num_fish: 0,
            num_shark: 0,
            ..Default::default()
        };
        assert!(zero_grid.validate().is_err());

        let zero_threads = SimConfig {
            threads: 0,
            ..Default::default()
        };
        assert!(zero_threads.validate().is_err());

        let zero_starve = SimConfig {
            starve: 0,
            ..Default::default()
        };
        assert!(zero_starve.validate().is_err());

        let zero_steps = RunConfig {
            steps: 0,
            ..Default::default()
        };
        assert!(zero_steps.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "steps": 50, "sim": { "grid_size": 8, "num_fish": 10, "num_shark": 2 } }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.steps, 50);
        assert_eq!(config.sim.grid_size, 8);
        assert_eq!(config.sim.starve, 3);
        assert_eq!(config.print_every, 20);
        assert!(config.validate().is_ok());
    }
}
