//! The world: one live grid plus the configuration that evolves it.

use crate::creature::Creature;
use crate::grid::Grid;
use crate::parallel;
use crate::rng::{ChaChaSource, RandomSource};
use crate::rules::{Rules, StepTally};
use crate::sequential;
use tracing::{debug, info, instrument};
use wator_core::{CellKind, Error, PopulationCounts, Position, Result, SimConfig};

/// A Wa-Tor ocean.
///
/// Each step builds a brand-new grid from the current one and swaps it in
/// only once it is complete, so introspection between steps never sees a
/// half-updated ocean.
pub struct World<R: RandomSource = ChaChaSource> {
    grid: Grid,
    config: SimConfig,
    rules: Rules,
    source: R,
    chronon: u64,
    last_tally: StepTally,
}

impl World<ChaChaSource> {
    /// Build a randomly populated world, seeded from `config.seed` when set.
    pub fn new(config: SimConfig) -> Result<Self> {
        let source = ChaChaSource::from_seed_option(config.seed);
        Self::with_source(config, source)
    }
}

impl<R: RandomSource> World<R> {
    /// Build a randomly populated world drawing from `source`.
    #[instrument(
        skip(config, source),
        fields(
            grid_size = config.grid_size,
            fish = config.num_fish,
            sharks = config.num_shark
        )
    )]
    pub fn with_source(config: SimConfig, mut source: R) -> Result<Self> {
        config.validate()?;
        let grid = Grid::populate(&config, &mut source);
        info!("World populated");
        Ok(Self::assemble(config, grid, source))
    }

    /// Wrap an existing grid, e.g. a hand-built scenario.
    pub fn from_grid(config: SimConfig, grid: Grid, source: R) -> Result<Self> {
        config.validate()?;
        if grid.size() != config.grid_size {
            return Err(Error::InvalidState(format!(
                "grid side {} does not match configured size {}",
                grid.size(),
                config.grid_size
            )));
        }
        Ok(Self::assemble(config, grid, source))
    }

    fn assemble(config: SimConfig, grid: Grid, source: R) -> Self {
        Self {
            rules: Rules::from(&config),
            grid,
            config,
            source,
            chronon: 0,
            last_tally: StepTally::default(),
        }
    }

    /// Advance one chronon on the calling thread.
    pub fn step(&mut self) {
        let (next, tally) = sequential::step(&self.grid, &self.rules, &mut self.source);
        self.commit(next, tally);
    }

    /// Advance one chronon with up to `workers` threads. One worker or fewer
    /// runs sequentially.
    pub fn step_parallel(&mut self, workers: usize) {
        if workers <= 1 {
            self.step();
            return;
        }
        let (next, tally) = parallel::step(&self.grid, &self.rules, workers, &mut self.source);
        self.commit(next, tally);
    }

    /// Advance one chronon using the configured thread count.
    pub fn advance(&mut self) {
        self.step_parallel(self.config.threads);
    }

    fn commit(&mut self, next: Grid, tally: StepTally) {
        self.grid = next;
        self.chronon += 1;
        self.last_tally = tally;

        let counts = self.grid.count_kinds();
        debug!(
            chronon = self.chronon,
            fish = counts.fish,
            sharks = counts.sharks,
            fish_births = tally.fish_births,
            shark_births = tally.shark_births,
            meals = tally.meals,
            starvations = tally.starvations,
            blocked_moves = tally.blocked_moves,
            merge_conflicts = tally.merge_conflicts,
            "Chronon complete"
        );
    }

    /// What occupies cell `(x, y)`. Coordinates wrap around the torus.
    pub fn cell_kind(&self, x: usize, y: usize) -> CellKind {
        self.grid.kind_at(Position::new(x as i32, y as i32))
    }

    pub fn creature_at(&self, pos: Position) -> Option<Creature> {
        self.grid.get(pos).copied()
    }

    pub fn counts(&self) -> PopulationCounts {
        self.grid.count_kinds()
    }

    /// Number of chronons completed
    pub fn chronon(&self) -> u64 {
        self.chronon
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn last_tally(&self) -> StepTally {
        self.last_tally
    }
}
