//! Per-creature update rules for one chronon.
//!
//! Every rule reads the previous grid and writes into a [`NextState`]. The
//! previous grid is never mutated while a chronon is being computed, so any
//! number of workers may read it at once.

use crate::creature::{Creature, Species};
use crate::grid::Grid;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::AddAssign;
use wator_core::{Position, SimConfig};

/// Breeding and starvation thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub fish_breed: u32,
    pub shark_breed: u32,
    pub starve: u32,
}

impl From<&SimConfig> for Rules {
    fn from(config: &SimConfig) -> Self {
        Self {
            fish_breed: config.fish_breed,
            shark_breed: config.shark_breed,
            starve: config.starve,
        }
    }
}

/// Event counters for one chronon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTally {
    pub fish_births: u64,
    pub shark_births: u64,
    pub meals: u64,
    pub starvations: u64,
    /// Moves cancelled because the destination was already taken
    pub blocked_moves: u64,
    /// Cells written by more than one worker
    pub merge_conflicts: u64,
}

impl AddAssign for StepTally {
    fn add_assign(&mut self, other: Self) {
        self.fish_births += other.fish_births;
        self.shark_births += other.shark_births;
        self.meals += other.meals;
        self.starvations += other.starvations;
        self.blocked_moves += other.blocked_moves;
        self.merge_conflicts += other.merge_conflicts;
    }
}

/// Where the fish now occupying a cell came from this chronon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Arrival {
    pub from: Position,
    pub left_child: bool,
}

/// The grid being built for the next chronon.
///
/// Alongside the grid it remembers where each fish that moved came from,
/// keyed by the cell it holds, and which meals found their prey already gone.
/// A shark that eats a fish then removes that fish even when the fish has
/// swum off in the same chronon. An arrival is only kept while its fish still
/// holds the cell.
#[derive(Debug, Clone)]
pub struct NextState {
    pub(crate) grid: Grid,
    pub(crate) arrivals: HashMap<Position, Arrival>,
    pub(crate) escaped_prey: Vec<Position>,
    pub(crate) tally: StepTally,
}

impl NextState {
    pub fn new(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            arrivals: HashMap::new(),
            escaped_prey: Vec::new(),
            tally: StepTally::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tally(&self) -> StepTally {
        self.tally
    }

    /// Remove every eaten fish that had already moved away, then hand back the grid.
    ///
    /// A fish that bred left its child on the prey cell; the shark took the
    /// child and the parent survives.
    pub fn finish(mut self) -> (Grid, StepTally) {
        let departures: HashMap<Position, Position> = self
            .arrivals
            .iter()
            .filter(|(_, arrival)| !arrival.left_child)
            .map(|(&to, arrival)| (arrival.from, to))
            .collect();

        for origin in std::mem::take(&mut self.escaped_prey) {
            let Some(&to) = departures.get(&origin) else {
                continue;
            };
            if self.grid.get(to).is_some_and(Creature::is_fish) {
                self.grid.take(to);
                self.arrivals.remove(&to);
            }
        }
        (self.grid, self.tally)
    }
}

/// What happened to a fish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FishOutcome {
    /// No empty neighbour in the previous grid
    Stayed,
    /// Chosen destination was already taken in the next grid
    Blocked,
    Moved(Position),
    Bred(Position),
}

/// What happened to a shark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharkOutcome {
    Starved,
    Stayed,
    Blocked,
    Moved { to: Position, ate: bool, bred: bool },
}

/// Advance the fish found at `pos` in `prev` by one chronon.
pub fn update_fish<R: RandomSource>(
    prev: &Grid,
    next: &mut NextState,
    pos: Position,
    fish: Creature,
    rules: &Rules,
    rng: &mut R,
) -> FishOutcome {
    let breed = fish.breed_counter + 1;
    let stay = Creature::fish().with_breed_counter(breed);

    let Some(dest) = rng.choose(&prev.empty_neighbors(pos)) else {
        next.grid.place_if_empty(pos, stay);
        return FishOutcome::Stayed;
    };

    if !next.grid.is_empty(dest) {
        next.grid.place_if_empty(pos, stay);
        next.tally.blocked_moves += 1;
        return FishOutcome::Blocked;
    }

    if breed >= rules.fish_breed {
        let left_child = next.grid.place_if_empty(pos, Creature::fish());
        if left_child {
            next.tally.fish_births += 1;
        }
        next.grid.set(dest, Creature::fish());
        next.arrivals.insert(
            dest,
            Arrival {
                from: pos,
                left_child,
            },
        );
        FishOutcome::Bred(dest)
    } else {
        next.grid.set(dest, stay);
        next.arrivals.insert(
            dest,
            Arrival {
                from: pos,
                left_child: false,
            },
        );
        FishOutcome::Moved(dest)
    }
}

/// Advance the shark found at `pos` in `prev` by one chronon.
pub fn update_shark<R: RandomSource>(
    prev: &Grid,
    next: &mut NextState,
    pos: Position,
    shark: Creature,
    rules: &Rules,
    rng: &mut R,
) -> SharkOutcome {
    let mut energy = shark.energy.saturating_sub(1);
    if energy == 0 {
        next.tally.starvations += 1;
        return SharkOutcome::Starved;
    }

    let mut breed = shark.breed_counter + 1;

    let (mut dest, ate) = match rng.choose(&prev.fish_neighbors(pos)) {
        Some(prey) => (prey, true),
        None => (rng.choose(&prev.empty_neighbors(pos)).unwrap_or(pos), false),
    };

    if ate {
        energy = rules.starve;
        next.tally.meals += 1;
    }

    let mut blocked = false;
    if !ate && dest != pos && !next.grid.is_empty(dest) {
        dest = pos;
        blocked = true;
        next.tally.blocked_moves += 1;
    }

    let moved = dest != pos;
    let mut bred = false;
    if moved && breed >= rules.shark_breed {
        if next.grid.place_if_empty(pos, Creature::shark(rules.starve)) {
            next.tally.shark_births += 1;
        }
        breed = 0;
        bred = true;
    }

    if ate && !next.grid.get(dest).is_some_and(Creature::is_fish) {
        next.escaped_prey.push(dest);
    }

    next.grid.set(
        dest,
        Creature {
            species: Species::Shark,
            breed_counter: breed,
            energy,
        },
    );

    match (moved, blocked) {
        (true, _) => SharkOutcome::Moved { to: dest, ate, bred },
        (false, true) => SharkOutcome::Blocked,
        (false, false) => SharkOutcome::Stayed,
    }
}
