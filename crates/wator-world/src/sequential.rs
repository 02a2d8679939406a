//! Single-threaded chronon: all fish, then all sharks.

use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::rules::{update_fish, update_shark, NextState, Rules, StepTally};
use std::ops::Range;

/// Apply the fish pass and then the shark pass to every creature whose row
/// lies in `rows`, writing into a fresh next state.
///
/// Prey that escaped is left unresolved so several partial states can be
/// merged first.
pub fn run_rows<R: RandomSource>(
    prev: &Grid,
    rows: Range<usize>,
    rules: &Rules,
    rng: &mut R,
) -> NextState {
    let mut next = NextState::new(prev.size());

    for (pos, fish) in prev.iter_rows(rows.clone()).filter(|(_, c)| c.is_fish()) {
        update_fish(prev, &mut next, pos, *fish, rules, rng);
    }

    for (pos, shark) in prev.iter_rows(rows).filter(|(_, c)| c.is_shark()) {
        update_shark(prev, &mut next, pos, *shark, rules, rng);
    }

    next
}

/// Compute the whole next grid on the calling thread.
pub fn step<R: RandomSource>(prev: &Grid, rules: &Rules, rng: &mut R) -> (Grid, StepTally) {
    run_rows(prev, 0..prev.size(), rules, rng).finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Creature;
    use crate::rng::{ChaChaSource, SequenceSource};
    use wator_core::{CellKind, Position};

    fn rules() -> Rules {
        Rules {
            fish_breed: 3,
            shark_breed: 5,
            starve: 3,
        }
    }

    #[test]
    fn test_empty_grid_stays_empty() {
        let prev = Grid::new(6);
        let mut rng = ChaChaSource::seed_from_u64(1);
        let (next, tally) = step(&prev, &rules(), &mut rng);
        assert_eq!(next, prev);
        assert_eq!(tally, StepTally::default());
    }

    #[test]
    fn test_previous_grid_untouched() {
        let mut prev = Grid::new(5);
        prev.set(Position::new(1, 1), Creature::fish());
        prev.set(Position::new(3, 3), Creature::shark(3));
        let snapshot = prev.clone();
        let mut rng = ChaChaSource::seed_from_u64(2);

        let _ = step(&prev, &rules(), &mut rng);

        assert_eq!(prev, snapshot);
    }

    #[test]
    fn test_first_fish_claims_contested_cell() {
        // Two fish race for the cell between them; the first in row-major
        // order claims it and the second is blocked.
        let mut prev = Grid::new(5);
        prev.set(Position::new(1, 1), Creature::fish());
        prev.set(Position::new(3, 1), Creature::fish());
        // Surround both fish except for the shared cell (2, 1)
        for pos in [
            Position::new(1, 0),
            Position::new(1, 2),
            Position::new(0, 1),
            Position::new(3, 0),
            Position::new(3, 2),
            Position::new(4, 1),
        ] {
            prev.set(pos, Creature::shark(9));
        }
        let mut rng = SequenceSource::zeros();

        let next = run_rows(&prev, 0..5, &rules(), &mut rng);

        assert_eq!(next.grid().kind_at(Position::new(2, 1)), CellKind::Fish);
        assert_eq!(next.tally().blocked_moves, 1);
        // Every shark has a fish neighbour, so all of them eat
        assert_eq!(next.tally().meals, 6);
        assert_eq!(next.grid().kind_at(Position::new(3, 1)), CellKind::Shark);
    }

    #[test]
    fn test_rows_restrict_work() {
        let mut prev = Grid::new(4);
        prev.set(Position::new(0, 0), Creature::fish());
        prev.set(Position::new(0, 3), Creature::fish());
        let mut rng = ChaChaSource::seed_from_u64(3);

        let next = run_rows(&prev, 0..1, &rules(), &mut rng);

        assert_eq!(next.grid().count_kinds().fish, 1);
    }
}
