//! Row-partitioned chronon across scoped worker threads.
//!
//! Workers are spawned fresh for each step and joined before it returns. Each
//! one reads the shared previous grid, writes into a private next state and
//! draws from its own forked random source. The private states are then
//! merged cell by cell in worker order: a shark beats a fish, and between two
//! creatures of the same kind the lower worker index wins.

use crate::creature::Creature;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::rules::{NextState, Rules, StepTally};
use crate::sequential;
use std::ops::Range;
use std::thread;
use tracing::{instrument, trace};

/// Split `size` rows into contiguous ranges, one per worker.
///
/// The worker count is capped at the row count, so every range holds at least
/// one row. Ranges are as even as ceiling division allows; trailing workers
/// that would receive no rows are dropped.
pub fn row_partitions(size: usize, workers: usize) -> Vec<Range<usize>> {
    if size == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, size);
    let rows_per_worker = size.div_ceil(workers);

    (0..workers)
        .map(|w| (w * rows_per_worker)..((w + 1) * rows_per_worker).min(size))
        .filter(|rows| !rows.is_empty())
        .collect()
}

/// Pick the surviving occupant when two workers wrote the same cell.
pub fn resolve_conflict(
    current: Option<Creature>,
    incoming: Option<Creature>,
) -> Option<Creature> {
    match (current, incoming) {
        (None, incoming) => incoming,
        (Some(current), Some(incoming)) if current.is_fish() && incoming.is_shark() => {
            Some(incoming)
        }
        (current, _) => current,
    }
}

/// Fold worker states, given in worker-index order, into one next state.
///
/// A fish that loses its cell in the merge also loses its arrival record, so
/// a later meal at its old cell cannot remove the fish that won.
pub fn merge(size: usize, drafts: Vec<NextState>) -> NextState {
    let mut drafts = drafts.into_iter();
    let Some(mut merged) = drafts.next() else {
        return NextState::new(size);
    };

    for mut draft in drafts {
        let mut overwritten = Vec::new();
        let mut rejected = Vec::new();

        let cells = merged.grid.cells_mut().iter_mut().zip(draft.grid.cells());
        for (index, (slot, incoming)) in cells.enumerate() {
            if let (Some(current), Some(arriving)) = (*slot, *incoming) {
                merged.tally.merge_conflicts += 1;
                if current.is_fish() && arriving.is_shark() {
                    overwritten.push(index);
                } else {
                    rejected.push(index);
                }
            }
            *slot = resolve_conflict(*slot, *incoming);
        }

        for index in overwritten {
            merged.arrivals.remove(&merged.grid.index_to_pos(index));
        }
        for index in rejected {
            draft.arrivals.remove(&merged.grid.index_to_pos(index));
        }
        merged.arrivals.extend(draft.arrivals);
        merged.escaped_prey.extend(draft.escaped_prey);
        merged.tally += draft.tally;
    }

    merged
}

/// Compute the next grid with up to `workers` threads.
#[instrument(skip(prev, rules, rng), fields(size = prev.size()))]
pub fn step<R: RandomSource>(
    prev: &Grid,
    rules: &Rules,
    workers: usize,
    rng: &mut R,
) -> (Grid, StepTally) {
    let partitions = row_partitions(prev.size(), workers);
    let sources: Vec<R> = (0..partitions.len())
        .map(|index| rng.fork(index as u64))
        .collect();

    let drafts: Vec<NextState> = thread::scope(|scope| {
        let handles: Vec<_> = partitions
            .into_iter()
            .zip(sources)
            .enumerate()
            .map(|(index, (rows, mut source))| {
                trace!(worker = index, start = rows.start, end = rows.end, "Spawning worker");
                scope.spawn(move || sequential::run_rows(prev, rows, rules, &mut source))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    });

    merge(prev.size(), drafts).finish()
}
