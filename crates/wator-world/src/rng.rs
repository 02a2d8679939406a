//! Random sources used for placement and neighbour selection.
//!
//! A step never shares mutable generator state between workers: each worker
//! receives its own source through [`RandomSource::fork`]. [`ChaChaSource`]
//! forks into independent ChaCha streams, [`SharedSource`] forks into handles
//! onto one mutex-guarded generator, and [`SequenceSource`] replays a fixed
//! sequence for deterministic tests.

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

pub trait RandomSource: Send {
    /// Uniform integer in `0..n`. `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize;

    /// Derive the source handed to worker `stream` for one parallel step.
    fn fork(&mut self, stream: u64) -> Self
    where
        Self: Sized;

    /// Pick one element uniformly, or `None` for an empty slice.
    fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            None
        } else {
            Some(items[self.below(items.len())])
        }
    }

    /// Uniform in-place permutation (Fisher-Yates).
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

/// Seedable ChaCha8 generator, forked into independent per-worker streams.
#[derive(Debug, Clone)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, otherwise from OS entropy
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seed_from_u64(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for ChaChaSource {
    fn below(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    fn fork(&mut self, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(self.rng.gen());
        rng.set_stream(stream);
        Self { rng }
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// One generator shared by every worker behind a lock.
///
/// Forking hands out another handle to the same generator, so the sequence of
/// draws depends on how workers interleave.
#[derive(Debug, Clone)]
pub struct SharedSource {
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl SharedSource {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }
}

impl RandomSource for SharedSource {
    fn below(&mut self, n: usize) -> usize {
        self.rng.lock().gen_range(0..n)
    }

    fn fork(&mut self, _stream: u64) -> Self {
        self.clone()
    }
}

/// Replays a fixed cycle of values, each reduced modulo the requested bound.
///
/// Every fork restarts the cycle from the beginning.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<usize>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always picks the first candidate
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for SequenceSource {
    fn below(&mut self, n: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % n
    }

    fn fork(&mut self, _stream: u64) -> Self {
        Self::new(self.values.clone())
    }
}
