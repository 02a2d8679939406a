//! World simulation engine.
//!
//! This crate implements the toroidal ocean where fish and sharks move, feed,
//! starve and breed, one chronon at a time.

pub mod creature;
pub mod grid;
pub mod parallel;
pub mod rng;
pub mod rules;
pub mod sequential;
pub mod world;

pub use creature::Creature;
pub use grid::Grid;
pub use rng::{ChaChaSource, RandomSource, SequenceSource, SharedSource};
pub use rules::Rules;
pub use world::World;
