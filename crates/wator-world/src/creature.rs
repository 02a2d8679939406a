//! Creature state.

use serde::{Deserialize, Serialize};
use wator_core::CellKind;

/// Whether a creature is prey or predator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Fish,
    Shark,
}

impl From<Species> for CellKind {
    fn from(species: Species) -> Self {
        match species {
            Species::Fish => CellKind::Fish,
            Species::Shark => CellKind::Shark,
        }
    }
}

/// A fish or shark occupying one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub species: Species,
    /// Chronons since creation or the last successful reproduction
    pub breed_counter: u32,
    /// Remaining chronons before starvation. Always 0 for fish.
    pub energy: u32,
}

impl Creature {
    /// A newborn fish
    pub fn fish() -> Self {
        Self {
            species: Species::Fish,
            breed_counter: 0,
            energy: 0,
        }
    }

    /// A newborn shark with the given energy
    pub fn shark(energy: u32) -> Self {
        Self {
            species: Species::Shark,
            breed_counter: 0,
            energy,
        }
    }

    pub fn with_breed_counter(mut self, breed_counter: u32) -> Self {
        self.breed_counter = breed_counter;
        self
    }

    pub fn is_fish(&self) -> bool {
        self.species == Species::Fish
    }

    pub fn is_shark(&self) -> bool {
        self.species == Species::Shark
    }

    pub fn kind(&self) -> CellKind {
        self.species.into()
    }
}
