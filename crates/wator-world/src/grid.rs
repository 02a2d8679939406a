//! 2D toroidal grid for the ocean.

use crate::creature::Creature;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use wator_core::{CellKind, Direction, PopulationCounts, Position, SimConfig};

/// A square toroidal grid of optional creatures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: i32,
    cells: Vec<Option<Creature>>,
}

impl Grid {
    /// An empty grid of side `size`. `size` must fit in an `i32`.
    pub fn new(size: usize) -> Self {
        Self {
            size: size as i32,
            cells: vec![None; size * size],
        }
    }

    /// Create a grid from configuration, placing fish then sharks on
    /// distinct cells drawn from one random permutation of all cells.
    pub fn populate<R: RandomSource>(config: &SimConfig, rng: &mut R) -> Self {
        let mut grid = Self::new(config.grid_size);

        let mut positions: Vec<usize> = (0..grid.cells.len()).collect();
        rng.shuffle(&mut positions);
        let mut slots = positions.into_iter();

        for index in slots.by_ref().take(config.num_fish) {
            grid.cells[index] = Some(Creature::fish());
        }
        for index in slots.take(config.num_shark) {
            grid.cells[index] = Some(Creature::shark(config.starve));
        }

        grid
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Get creature at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Option<&Creature> {
        self.cells[self.pos_to_index(pos)].as_ref()
    }

    /// Set the contents of a cell, replacing whatever was there
    pub fn set(&mut self, pos: Position, creature: Creature) {
        let index = self.pos_to_index(pos);
        self.cells[index] = Some(creature);
    }

    /// Empty a cell, returning its previous occupant
    pub fn take(&mut self, pos: Position) -> Option<Creature> {
        let index = self.pos_to_index(pos);
        self.cells[index].take()
    }

    /// Write only if the cell is still free. Returns whether the write happened.
    pub fn place_if_empty(&mut self, pos: Position, creature: Creature) -> bool {
        let index = self.pos_to_index(pos);
        match self.cells[index] {
            Some(_) => false,
            None => {
                self.cells[index] = Some(creature);
                true
            }
        }
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    pub fn kind_at(&self, pos: Position) -> CellKind {
        self.get(pos).map_or(CellKind::Empty, Creature::kind)
    }

    /// The four toroidal neighbours of `pos` in N, E, S, W order
    pub fn neighbors(&self, pos: Position) -> [Position; 4] {
        let pos = pos.wrap(self.size);
        Direction::all().map(|direction| pos.step(direction, self.size))
    }

    /// Neighbours with no occupant
    pub fn empty_neighbors(&self, pos: Position) -> Vec<Position> {
        self.neighbors(pos)
            .into_iter()
            .filter(|&n| self.is_empty(n))
            .collect()
    }

    /// Neighbours occupied by a fish
    pub fn fish_neighbors(&self, pos: Position) -> Vec<Position> {
        self.neighbors(pos)
            .into_iter()
            .filter(|&n| self.get(n).is_some_and(Creature::is_fish))
            .collect()
    }

    pub fn count_kinds(&self) -> PopulationCounts {
        self.cells
            .iter()
            .flatten()
            .fold(PopulationCounts::default(), |mut counts, creature| {
                if creature.is_fish() {
                    counts.fish += 1;
                } else {
                    counts.sharks += 1;
                }
                counts
            })
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = pos.wrap(self.size);
        wrapped.y as usize * self.size() + wrapped.x as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.size;
        let y = (index as i32) / self.size;
        Position::new(x, y)
    }

    /// Iterator over occupied cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Creature)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|c| (self.index_to_pos(i), c)))
    }

    /// Occupied cells within rows `rows`, row-major
    pub fn iter_rows(
        &self,
        rows: std::ops::Range<usize>,
    ) -> impl Iterator<Item = (Position, &Creature)> + '_ {
        let width = self.size();
        let start = rows.start * width;
        let end = rows.end.min(self.size()) * width;
        self.cells[start..end]
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| {
                cell.as_ref().map(|c| (self.index_to_pos(start + i), c))
            })
    }

    /// Raw cell slots in row-major order
    pub fn cells(&self) -> &[Option<Creature>] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Option<Creature>] {
        &mut self.cells
    }
}
