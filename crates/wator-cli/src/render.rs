//! ANSI text rendering of the ocean.

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use wator_core::CellKind;
use wator_world::{RandomSource, World};

/// Write the grid, one row per line: green `f` for fish, red `S` for sharks,
/// blue `.` for empty water.
pub fn write_grid<W: Write, R: RandomSource>(out: &mut W, world: &World<R>) -> io::Result<()> {
    let size = world.config().grid_size;
    for y in 0..size {
        for x in 0..size {
            match world.cell_kind(x, y) {
                CellKind::Empty => write!(out, "{} ", ".".blue())?,
                CellKind::Fish => write!(out, "{} ", "f".green())?,
                CellKind::Shark => write!(out, "{} ", "S".red())?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Clear the terminal and draw one frame with its step header.
pub fn draw_frame<W: Write, R: RandomSource>(
    out: &mut W,
    world: &World<R>,
    step: u64,
) -> io::Result<()> {
    let counts = world.counts();
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    writeln!(out, "Step {step}")?;
    writeln!(out, "Fish={}  Sharks={}", counts.fish, counts.sharks)?;
    write_grid(out, world)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wator_core::{Position, SimConfig};
    use wator_world::{Creature, Grid, SequenceSource};

    fn sample_world() -> World<SequenceSource> {
        let config = SimConfig {
            grid_size: 3,
            num_fish: 0,
            num_shark: 0,
            ..Default::default()
        };
        let mut grid = Grid::new(3);
        grid.set(Position::new(0, 0), Creature::fish());
        grid.set(Position::new(2, 1), Creature::shark(3));
        World::from_grid(config, grid, SequenceSource::zeros()).unwrap()
    }

    #[test]
    fn test_grid_symbols() {
        let world = sample_world();
        let mut out = Vec::new();
        write_grid(&mut out, &world).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].matches('f').count(), 1);
        assert_eq!(lines[1].matches('S').count(), 1);
        assert_eq!(text.matches('.').count(), 7);
    }

    #[test]
    fn test_frame_header() {
        let world = sample_world();
        let mut out = Vec::new();
        draw_frame(&mut out, &world, 4).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Step 4"));
        assert!(text.contains("Fish=1  Sharks=1"));
    }
}
