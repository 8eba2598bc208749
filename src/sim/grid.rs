//! Obstacle grid and its procedural generator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::GRID_WIDTH;
use crate::difficulty::DifficultyProfile;

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Obstacle,
}

/// The scrolling obstacle field for one level
///
/// Rows are ordered far-to-near: the row at index `offset + 4` is the one
/// under the player. Created once per level, mutated in place by collision
/// resolution and skill effects, discarded at level end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<[Cell; GRID_WIDTH]>,
}

impl Grid {
    /// Build a grid directly from rows (tests and tools).
    pub fn from_rows(rows: Vec<[Cell; GRID_WIDTH]>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row accessor; `None` past either end.
    pub fn row(&self, index: usize) -> Option<&[Cell; GRID_WIDTH]> {
        self.rows.get(index)
    }

    /// Cell accessor; out-of-bounds reads as `Empty`.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if col >= GRID_WIDTH {
            return Cell::Empty;
        }
        self.rows.get(row).map(|r| r[col]).unwrap_or(Cell::Empty)
    }

    /// Clear one cell to `Empty`. Out-of-bounds indices are ignored.
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        if col < GRID_WIDTH
            && let Some(r) = self.rows.get_mut(row)
        {
            r[col] = Cell::Empty;
        }
    }

    /// Count obstacles left in the grid.
    pub fn obstacle_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&c| c == Cell::Obstacle)
            .count()
    }
}

/// Generate a fresh obstacle field for one level.
///
/// Each cell independently becomes an obstacle with
/// `profile.obstacle_probability`. A fully blocked row gets one uniformly
/// random cell forced back to empty, so every row is individually passable.
/// Nothing guarantees a connected path across rows.
pub fn generate_grid(profile: &DifficultyProfile, rng: &mut impl Rng) -> Grid {
    let mut rows = Vec::with_capacity(profile.row_count);

    for _ in 0..profile.row_count {
        let mut row = [Cell::Empty; GRID_WIDTH];
        for cell in row.iter_mut() {
            if rng.random::<f64>() < profile.obstacle_probability {
                *cell = Cell::Obstacle;
            }
        }

        if row.iter().all(|&c| c == Cell::Obstacle) {
            row[rng.random_range(0..GRID_WIDTH)] = Cell::Empty;
        }

        rows.push(row);
    }

    let grid = Grid { rows };
    log::debug!(
        "generated {} rows ({} obstacles) for {}",
        grid.len(),
        grid.obstacle_count(),
        profile.name
    );
    grid
}
