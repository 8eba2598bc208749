//! Characters and the charge-gated skill system.
//!
//! Each character is one variant of a closed enum carrying its display
//! attributes and effect; adding a character is a type-checked addition,
//! not a new integer index. Effects mutate engine/grid state directly and
//! are not reversible; every effect re-validates bounds against the
//! current grid and offset before touching anything.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::grid::Grid;
use crate::sim::state::{ChargeState, EngineState};

/// Playable characters, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Character {
    #[default]
    Homura,
    Madoka,
    Mami,
    Sayaka,
    Kyouko,
}

/// Marker shape used by the display collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Diamond,
    Circle,
    Flower,
    Square,
    Triangle,
}

impl Character {
    pub const ALL: [Character; 5] = [
        Character::Homura,
        Character::Madoka,
        Character::Mami,
        Character::Sayaka,
        Character::Kyouko,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Character::Homura => "Homura",
            Character::Madoka => "Madoka",
            Character::Mami => "Mami",
            Character::Sayaka => "Sayaka",
            Character::Kyouko => "Kyouko",
        }
    }

    pub fn skill_name(&self) -> &'static str {
        match self {
            Character::Homura => "Time Slow",
            Character::Madoka => "Full Screen Purify",
            Character::Mami => "Long-range Attack",
            Character::Sayaka => "Self Heal",
            Character::Kyouko => "Fast Dash",
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Character::Homura => Shape::Diamond,
            Character::Madoka => Shape::Circle,
            Character::Mami => Shape::Flower,
            Character::Sayaka => Shape::Square,
            Character::Kyouko => Shape::Triangle,
        }
    }

    /// LED color for the character, as RGB.
    pub fn color(&self) -> [u8; 3] {
        match self {
            Character::Homura => [150, 0, 220],
            Character::Madoka => [200, 50, 70],
            Character::Mami => [230, 160, 10],
            Character::Sayaka => [60, 140, 255],
            Character::Kyouko => [230, 10, 10],
        }
    }

    /// Next character in menu order, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            Character::Homura => Character::Madoka,
            Character::Madoka => Character::Mami,
            Character::Mami => Character::Sayaka,
            Character::Sayaka => Character::Kyouko,
            Character::Kyouko => Character::Homura,
        }
    }

    /// Previous character in menu order, wrapping around.
    pub fn prev(&self) -> Self {
        match self {
            Character::Homura => Character::Kyouko,
            Character::Madoka => Character::Homura,
            Character::Mami => Character::Madoka,
            Character::Sayaka => Character::Mami,
            Character::Kyouko => Character::Sayaka,
        }
    }
}

/// Fire the character's skill if the meter is full.
///
/// Returns false (state untouched) below full charge; otherwise drains the
/// meter and applies exactly one effect. There is no re-arm delay beyond
/// the charge gate.
pub fn try_activate(
    charge: &mut ChargeState,
    character: Character,
    engine: &mut EngineState,
    grid: &mut Grid,
) -> bool {
    if !charge.is_full() {
        return false;
    }
    charge.drain();
    apply_skill(character, engine, grid);
    log::info!("{} used {}", character.name(), character.skill_name());
    true
}

fn apply_skill(character: Character, engine: &mut EngineState, grid: &mut Grid) {
    match character {
        // Slows the scroll: fewer steps per second for the rest of the
        // level.
        Character::Homura => engine.step_time = TIME_SLOW_STEP_TIME,
        Character::Madoka => clear_region(grid, engine.offset, PURIFY_ROWS, None),
        Character::Mami => clear_region(grid, engine.offset, VOLLEY_ROWS, Some(engine.player_col)),
        Character::Sayaka => engine.score += HEAL_SCORE,
        // Dash clamps at 0; the completion check also accepts <= 0 so an
        // overshoot could never be missed.
        Character::Kyouko => engine.offset = (engine.offset - DASH_ROWS).max(0),
    }
}

/// Clear up to `row_span` rows starting at `offset`, either a single
/// column or the full width. Clamped to the grid on both ends.
fn clear_region(grid: &mut Grid, offset: i32, row_span: usize, col: Option<usize>) {
    let start = offset.max(0) as usize;
    let end = (offset.saturating_add(row_span as i32)).clamp(0, grid.len() as i32) as usize;
    for row in start..end {
        match col {
            Some(c) => grid.clear_cell(row, c),
            None => {
                for c in 0..GRID_WIDTH {
                    grid.clear_cell(row, c);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Cell;

    const X: Cell = Cell::Obstacle;

    fn full_grid(rows: usize) -> Grid {
        Grid::from_rows(vec![[X; GRID_WIDTH]; rows])
    }

    fn charged() -> ChargeState {
        let mut c = ChargeState::new();
        c.add(MAX_CHARGE);
        c
    }

    #[test]
    fn test_gate_rejects_partial_charge() {
        let mut charge = ChargeState::new();
        charge.add(MAX_CHARGE - 5.0);
        let mut engine = EngineState::new(20, 2.5, 0.0);
        let mut grid = full_grid(20);
        let before = (engine.clone(), grid.clone(), charge.charge());

        assert!(!try_activate(&mut charge, Character::Sayaka, &mut engine, &mut grid));
        assert_eq!(engine, before.0);
        assert_eq!(grid, before.1);
        assert_eq!(charge.charge(), before.2, "failed gate must not drain");
    }

    #[test]
    fn test_sayaka_heals_and_resets_charge() {
        let mut charge = charged();
        let mut engine = EngineState::new(20, 2.5, 0.0);
        let mut grid = full_grid(20);

        assert!(try_activate(&mut charge, Character::Sayaka, &mut engine, &mut grid));
        assert_eq!(engine.score, HEAL_SCORE);
        assert_eq!(charge.charge(), 0.0);
        // Gate is closed again immediately after
        assert!(!try_activate(&mut charge, Character::Sayaka, &mut engine, &mut grid));
        assert_eq!(engine.score, HEAL_SCORE);
    }

    #[test]
    fn test_homura_slows_scroll() {
        let mut charge = charged();
        let mut engine = EngineState::new(20, 1.5, 0.0);
        let mut grid = full_grid(20);

        assert!(try_activate(&mut charge, Character::Homura, &mut engine, &mut grid));
        assert_eq!(engine.step_time, TIME_SLOW_STEP_TIME);
    }

    #[test]
    fn test_madoka_clears_full_width_region() {
        let mut charge = charged();
        let mut engine = EngineState::new(20, 2.5, 0.0);
        engine.offset = 10;
        let mut grid = full_grid(20);

        assert!(try_activate(&mut charge, Character::Madoka, &mut engine, &mut grid));
        for row in 10..10 + PURIFY_ROWS {
            for col in 0..GRID_WIDTH {
                assert_eq!(grid.cell(row, col), Cell::Empty, "row {row} col {col}");
            }
        }
        // Rows outside the region are untouched
        assert_eq!(grid.cell(9, 0), X);
        assert_eq!(grid.cell(16, 0), X);
    }

    #[test]
    fn test_madoka_clamps_at_grid_end() {
        let mut charge = charged();
        let mut engine = EngineState::new(8, 2.5, 0.0);
        engine.offset = 5;
        let mut grid = full_grid(8);

        // Region would span rows 5..11; grid ends at 8
        assert!(try_activate(&mut charge, Character::Madoka, &mut engine, &mut grid));
        assert_eq!(grid.cell(7, 0), Cell::Empty);
        assert_eq!(grid.obstacle_count(), 5 * GRID_WIDTH);
    }

    #[test]
    fn test_mami_clears_single_column() {
        let mut charge = charged();
        let mut engine = EngineState::new(20, 2.5, 0.0);
        engine.offset = 2;
        engine.player_col = 3;
        let mut grid = full_grid(20);

        assert!(try_activate(&mut charge, Character::Mami, &mut engine, &mut grid));
        for row in 2..2 + VOLLEY_ROWS {
            assert_eq!(grid.cell(row, 3), Cell::Empty);
            assert_eq!(grid.cell(row, 2), X, "neighbor column untouched");
        }
        assert_eq!(grid.cell(1, 3), X);
        assert_eq!(grid.cell(12, 3), X);
    }

    #[test]
    fn test_kyouko_dash_clamps_at_zero() {
        let mut charge = charged();
        let mut engine = EngineState::new(20, 2.5, 0.0);
        engine.offset = 2;
        let mut grid = full_grid(20);

        assert!(try_activate(&mut charge, Character::Kyouko, &mut engine, &mut grid));
        assert_eq!(engine.offset, 0, "dash past the finish clamps to 0");
        assert!(engine.complete());
    }

    #[test]
    fn test_negative_offset_region_clamps_at_start() {
        // Defensive: a zero offset region never indexes below the grid.
        let mut grid = full_grid(4);
        clear_region(&mut grid, -2, 3, None);
        assert_eq!(grid.cell(0, 0), Cell::Empty);
        assert_eq!(grid.cell(1, 0), X);
    }

    #[test]
    fn test_menu_cycling_covers_all() {
        let mut c = Character::Homura;
        for expected in Character::ALL {
            assert_eq!(c, expected);
            c = c.next();
        }
        assert_eq!(c, Character::Homura);
        assert_eq!(Character::Homura.prev(), Character::Kyouko);
    }
}
