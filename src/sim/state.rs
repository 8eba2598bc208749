//! Engine and charge state plus the collision/window queries.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::grid::{Cell, Grid};

/// Phase of a single level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Obstacle field is still advancing.
    Scrolling,
    /// Offset reached zero; terminal for this level instance.
    Complete,
}

/// Scroll, score and lane state for one level
///
/// `offset` counts down to 0 as the level progresses and never goes
/// negative; completion is checked with `<= 0` so a dash overshoot can
/// never slip past it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    /// Scroll position, initialized to the grid length.
    pub offset: i32,
    /// Seconds between scroll steps. Mutable by skills.
    pub step_time: f64,
    pub score: i64,
    /// Player lane, always in `0..GRID_WIDTH`.
    pub player_col: usize,
    /// Timestamp of the last scroll step.
    last_step: f64,
}

impl EngineState {
    pub fn new(grid_len: usize, step_time: f64, now: f64) -> Self {
        Self {
            offset: grid_len as i32,
            step_time,
            score: 0,
            player_col: GRID_WIDTH / 2,
            last_step: now,
        }
    }

    /// Advance the scroll if `step_time` has elapsed. Returns true when a
    /// step happened; the caller credits one charge increment per step.
    ///
    /// Step ticks are the sole driver of scroll progress and base scoring,
    /// independent of player input.
    pub fn step(&mut self, now: f64) -> bool {
        if now - self.last_step < self.step_time {
            return false;
        }
        self.offset = (self.offset - 1).max(0);
        self.score += STEP_SCORE;
        self.last_step = now;
        true
    }

    /// Apply lateral movement, clamped to the lane range. The motion
    /// classifier guarantees at most one direction per tick, but both are
    /// accepted defensively.
    pub fn move_player(&mut self, left: bool, right: bool) {
        if left {
            self.player_col = self.player_col.saturating_sub(1);
        }
        if right {
            self.player_col = (self.player_col + 1).min(GRID_WIDTH - 1);
        }
    }

    /// Level completion: offset at (or, defensively, below) zero.
    pub fn complete(&self) -> bool {
        self.offset <= 0
    }

    /// Row index currently under the player.
    pub fn player_row(&self) -> i32 {
        self.offset + PLAYER_ROW_OFFSET
    }
}

/// Charge meter gating skill activation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChargeState {
    charge: f32,
}

impl ChargeState {
    pub fn new() -> Self {
        Self { charge: 0.0 }
    }

    /// Add charge, saturating at the cap.
    pub fn add(&mut self, amount: f32) {
        self.charge = (self.charge + amount).min(MAX_CHARGE);
    }

    pub fn charge(&self) -> f32 {
        self.charge
    }

    /// Charge as a whole percentage for the HUD.
    pub fn percent(&self) -> u8 {
        (self.charge / MAX_CHARGE * 100.0).round() as u8
    }

    pub fn is_full(&self) -> bool {
        self.charge >= MAX_CHARGE
    }

    /// Spend the full meter. Only valid when full; callers gate on
    /// [`Self::is_full`].
    pub fn drain(&mut self) {
        self.charge = 0.0;
    }
}

/// Test the cell under the player.
///
/// Out-of-bounds rows (level edges) and columns are never a collision;
/// bounds are checked defensively rather than raised as errors.
pub fn check_collision(grid: &Grid, offset: i32, player_col: usize) -> bool {
    let player_row = offset + PLAYER_ROW_OFFSET;
    if player_row < 0 || player_row as usize >= grid.len() {
        return false;
    }
    if player_col >= GRID_WIDTH {
        return false;
    }
    grid.cell(player_row as usize, player_col) == Cell::Obstacle
}

/// The 5 rows starting at `offset`, for the rendering collaborator.
/// Rows beyond either end of the grid read as all-empty.
pub fn visible_window(grid: &Grid, offset: i32) -> [[Cell; GRID_WIDTH]; VISIBLE_ROWS] {
    let mut window = [[Cell::Empty; GRID_WIDTH]; VISIBLE_ROWS];
    for (i, row) in window.iter_mut().enumerate() {
        let index = offset + i as i32;
        if index >= 0
            && let Some(src) = grid.row(index as usize)
        {
            *row = *src;
        }
    }
    window
}
