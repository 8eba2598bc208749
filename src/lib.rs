//! Tilt Runner - a sensor-driven lane runner core
//!
//! Core modules:
//! - `input`: Debounced knob/button events and accelerometer motion classification
//! - `sim`: Deterministic simulation (obstacle grid, scrolling, collisions, skills)
//! - `difficulty`: Difficulty profiles driving grid generation and scroll pacing
//! - `highscores`: Flat top-3 scoreboard
//!
//! Rendering, LED animation and audio are external collaborators: they consume
//! the read accessors on [`sim::LevelSession`] once per tick and never mutate
//! core state.

pub mod difficulty;
pub mod highscores;
pub mod input;
pub mod sim;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Number of lanes (grid columns). The player column is always in
    /// `0..GRID_WIDTH`.
    pub const GRID_WIDTH: usize = 5;
    /// Rows visible on the display at once.
    pub const VISIBLE_ROWS: usize = 5;
    /// The player sits on the last visible row: `offset + PLAYER_ROW_OFFSET`.
    pub const PLAYER_ROW_OFFSET: i32 = 4;

    /// Score awarded per scroll step.
    pub const STEP_SCORE: i64 = 10;
    /// Score penalty on collision.
    pub const COLLISION_PENALTY: i64 = 50;

    /// Charge meter capacity.
    pub const MAX_CHARGE: f32 = 100.0;
    /// Charge gained per scroll step.
    pub const CHARGE_PER_STEP: f32 = 5.0;

    /// Step time set by Homura's Time Slow, in seconds.
    pub const TIME_SLOW_STEP_TIME: f64 = 4.0;
    /// Rows cleared (full width) by Madoka's Full Screen Purify.
    pub const PURIFY_ROWS: usize = 6;
    /// Rows cleared (single column) by Mami's Long-range Attack.
    pub const VOLLEY_ROWS: usize = 10;
    /// Rows skipped by Kyouko's Fast Dash.
    pub const DASH_ROWS: i32 = 3;
    /// Score restored by Sayaka's Self Heal.
    pub const HEAL_SCORE: i64 = 200;
}
