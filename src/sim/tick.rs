//! Per-tick level driver.
//!
//! One [`LevelSession`] owns everything mutable for a single level: the
//! obstacle grid, the engine state and the charge meter. All mutation runs
//! through [`LevelSession::advance`] in a fixed order, so every piece of
//! shared state has exactly one writer per tick phase.

use rand::Rng;
use serde::Serialize;

use crate::consts::*;
use crate::difficulty::DifficultyProfile;
use crate::input::MotionEvents;
use crate::sim::grid::{Cell, Grid, generate_grid};
use crate::sim::skills::{Character, try_activate};
use crate::sim::state::{ChargeState, EngineState, LevelPhase, check_collision, visible_window};

/// What happened during one tick, for the audio/LED collaborators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The scroll advanced one row.
    pub stepped: bool,
    /// A skill fired this tick.
    pub skill_fired: bool,
    /// The player hit an obstacle (already resolved: penalty applied, cell
    /// cleared).
    pub collided: bool,
    /// The level just finished.
    pub completed: bool,
}

/// One level's worth of game state
#[derive(Debug, Clone, Serialize)]
pub struct LevelSession {
    grid: Grid,
    engine: EngineState,
    charge: ChargeState,
    character: Character,
    phase: LevelPhase,
}

impl LevelSession {
    /// Generate a fresh level for the given profile and character.
    pub fn new(
        profile: &DifficultyProfile,
        character: Character,
        rng: &mut impl Rng,
        now: f64,
    ) -> Self {
        let grid = generate_grid(profile, rng);
        let engine = EngineState::new(grid.len(), profile.step_time, now);
        log::info!(
            "level start: {} ({} rows, step {:.1}s) as {}",
            profile.name,
            grid.len(),
            profile.step_time,
            character.name()
        );
        Self {
            grid,
            engine,
            charge: ChargeState::new(),
            character,
            phase: LevelPhase::Scrolling,
        }
    }

    /// Run one game tick: scroll step, lateral movement, skill on shake,
    /// collision resolution, completion check - in that order.
    ///
    /// Completed levels ignore further ticks.
    pub fn advance(&mut self, now: f64, events: MotionEvents) -> TickReport {
        let mut report = TickReport::default();
        if self.phase == LevelPhase::Complete {
            return report;
        }

        if self.engine.step(now) {
            report.stepped = true;
            self.charge.add(CHARGE_PER_STEP);
        }

        self.engine.move_player(events.left, events.right);

        if events.shake {
            report.skill_fired = try_activate(
                &mut self.charge,
                self.character,
                &mut self.engine,
                &mut self.grid,
            );
        }

        if check_collision(&self.grid, self.engine.offset, self.engine.player_col) {
            self.engine.score -= COLLISION_PENALTY;
            // A hit consumes the obstacle so it cannot collide again.
            self.grid
                .clear_cell(self.engine.player_row() as usize, self.engine.player_col);
            report.collided = true;
            log::debug!(
                "hit at row {} col {} (score {})",
                self.engine.player_row(),
                self.engine.player_col,
                self.engine.score
            );
        }

        if self.engine.complete() {
            self.phase = LevelPhase::Complete;
            report.completed = true;
            log::info!("level complete, score {}", self.engine.score);
        }

        report
    }

    // Read accessors for the rendering collaborator.

    pub fn offset(&self) -> i32 {
        self.engine.offset
    }

    pub fn score(&self) -> i64 {
        self.engine.score
    }

    pub fn charge(&self) -> f32 {
        self.charge.charge()
    }

    pub fn charge_percent(&self) -> u8 {
        self.charge.percent()
    }

    pub fn player_col(&self) -> usize {
        self.engine.player_col
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    /// The 5 rows currently on screen.
    pub fn visible_window(&self) -> [[Cell; GRID_WIDTH]; VISIBLE_ROWS] {
        visible_window(&self.grid, self.engine.offset)
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}
