//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (grid generation takes the random source as a parameter)
//! - Time enters exclusively through the `now` argument of the tick driver
//! - No rendering, audio or platform dependencies
//!
//! Mutation flows through [`LevelSession::advance`] in a fixed per-tick
//! order: scroll step, lateral movement, skill on shake, collision, then
//! the completion check.

pub mod grid;
pub mod skills;
pub mod state;
pub mod tick;

pub use grid::{Cell, Grid, generate_grid};
pub use skills::{Character, try_activate};
pub use state::{ChargeState, EngineState, LevelPhase, check_collision, visible_window};
pub use tick::{LevelSession, TickReport};
