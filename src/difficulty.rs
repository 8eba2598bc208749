//! Difficulty selection and the profiles it resolves to.
//!
//! Selection is a closed enum matched directly; profiles cannot be
//! confused by name-string comparison.

use serde::{Deserialize, Serialize};

/// Difficulty levels selectable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Next difficulty in menu order, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Previous difficulty in menu order, wrapping around.
    pub fn prev(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }

    /// Resolve the generation/pacing profile for this difficulty.
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                name: "Easy",
                row_count: 20,
                obstacle_probability: 0.1,
                step_time: 2.5,
            },
            Difficulty::Medium => DifficultyProfile {
                name: "Medium",
                row_count: 30,
                obstacle_probability: 0.15,
                step_time: 2.0,
            },
            Difficulty::Hard => DifficultyProfile {
                name: "Hard",
                row_count: 40,
                obstacle_probability: 0.3,
                step_time: 1.5,
            },
        }
    }
}

/// Generation and pacing parameters for one level
///
/// Immutable once selected; the engine copies `step_time` into its own
/// state so skills can mutate the copy without touching the profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyProfile {
    pub name: &'static str,
    /// Number of obstacle rows the level scrolls through.
    pub row_count: usize,
    /// Independent per-cell obstacle probability in [0, 1].
    pub obstacle_probability: f64,
    /// Seconds between scroll steps.
    pub step_time: f64,
}
