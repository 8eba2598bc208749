//! Abstractions over raw input peripherals.
//!
//! Implementations: hardware drivers on the device, scripted sources for
//! tests and the demo binary.

use std::collections::VecDeque;

use glam::Vec3;
use thiserror::Error;

/// Fatal peripheral failures.
///
/// Sensor reads are assumed to return promptly; a failed read is not
/// retried and ends the run.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("accelerometer read failed during calibration (sample {sample})")]
    CalibrationRead { sample: usize },
    #[error("accelerometer read failed")]
    AccelRead,
}

/// A 3-axis accelerometer.
///
/// `read` returns one sample in m/s²; the driver is expected to pace
/// consecutive reads at its output data rate.
pub trait Accelerometer {
    fn read(&mut self) -> Result<Vec3, SensorError>;
}

/// Raw rotary encoder + push button lines.
pub trait KnobPort {
    /// Signed quadrature pulses accumulated since the last call.
    fn take_pulses(&mut self) -> i32;
    /// Current button line level. The button is active-low: `false` means
    /// pressed.
    fn button_level(&mut self) -> bool;
}

/// Scripted accelerometer replaying a fixed sample sequence.
///
/// Once the script is exhausted, reads repeat the last sample; an empty
/// script fails every read (used to exercise the fatal path).
#[derive(Debug, Clone, Default)]
pub struct ScriptedAccel {
    samples: VecDeque<Vec3>,
    last: Option<Vec3>,
}

impl ScriptedAccel {
    pub fn new(samples: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            last: None,
        }
    }

    /// Queue more samples onto the end of the script.
    pub fn push(&mut self, sample: Vec3) {
        self.samples.push_back(sample);
    }
}

impl Accelerometer for ScriptedAccel {
    fn read(&mut self) -> Result<Vec3, SensorError> {
        if let Some(sample) = self.samples.pop_front() {
            self.last = Some(sample);
            return Ok(sample);
        }
        self.last.ok_or(SensorError::AccelRead)
    }
}
