//! Input classification layer
//!
//! Two independent front-ends feed the game:
//! - `knob`: rotary encoder + push button, debounced into discrete menu events
//! - `motion`: 3-axis accelerometer stream, classified into left/right/shake
//!
//! Both are polled once per loop iteration and hold their own debounce and
//! cooldown state. Raw peripherals sit behind the traits in `sources` so
//! tests and the demo binary can script them.

pub mod knob;
pub mod motion;
pub mod sources;

pub use knob::{InputEvent, KnobConfig, KnobDebouncer};
pub use motion::{MotionClassifier, MotionConfig, MotionEvents};
pub use sources::{Accelerometer, KnobPort, ScriptedAccel, SensorError};
