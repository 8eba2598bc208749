//! Rotary encoder and button debouncing.
//!
//! Raw pulses and the button level come from a [`KnobPort`]; this layer
//! turns them into at most one discrete [`InputEvent`] per poll. Intended
//! poll cadence is small and regular (~10 ms), but nothing here depends on
//! an exact rate - all windows are wall-clock based.

use crate::input::sources::KnobPort;

/// A discrete, debounced menu input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// One detent of rotation: +1 clockwise, -1 counter-clockwise.
    Turn(i8),
    /// Button held past the debounce window.
    Press,
}

/// Debounce tuning for the knob
#[derive(Debug, Clone, Copy)]
pub struct KnobConfig {
    /// Quadrature pulses that make up one detent.
    pub pulses_per_detent: i32,
    /// Minimum seconds between emitted turn events.
    pub encoder_cooldown: f64,
    /// Seconds the button must sit at a stable level before `Press` fires.
    pub button_cooldown: f64,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            pulses_per_detent: 3,
            encoder_cooldown: 0.3,
            button_cooldown: 0.3,
        }
    }
}

/// Debouncer over a raw encoder/button port
pub struct KnobDebouncer<P> {
    port: P,
    config: KnobConfig,
    /// Raw pulses not yet amounting to a full detent.
    pulse_accum: i32,
    last_turn_time: f64,
    /// Last observed button line level (true = released, active-low).
    last_button_level: bool,
    last_button_change: f64,
}

impl<P: KnobPort> KnobDebouncer<P> {
    pub fn new(port: P, config: KnobConfig) -> Self {
        Self {
            port,
            config,
            pulse_accum: 0,
            last_turn_time: 0.0,
            last_button_level: true,
            last_button_change: 0.0,
        }
    }

    /// Poll the port and return at most one event. Turn is checked before
    /// press, so a rotation and a press in the same window surface on
    /// consecutive polls.
    ///
    /// Note: `Press` refires while the button stays held, once the
    /// `button_cooldown` window has elapsed. The menu layer treats
    /// repeats as confirmation of the same press.
    pub fn check(&mut self, now: f64) -> Option<InputEvent> {
        if let Some(event) = self.check_turn(now) {
            return Some(event);
        }
        self.check_press(now)
    }

    fn check_turn(&mut self, now: f64) -> Option<InputEvent> {
        self.pulse_accum += self.port.take_pulses();

        let detents = self.pulse_accum / self.config.pulses_per_detent;
        if detents == 0 {
            return None;
        }
        if now - self.last_turn_time < self.config.encoder_cooldown {
            return None;
        }

        // Consume the reported detents, keep the remainder pulses.
        self.pulse_accum -= detents * self.config.pulses_per_detent;
        self.last_turn_time = now;

        let direction = if detents > 0 { 1 } else { -1 };
        log::debug!("knob turn {direction:+}");
        Some(InputEvent::Turn(direction))
    }

    fn check_press(&mut self, now: f64) -> Option<InputEvent> {
        let level = self.port.button_level();
        if level != self.last_button_level {
            self.last_button_level = level;
            self.last_button_change = now;
        }

        // Active-low: pressed while the line reads false.
        if !level && now - self.last_button_change >= self.config.button_cooldown {
            log::debug!("knob press");
            return Some(InputEvent::Press);
        }
        None
    }
}
