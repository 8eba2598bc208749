//! Accelerometer motion classification.
//!
//! Turns the raw 3-axis stream into three boolean gameplay events per tick:
//! lane tilts (left/right) and shake. The pipeline is calibrate-once then
//! per-tick: baseline subtraction, per-axis exponential smoothing, and
//! threshold/cooldown gating.
//!
//! Why each stage exists: the EMA suppresses high-frequency jitter, the
//! consecutive-frame run requirement keeps single-sample spikes from
//! registering as a shake, and the lane cooldown stops one physical tilt
//! from relabeling as repeated lane changes.

use glam::Vec3;

use crate::input::sources::{Accelerometer, SensorError};

/// Classification thresholds and filter tuning
#[derive(Debug, Clone, Copy)]
pub struct MotionConfig {
    /// EMA coefficient in (0, 1]. Higher = faster, noisier.
    pub alpha: f32,
    /// Filtered x-axis magnitude that registers as a lane tilt, in m/s².
    pub tilt_threshold: f32,
    /// Minimum seconds between lane change events.
    pub lane_cooldown: f64,
    /// Frame-to-frame filtered delta that counts toward a shake, in m/s².
    pub shake_delta: f32,
    /// Consecutive over-threshold frames required to emit a shake.
    pub shake_frames: u32,
    /// Samples averaged during calibration.
    pub calibration_samples: usize,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            tilt_threshold: 2.2,
            lane_cooldown: 1.0,
            shake_delta: 2.5,
            shake_frames: 2,
            calibration_samples: 30,
        }
    }
}

/// Per-tick classification result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionEvents {
    pub left: bool,
    pub right: bool,
    pub shake: bool,
}

impl MotionEvents {
    /// True if any event fired this tick.
    pub fn any(&self) -> bool {
        self.left || self.right || self.shake
    }
}

/// Motion classifier owning its sensor
pub struct MotionClassifier<A> {
    accel: A,
    config: MotionConfig,
    /// Calibration offset removing gravity/mount bias.
    baseline: Vec3,
    /// Current smoothed sample (baseline-relative).
    filtered: Vec3,
    /// Smoothed sample from the previous tick.
    prev_filtered: Vec3,
    shake_run: u32,
    last_lane_change: f64,
}

impl<A: Accelerometer> MotionClassifier<A> {
    pub fn new(accel: A, config: MotionConfig) -> Self {
        Self {
            accel,
            config,
            baseline: Vec3::ZERO,
            filtered: Vec3::ZERO,
            prev_filtered: Vec3::ZERO,
            shake_run: 0,
            last_lane_change: 0.0,
        }
    }

    /// Average raw samples into the baseline triple.
    ///
    /// The device must be held still and level during this window; the
    /// driver paces consecutive reads at its output data rate. A read
    /// failure is fatal - there is no fallback baseline.
    pub fn calibrate(&mut self) -> Result<(), SensorError> {
        let n = self.config.calibration_samples.max(1);
        let mut sum = Vec3::ZERO;
        for sample in 0..n {
            sum += self
                .accel
                .read()
                .map_err(|_| SensorError::CalibrationRead { sample })?;
        }
        self.baseline = sum / n as f32;
        log::info!(
            "motion baseline: ({:.2}, {:.2}, {:.2}) over {} samples",
            self.baseline.x,
            self.baseline.y,
            self.baseline.z,
            n
        );
        Ok(())
    }

    /// Read one sample and classify it. Called once per game tick.
    ///
    /// Shake strictly preempts lane detection: a tick that completes a
    /// shake run reports only `shake`.
    pub fn update(&mut self, now: f64) -> Result<MotionEvents, SensorError> {
        let raw = self.accel.read()?;
        let alpha = self.config.alpha;
        self.filtered = (raw - self.baseline) * alpha + self.filtered * (1.0 - alpha);

        let delta = (self.filtered - self.prev_filtered).abs().max_element();
        if delta > self.config.shake_delta {
            self.shake_run += 1;
        } else {
            self.shake_run = 0;
        }
        // Previous triple tracks the current one regardless of outcome.
        self.prev_filtered = self.filtered;

        let mut events = MotionEvents::default();

        if self.shake_run >= self.config.shake_frames {
            self.shake_run = 0;
            events.shake = true;
            log::debug!("shake (delta {delta:.2})");
            return Ok(events);
        }

        let cooled = now - self.last_lane_change > self.config.lane_cooldown;
        if self.filtered.x > self.config.tilt_threshold && cooled {
            events.right = true;
            self.last_lane_change = now;
            log::debug!("tilt right (fx {:.2})", self.filtered.x);
        } else if self.filtered.x < -self.config.tilt_threshold && cooled {
            events.left = true;
            self.last_lane_change = now;
            log::debug!("tilt left (fx {:.2})", self.filtered.x);
        }

        Ok(events)
    }

    /// Current smoothed, baseline-relative reading.
    pub fn filtered(&self) -> Vec3 {
        self.filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::sources::ScriptedAccel;

    fn classifier(samples: Vec<Vec3>) -> MotionClassifier<ScriptedAccel> {
        MotionClassifier::new(ScriptedAccel::new(samples), MotionConfig::default())
    }

    /// Calibration script: 30 identical samples establishing the baseline.
    fn with_baseline(baseline: Vec3, rest: impl IntoIterator<Item = Vec3>) -> Vec<Vec3> {
        let mut samples = vec![baseline; MotionConfig::default().calibration_samples];
        samples.extend(rest);
        samples
    }

    #[test]
    fn test_calibration_averages_samples() {
        let mut samples = vec![Vec3::new(1.0, 0.0, 9.0); 15];
        samples.extend(vec![Vec3::new(3.0, 0.0, 11.0); 15]);
        let mut mc = classifier(samples);
        mc.calibrate().unwrap();
        assert!((mc.baseline.x - 2.0).abs() < 1e-5);
        assert!((mc.baseline.z - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_calibration_failure_is_fatal() {
        let mut mc = classifier(vec![]);
        assert!(matches!(
            mc.calibrate(),
            Err(SensorError::CalibrationRead { sample: 0 })
        ));
    }

    #[test]
    fn test_quiet_stream_emits_nothing() {
        let rest = vec![Vec3::new(0.1, -0.1, 9.81); 50];
        let mut mc = classifier(with_baseline(Vec3::new(0.0, 0.0, 9.81), rest));
        mc.calibrate().unwrap();
        for i in 0..50 {
            let events = mc.update(i as f64 * 0.1).unwrap();
            assert_eq!(events, MotionEvents::default());
        }
    }

    #[test]
    fn test_shake_requires_consecutive_frames() {
        // Alternating spike/quiet never builds a run of 2
        let mut rest = Vec::new();
        for i in 0..20 {
            rest.push(if i % 2 == 0 {
                Vec3::new(0.0, 30.0, 9.81)
            } else {
                Vec3::new(0.0, -30.0, 9.81)
            });
        }
        // Alternating +/-30 swings the filtered value far enough every
        // frame, so this does shake; a single spike does not:
        let single = vec![
            Vec3::new(0.0, 40.0, 9.81),
            Vec3::new(0.0, 0.0, 9.81),
            Vec3::new(0.0, 0.0, 9.81),
        ];
        let mut mc = classifier(with_baseline(Vec3::new(0.0, 0.0, 9.81), single));
        mc.calibrate().unwrap();
        let first = mc.update(0.0).unwrap();
        assert!(!first.shake, "single spike must not shake");
        // Second frame: filtered decays back toward zero. With alpha=0.2 the
        // first frame filtered y = 8.0, second = 6.4, delta 1.6 < 2.5.
        let second = mc.update(0.1).unwrap();
        assert!(!second.shake);

        let mut mc = classifier(with_baseline(Vec3::new(0.0, 0.0, 9.81), rest));
        mc.calibrate().unwrap();
        let mut shaken = false;
        for i in 0..20 {
            shaken |= mc.update(i as f64 * 0.1).unwrap().shake;
        }
        assert!(shaken, "sustained oscillation must shake");
    }

    #[test]
    fn test_shake_preempts_lane_tilt() {
        // Strong +x swing satisfies both the tilt threshold and the shake
        // delta; the shake must win and suppress `right`.
        let rest = vec![
            Vec3::new(40.0, 0.0, 9.81),
            Vec3::new(-40.0, 0.0, 9.81),
            Vec3::new(40.0, 0.0, 9.81),
        ];
        let mut mc = classifier(with_baseline(Vec3::new(0.0, 0.0, 9.81), rest));
        mc.calibrate().unwrap();
        let mut saw_shake = false;
        for i in 0..3 {
            let events = mc.update(i as f64 * 0.1).unwrap();
            if events.shake {
                saw_shake = true;
                assert!(!events.left && !events.right);
            }
        }
        assert!(saw_shake);
    }

    #[test]
    fn test_shake_resets_run_counter() {
        // Three over-threshold frames: shake fires on frame 2 (run reaches
        // shake_frames = 2) and frame 3 starts a fresh run of 1.
        let rest = vec![
            Vec3::new(0.0, 40.0, 9.81),
            Vec3::new(0.0, -40.0, 9.81),
            Vec3::new(0.0, 40.0, 9.81),
        ];
        let mut mc = classifier(with_baseline(Vec3::new(0.0, 0.0, 9.81), rest));
        mc.calibrate().unwrap();
        assert!(!mc.update(0.0).unwrap().shake);
        assert!(mc.update(0.1).unwrap().shake);
        assert!(!mc.update(0.2).unwrap().shake);
        assert_eq!(mc.shake_run, 1);
    }

    #[test]
    fn test_lane_tilt_right_then_cooldown() {
        // Sustained +x tilt: fires once, then the cooldown holds it off.
        let rest = vec![Vec3::new(6.0, 0.0, 9.81); 30];
        let mut mc = classifier(with_baseline(Vec3::new(0.0, 0.0, 9.81), rest));
        mc.calibrate().unwrap();

        let mut fire_times = Vec::new();
        for i in 0..30 {
            let now = i as f64 * 0.1;
            let events = mc.update(now).unwrap();
            if events.right {
                fire_times.push(now);
            }
            assert!(!events.left);
        }
        assert!(!fire_times.is_empty());
        for pair in fire_times.windows(2) {
            assert!(
                pair[1] - pair[0] > MotionConfig::default().lane_cooldown,
                "lane events {:.1}s apart violate cooldown",
                pair[1] - pair[0]
            );
        }
    }

    #[test]
    fn test_lane_tilt_left() {
        let rest = vec![Vec3::new(-6.0, 0.0, 9.81); 10];
        let mut mc = classifier(with_baseline(Vec3::new(0.0, 0.0, 9.81), rest));
        mc.calibrate().unwrap();
        let mut saw_left = false;
        for i in 0..10 {
            // Small per-frame change: EMA ramps toward -6 without tripping
            // the shake delta on later frames.
            let events = mc.update(1.0 + i as f64 * 0.1).unwrap();
            saw_left |= events.left;
            assert!(!events.right);
        }
        assert!(saw_left);
    }

    #[test]
    fn test_baseline_tilt_is_neutral() {
        // Device mounted at an angle: x reads a constant 3.0 which the
        // baseline absorbs, so no lane events fire.
        let rest = vec![Vec3::new(3.0, 0.0, 9.3); 20];
        let mut mc = classifier(with_baseline(Vec3::new(3.0, 0.0, 9.3), rest));
        mc.calibrate().unwrap();
        for i in 0..20 {
            assert_eq!(mc.update(i as f64).unwrap(), MotionEvents::default());
        }
    }

    #[test]
    fn test_read_failure_propagates() {
        let mut mc = classifier(vec![]);
        assert!(mc.update(0.0).is_err());
    }
}
