//! Tilt Runner demo entry point.
//!
//! Runs one level against synthetic peripherals on an accelerated clock:
//! a scripted knob picks the difficulty, a synthetic accelerometer tilts
//! across lanes and shakes for the skill. This is the reference
//! orchestration loop; on hardware the same calls run against real
//! drivers with a sleep-paced tick.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use tilt_runner::Difficulty;
use tilt_runner::highscores::HighScores;
use tilt_runner::input::{
    Accelerometer, InputEvent, KnobConfig, KnobDebouncer, KnobPort, MotionClassifier,
    MotionConfig, SensorError,
};
use tilt_runner::sim::{Cell, Character, LevelPhase, LevelSession};

/// Synthetic accelerometer: level gravity with periodic tilt holds and
/// one shake burst once the charge meter should be full.
struct DemoAccel {
    tick: u64,
}

impl Accelerometer for DemoAccel {
    fn read(&mut self) -> Result<Vec3, SensorError> {
        self.tick += 1;
        let t = self.tick;
        // Shake burst once the meter should be full: alternate hard swings
        if (340..350).contains(&t) {
            let sign = if t % 2 == 0 { 1.0 } else { -1.0 };
            return Ok(Vec3::new(0.0, sign * 30.0, 9.81));
        }
        // Tilt holds: right early, left later
        let x = match t % 600 {
            100..=140 => 6.0,
            300..=340 => -6.0,
            _ => 0.0,
        };
        Ok(Vec3::new(x, 0.0, 9.81))
    }
}

/// Scripted knob: two clockwise detents then a press, selecting Hard.
struct DemoKnob {
    poll: u32,
}

impl KnobPort for DemoKnob {
    fn take_pulses(&mut self) -> i32 {
        self.poll += 1;
        match self.poll {
            10 | 60 => 3,
            _ => 0,
        }
    }

    fn button_level(&mut self) -> bool {
        self.poll < 100
    }
}

fn select_difficulty() -> Difficulty {
    let mut knob = KnobDebouncer::new(DemoKnob { poll: 0 }, KnobConfig::default());
    let mut difficulty = Difficulty::Easy;
    let mut now = 0.0;
    loop {
        now += 0.01;
        match knob.check(now) {
            Some(InputEvent::Turn(delta)) => {
                difficulty = if delta > 0 {
                    difficulty.next()
                } else {
                    difficulty.prev()
                };
                log::info!("difficulty -> {}", difficulty.as_str());
            }
            Some(InputEvent::Press) => return difficulty,
            None => {}
        }
    }
}

fn render_window(session: &LevelSession) {
    let window = session.visible_window();
    for (i, row) in window.iter().enumerate() {
        let line: String = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                if i == window.len() - 1 && col == session.player_col() {
                    '@'
                } else if *cell == Cell::Obstacle {
                    'X'
                } else {
                    '.'
                }
            })
            .collect();
        println!("  |{line}|");
    }
    println!(
        "  offset {:>2}  score {:>5}  charge {:>3}%",
        session.offset(),
        session.score(),
        session.charge_percent()
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let difficulty = select_difficulty();
    let character = Character::Sayaka;
    log::info!(
        "playing {} as {} ({})",
        difficulty.as_str(),
        character.name(),
        character.skill_name()
    );

    let mut motion = MotionClassifier::new(DemoAccel { tick: 0 }, MotionConfig::default());
    if let Err(err) = motion.calibrate() {
        log::error!("calibration failed: {err}");
        std::process::exit(1);
    }

    let mut rng = Pcg32::seed_from_u64(0xDECAF);
    let mut session = LevelSession::new(&difficulty.profile(), character, &mut rng, 0.0);

    // Accelerated clock: 0.1 s per tick, no sleeping.
    let mut now = 0.0;
    while session.phase() == LevelPhase::Scrolling {
        now += 0.1;
        let events = match motion.update(now) {
            Ok(events) => events,
            Err(err) => {
                log::error!("sensor failure: {err}");
                std::process::exit(1);
            }
        };
        let report = session.advance(now, events);
        if report.stepped {
            render_window(&session);
        }
    }

    println!("Level passed! Score: {}", session.score());

    let path = std::env::temp_dir().join("tilt_runner_scores.json");
    let mut scores = HighScores::load(&path);
    if let Some(rank) = scores.add_score(character.name(), session.score()) {
        println!("New high score! Rank {rank}");
    }
    scores.save(&path);
    for line in scores.display_lines() {
        println!("{line}");
    }
}
