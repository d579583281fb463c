//! The per-cycle driver loop: tracker update, hit test, simulation tick.
//!
//! `GameDriver` owns both components by value, so every call into either one
//! goes through `&mut self` and is serialized by construction. The simulation
//! only ever sees the tracker's output coordinate, never its internals.

use bubble_core::{InputSample, PositionTracker, ScreenSize};

use crate::config::GameConfig;
use crate::replay::ReplaySequence;
use crate::session::GameEvent;
use crate::simulation::{BubbleSimulation, SimulationStats};

#[derive(Debug, Clone)]
pub struct GameDriver {
    tracker: PositionTracker,
    simulation: BubbleSimulation,
}

/// Outcome of a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub finished: bool,
    pub stats: SimulationStats,
}

impl GameDriver {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tracker: PositionTracker::new(config.tracker),
            simulation: BubbleSimulation::new(config.simulation, config.seed),
        }
    }

    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    pub fn simulation(&self) -> &BubbleSimulation {
        &self.simulation
    }

    #[allow(dead_code)]
    pub fn simulation_mut(&mut self) -> &mut BubbleSimulation {
        &mut self.simulation
    }

    /// Begin a round with a fresh tracker.
    pub fn start(&mut self, now: f64) -> bool {
        if self.simulation.is_playing() {
            return false;
        }
        self.tracker.reset();
        self.simulation.start(now)
    }

    pub fn stop(&mut self) -> bool {
        self.simulation.stop()
    }

    /// Process one input cycle at `now` and return the events it produced.
    pub fn step(&mut self, sample: &InputSample, screen: ScreenSize, now: f64) -> Vec<GameEvent> {
        let cursor = match sample {
            InputSample::Landmarks(observations) => {
                self.tracker.update(observations, screen, now)
            }
            InputSample::Pointer(pixel) => self.tracker.set_pointer(*pixel, screen, now),
            InputSample::Idle => self.tracker.update(&[], screen, now),
        };

        // The default center position is not a real cursor.
        if self.tracker.has_position() {
            self.simulation.check_hit(cursor);
        }
        self.simulation.tick(now);
        self.simulation.drain_events()
    }

    /// Start a round at `start_time` and feed the replay at its fixed rate,
    /// looping the inputs, until the round ends or `max_secs` elapse.
    pub fn run_replay(
        &mut self,
        replay: &ReplaySequence,
        start_time: f64,
        max_secs: f64,
    ) -> RunSummary {
        let inputs = replay.expanded_inputs();
        let mut steps = 0u64;

        if !inputs.is_empty() && self.start(start_time) {
            let max_steps = (max_secs / replay.fixed_dt).round() as u64;
            for sample in inputs.iter().cycle() {
                if !self.simulation.is_playing() || steps >= max_steps {
                    break;
                }
                steps += 1;
                let now = start_time + steps as f64 * replay.fixed_dt;
                for event in self.step(sample, replay.screen, now) {
                    log_event(&event);
                }
            }
        }

        let finished = !self.simulation.is_playing();
        if !finished {
            log::warn!("Run stopped after {steps} steps with the round still playing");
            self.stop();
        }

        let session = self.simulation.session();
        RunSummary {
            steps,
            score: session.score(),
            high_score: session.high_score(),
            level: session.level(),
            finished,
            stats: self.simulation.stats(),
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Popped { id, points } => log::debug!("Popped bubble {id} for {points} points"),
        GameEvent::Escaped { id } => log::debug!("Bubble {id} drifted off screen"),
        // Lifecycle events are logged by the simulation itself.
        GameEvent::Started | GameEvent::LevelUp { .. } | GameEvent::GameOver { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubble_core::{BodyPoint, Landmark, TuningProfile};
    use glam::Vec2;

    const SCREEN: ScreenSize = ScreenSize {
        width: 1000.0,
        height: 1000.0,
    };

    fn driver() -> GameDriver {
        GameDriver::new(&GameConfig::for_profile(TuningProfile::Tuned, 11))
    }

    #[test]
    fn pointer_over_bubble_pops_it() {
        let mut driver = driver();
        driver.start(0.0);
        let id = driver
            .simulation_mut()
            .spawn_at(Vec2::new(0.25, 0.75), Vec2::ZERO, 40.0);

        let events = driver.step(&InputSample::Pointer(Vec2::new(250.0, 750.0)), SCREEN, 0.01);
        assert!(events.contains(&GameEvent::Popped { id, points: 25 }));
        assert_eq!(driver.simulation().session().score(), 25);
    }

    #[test]
    fn landmarks_are_mirrored_before_hit_test() {
        let mut driver = driver();
        driver.start(0.0);
        driver
            .simulation_mut()
            .spawn_at(Vec2::new(0.8, 0.5), Vec2::ZERO, 40.0);

        // Source x=200 maps to screen x=0.8 after mirroring.
        let wrist = Landmark::new(BodyPoint::RightWrist, 200.0, 500.0, 0.9);
        let sample = InputSample::Landmarks(vec![wrist]);
        driver.step(&sample, SCREEN, 0.01);
        assert_eq!(driver.simulation().session().score(), 25);
    }

    #[test]
    fn idle_input_before_tracking_never_hits() {
        let mut driver = driver();
        driver.start(0.0);
        driver
            .simulation_mut()
            .spawn_at(Vec2::new(0.5, 0.5), Vec2::ZERO, 40.0);

        driver.step(&InputSample::Idle, SCREEN, 0.01);
        assert_eq!(driver.tracker().current(), Vec2::new(0.5, 0.5));
        assert_eq!(driver.simulation().session().score(), 0);
    }

    #[test]
    fn start_is_no_op_while_playing() {
        let mut driver = driver();
        assert!(driver.start(0.0));
        driver.step(&InputSample::Pointer(Vec2::new(10.0, 10.0)), SCREEN, 0.01);
        assert!(!driver.start(0.5));
        assert!(driver.tracker().has_position());
    }

    #[test]
    fn replay_runs_full_round() {
        let mut driver = driver();
        let replay = ReplaySequence::pointer_sweep(SCREEN, 1.0 / 30.0, 20.0);
        let summary = driver.run_replay(&replay, 0.0, 600.0);

        assert!(summary.finished);
        assert!(!driver.simulation().is_playing());
        assert!(summary.stats.spawned > 0);
        assert_eq!(summary.high_score, summary.score);
        // A 60s round plus at most one bonus per level reached.
        let max_secs = 60 + 10 * (summary.level - 1) as u64;
        assert!(summary.steps <= (max_secs + 1) * 30);
    }

    #[test]
    fn replay_is_deterministic_for_a_seed() {
        let replay = ReplaySequence::pointer_sweep(SCREEN, 1.0 / 30.0, 15.0);
        let mut a = driver();
        let mut b = driver();
        assert_eq!(a.run_replay(&replay, 0.0, 600.0), b.run_replay(&replay, 0.0, 600.0));
        assert_eq!(a.simulation().bubbles(), b.simulation().bubbles());
    }

    #[test]
    fn run_cap_stops_the_round() {
        let mut driver = driver();
        let replay = ReplaySequence::pointer_sweep(SCREEN, 0.1, 1.0);
        let summary = driver.run_replay(&replay, 0.0, 2.0);
        assert!(!summary.finished);
        assert_eq!(summary.steps, 20);
        assert!(!driver.simulation().is_playing());
    }
}
