//! Bubble simulation: spawning, movement, popping and the session clock.
//!
//! Everything is driven by `tick(now)` with an explicit timestamp. Three
//! cadences run while a session is playing:
//!
//!   1. countdown  -- one second off the clock per firing
//!   2. spawner    -- one bubble per firing, faster at higher levels
//!   3. animation  -- fixed-interval kinematics and pop fades
//!
//! Hit testing runs on its own schedule through `check_hit`, once per
//! tracker update. `stop()` disarms all three cadences before it returns,
//! so nothing mutates the round after the high score has been committed.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use bubble_core::time::Cadence;
use bubble_core::TuningProfile;

use crate::bubble::{roll_spawn, Bubble, BubbleId};
use crate::collision::{is_direct_hit, is_swipe_hit, is_valid_cursor, SwipeTrail};
use crate::session::{GameEvent, GameSession};

const COUNTDOWN_INTERVAL: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub round_secs: u32,
    /// Cursor reach added to every bubble radius.
    pub pop_radius: f32,
    pub max_bubbles: usize,
    pub min_size: f32,
    pub max_size: f32,
    pub size_to_radius: f32,
    /// points = round(points_scale / size)
    pub points_scale: f32,
    /// Normalized units per nominal frame at level 1.
    pub base_speed: f32,
    /// Fractional speed increase per level above 1.
    pub speed_per_level: f32,
    pub max_speed: f32,
    pub base_spawn_interval: f64,
    pub spawn_interval_step: f64,
    pub min_spawn_interval: f64,
    /// Nominal animation frame; velocities are expressed per frame of this length.
    pub frame_interval: f64,
    pub boundary_margin: f32,
    pub opacity_step: f32,
    pub scale_step: f32,
    pub points_per_level: u32,
    pub level_bonus_secs: u32,
    pub swipe_detection: bool,
    pub trail_length: usize,
}

impl SimulationConfig {
    pub fn for_profile(profile: TuningProfile) -> Self {
        let tuned = Self {
            round_secs: 60,
            pop_radius: 0.08,
            max_bubbles: 8,
            min_size: 40.0,
            max_size: 100.0,
            size_to_radius: 0.001,
            points_scale: 1000.0,
            base_speed: 0.004,
            speed_per_level: 0.25,
            max_speed: 0.015,
            base_spawn_interval: 1.5,
            spawn_interval_step: 0.15,
            min_spawn_interval: 0.5,
            frame_interval: 1.0 / 60.0,
            boundary_margin: 0.1,
            opacity_step: 0.1,
            scale_step: 0.1,
            points_per_level: 100,
            level_bonus_secs: 10,
            swipe_detection: true,
            trail_length: 5,
        };
        match profile {
            TuningProfile::Tuned => tuned,
            TuningProfile::Classic => Self {
                pop_radius: 0.1,
                max_bubbles: 10,
                level_bonus_secs: 0,
                swipe_detection: false,
                ..tuned
            },
        }
    }

    /// Non-increasing in level, floored at `min_spawn_interval`.
    pub fn spawn_interval_for_level(&self, level: u32) -> f64 {
        let steps = level.saturating_sub(1) as f64;
        (self.base_spawn_interval - steps * self.spawn_interval_step).max(self.min_spawn_interval)
    }

    pub fn speed_for_level(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.base_speed * (1.0 + steps * self.speed_per_level)).min(self.max_speed)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::for_profile(TuningProfile::default())
    }
}

/// Per-session counters, reset by `start()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub spawned: u32,
    pub popped: u32,
    pub escaped: u32,
    pub skipped_at_cap: u32,
}

#[derive(Debug, Clone)]
pub struct BubbleSimulation {
    config: SimulationConfig,
    session: GameSession,
    bubbles: Vec<Bubble>,
    next_id: BubbleId,
    rng: ChaCha8Rng,
    countdown: Cadence,
    spawner: Cadence,
    animation: Cadence,
    trail: SwipeTrail,
    events: Vec<GameEvent>,
    stats: SimulationStats,
}

impl BubbleSimulation {
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        Self {
            config,
            session: GameSession::new(),
            bubbles: Vec::new(),
            next_id: 1,
            rng: ChaCha8Rng::seed_from_u64(seed),
            // Every elapsed second comes off the clock, however late the tick.
            countdown: Cadence::new(COUNTDOWN_INTERVAL).with_max_lag(f64::INFINITY),
            spawner: Cadence::new(config.spawn_interval_for_level(1)),
            animation: Cadence::new(config.frame_interval),
            trail: SwipeTrail::new(config.trail_length),
            events: Vec::new(),
            stats: SimulationStats::default(),
        }
    }

    #[allow(dead_code)]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    /// Alive and fading bubbles, in spawn order.
    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    #[allow(dead_code)]
    pub fn spawn_interval(&self) -> f64 {
        self.spawner.interval()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Idle -> Playing. No-op while already playing.
    pub fn start(&mut self, now: f64) -> bool {
        if !self.session.begin(self.config.round_secs) {
            return false;
        }
        self.bubbles.clear();
        self.trail.clear();
        self.stats = SimulationStats::default();

        self.spawner
            .set_interval(self.config.spawn_interval_for_level(self.session.level()));
        self.countdown.arm(now);
        self.spawner.arm(now);
        self.animation.arm(now);

        self.events.push(GameEvent::Started);
        log::info!(
            "Session started: {}s on the clock, high score {}",
            self.session.time_remaining(),
            self.session.high_score()
        );
        true
    }

    /// Playing -> Idle. Halts every cadence, then commits the high score.
    pub fn stop(&mut self) -> bool {
        if !self.session.is_playing() {
            return false;
        }
        self.countdown.disarm();
        self.spawner.disarm();
        self.animation.disarm();

        if let Some(event) = self.session.end() {
            if let GameEvent::GameOver {
                score,
                high_score,
                new_high_score,
            } = event
            {
                log::info!(
                    "Game over: score {} (high {}{}), level {}, popped {}, escaped {}, spawned {}",
                    score,
                    high_score,
                    if new_high_score { ", new record" } else { "" },
                    self.session.level(),
                    self.stats.popped,
                    self.stats.escaped,
                    self.stats.spawned
                );
            }
            self.events.push(event);
        }
        true
    }

    /// Run every cadence that is due at `now`.
    pub fn tick(&mut self, now: f64) {
        if !self.session.is_playing() {
            return;
        }

        while self.countdown.should_fire(now) {
            if self.session.count_down() {
                self.stop();
                return;
            }
        }

        while self.spawner.should_fire(now) {
            self.spawn_bubble();
        }

        while self.animation.should_fire(now) {
            let dt = self.animation.interval();
            self.animate_frame(dt);
            self.remove_faded();
        }
    }

    /// Pop every alive bubble under the cursor or its latest swipe segment.
    /// Returns whether anything popped.
    ///
    /// With swipe detection on, a far cursor is only harmless if the segment
    /// from the previous trail point is far too: two far cursors on opposite
    /// sides of a bubble pop it on the second call.
    pub fn check_hit(&mut self, cursor: Vec2) -> bool {
        if !self.session.is_playing() || !is_valid_cursor(cursor) {
            return false;
        }

        self.trail.push(cursor);
        let segment = if self.config.swipe_detection {
            self.trail.last_segment()
        } else {
            None
        };

        let mut gained = 0u32;
        let mut popped_any = false;
        for bubble in self.bubbles.iter_mut().filter(|b| b.is_alive()) {
            let threshold = self.config.pop_radius + bubble.radius;
            let hit = is_direct_hit(bubble.position, cursor, threshold)
                || segment.is_some_and(|(a, b)| is_swipe_hit(bubble.position, a, b, threshold));
            if hit {
                bubble.pop();
                gained = gained.saturating_add(bubble.points);
                popped_any = true;
                self.stats.popped += 1;
                self.events.push(GameEvent::Popped {
                    id: bubble.id,
                    points: bubble.points,
                });
            }
        }

        if popped_any {
            self.session.add_points(gained);
            // At most one level per hit test, however far the score jumped.
            if self.session.level_up_due(self.config.points_per_level) {
                let event = self.session.level_up(self.config.level_bonus_secs);
                let interval = self.config.spawn_interval_for_level(self.session.level());
                self.spawner.set_interval(interval);
                log::info!(
                    "Level {} reached at score {} (+{}s, spawn every {:.2}s)",
                    self.session.level(),
                    self.session.score(),
                    self.config.level_bonus_secs,
                    interval
                );
                self.events.push(event);
            }
        }
        popped_any
    }

    /// Spawn one random bubble unless the active set is full.
    pub fn spawn_bubble(&mut self) -> Option<BubbleId> {
        if self.bubbles.len() >= self.config.max_bubbles {
            self.stats.skipped_at_cap += 1;
            log::debug!("Spawn skipped: {} bubbles active", self.bubbles.len());
            return None;
        }
        let (position, velocity, size) =
            roll_spawn(&mut self.rng, self.session.level(), &self.config);
        Some(self.spawn_at(position, velocity, size))
    }

    /// Place a bubble explicitly. Ignores the active-bubble cap.
    pub fn spawn_at(&mut self, position: Vec2, velocity: Vec2, size: f32) -> BubbleId {
        let id = self.next_id;
        self.next_id += 1;
        self.bubbles
            .push(Bubble::new(id, position, velocity, size, &self.config));
        self.stats.spawned += 1;
        id
    }

    /// One animation frame of length `dt` seconds: integrate alive bubbles,
    /// apply boundaries and advance pop fades. Removal happens in
    /// `remove_faded`.
    pub fn animate_frame(&mut self, dt: f64) {
        let frames = (dt / self.config.frame_interval) as f32;
        let margin = self.config.boundary_margin;

        for bubble in &mut self.bubbles {
            if bubble.popped {
                bubble.fade(self.config.opacity_step, self.config.scale_step);
                continue;
            }

            bubble.position += bubble.velocity * frames;
            if apply_bounds(bubble, margin) {
                self.stats.escaped += 1;
                self.events.push(GameEvent::Escaped { id: bubble.id });
            }
        }
    }

    /// Cleanup pass: drop bubbles whose opacity has reached zero.
    pub fn remove_faded(&mut self) {
        self.bubbles.retain(|b| !b.is_faded());
    }
}

/// Reflect off the top and sides, escape past the bottom/left/right margin.
/// Returns true when the bubble escaped.
fn apply_bounds(bubble: &mut Bubble, margin: f32) -> bool {
    let p = bubble.position;
    if !p.is_finite() || p.x < -margin || p.x > 1.0 + margin || p.y > 1.0 + margin {
        bubble.escape();
        return true;
    }

    if p.y < 0.0 {
        bubble.position.y = 0.0;
        bubble.velocity.y = bubble.velocity.y.abs();
    }
    if p.x < 0.0 {
        bubble.position.x = 0.0;
        bubble.velocity.x = bubble.velocity.x.abs();
    } else if p.x > 1.0 {
        bubble.position.x = 1.0;
        bubble.velocity.x = -bubble.velocity.x.abs();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn playing() -> BubbleSimulation {
        let mut sim = BubbleSimulation::new(SimulationConfig::default(), 7);
        assert!(sim.start(0.0));
        sim.drain_events();
        sim
    }

    /// Bubble whose hit threshold (pop radius + radius) equals `threshold`.
    fn place(sim: &mut BubbleSimulation, at: Vec2, threshold: f32, points: u32) -> BubbleId {
        let id = sim.spawn_at(at, Vec2::ZERO, 60.0);
        let pop_radius = sim.config.pop_radius;
        let bubble = sim.bubbles.iter_mut().find(|b| b.id == id).unwrap();
        bubble.radius = threshold - pop_radius;
        bubble.points = points;
        id
    }

    #[test]
    fn start_resets_session() {
        let sim = playing();
        let session = sim.session();
        assert!(session.is_playing());
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.time_remaining(), 60);
        assert!(sim.bubbles().is_empty());
    }

    #[test]
    fn start_while_playing_is_no_op() {
        let mut sim = playing();
        sim.spawn_at(Vec2::new(0.5, 0.5), Vec2::ZERO, 50.0);
        assert!(!sim.start(3.0));
        assert_eq!(sim.bubbles().len(), 1);
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn stop_while_idle_is_no_op() {
        let mut sim = BubbleSimulation::new(SimulationConfig::default(), 1);
        assert!(!sim.stop());
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn direct_hit_pops_and_scores() {
        let mut sim = playing();
        let id = place(&mut sim, Vec2::new(0.5, 0.5), 0.1, 25);

        assert!(sim.check_hit(Vec2::new(0.5, 0.5)));
        assert!(sim.bubbles()[0].popped);
        assert_eq!(sim.session().score(), 25);
        assert_eq!(sim.drain_events(), vec![GameEvent::Popped { id, points: 25 }]);
    }

    #[test]
    fn far_cursor_changes_nothing() {
        let mut sim = playing();
        place(&mut sim, Vec2::new(0.2, 0.2), 0.1, 25);
        place(&mut sim, Vec2::new(0.3, 0.8), 0.1, 25);

        for _ in 0..5 {
            assert!(!sim.check_hit(Vec2::new(0.9, 0.5)));
        }
        assert_eq!(sim.session().score(), 0);
        assert!(sim.bubbles().iter().all(|b| !b.popped));
    }

    #[test]
    fn malformed_cursor_is_a_miss() {
        let mut sim = playing();
        place(&mut sim, Vec2::new(0.5, 0.5), 0.1, 25);
        assert!(!sim.check_hit(Vec2::new(f32::NAN, 0.5)));
        assert!(!sim.check_hit(Vec2::new(0.5, f32::INFINITY)));
        assert!(!sim.check_hit(Vec2::new(1.5, 0.5)));
        assert_eq!(sim.session().score(), 0);
        assert!(sim.bubbles()[0].is_alive());
    }

    #[test]
    fn hit_test_is_ignored_while_idle() {
        let mut sim = BubbleSimulation::new(SimulationConfig::default(), 1);
        sim.spawn_at(Vec2::new(0.5, 0.5), Vec2::ZERO, 50.0);
        assert!(!sim.check_hit(Vec2::new(0.5, 0.5)));
        assert!(sim.bubbles()[0].is_alive());
    }

    #[test]
    fn swipe_pops_bubble_between_samples() {
        let mut sim = playing();
        place(&mut sim, Vec2::new(0.5, 0.5), 0.1, 20);

        assert!(!sim.check_hit(Vec2::new(0.1, 0.5)));
        assert!(sim.check_hit(Vec2::new(0.9, 0.5)));
        assert_eq!(sim.session().score(), 20);
    }

    #[test]
    fn swipe_is_off_in_classic_profile() {
        let config = SimulationConfig::for_profile(TuningProfile::Classic);
        let mut sim = BubbleSimulation::new(config, 1);
        sim.start(0.0);
        place(&mut sim, Vec2::new(0.5, 0.5), 0.12, 20);

        sim.check_hit(Vec2::new(0.1, 0.5));
        assert!(!sim.check_hit(Vec2::new(0.9, 0.5)));
        assert_eq!(sim.session().score(), 0);
    }

    #[test]
    fn popped_bubble_cannot_score_twice() {
        let mut sim = playing();
        place(&mut sim, Vec2::new(0.5, 0.5), 0.1, 25);
        assert!(sim.check_hit(Vec2::new(0.5, 0.5)));
        assert!(!sim.check_hit(Vec2::new(0.5, 0.5)));
        assert_eq!(sim.session().score(), 25);
    }

    #[test]
    fn score_jump_levels_up_exactly_once() {
        let mut sim = playing();
        sim.session.add_points(90);
        place(&mut sim, Vec2::new(0.5, 0.5), 0.1, 15);
        place(&mut sim, Vec2::new(0.52, 0.5), 0.1, 10);

        assert!(sim.check_hit(Vec2::new(0.51, 0.5)));
        assert_eq!(sim.session().score(), 115);
        assert_eq!(sim.session().level(), 2);

        let level_ups: Vec<_> = sim
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .collect();
        assert_eq!(
            level_ups,
            vec![GameEvent::LevelUp {
                level: 2,
                bonus_secs: 10
            }]
        );
        assert_eq!(sim.session().time_remaining(), 70);
    }

    #[test]
    fn level_up_speeds_up_spawning() {
        let mut sim = playing();
        let before = sim.spawn_interval();
        sim.session.add_points(95);
        place(&mut sim, Vec2::new(0.5, 0.5), 0.1, 10);
        sim.check_hit(Vec2::new(0.5, 0.5));
        assert!(sim.spawn_interval() < before);
    }

    #[test]
    fn spawn_interval_is_non_increasing_and_floored() {
        let config = SimulationConfig::default();
        let mut prev = config.spawn_interval_for_level(1);
        for level in 2..40 {
            let next = config.spawn_interval_for_level(level);
            assert!(next <= prev);
            assert!(next >= config.min_spawn_interval);
            prev = next;
        }
        assert_eq!(prev, config.min_spawn_interval);
    }

    #[test]
    fn bubble_past_right_margin_escapes_silently() {
        let mut sim = playing();
        let id = sim.spawn_at(Vec2::new(1.05, 0.5), Vec2::new(0.1, 0.0), 60.0);

        sim.animate_frame(sim.config.frame_interval);
        let bubble = sim.bubbles()[0];
        assert!((bubble.position.x - 1.15).abs() < EPS);
        assert!(bubble.popped);
        assert_eq!(bubble.opacity, 0.0);

        sim.remove_faded();
        assert!(sim.bubbles().is_empty());
        assert_eq!(sim.session().score(), 0);
        assert_eq!(sim.drain_events(), vec![GameEvent::Escaped { id }]);
        assert_eq!(sim.stats().escaped, 1);
    }

    #[test]
    fn bubble_past_bottom_margin_escapes() {
        let mut sim = playing();
        sim.spawn_at(Vec2::new(0.5, 1.08), Vec2::new(0.0, 0.05), 60.0);
        sim.animate_frame(sim.config.frame_interval);
        sim.remove_faded();
        assert!(sim.bubbles().is_empty());
    }

    #[test]
    fn top_and_side_boundaries_reflect() {
        let mut sim = playing();
        sim.spawn_at(Vec2::new(0.5, 0.01), Vec2::new(0.0, -0.05), 60.0);
        sim.spawn_at(Vec2::new(0.98, 0.5), Vec2::new(0.05, 0.0), 60.0);
        sim.spawn_at(Vec2::new(0.02, 0.5), Vec2::new(-0.05, 0.0), 60.0);
        sim.animate_frame(sim.config.frame_interval);

        let b = sim.bubbles();
        assert_eq!(b[0].position.y, 0.0);
        assert!(b[0].velocity.y > 0.0);
        assert_eq!(b[1].position.x, 1.0);
        assert!(b[1].velocity.x < 0.0);
        assert_eq!(b[2].position.x, 0.0);
        assert!(b[2].velocity.x > 0.0);
        assert!(b.iter().all(|b| b.is_alive()));
    }

    #[test]
    fn integration_is_normalized_to_frame_length() {
        let mut sim = playing();
        sim.spawn_at(Vec2::new(0.5, 0.5), Vec2::new(0.01, 0.0), 60.0);
        sim.animate_frame(sim.config.frame_interval * 2.0);
        assert!((sim.bubbles()[0].position.x - 0.52).abs() < EPS);
    }

    #[test]
    fn pop_animation_follows_fixed_steps() {
        let mut sim = playing();
        place(&mut sim, Vec2::new(0.5, 0.5), 0.1, 25);
        sim.check_hit(Vec2::new(0.5, 0.5));

        let c = sim.config;
        for k in 1..=4 {
            sim.animate_frame(c.frame_interval);
            sim.remove_faded();
            let b = sim.bubbles()[0];
            assert!((b.opacity - (1.0 - c.opacity_step * k as f32)).abs() < EPS);
            assert!((b.scale - (1.0 + c.scale_step * k as f32)).abs() < EPS);
            assert_eq!(b.position, Vec2::new(0.5, 0.5));
        }

        for _ in 0..20 {
            sim.animate_frame(c.frame_interval);
            sim.remove_faded();
        }
        assert!(sim.bubbles().is_empty());
    }

    #[test]
    fn spawner_respects_cap() {
        let mut sim = playing();
        let cap = sim.config.max_bubbles;
        for _ in 0..cap {
            assert!(sim.spawn_bubble().is_some());
        }
        assert!(sim.spawn_bubble().is_none());
        assert_eq!(sim.bubbles().len(), cap);
        assert_eq!(sim.stats().skipped_at_cap, 1);
    }

    #[test]
    fn bubble_ids_are_unique_across_sessions() {
        let mut sim = playing();
        let a = sim.spawn_bubble().unwrap();
        sim.stop();
        sim.start(100.0);
        let b = sim.spawn_bubble().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn tick_spawns_on_cadence() {
        let mut sim = playing();
        let interval = sim.spawn_interval();
        sim.tick(interval * 0.5);
        assert_eq!(sim.stats().spawned, 0);
        sim.tick(interval);
        assert_eq!(sim.stats().spawned, 1);
    }

    #[test]
    fn countdown_ends_round_and_commits_high_score() {
        let mut sim = playing();
        place(&mut sim, Vec2::new(0.5, 0.5), 0.1, 40);
        sim.check_hit(Vec2::new(0.5, 0.5));
        sim.drain_events();

        let mut now = 0.0;
        while sim.is_playing() && now < 120.0 {
            now += 0.05;
            sim.tick(now);
        }
        assert!(!sim.is_playing());
        assert_eq!(sim.session().time_remaining(), 0);
        assert_eq!(sim.session().high_score(), 40);
        assert!((now - 60.0).abs() < 0.1);

        let events = sim.drain_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                score: 40,
                high_score: 40,
                new_high_score: true
            })
        );
    }

    #[test]
    fn late_tick_takes_every_elapsed_second() {
        let mut sim = playing();
        sim.tick(5.0);
        assert_eq!(sim.session().time_remaining(), 55);
        assert!(sim.is_playing());
    }

    #[test]
    fn sparse_ticks_end_round_on_time() {
        let mut sim = playing();
        let mut now = 0.0;
        while sim.is_playing() && now < 200.0 {
            now += 3.0;
            sim.tick(now);
        }
        assert!(!sim.is_playing());
        assert!((now - 60.0).abs() < 1e-9);
    }

    #[test]
    fn stop_halts_all_cadences() {
        let mut sim = playing();
        sim.spawn_at(Vec2::new(0.5, 0.5), Vec2::new(0.01, 0.0), 60.0);
        sim.tick(0.5);
        assert!(sim.stop());

        let snapshot: Vec<Bubble> = sim.bubbles().to_vec();
        let spawned = sim.stats().spawned;
        let remaining = sim.session().time_remaining();
        sim.tick(30.0);

        assert_eq!(sim.bubbles(), snapshot.as_slice());
        assert_eq!(sim.stats().spawned, spawned);
        assert_eq!(sim.session().time_remaining(), remaining);
    }

    #[test]
    fn same_seed_same_round() {
        let run = || {
            let mut sim = BubbleSimulation::new(SimulationConfig::default(), 99);
            sim.start(0.0);
            let mut now = 0.0;
            for i in 0..600 {
                now += 1.0 / 30.0;
                let cursor = Vec2::new(
                    0.5 + 0.4 * (i as f32 * 0.05).sin(),
                    0.5 + 0.3 * (i as f32 * 0.1).sin(),
                );
                sim.check_hit(cursor);
                sim.tick(now);
            }
            (sim.session().clone(), sim.bubbles().to_vec(), sim.stats())
        };
        assert_eq!(run(), run());
    }
}
