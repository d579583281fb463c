//! Hand-position estimation over noisy, intermittent pose landmarks.
//!
//! Each update picks one landmark from a fixed preference order, mirrors it
//! into front-camera screen space and blends it into the running estimate
//! with an adaptive smoothing factor:
//!
//! - **High confidence, slow movement** -> minimum smoothing (responsive).
//! - **Low confidence or fast movement** -> maximum smoothing (stable).
//! - Anything else -> the midpoint.
//!
//! When no landmark qualifies the tracker bridges the gap by extrapolating
//! the smoothed velocity for a short horizon, then freezes. The estimate is
//! always inside [0,1]x[0,1]; before the first accepted observation it sits
//! at the screen center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::{Handedness, Landmark, ScreenSize};
use crate::profile::TuningProfile;

/// Position reported before any observation has been accepted.
pub const DEFAULT_POSITION: Vec2 = Vec2::new(0.5, 0.5);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub handedness: Handedness,
    /// Landmarks at or below this confidence are never selected.
    pub visibility_threshold: f32,
    pub min_smoothing: f32,
    pub max_smoothing: f32,
    /// Above this confidence (and below `slow_movement`) smoothing is minimal.
    pub high_confidence: f32,
    /// Below this confidence smoothing is maximal.
    pub low_confidence: f32,
    /// Per-update movement in normalized units.
    pub slow_movement: f32,
    pub fast_movement: f32,
    /// Share of the previous velocity kept on each update.
    pub velocity_retain: f32,
    /// Added to the smoothing factor on every predicted update.
    pub gap_smoothing_step: f32,
    /// Seconds; prediction only runs for update intervals shorter than this.
    pub prediction_window: f64,
    /// Seconds since the last accepted observation beyond which the
    /// estimate freezes.
    pub extended_gap_window: f64,
    pub invalid_streak_threshold: u32,
    /// Front-camera convention: x' = 1 - x.
    pub mirror_x: bool,
    /// Updates between refreshes of the diagnostic status text.
    pub status_interval: u32,
}

impl TrackerConfig {
    pub fn for_profile(profile: TuningProfile) -> Self {
        let tuned = Self {
            handedness: Handedness::Right,
            visibility_threshold: 0.5,
            min_smoothing: 0.3,
            max_smoothing: 0.8,
            high_confidence: 0.7,
            low_confidence: 0.6,
            slow_movement: 0.05,
            fast_movement: 0.15,
            velocity_retain: 0.7,
            gap_smoothing_step: 0.1,
            prediction_window: 0.1,
            extended_gap_window: 0.2,
            invalid_streak_threshold: 1,
            mirror_x: true,
            status_interval: 10,
        };
        match profile {
            TuningProfile::Tuned => tuned,
            TuningProfile::Classic => Self {
                min_smoothing: 0.5,
                max_smoothing: 0.85,
                invalid_streak_threshold: 3,
                ..tuned
            },
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::for_profile(TuningProfile::default())
    }
}

/// Last thing the tracker did, for diagnostic display only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerStatus {
    NoLandmarks,
    Predicted,
    Frozen,
    Tracking(Vec2),
    Pointer(Vec2),
}

impl std::fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoLandmarks => f.write_str("no landmarks"),
            Self::Predicted => f.write_str("predicted"),
            Self::Frozen => f.write_str("frozen"),
            Self::Tracking(p) => write!(f, "tracking: {:.2},{:.2}", p.x, p.y),
            Self::Pointer(p) => write!(f, "pointer: {:.2},{:.2}", p.x, p.y),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PositionTracker {
    config: TrackerConfig,
    current: Vec2,
    velocity: Vec2,
    smoothing: f32,
    invalid_streak: u32,
    has_position: bool,
    last_update: Option<f64>,
    last_accepted: Option<f64>,
    status: TrackerStatus,
    status_text: String,
    updates_since_status: u32,
}

impl PositionTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            current: DEFAULT_POSITION,
            velocity: Vec2::ZERO,
            smoothing: config.max_smoothing,
            invalid_streak: 0,
            has_position: false,
            last_update: None,
            last_accepted: None,
            status: TrackerStatus::NoLandmarks,
            status_text: String::new(),
            updates_since_status: 0,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Authoritative cursor estimate, normalized.
    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Smoothed velocity in normalized units per second.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn smoothing_factor(&self) -> f32 {
        self.smoothing
    }

    pub fn invalid_streak(&self) -> u32 {
        self.invalid_streak
    }

    pub fn has_position(&self) -> bool {
        self.has_position
    }

    pub fn status(&self) -> TrackerStatus {
        self.status
    }

    /// Rate-limited status string; never read by the filter itself.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Forget everything, back to the pre-first-observation state.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Feed one detection cycle. Returns the new estimate.
    pub fn update(&mut self, observations: &[Landmark], screen: ScreenSize, now: f64) -> Vec2 {
        let dt = self.advance_clock(now);

        let sample = self
            .select_landmark(observations)
            .and_then(|lm| screen.normalize(lm.position).map(|p| (p, lm.confidence)));

        match sample {
            Some((normalized, confidence)) => {
                let raw = if self.config.mirror_x {
                    Vec2::new(1.0 - normalized.x, normalized.y)
                } else {
                    normalized
                };
                self.accept(raw, confidence, dt, now);
                self.status = TrackerStatus::Tracking(self.current);
            }
            None => {
                let predicted = self.bridge_gap(dt, now);
                self.status = if predicted {
                    TrackerStatus::Predicted
                } else if observations.is_empty() || !self.has_position {
                    TrackerStatus::NoLandmarks
                } else {
                    TrackerStatus::Frozen
                };
            }
        }

        self.refresh_status();
        self.current
    }

    /// Direct normalized position from a pointer source. Skips selection and
    /// smoothing but keeps the velocity estimate current for prediction.
    pub fn set_position(&mut self, position: Vec2, now: f64) -> Vec2 {
        if !position.is_finite() {
            return self.current;
        }
        let position = position.clamp(Vec2::ZERO, Vec2::ONE);
        let dt = self.advance_clock(now);

        if self.has_position {
            self.update_velocity(position, dt);
        } else {
            self.velocity = Vec2::ZERO;
            self.has_position = true;
        }
        self.current = position;
        self.invalid_streak = 0;
        self.last_accepted = Some(now);
        self.status = TrackerStatus::Pointer(position);
        self.refresh_status();
        self.current
    }

    /// Pointer position in screen pixels. Degenerate input is ignored.
    pub fn set_pointer(&mut self, pixel: Vec2, screen: ScreenSize, now: f64) -> Vec2 {
        match screen.normalize(pixel) {
            Some(position) => self.set_position(position, now),
            None => self.current,
        }
    }

    fn advance_clock(&mut self, now: f64) -> f64 {
        if !now.is_finite() {
            return 0.0;
        }
        let dt = self.last_update.map_or(0.0, |prev| now - prev);
        self.last_update = Some(now);
        dt
    }

    fn select_landmark<'a>(&self, observations: &'a [Landmark]) -> Option<&'a Landmark> {
        let threshold = self.config.visibility_threshold;
        self.config
            .handedness
            .preference_order()
            .into_iter()
            .find_map(|point| {
                observations
                    .iter()
                    .find(|lm| lm.point == point && lm.is_usable(threshold))
            })
    }

    fn accept(&mut self, raw: Vec2, confidence: f32, dt: f64, now: f64) {
        if self.has_position {
            let movement = raw.distance(self.current);
            self.smoothing = self.adaptive_smoothing(confidence, movement);
            let s = self.smoothing;
            let smoothed = (self.current * s + raw * (1.0 - s)).clamp(Vec2::ZERO, Vec2::ONE);
            self.update_velocity(smoothed, dt);
            self.current = smoothed;
        } else {
            // First sample is taken as-is.
            self.current = raw.clamp(Vec2::ZERO, Vec2::ONE);
            self.velocity = Vec2::ZERO;
            self.has_position = true;
        }
        self.invalid_streak = 0;
        self.last_accepted = Some(now);
    }

    fn adaptive_smoothing(&self, confidence: f32, movement: f32) -> f32 {
        let c = &self.config;
        if confidence > c.high_confidence && movement < c.slow_movement {
            c.min_smoothing
        } else if confidence < c.low_confidence || movement > c.fast_movement {
            c.max_smoothing
        } else {
            (c.min_smoothing + c.max_smoothing) * 0.5
        }
    }

    fn update_velocity(&mut self, next: Vec2, dt: f64) {
        if dt > self.config.extended_gap_window {
            // Too stale to say anything about motion.
            self.velocity = Vec2::ZERO;
            return;
        }
        if dt <= 0.0 {
            return;
        }
        let instant = (next - self.current) / dt as f32;
        let keep = self.config.velocity_retain;
        self.velocity = self.velocity * keep + instant * (1.0 - keep);
    }

    /// Returns true when a predicted position was produced.
    fn bridge_gap(&mut self, dt: f64, now: f64) -> bool {
        self.invalid_streak = self.invalid_streak.saturating_add(1);
        if !self.has_position {
            return false;
        }

        let gap_age = self.last_accepted.map_or(f64::INFINITY, |t| now - t);
        let window_open = self.invalid_streak <= self.config.invalid_streak_threshold
            || gap_age <= self.config.extended_gap_window;
        let plausible_dt = dt > 0.0 && dt < self.config.prediction_window;

        if plausible_dt && window_open && self.velocity != Vec2::ZERO {
            self.current = (self.current + self.velocity * dt as f32).clamp(Vec2::ZERO, Vec2::ONE);
            self.smoothing =
                (self.smoothing + self.config.gap_smoothing_step).min(self.config.max_smoothing);
            return true;
        }

        if gap_age > self.config.extended_gap_window {
            self.velocity = Vec2::ZERO;
        }
        false
    }

    fn refresh_status(&mut self) {
        self.updates_since_status += 1;
        if self.status_text.is_empty() || self.updates_since_status >= self.config.status_interval {
            self.status_text = self.status.to_string();
            self.updates_since_status = 0;
            log::debug!("tracker: {}", self.status_text);
        }
    }
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
