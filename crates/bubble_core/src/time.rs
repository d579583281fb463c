//! Explicit-timestamp periodic timers.
//!
//! The simulation never reads a wall clock. Every cadence is driven by the
//! caller passing a monotonic `now` (seconds as `f64`), which keeps ticks
//! reproducible under synthetic clocks in tests and replays.
//!
//! Usage mirrors a fixed-step accumulator: call `should_fire(now)` in a
//! `while` loop and do one unit of work per `true`.

/// Default cap on how far behind a cadence may fall before it skips ahead.
pub const DEFAULT_MAX_LAG: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cadence {
    interval: f64,
    next_due: Option<f64>,
    pub max_lag: f64,
}

impl Cadence {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            next_due: None,
            max_lag: DEFAULT_MAX_LAG,
        }
    }

    pub fn with_max_lag(mut self, max_lag: f64) -> Self {
        self.max_lag = max_lag;
        self
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Time of the next firing, if armed.
    pub fn next_due(&self) -> Option<f64> {
        self.next_due
    }

    /// Start the cadence so its first firing lands one interval after `now`.
    pub fn arm(&mut self, now: f64) {
        self.next_due = Some(now + self.interval);
    }

    /// A disarmed cadence never fires until armed again.
    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Change the period. The pending firing is re-phased from the previous
    /// due time so a shorter interval takes effect immediately.
    pub fn set_interval(&mut self, interval: f64) {
        if let Some(due) = self.next_due {
            let last_fired = due - self.interval;
            self.next_due = Some(last_fired + interval);
        }
        self.interval = interval;
    }

    /// Returns true once per elapsed interval. Overdue firings are reported
    /// one at a time; lag beyond `max_lag` is dropped. An infinite `max_lag`
    /// never drops a firing.
    pub fn should_fire(&mut self, now: f64) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if !now.is_finite() || now < due {
            return false;
        }

        let lag = now - due;
        if lag > self.max_lag.max(self.interval) {
            // Spiral-of-death cap: fire once and re-phase from now.
            log::warn!(
                "Cadence fell {:.1}ms behind -- skipping ahead ({}ms interval)",
                lag * 1000.0,
                self.interval * 1000.0
            );
            self.next_due = Some(now + self.interval);
            return true;
        }

        self.next_due = Some(due + self.interval);
        true
    }
}
