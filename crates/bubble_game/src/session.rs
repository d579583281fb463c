//! Score, level and countdown state for one play session.
//!
//! `Idle -> Playing -> Idle`. Redundant transitions are no-ops. The high
//! score survives across sessions for the lifetime of the process only.

use crate::bubble::BubbleId;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Idle,
    Playing,
}

/// Things the driver may want to react to (sound, haptics, UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Popped { id: BubbleId, points: u32 },
    Escaped { id: BubbleId },
    LevelUp { level: u32, bonus_secs: u32 },
    GameOver {
        score: u32,
        high_score: u32,
        new_high_score: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    phase: SessionPhase,
    score: u32,
    high_score: u32,
    level: u32,
    time_remaining: u32,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            score: 0,
            high_score: 0,
            level: 1,
            time_remaining: 0,
        }
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Idle -> Playing with a fresh score, level 1 and a full clock.
    pub fn begin(&mut self, round_secs: u32) -> bool {
        if self.is_playing() {
            return false;
        }
        self.phase = SessionPhase::Playing;
        self.score = 0;
        self.level = 1;
        self.time_remaining = round_secs;
        true
    }

    /// Playing -> Idle, committing the high score.
    pub fn end(&mut self) -> Option<GameEvent> {
        if !self.is_playing() {
            return None;
        }
        self.phase = SessionPhase::Idle;
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        Some(GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score,
            new_high_score,
        })
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn level_up_due(&self, points_per_level: u32) -> bool {
        self.score >= self.level.saturating_mul(points_per_level)
    }

    pub fn level_up(&mut self, bonus_secs: u32) -> GameEvent {
        self.level += 1;
        self.time_remaining = self.time_remaining.saturating_add(bonus_secs);
        GameEvent::LevelUp {
            level: self.level,
            bonus_secs,
        }
    }

    /// One second off the clock. Returns true when time has run out.
    pub fn count_down(&mut self) -> bool {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.time_remaining == 0
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
