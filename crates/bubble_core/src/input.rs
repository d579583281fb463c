//! Input observations consumed by the position tracker.
//!
//! Landmarks arrive from an external pose source in source-image pixel space,
//! zero or more per detection cycle. Pointer input (mouse or touch) bypasses
//! landmark selection entirely.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Body points the tracker knows how to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPoint {
    LeftWrist,
    RightWrist,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftPinky,
    RightPinky,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    #[default]
    Right,
    Left,
}

impl Handedness {
    /// Fixed landmark preference: dominant wrist and index first, then the
    /// off hand, then thumb/pinky fallbacks.
    pub fn preference_order(self) -> [BodyPoint; 8] {
        use BodyPoint::*;
        match self {
            Self::Right => [
                RightWrist, RightIndex, LeftWrist, LeftIndex, RightThumb, RightPinky, LeftThumb,
                LeftPinky,
            ],
            Self::Left => [
                LeftWrist, LeftIndex, RightWrist, RightIndex, LeftThumb, LeftPinky, RightThumb,
                RightPinky,
            ],
        }
    }
}

/// One named body-point observation in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub point: BodyPoint,
    pub position: Vec2,
    pub confidence: f32,
    #[serde(default = "default_valid")]
    pub valid: bool,
}

impl Landmark {
    pub fn new(point: BodyPoint, x: f32, y: f32, confidence: f32) -> Self {
        Self {
            point,
            position: Vec2::new(x, y),
            confidence,
            valid: true,
        }
    }

    /// Visible enough to follow and inside the source image.
    pub fn is_usable(&self, visibility_threshold: f32) -> bool {
        self.valid
            && self.confidence > visibility_threshold
            && self.position.is_finite()
            && self.position.x >= 0.0
            && self.position.y >= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Pixel coordinates to [0,1]x[0,1]. `None` for a degenerate screen or
    /// non-finite input.
    pub fn normalize(&self, pixel: Vec2) -> Option<Vec2> {
        if !self.is_valid() || !pixel.is_finite() {
            return None;
        }
        let normalized = Vec2::new(pixel.x / self.width, pixel.y / self.height);
        Some(normalized.clamp(Vec2::ZERO, Vec2::ONE))
    }
}

/// What the host delivered during one input cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSample {
    Landmarks(Vec<Landmark>),
    /// Pointer position in screen pixels.
    Pointer(Vec2),
    Idle,
}

const fn default_valid() -> bool {
    true
}
