//! Hit geometry for popping bubbles.
//!
//! Two tests share one threshold (`pop_radius + bubble.radius`):
//!  1. **Direct hit** -- cursor within the threshold of the bubble center.
//!  2. **Swipe hit** -- the segment between the last two distinct cursor
//!     positions passes within the threshold. This catches fast hands that
//!     jump over a bubble between two tracker updates.

use std::collections::VecDeque;

use glam::Vec2;

/// Consecutive cursor positions closer than this count as the same point.
const MIN_TRAIL_STEP: f32 = 1e-4;

/// Cursor positions outside the unit square or non-finite never hit.
pub fn is_valid_cursor(cursor: Vec2) -> bool {
    cursor.is_finite() && (0.0..=1.0).contains(&cursor.x) && (0.0..=1.0).contains(&cursor.y)
}

pub fn is_direct_hit(center: Vec2, cursor: Vec2, threshold: f32) -> bool {
    center.distance(cursor) < threshold
}

/// Distance from `point` to segment `a`-`b`, projecting onto the segment
/// with the parameter clamped to [0,1].
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

pub fn is_swipe_hit(center: Vec2, a: Vec2, b: Vec2, threshold: f32) -> bool {
    distance_to_segment(center, a, b) < threshold
}

/// Short history of distinct cursor positions.
#[derive(Debug, Clone)]
pub struct SwipeTrail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl SwipeTrail {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: Vec2) {
        if let Some(last) = self.points.back() {
            if last.distance(point) < MIN_TRAIL_STEP {
                return;
            }
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Most recent segment, oldest end first.
    pub fn last_segment(&self) -> Option<(Vec2, Vec2)> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        Some((self.points[n - 2], self.points[n - 1]))
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
