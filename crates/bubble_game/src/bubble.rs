//! Bubble entities and their two-phase lifecycle.
//!
//! A bubble is *alive* (moves, can be hit) until it is popped. A popped
//! bubble fades out -- opacity down, scale up by fixed steps per animation
//! frame -- and is removed once opacity reaches zero. Bubbles that drift off
//! screen are popped with zero opacity so the next cleanup drops them
//! without any score change.

use glam::Vec2;
use rand::Rng;

use crate::simulation::SimulationConfig;

pub type BubbleId = u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub id: BubbleId,
    pub position: Vec2,
    /// Normalized units per nominal animation frame.
    pub velocity: Vec2,
    pub size: f32,
    pub radius: f32,
    pub points: u32,
    pub popped: bool,
    pub opacity: f32,
    pub scale: f32,
}

impl Bubble {
    pub fn new(
        id: BubbleId,
        position: Vec2,
        velocity: Vec2,
        size: f32,
        config: &SimulationConfig,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            size,
            radius: radius_for_size(size, config.size_to_radius),
            points: points_for_size(size, config.points_scale),
            popped: false,
            opacity: 1.0,
            scale: 1.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.popped
    }

    pub fn is_faded(&self) -> bool {
        self.opacity <= 0.0
    }

    pub fn pop(&mut self) {
        self.popped = true;
    }

    /// Silent removal: no fade, no points.
    pub fn escape(&mut self) {
        self.popped = true;
        self.opacity = 0.0;
    }

    /// One pop-animation frame.
    pub fn fade(&mut self, opacity_step: f32, scale_step: f32) {
        if !self.popped || self.is_faded() {
            return;
        }
        self.opacity = (self.opacity - opacity_step).max(0.0);
        self.scale += scale_step;
    }
}

pub fn radius_for_size(size: f32, size_to_radius: f32) -> f32 {
    size * size_to_radius
}

/// Smaller bubbles are worth more. Never less than one point.
pub fn points_for_size(size: f32, points_scale: f32) -> u32 {
    if size <= 0.0 || !size.is_finite() {
        return 1;
    }
    (points_scale / size).round().max(1.0) as u32
}

/// Random size, position and velocity for a fresh bubble at `level`.
pub fn roll_spawn<R: Rng>(
    rng: &mut R,
    level: u32,
    config: &SimulationConfig,
) -> (Vec2, Vec2, f32) {
    let size = rng.random_range(config.min_size..=config.max_size);
    let position = Vec2::new(rng.random_range(0.0..=1.0), rng.random_range(0.0..=1.0));
    let speed = config.speed_for_level(level);
    let velocity = Vec2::new(
        rng.random_range(-speed..=speed),
        rng.random_range(-speed..=speed),
    );
    (position, velocity, size)
}
