//! A single thrown object
//!
//! Launched upward from the bottom edge, it rises, slows under gravity and
//! falls back. Screen y grows downward, so the launch velocity is negative.
//! The object knows nothing about camera mirroring; callers map hand
//! positions into screen space before testing containment.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::OBJECT_BASE_SIZE;
use crate::difficulty::DifficultyProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    /// Center in screen pixels
    pub pos: Vec2,
    /// Vertical velocity (px/tick, negative is up)
    pub vel_y: f32,
    /// Copied from the profile at spawn
    pub gravity: f32,
    pub half_width: f32,
    pub half_height: f32,
}

impl FallingObject {
    /// Launch a new object from the bottom edge at `x`
    pub fn spawn(
        id: u32,
        x: f32,
        screen_width: f32,
        screen_height: f32,
        profile: &DifficultyProfile,
    ) -> Self {
        let half = half_extent(screen_width, screen_height);
        Self {
            id,
            pos: Vec2::new(x, screen_height),
            vel_y: -profile.initial_speed,
            gravity: profile.gravity,
            half_width: half,
            half_height: half,
        }
    }

    /// Advance one tick. Returns false once the object has dropped back out
    /// through the bottom of the viewport.
    pub fn step(&mut self, viewport_height: f32) -> bool {
        self.vel_y += self.gravity;
        self.pos.y += self.vel_y;
        self.pos.y <= viewport_height
    }

    /// Where `step` will put the center next tick
    #[cfg(test)]
    pub(crate) fn peek_next(&self) -> Vec2 {
        let vel_y = self.vel_y + self.gravity;
        Vec2::new(self.pos.x, self.pos.y + vel_y)
    }

    /// Axis-aligned bounds test, edges inclusive
    pub fn contains_point(&self, point: Vec2) -> bool {
        (point.x - self.pos.x).abs() <= self.half_width
            && (point.y - self.pos.y).abs() <= self.half_height
    }

    /// Keep the center on screen (after a resize)
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        self.pos = self.pos.clamp(Vec2::ZERO, Vec2::new(width, height));
    }
}

/// Half edge length for objects on a screen of this size.
///
/// Objects are 120px square on a screen whose short side is 1000px.
pub fn half_extent(screen_width: f32, screen_height: f32) -> f32 {
    (OBJECT_BASE_SIZE * screen_width.min(screen_height) / 1000.0).floor() / 2.0
}
