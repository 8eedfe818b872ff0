//! Pose landmarks and gesture recognition
//!
//! Landmark frames come from an external pose estimator once per camera
//! frame. The game core only reads them.

pub mod gesture;

pub use gesture::{GestureClassifier, GestureFlags, knee_angle};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A normalized body keypoint
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// 0-1 relative to frame width
    pub x: f32,
    /// 0-1 relative to frame height (grows downward)
    pub y: f32,
    /// Detection confidence, 0-1
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// One frame of landmarks, indexed by anatomical id
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); LANDMARK_COUNT],
        }
    }
}

impl LandmarkFrame {
    /// Build a frame from a flat `(x, y, visibility)` array of 99 values.
    ///
    /// Returns `None` for any other length.
    pub fn from_flat(data: &[f32]) -> Option<Self> {
        if data.len() != LANDMARK_COUNT * 3 {
            return None;
        }
        let mut frame = Self::default();
        for (lm, chunk) in frame.landmarks.iter_mut().zip(data.chunks_exact(3)) {
            *lm = Landmark::new(chunk[0], chunk[1], chunk[2]);
        }
        Some(frame)
    }

    /// Landmark by id. Ids past the topology return an invisible point.
    #[inline]
    pub fn get(&self, id: usize) -> Landmark {
        self.landmarks.get(id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, id: usize, landmark: Landmark) {
        if let Some(slot) = self.landmarks.get_mut(id) {
            *slot = landmark;
        }
    }

    pub fn nose(&self) -> Landmark {
        self.get(NOSE)
    }

    pub fn wrists(&self) -> (Landmark, Landmark) {
        (self.get(LEFT_WRIST), self.get(RIGHT_WRIST))
    }

    /// Shoulder-midpoint to ankle-midpoint distance, scaled by 100.
    ///
    /// Used as the player's body-scale baseline at calibration.
    pub fn body_scale(&self) -> f32 {
        let shoulders = (self.get(LEFT_SHOULDER).pos() + self.get(RIGHT_SHOULDER).pos()) / 2.0;
        let ankles = (self.get(LEFT_ANKLE).pos() + self.get(RIGHT_ANKLE).pos()) / 2.0;
        shoulders.distance(ankles) * 100.0
    }
}

/// Supplier of the most recent landmark frame
///
/// Missing or stale frames are normal; `None` means no pose is available.
pub trait PoseSource {
    fn latest_frame(&mut self) -> Option<LandmarkFrame>;
}

impl PoseSource for Option<LandmarkFrame> {
    fn latest_frame(&mut self) -> Option<LandmarkFrame> {
        self.clone()
    }
}
