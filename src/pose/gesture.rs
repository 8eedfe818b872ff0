//! Gesture classification from noisy landmark frames
//!
//! Two gestures gate a catch: hands joined and squatting. Hands-joined is a
//! stateless per-frame test. Squat detection smooths the knee angle across
//! frames and debounces the resulting boolean so single-frame threshold
//! crossings don't flicker.
//!
//! Missing or low-confidence landmarks always resolve to the conservative
//! answer (hands apart, leg straight), never to an error.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::LandmarkFrame;
use crate::angle_between;
use crate::consts::*;
use crate::difficulty::DifficultyProfile;

/// Per-tick gesture result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GestureFlags {
    pub hands_joined: bool,
    pub squatting: bool,
}

impl GestureFlags {
    /// Both gestures held - a catch is possible
    pub fn can_catch(&self) -> bool {
        self.hands_joined && self.squatting
    }
}

/// Are the wrists pressed together at the same height?
///
/// Distances are measured in normalized landmark space. The elbow gap is the
/// scale reference, so the test is independent of how far the player stands
/// from the camera. The x delta is inverted for both pairs, which keeps the
/// ratio identical for mirrored and unmirrored feeds.
pub fn hands_joined(frame: &LandmarkFrame) -> bool {
    let (left_wrist, right_wrist) = frame.wrists();
    if left_wrist.visibility < WRIST_MIN_VISIBILITY || right_wrist.visibility < WRIST_MIN_VISIBILITY {
        return false;
    }
    let left_elbow = frame.get(LEFT_ELBOW);
    let right_elbow = frame.get(RIGHT_ELBOW);

    let mirrored_gap = |a: Vec2, b: Vec2| Vec2::new(-(a.x - b.x), a.y - b.y).length();
    let wrist_distance = mirrored_gap(left_wrist.pos(), right_wrist.pos());
    let elbow_distance = mirrored_gap(left_elbow.pos(), right_elbow.pos());

    let close = wrist_distance < elbow_distance * HANDS_JOINED_RATIO;
    let level = (left_wrist.y - right_wrist.y).abs() < HANDS_MAX_HEIGHT_DIFF;
    close && level
}

/// Raw right-knee angle in degrees, or `None` if the leg isn't clearly visible.
///
/// Horizontal components are taken in absolute value so the angle does not
/// depend on which way the feed is mirrored.
pub fn knee_angle(frame: &LandmarkFrame) -> Option<f32> {
    let hip = frame.get(RIGHT_HIP);
    let knee = frame.get(RIGHT_KNEE);
    let ankle = frame.get(RIGHT_ANKLE);
    if [hip, knee, ankle].iter().any(|lm| lm.visibility < LEG_MIN_VISIBILITY) {
        return None;
    }
    let to_hip = Vec2::new((hip.x - knee.x).abs(), hip.y - knee.y);
    let to_ankle = Vec2::new((ankle.x - knee.x).abs(), ankle.y - knee.y);
    angle_between(to_hip, to_ankle)
}

/// Classifier state carried across frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureState {
    /// Exponentially smoothed knee angle; `None` until the first clear sample
    pub smoothed_knee_angle: Option<f32>,
    /// Last committed squat decision
    pub squat_state: bool,
    /// Consecutive raw samples disagreeing with `squat_state`
    pub squat_debounce_count: u32,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            smoothed_knee_angle: None,
            squat_state: false,
            squat_debounce_count: 0,
        }
    }
}

impl GestureState {
    /// Fold one raw knee angle into the running average
    pub fn smooth(self, raw: f32) -> (Self, f32) {
        let smoothed = match self.smoothed_knee_angle {
            None => raw,
            Some(prev) => prev * (1.0 - KNEE_SMOOTHING) + raw * KNEE_SMOOTHING,
        };
        (
            Self {
                smoothed_knee_angle: Some(smoothed),
                ..self
            },
            smoothed,
        )
    }

    /// Feed one raw squat decision through the debounce
    pub fn debounce(self, raw: bool) -> (Self, bool) {
        if raw == self.squat_state {
            return (
                Self {
                    squat_debounce_count: 0,
                    ..self
                },
                self.squat_state,
            );
        }
        let count = self.squat_debounce_count + 1;
        if count >= SQUAT_DEBOUNCE_TICKS {
            (
                Self {
                    squat_state: raw,
                    squat_debounce_count: 0,
                    ..self
                },
                raw,
            )
        } else {
            (
                Self {
                    squat_debounce_count: count,
                    ..self
                },
                self.squat_state,
            )
        }
    }
}

/// Stateful per-frame gesture classifier
///
/// Not thread-safe; owned by the tick driver.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    state: GestureState,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Last smoothed knee angle, or a straight leg if none seen yet
    pub fn smoothed_knee_angle(&self) -> f32 {
        self.state.smoothed_knee_angle.unwrap_or(STANDING_KNEE_ANGLE)
    }

    pub fn is_squatting(&self) -> bool {
        self.state.squat_state
    }

    /// Forget all history (used on restart)
    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }

    pub fn classify_hands_joined(&self, frame: &LandmarkFrame) -> bool {
        hands_joined(frame)
    }

    /// Smoothed knee angle in degrees.
    ///
    /// An unclear leg reads as straight and leaves the running average alone.
    pub fn classify_knee_angle(&mut self, frame: &LandmarkFrame) -> f32 {
        let Some(raw) = knee_angle(frame) else {
            return STANDING_KNEE_ANGLE;
        };
        let (state, smoothed) = self.state.smooth(raw);
        self.state = state;
        smoothed
    }

    /// Debounced squat decision against the profile's knee-angle threshold
    pub fn classify_squat(&mut self, frame: &LandmarkFrame, profile: &DifficultyProfile) -> bool {
        let angle = self.classify_knee_angle(frame);
        let raw = angle <= profile.squat_angle_threshold;
        let (state, squatting) = self.state.debounce(raw);
        self.state = state;
        squatting
    }

    /// Classify both gestures for one frame
    pub fn classify(&mut self, frame: &LandmarkFrame, profile: &DifficultyProfile) -> GestureFlags {
        GestureFlags {
            hands_joined: self.classify_hands_joined(frame),
            squatting: self.classify_squat(frame, profile),
        }
    }
}
