//! Squat Catch - a motion-controlled catch game
//!
//! Core modules:
//! - `pose`: Landmark frames and gesture classification (hands joined, squat)
//! - `sim`: Deterministic simulation (falling objects, scoring, session phases)
//! - `difficulty`: Per-level tuning profiles
//! - `settings`: Session configuration input
//! - `driver`: Tick driver wiring a pose source to a presentation sink

pub mod difficulty;
pub mod driver;
pub mod error;
pub mod pose;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod bridge;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use driver::{PresentationSink, TickDriver};
pub use error::ConfigError;
pub use pose::{GestureClassifier, GestureFlags, Landmark, LandmarkFrame, PoseSource};
pub use settings::SessionConfig;
pub use sim::{GameEvent, GamePhase, GameSession, SessionState};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Landmarks per frame (MediaPipe Pose topology)
    pub const LANDMARK_COUNT: usize = 33;

    pub const NOSE: usize = 0;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;

    /// Wrists below this visibility count as "hands apart"
    pub const WRIST_MIN_VISIBILITY: f32 = 0.2;
    /// Wrist gap must be under this fraction of the elbow gap
    pub const HANDS_JOINED_RATIO: f32 = 0.8;
    /// Max vertical offset between wrists (normalized units)
    pub const HANDS_MAX_HEIGHT_DIFF: f32 = 0.1;

    /// Hip/knee/ankle below this visibility fall back to a straight leg
    pub const LEG_MIN_VISIBILITY: f32 = 0.3;
    /// Fully extended knee (degrees)
    pub const STANDING_KNEE_ANGLE: f32 = 180.0;
    /// Weight of the newest knee angle sample in the running average
    pub const KNEE_SMOOTHING: f32 = 0.3;
    /// Consecutive disagreeing samples before the squat state flips
    pub const SQUAT_DEBOUNCE_TICKS: u32 = 3;

    /// Lives at session start
    pub const STARTING_LIVES: u8 = 3;
    /// Object edge length at a 1000px short screen side
    pub const OBJECT_BASE_SIZE: f32 = 120.0;
    /// Body-scale baseline used when calibration sees no pose
    pub const DEFAULT_BASELINE: f32 = 50.0;
    /// Calibration countdown before play starts (seconds)
    pub const CALIBRATION_SECS: f64 = 3.0;
}

/// Map a normalized landmark position to mirrored screen pixels.
///
/// The camera feed is displayed flipped, so x is inverted once here and
/// nowhere else.
#[inline]
pub fn to_screen(normalized: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new((1.0 - normalized.x) * width, normalized.y * height)
}

/// Angle between two vectors in degrees (0..=180)
///
/// Returns `None` when either vector has zero length or a non-finite
/// component.
#[inline]
pub fn angle_between(v1: Vec2, v2: Vec2) -> Option<f32> {
    let mag = v1.length() * v2.length();
    if !mag.is_finite() || mag <= f32::EPSILON {
        return None;
    }
    let cos = (v1.dot(v2) / mag).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}
