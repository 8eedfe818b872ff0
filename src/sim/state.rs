//! Session state and core simulation types
//!
//! A session runs Calibrating -> Running -> Over. `restart` returns to
//! Calibrating with fresh score and lives but the same difficulty.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::object::FallingObject;
use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::error::ConfigError;
use crate::pose::{GestureFlags, LandmarkFrame};
use crate::settings::{SessionConfig, validate_screen};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a body-scale baseline
    Calibrating,
    /// Active gameplay
    Running,
    /// Session ended (terminal until restart)
    Over,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Target score reached
    Cleared,
    /// No lives left
    OutOfLives,
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// Calibration finished; `fallback` warns that no pose was seen
    Calibrated { baseline: f32, fallback: bool },
    Spawned { id: u32, x: f32 },
    Missed { id: u32, lives: u8 },
    Caught { id: u32, score: u32 },
    GameOver { score: u32, outcome: GameOutcome },
}

/// Result of the calibration phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Shoulder-to-ankle distance x100
    pub baseline: f32,
    /// No pose was available and the default baseline was used
    pub fallback: bool,
}

/// Per-tick snapshot for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    pub lives: u8,
    pub remaining_target: u32,
    pub phase: GamePhase,
    pub object_positions: Vec<Vec2>,
    pub gestures: GestureFlags,
    pub baseline: Option<f32>,
}

/// Complete session state (deterministic for a given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameSession {
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    pub screen_width: f32,
    pub screen_height: f32,
    pub score: u32,
    pub lives: u8,
    /// Catches still needed to clear
    pub remaining_target: u32,
    /// Live objects (at most one while running)
    pub objects: Vec<FallingObject>,
    /// Clock value (seconds) of the last spawn
    pub last_spawn_time: f64,
    pub phase: GamePhase,
    /// Gesture flags from the most recent tick
    pub gestures: GestureFlags,
    pub baseline: Option<f32>,
    rng: Pcg32,
    next_id: u32,
}

impl GameSession {
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let profile = config.profile();
        Ok(Self {
            difficulty: config.difficulty,
            profile,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            score: 0,
            lives: STARTING_LIVES,
            remaining_target: profile.target_score,
            objects: Vec::new(),
            last_spawn_time: 0.0,
            phase: GamePhase::Calibrating,
            gestures: GestureFlags::default(),
            baseline: None,
            rng: Pcg32::seed_from_u64(config.seed),
            next_id: 1,
        })
    }

    /// Allocate a new object ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Measure the player's body scale and start play.
    ///
    /// Without a pose the default baseline is used and `fallback` is set.
    /// Only meaningful while Calibrating; otherwise the stored result is
    /// returned unchanged.
    pub fn calibrate(&mut self, frame: Option<&LandmarkFrame>) -> Calibration {
        if self.phase != GamePhase::Calibrating {
            log::warn!("calibrate called in {:?}, ignoring", self.phase);
            return Calibration {
                baseline: self.baseline.unwrap_or(DEFAULT_BASELINE),
                fallback: self.baseline.is_none(),
            };
        }

        let calibration = match frame {
            Some(frame) => {
                let baseline = frame.body_scale();
                log::info!("Calibration complete, baseline distance {baseline:.2}");
                Calibration {
                    baseline,
                    fallback: false,
                }
            }
            None => {
                log::warn!("No pose detected, using default baseline {DEFAULT_BASELINE}");
                Calibration {
                    baseline: DEFAULT_BASELINE,
                    fallback: true,
                }
            }
        };

        self.baseline = Some(calibration.baseline);
        self.phase = GamePhase::Running;
        log::info!(
            "Session running: {} difficulty, target {}",
            self.difficulty,
            self.remaining_target
        );
        calibration
    }

    /// Back to Calibrating with a fresh score, keeping the difficulty
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.remaining_target = self.profile.target_score;
        self.objects.clear();
        self.last_spawn_time = 0.0;
        self.gestures = GestureFlags::default();
        self.baseline = None;
        self.phase = GamePhase::Calibrating;
        log::info!("Session restarted ({} difficulty)", self.difficulty);
    }

    /// Adopt new screen dimensions, pulling live objects back on screen
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        validate_screen(width, height)?;
        self.screen_width = width;
        self.screen_height = height;
        if !self.is_over() {
            for obj in &mut self.objects {
                obj.clamp_to(width, height);
            }
        }
        Ok(())
    }

    /// Launch an object near `anchor_x` (screen pixels)
    pub fn spawn_object(&mut self, anchor_x: f32, now: f64) -> &FallingObject {
        let x = self.profile.spawn_x(self.screen_width, anchor_x, &mut self.rng);
        let id = self.next_entity_id();
        let obj = FallingObject::spawn(id, x, self.screen_width, self.screen_height, &self.profile);
        log::debug!("Spawned object {id} at x={x:.1}");
        self.last_spawn_time = now;
        self.objects.push(obj);
        &self.objects[self.objects.len() - 1]
    }

    pub fn snapshot(&self) -> SessionState {
        SessionState {
            score: self.score,
            lives: self.lives,
            remaining_target: self.remaining_target,
            phase: self.phase,
            object_positions: self.objects.iter().map(|o| o.pos).collect(),
            gestures: self.gestures,
            baseline: self.baseline,
        }
    }
}
