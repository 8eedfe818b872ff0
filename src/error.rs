//! Configuration errors
//!
//! The only hard failures in the game core. Noisy or missing pose data is
//! never an error; classifiers fall back to conservative defaults instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("invalid screen size {width}x{height}")]
    InvalidScreen { width: f32, height: f32 },

    #[error("malformed session config: {0}")]
    Parse(#[from] serde_json::Error),
}
