//! Session configuration
//!
//! Supplied once at session start: difficulty selector, screen size and the
//! RNG seed for spawn placement.

use serde::{Deserialize, Serialize};

use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::error::ConfigError;

/// Configuration input for a game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Spawn RNG seed
    #[serde(default)]
    pub seed: u64,
}

impl SessionConfig {
    /// Build a config from a difficulty selector string
    pub fn new(selector: &str, screen_width: f32, screen_height: f32) -> Result<Self, ConfigError> {
        let config = Self {
            difficulty: selector.parse()?,
            screen_width,
            screen_height,
            seed: 0,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config.
    ///
    /// The difficulty selector follows the same rules as [`SessionConfig::new`]:
    /// case-insensitive, and an unknown level is
    /// [`ConfigError::UnknownDifficulty`] rather than a parse error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let config = Self {
            difficulty: raw.difficulty.parse()?,
            screen_width: raw.screen_width,
            screen_height: raw.screen_height,
            seed: raw.seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_screen(self.screen_width, self.screen_height)
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }
}

/// Wire shape of [`SessionConfig`] with the selector left unparsed
#[derive(Deserialize)]
struct RawConfig {
    difficulty: String,
    screen_width: f32,
    screen_height: f32,
    #[serde(default)]
    seed: u64,
}

/// Screen dimensions must be finite and positive
pub fn validate_screen(width: f32, height: f32) -> Result<(), ConfigError> {
    let ok = |v: f32| v.is_finite() && v > 0.0;
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(ConfigError::InvalidScreen { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_from_selector() {
        let config = SessionConfig::new("medium", 1280.0, 720.0).unwrap();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.profile().target_score, 10);
    }

    #[test]
    fn test_unknown_selector_fails_fast() {
        let err = SessionConfig::new("extreme", 1280.0, 720.0).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDifficulty(_)));
    }

    #[test]
    fn test_invalid_screen_rejected() {
        let err = SessionConfig::new("easy", 0.0, 720.0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidScreen { .. }));
        assert!(SessionConfig::new("easy", f32::NAN, 720.0).is_err());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"difficulty":"hard","screen_width":800,"screen_height":600,"seed":42}"#;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_from_json_seed_defaults_to_zero() {
        let json = r#"{"difficulty":"easy","screen_width":800,"screen_height":600}"#;
        assert_eq!(SessionConfig::from_json(json).unwrap().seed, 0);
    }

    #[test]
    fn test_from_json_unknown_difficulty() {
        let json = r#"{"difficulty":"insane","screen_width":800,"screen_height":600}"#;
        let err = SessionConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDifficulty(ref s) if s == "insane"));
    }

    #[test]
    fn test_from_json_selector_case_insensitive() {
        let json = r#"{"difficulty":"EASY","screen_width":800,"screen_height":600}"#;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.difficulty, SessionConfig::new("EASY", 800.0, 600.0).unwrap().difficulty);
    }

    #[test]
    fn test_from_json_malformed_is_parse_error() {
        let json = r#"{"difficulty":"easy","screen_width":"wide"}"#;
        assert!(matches!(SessionConfig::from_json(json), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_json_invalid_screen() {
        let json = r#"{"difficulty":"easy","screen_width":0,"screen_height":600}"#;
        assert!(matches!(
            SessionConfig::from_json(json),
            Err(ConfigError::InvalidScreen { .. })
        ));
    }
}
