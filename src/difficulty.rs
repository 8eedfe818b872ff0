//! Difficulty levels and their tuning profiles
//!
//! Selected once at session start and never mutated.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Difficulty level
///
/// Deserializes through [`FromStr`], so JSON accepts the same selectors as
/// [`SessionConfig::new`](crate::SessionConfig::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Tuning for this level
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                initial_speed: 6.0,
                spawn_spread_ratio: 0.15,
                spawn_interval_secs: 2.0,
                gravity: 0.05,
                target_score: 8,
                squat_angle_threshold: 165.0,
            },
            Difficulty::Medium => DifficultyProfile {
                initial_speed: 7.0,
                spawn_spread_ratio: 0.2,
                spawn_interval_secs: 1.5,
                gravity: 0.06,
                target_score: 10,
                squat_angle_threshold: 150.0,
            },
            Difficulty::Hard => DifficultyProfile {
                initial_speed: 8.0,
                spawn_spread_ratio: 0.25,
                spawn_interval_secs: 1.2,
                gravity: 0.07,
                target_score: 12,
                squat_angle_threshold: 135.0,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable parameter bundle for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Launch speed of a new object (px/tick, upward)
    pub initial_speed: f32,
    /// Horizontal spawn jitter as a fraction of screen width
    pub spawn_spread_ratio: f32,
    /// Minimum gap between spawns (seconds)
    pub spawn_interval_secs: f64,
    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Catches needed to clear the session
    pub target_score: u32,
    /// Knee angle at or below which the player counts as squatting (degrees)
    pub squat_angle_threshold: f32,
}

impl DifficultyProfile {
    /// Half-width of the spawn window in pixels
    pub fn spawn_spread(&self, screen_width: f32) -> f32 {
        (screen_width * self.spawn_spread_ratio).floor()
    }

    /// Pick a spawn x uniformly within the spread window around `anchor_x`
    pub fn spawn_x<R: Rng>(&self, screen_width: f32, anchor_x: f32, rng: &mut R) -> f32 {
        let spread = self.spawn_spread(screen_width);
        if spread <= 0.0 {
            return anchor_x;
        }
        anchor_x + rng.random_range(-spread..spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" Medium ".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    }

    #[test]
    fn test_parse_unknown_difficulty_fails() {
        let err = "nightmare".parse::<Difficulty>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDifficulty(ref s) if s == "nightmare"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for level in Difficulty::ALL {
            assert_eq!(level.to_string().parse::<Difficulty>().unwrap(), level);
        }
    }

    #[test]
    fn test_deserialize_is_case_insensitive() {
        let level: Difficulty = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(level, Difficulty::Hard);
        assert_eq!(serde_json::to_string(&level).unwrap(), "\"hard\"");
        assert!(serde_json::from_str::<Difficulty>("\"nightmare\"").is_err());
    }

    #[test]
    fn test_profiles_get_harder() {
        let easy = Difficulty::Easy.profile();
        let hard = Difficulty::Hard.profile();
        assert!(hard.initial_speed > easy.initial_speed);
        assert!(hard.spawn_interval_secs < easy.spawn_interval_secs);
        assert!(hard.target_score > easy.target_score);
        assert!(hard.squat_angle_threshold < easy.squat_angle_threshold);
    }

    #[test]
    fn test_easy_profile_values() {
        let easy = Difficulty::Easy.profile();
        assert_eq!(easy.target_score, 8);
        assert_eq!(easy.initial_speed, 6.0);
        assert_eq!(easy.gravity, 0.05);
    }

    #[test]
    fn test_spawn_x_within_spread() {
        let profile = Difficulty::Hard.profile();
        let mut rng = Pcg32::seed_from_u64(7);
        let spread = profile.spawn_spread(1000.0);
        assert_eq!(spread, 250.0);
        for _ in 0..200 {
            let x = profile.spawn_x(1000.0, 400.0, &mut rng);
            assert!(x >= 400.0 - spread && x <= 400.0 + spread);
        }
    }

    #[test]
    fn test_spawn_x_zero_width_returns_anchor() {
        let profile = Difficulty::Easy.profile();
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(profile.spawn_x(0.0, 12.0, &mut rng), 12.0);
    }
}
