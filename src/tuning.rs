//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a round can be rebalanced
//! without touching code. Loaded from JSON: a file on native, LocalStorage in
//! the browser.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;
use crate::secs_to_frames;

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Round rules ===
    /// Round length in seconds
    pub round_seconds: u32,
    /// Score needed at timeout to win
    pub goal: u32,
    /// Lives at round start (1..=MAX_LIVES)
    pub start_lives: u8,

    // === Scoring ===
    pub plain_points: u32,
    pub bonus_points: u32,
    /// Points lost when tapping a hazard (score floors at zero)
    pub hazard_penalty: u32,

    // === Spawning ===
    /// Probability a spawn is a Bonus
    pub bonus_chance: f32,
    /// Probability a spawn is a Hazard
    pub hazard_chance: f32,
    /// Seconds between spawns, re-rolled after every spawn
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    /// Horizontal spawn range, percent
    pub spawn_x_max: f32,
    /// Starting vertical position, percent
    pub spawn_y: f32,
    /// Fall speed range, percent per frame
    pub min_fall_speed: f32,
    pub max_fall_speed: f32,
    /// Objects past this height have left the screen
    pub exit_y: f32,

    // === Timing ===
    /// Seconds a tapped object lingers before leaving the active set
    pub removal_settle_secs: f32,
    /// Simulation frames per second
    pub tick_hz: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            goal: GOAL_POINTS,
            start_lives: MAX_LIVES,

            plain_points: PLAIN_POINTS,
            bonus_points: BONUS_POINTS,
            hazard_penalty: HAZARD_PENALTY,

            bonus_chance: BONUS_CHANCE,
            hazard_chance: HAZARD_CHANCE,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_max: SPAWN_INTERVAL_MAX,
            spawn_x_max: SPAWN_X_MAX,
            spawn_y: SPAWN_Y,
            min_fall_speed: MIN_FALL_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            exit_y: EXIT_Y,

            removal_settle_secs: REMOVAL_SETTLE_SECS,
            tick_hz: TICK_HZ,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value keeps the game's invariants intact
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.round_seconds == 0 {
            return Err(TuningError::invalid("round_seconds", "must be at least 1"));
        }
        if self.start_lives == 0 || self.start_lives > MAX_LIVES {
            return Err(TuningError::invalid(
                "start_lives",
                format!("must be in 1..={MAX_LIVES}"),
            ));
        }
        if self.tick_hz == 0 {
            return Err(TuningError::invalid("tick_hz", "must be at least 1"));
        }

        let chance_ok = |p: f32| (0.0..=1.0).contains(&p);
        if !chance_ok(self.bonus_chance) {
            return Err(TuningError::invalid("bonus_chance", "must be in [0, 1]"));
        }
        if !chance_ok(self.hazard_chance) {
            return Err(TuningError::invalid("hazard_chance", "must be in [0, 1]"));
        }
        if self.bonus_chance + self.hazard_chance > 1.0 {
            return Err(TuningError::invalid(
                "hazard_chance",
                "bonus_chance + hazard_chance must not exceed 1",
            ));
        }

        if !(self.spawn_interval_min > 0.0 && self.spawn_interval_min <= self.spawn_interval_max)
        {
            return Err(TuningError::invalid(
                "spawn_interval_min",
                "must be positive and not above spawn_interval_max",
            ));
        }
        if !(self.min_fall_speed > 0.0 && self.min_fall_speed <= self.max_fall_speed) {
            return Err(TuningError::invalid(
                "min_fall_speed",
                "must be positive and not above max_fall_speed",
            ));
        }
        if !(self.spawn_x_max >= 0.0 && self.spawn_x_max.is_finite()) {
            return Err(TuningError::invalid("spawn_x_max", "must be finite and >= 0"));
        }
        if !(self.exit_y > self.spawn_y) {
            return Err(TuningError::invalid("exit_y", "must be below spawn_y"));
        }
        if !(self.removal_settle_secs >= 0.0) {
            return Err(TuningError::invalid("removal_settle_secs", "must be >= 0"));
        }
        Ok(())
    }

    /// Frames between countdown ticks
    pub fn timer_period_frames(&self) -> u32 {
        self.tick_hz
    }

    /// Inclusive spawn interval range, in frames
    pub fn spawn_interval_frames(&self) -> (u32, u32) {
        (
            secs_to_frames(self.spawn_interval_min, self.tick_hz),
            secs_to_frames(self.spawn_interval_max, self.tick_hz),
        )
    }

    /// Frames a tapped object lingers before removal
    pub fn removal_settle_frames(&self) -> u32 {
        secs_to_frames(self.removal_settle_secs, self.tick_hz)
    }

    /// Seconds per simulation frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.tick_hz as f32
    }

    /// Environment variable naming a tuning file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub const ENV_VAR: &'static str = "DROP_CATCH_TUNING";

    /// Load tuning from the file named by `DROP_CATCH_TUNING`, or defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::load_file(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Read and validate a tuning file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "drop_catch_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.spawn_interval_frames(), (60, 90));
        assert_eq!(tuning.removal_settle_frames(), 18);
        assert_eq!(tuning.timer_period_frames(), 60);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "round_seconds": 45, "goal": 150 }"#).unwrap();
        assert_eq!(tuning.round_seconds, 45);
        assert_eq!(tuning.goal, 150);
        assert_eq!(tuning.start_lives, MAX_LIVES);
        assert_eq!(tuning.plain_points, PLAIN_POINTS);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            bonus_chance: 0.1,
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_values() {
        let too_many_lives = Tuning {
            start_lives: MAX_LIVES + 1,
            ..Default::default()
        };
        assert!(matches!(
            too_many_lives.validate(),
            Err(TuningError::Invalid { field: "start_lives", .. })
        ));

        let weights = Tuning {
            bonus_chance: 0.6,
            hazard_chance: 0.6,
            ..Default::default()
        };
        assert!(weights.validate().is_err());

        let speeds = Tuning {
            min_fall_speed: 0.9,
            max_fall_speed: 0.3,
            ..Default::default()
        };
        assert!(speeds.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
