//! Drop Catch - a timed falling-drop catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, taps, session lifecycle)
//! - `tuning`: Data-driven game balance
//! - `web`: Browser bindings (wasm32 only)

pub mod error;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::TuningError;
pub use tuning::Tuning;

/// Game configuration constants
///
/// These are the defaults behind [`Tuning::default`]. `MAX_LIVES` also caps
/// any tuned starting lives.
pub mod consts {
    /// Simulation frame rate (motion ticks per second)
    pub const TICK_HZ: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock delta accepted by a single advance (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Round rules
    pub const ROUND_SECONDS: u32 = 30;
    pub const GOAL_POINTS: u32 = 100;
    pub const MAX_LIVES: u8 = 3;

    /// Tap scoring
    pub const PLAIN_POINTS: u32 = 10;
    pub const BONUS_POINTS: u32 = 25;
    pub const HAZARD_PENALTY: u32 = 15;

    /// Spawn weights (remainder is Plain)
    pub const BONUS_CHANCE: f32 = 0.05;
    pub const HAZARD_CHANCE: f32 = 0.25;

    /// Spawn interval range (seconds)
    pub const SPAWN_INTERVAL_MIN: f32 = 1.0;
    pub const SPAWN_INTERVAL_MAX: f32 = 1.5;

    /// Play field, in percent of the visible area
    pub const SPAWN_X_MAX: f32 = 85.0;
    pub const SPAWN_Y: f32 = -5.0;
    pub const EXIT_Y: f32 = 110.0;

    /// Fall speed range (percent per frame)
    pub const MIN_FALL_SPEED: f32 = 0.3;
    pub const MAX_FALL_SPEED: f32 = 0.6;

    /// Delay between a tap and the object leaving the active set (seconds)
    pub const REMOVAL_SETTLE_SECS: f32 = 0.3;

    /// Points per collected drop, for the end-of-round message
    pub const POINTS_PER_DROP: u32 = 10;
}

/// Convert a duration in seconds into a whole number of frames (at least one)
#[inline]
pub fn secs_to_frames(secs: f32, tick_hz: u32) -> u32 {
    ((secs * tick_hz as f32).round() as u32).max(1)
}

/// How-to-play copy shown by the presentation layer's help control
pub fn help_text(tuning: &Tuning) -> String {
    format!(
        "How to Play:\n\n\
         - Tap water drops to collect them (+{plain} points)\n\
         - Tap jerry cans for bonus points (+{bonus} points)\n\
         - Avoid polluted drops or you'll lose {penalty} points and a life\n\
         - Reach {goal} points in {secs} seconds to win!\n\
         - You have {lives} lives - miss clean drops or hit polluted ones to lose them",
        plain = tuning.plain_points,
        bonus = tuning.bonus_points,
        penalty = tuning.hazard_penalty,
        goal = tuning.goal,
        secs = tuning.round_seconds,
        lives = tuning.start_lives,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_frames() {
        assert_eq!(secs_to_frames(1.0, 60), 60);
        assert_eq!(secs_to_frames(0.3, 60), 18);
        assert_eq!(secs_to_frames(1.5, 60), 90);
        assert_eq!(secs_to_frames(0.0, 60), 1);
    }

    #[test]
    fn test_help_text_mentions_rules() {
        let text = help_text(&Tuning::default());
        assert!(text.contains("+10"));
        assert!(text.contains("+25"));
        assert!(text.contains("100 points in 30 seconds"));
    }
}
