//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GOAL_POINTS, MAX_LIVES, POINTS_PER_DROP, ROUND_SECONDS};
use crate::tuning::Tuning;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// On the start menu, nothing scheduled
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Drivers keep firing but do nothing
    Paused,
    /// Round over, summary available
    Ended,
}

impl Phase {
    /// Running or Paused
    pub fn is_live(self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }
}

/// Falling object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Clean drop
    #[default]
    Plain,
    /// Jerry can, worth more
    Bonus,
    /// Polluted drop, costs points and a life when tapped
    Hazard,
}

impl ObjectKind {
    /// Whether letting this object fall off screen costs a life
    pub fn penalizes_miss(self) -> bool {
        !matches!(self, ObjectKind::Hazard)
    }
}

/// Where an object is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectState {
    /// Falling and tappable
    Falling,
    /// Tapped; leaves the active set when `frames_left` reaches zero
    Removing { frames_left: u32 },
}

/// A falling object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub kind: ObjectKind,
    /// Position in percent of the play area (x across, y down)
    pub pos: Vec2,
    /// Fall speed, percent per frame
    pub velocity: f32,
    pub state: ObjectState,
}

impl FallingObject {
    pub fn new(id: u32, kind: ObjectKind, pos: Vec2, velocity: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            velocity,
            state: ObjectState::Falling,
        }
    }

    pub fn is_removing(&self) -> bool {
        matches!(self.state, ObjectState::Removing { .. })
    }
}

/// Why a round was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    OutOfLives,
    Timeout,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss(LossCause),
}

impl Outcome {
    /// Outcome at timeout: win iff the goal was reached
    pub fn at_timeout(score: u32, goal: u32) -> Self {
        if score >= goal {
            Outcome::Win
        } else {
            Outcome::Loss(LossCause::Timeout)
        }
    }

    /// Outcome for a round stopped by `cause`; a timeout still wins at the goal
    pub fn for_end(cause: LossCause, score: u32, goal: u32) -> Self {
        match cause {
            LossCause::Timeout => Outcome::at_timeout(score, goal),
            LossCause::OutOfLives => Outcome::Loss(LossCause::OutOfLives),
        }
    }

    pub fn is_win(self) -> bool {
        self == Outcome::Win
    }
}

/// End-of-round summary for the results screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub outcome: Outcome,
    pub final_score: u32,
    /// Clean drops collected (score / 10)
    pub drops_collected: u32,
    pub headline: String,
    pub message: String,
    /// Closing line about real-world clean water access
    pub impact: String,
}

impl GameSummary {
    pub fn new(outcome: Outcome, final_score: u32) -> Self {
        let drops_collected = final_score / POINTS_PER_DROP;
        let (headline, message) = match outcome {
            Outcome::Win => (
                "Well Funded!".to_string(),
                "You helped fund clean water awareness!".to_string(),
            ),
            Outcome::Loss(LossCause::Timeout) => (
                "Time's Up!".to_string(),
                format!("You collected {drops_collected} clean drops!"),
            ),
            Outcome::Loss(LossCause::OutOfLives) => (
                "Out of Lives!".to_string(),
                format!("You collected {drops_collected} clean drops!"),
            ),
        };
        let impact = if outcome.is_win() {
            "Amazing! In real life, clean water changes everything."
        } else {
            "Great effort! Every drop counts toward clean water access."
        };
        Self {
            outcome,
            final_score,
            drops_collected,
            headline,
            message,
            impact: impact.to_string(),
        }
    }
}

/// Events for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Create a visual for a new object
    ObjectSpawned { id: u32, kind: ObjectKind, x: f32, y: f32 },
    /// Object was tapped; play its removing animation
    ObjectTapped { id: u32, kind: ObjectKind },
    /// Tapped object settled; drop its visual
    ObjectRemoved { id: u32 },
    /// Object fell off screen and was retired
    ObjectMissed { id: u32, kind: ObjectKind },
    ScoreChanged { score: u32 },
    LivesChanged { lives: u8 },
    TimeTick { remaining: u32 },
    PauseChanged { paused: bool },
    /// Every visual goes at once (hard stop)
    Cleared,
    GameEnded { summary: GameSummary },
}

/// Round state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    /// Seconds left on the countdown
    pub time_remaining: u32,
    /// Always within 0..=MAX_LIVES
    pub lives: u8,
    pub goal: u32,
    pub phase: Phase,
    /// Active objects in spawn order
    pub objects: Vec<FallingObject>,
    /// Set when the round ends, cleared on start/exit
    pub summary: Option<GameSummary>,
    /// Next object ID; never reset so stale taps can't hit a newer round
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            time_remaining: ROUND_SECONDS,
            lives: MAX_LIVES,
            goal: GOAL_POINTS,
            phase: Phase::Idle,
            objects: Vec::new(),
            summary: None,
            next_id: 0,
        }
    }
}

impl GameState {
    pub fn new(tuning: &Tuning) -> Self {
        let mut state = Self::default();
        state.reset(tuning);
        state
    }

    /// Reset round values (score, lives, clock, objects); keeps the phase
    pub fn reset(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.time_remaining = tuning.round_seconds;
        self.lives = tuning.start_lives.min(MAX_LIVES);
        self.goal = tuning.goal;
        self.objects.clear();
        self.summary = None;
    }

    /// Allocate a new object ID
    pub fn next_object_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn object(&self, id: u32) -> Option<&FallingObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: u32) -> Option<&mut FallingObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Remove an object by ID; returns it if it was still present
    pub fn remove_object(&mut self, id: u32) -> Option<FallingObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    /// Add points
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Subtract points, flooring at zero
    pub fn deduct_score(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    /// Lose one life (floors at zero); returns true if none remain
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Goal progress for the HUD bar, 0-100
    pub fn progress_percent(&self) -> f32 {
        if self.goal == 0 {
            return 100.0;
        }
        (self.score as f32 / self.goal as f32 * 100.0).min(100.0)
    }
}
