//! Tap resolution

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, LossCause, ObjectKind, ObjectState, Phase};
use crate::tuning::Tuning;

/// Result of a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapOutcome {
    /// Not running, unknown ID, or object already removing
    Ignored,
    /// Object collected
    Scored { kind: ObjectKind, points: u32 },
    /// Hazard hit, round continues
    Penalized { points_lost: u32 },
    /// Hazard hit took the last life
    OutOfLives,
}

impl TapOutcome {
    /// The loss to hand to the session, if the tap ended the round
    pub fn ending(self) -> Option<LossCause> {
        match self {
            TapOutcome::OutOfLives => Some(LossCause::OutOfLives),
            _ => None,
        }
    }
}

/// Resolve a tap on object `id`
pub fn resolve_tap(
    state: &mut GameState,
    id: u32,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> TapOutcome {
    if state.phase != Phase::Running {
        log::trace!("Tap on #{} ignored ({:?})", id, state.phase);
        return TapOutcome::Ignored;
    }
    let kind = match state.object(id) {
        Some(object) if !object.is_removing() => object.kind,
        _ => {
            log::trace!("Tap on #{} ignored (gone or removing)", id);
            return TapOutcome::Ignored;
        }
    };

    let outcome = match kind {
        ObjectKind::Plain | ObjectKind::Bonus => {
            let points = if kind == ObjectKind::Bonus {
                tuning.bonus_points
            } else {
                tuning.plain_points
            };
            state.add_score(points);
            events.push(GameEvent::ScoreChanged { score: state.score });
            TapOutcome::Scored { kind, points }
        }
        ObjectKind::Hazard => {
            let before = state.score;
            state.deduct_score(tuning.hazard_penalty);
            let out_of_lives = state.lose_life();
            events.push(GameEvent::ScoreChanged { score: state.score });
            events.push(GameEvent::LivesChanged { lives: state.lives });
            if out_of_lives {
                log::debug!("Hazard #{} took the last life", id);
                return TapOutcome::OutOfLives;
            }
            TapOutcome::Penalized {
                points_lost: before - state.score,
            }
        }
    };

    let settle = tuning.removal_settle_frames();
    if let Some(object) = state.object_mut(id) {
        object.state = ObjectState::Removing {
            frames_left: settle,
        };
    }
    events.push(GameEvent::ObjectTapped { id, kind });
    log::debug!("Tapped {:?} #{}, score {}", kind, id, state.score);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FallingObject;
    use glam::Vec2;

    fn running_with(kind: ObjectKind) -> (GameState, u32) {
        let mut state = GameState::new(&Tuning::default());
        state.phase = Phase::Running;
        let id = state.next_object_id();
        state
            .objects
            .push(FallingObject::new(id, kind, Vec2::new(40.0, 30.0), 0.4));
        (state, id)
    }

    #[test]
    fn test_tap_plain_and_bonus() {
        let tuning = Tuning::default();
        let mut events = Vec::new();

        let (mut state, id) = running_with(ObjectKind::Plain);
        let outcome = resolve_tap(&mut state, id, &tuning, &mut events);
        assert_eq!(
            outcome,
            TapOutcome::Scored {
                kind: ObjectKind::Plain,
                points: 10
            }
        );
        assert_eq!(state.score, 10);
        assert!(state.object(id).unwrap().is_removing());

        let (mut state, id) = running_with(ObjectKind::Bonus);
        resolve_tap(&mut state, id, &tuning, &mut events);
        assert_eq!(state.score, 25);
    }

    #[test]
    fn test_tap_hazard_floors_score() {
        let tuning = Tuning::default();
        let mut events = Vec::new();
        let (mut state, id) = running_with(ObjectKind::Hazard);
        state.score = 5;

        let outcome = resolve_tap(&mut state, id, &tuning, &mut events);
        assert_eq!(outcome, TapOutcome::Penalized { points_lost: 5 });
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_hazard_on_last_life() {
        let tuning = Tuning::default();
        let mut events = Vec::new();
        let (mut state, id) = running_with(ObjectKind::Hazard);
        state.lives = 1;

        let outcome = resolve_tap(&mut state, id, &tuning, &mut events);
        assert_eq!(outcome, TapOutcome::OutOfLives);
        assert_eq!(outcome.ending(), Some(LossCause::OutOfLives));
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_double_tap_is_noop() {
        let tuning = Tuning::default();
        let mut events = Vec::new();
        let (mut state, id) = running_with(ObjectKind::Plain);

        resolve_tap(&mut state, id, &tuning, &mut events);
        let second = resolve_tap(&mut state, id, &tuning, &mut events);
        assert_eq!(second, TapOutcome::Ignored);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_tap_ignored_unless_running() {
        let tuning = Tuning::default();
        let mut events = Vec::new();
        let (mut state, id) = running_with(ObjectKind::Plain);

        state.phase = Phase::Paused;
        assert_eq!(resolve_tap(&mut state, id, &tuning, &mut events), TapOutcome::Ignored);
        state.phase = Phase::Running;
        assert_eq!(resolve_tap(&mut state, 999, &tuning, &mut events), TapOutcome::Ignored);
        assert_eq!(state.score, 0);
        assert!(events.is_empty());
    }
}
