//! Per-frame motion and retirement

use super::state::{GameEvent, GameState, LossCause, ObjectState};
use crate::tuning::Tuning;

/// Move every active object down by its velocity and retire the ones that
/// left the screen.
///
/// Tapped objects keep falling until they settle, and still count as missed
/// if they cross the exit line first. A missed Plain or Bonus costs a life.
/// When the last life goes, processing stops immediately and the loss is
/// returned; the caller ends the round.
pub fn advance_objects(
    state: &mut GameState,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> Option<LossCause> {
    let mut i = 0;
    while i < state.objects.len() {
        let object = &mut state.objects[i];
        object.pos.y += object.velocity;
        if object.pos.y <= tuning.exit_y {
            i += 1;
            continue;
        }

        let missed = state.objects.remove(i);
        events.push(GameEvent::ObjectMissed {
            id: missed.id,
            kind: missed.kind,
        });

        if missed.kind.penalizes_miss() {
            let out_of_lives = state.lose_life();
            log::debug!("Missed {:?} #{}, lives {}", missed.kind, missed.id, state.lives);
            events.push(GameEvent::LivesChanged { lives: state.lives });
            if out_of_lives {
                return Some(LossCause::OutOfLives);
            }
        }
    }
    None
}

/// Count down tapped objects and drop the ones that have settled
pub fn settle_removals(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut settled = Vec::new();
    for object in &mut state.objects {
        if let ObjectState::Removing { frames_left } = &mut object.state {
            *frames_left = frames_left.saturating_sub(1);
            if *frames_left == 0 {
                settled.push(object.id);
            }
        }
    }

    for id in settled {
        if state.remove_object(id).is_some() {
            events.push(GameEvent::ObjectRemoved { id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{FallingObject, ObjectKind};
    use glam::Vec2;

    fn state_with(kinds: &[(ObjectKind, f32)]) -> GameState {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        for &(kind, y) in kinds {
            let id = state.next_object_id();
            state
                .objects
                .push(FallingObject::new(id, kind, Vec2::new(50.0, y), 0.5));
        }
        state
    }

    #[test]
    fn test_objects_fall() {
        let tuning = Tuning::default();
        let mut state = state_with(&[(ObjectKind::Plain, -5.0)]);
        let mut events = Vec::new();

        advance_objects(&mut state, &tuning, &mut events);
        assert_eq!(state.objects[0].pos.y, -4.5);
        assert!(events.is_empty());
    }

    #[test]
    fn test_missed_plain_costs_life() {
        let tuning = Tuning::default();
        let mut state = state_with(&[(ObjectKind::Plain, 109.8), (ObjectKind::Bonus, 109.9)]);
        let mut events = Vec::new();

        assert_eq!(advance_objects(&mut state, &tuning, &mut events), None);
        assert!(state.objects.is_empty());
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_missed_hazard_is_free() {
        let tuning = Tuning::default();
        let mut state = state_with(&[(ObjectKind::Hazard, 109.8)]);
        let mut events = Vec::new();

        advance_objects(&mut state, &tuning, &mut events);
        assert!(state.objects.is_empty());
        assert_eq!(state.lives, 3);
        assert_eq!(
            events,
            vec![GameEvent::ObjectMissed {
                id: 0,
                kind: ObjectKind::Hazard
            }]
        );
    }

    #[test]
    fn test_last_life_stops_processing() {
        let tuning = Tuning::default();
        let mut state = state_with(&[(ObjectKind::Plain, 109.8), (ObjectKind::Plain, 0.0)]);
        state.lives = 1;
        let mut events = Vec::new();

        let outcome = advance_objects(&mut state, &tuning, &mut events);
        assert_eq!(outcome, Some(LossCause::OutOfLives));
        assert_eq!(state.lives, 0);
        // The second object was never moved
        assert_eq!(state.objects[0].pos.y, 0.0);
    }

    #[test]
    fn test_removing_objects_keep_falling() {
        let tuning = Tuning::default();
        let mut state = state_with(&[(ObjectKind::Plain, 50.0)]);
        state.objects[0].state = ObjectState::Removing { frames_left: 2 };
        let mut events = Vec::new();

        advance_objects(&mut state, &tuning, &mut events);
        assert_eq!(state.objects[0].pos.y, 50.5);
        assert_eq!(state.lives, 3);

        settle_removals(&mut state, &mut events);
        assert_eq!(state.objects.len(), 1);
        settle_removals(&mut state, &mut events);
        assert!(state.objects.is_empty());
        assert_eq!(events, vec![GameEvent::ObjectRemoved { id: 0 }]);
    }

    #[test]
    fn test_removing_object_past_exit_is_missed_once() {
        let tuning = Tuning::default();
        let mut state = state_with(&[(ObjectKind::Plain, 109.8)]);
        state.objects[0].state = ObjectState::Removing { frames_left: 1 };
        let mut events = Vec::new();

        assert_eq!(advance_objects(&mut state, &tuning, &mut events), None);
        assert!(state.objects.is_empty());
        assert_eq!(state.lives, 2);

        // Settling finds nothing left to remove
        settle_removals(&mut state, &mut events);
        assert_eq!(
            events,
            vec![
                GameEvent::ObjectMissed {
                    id: 0,
                    kind: ObjectKind::Plain
                },
                GameEvent::LivesChanged { lives: 2 },
            ]
        );
    }
}
