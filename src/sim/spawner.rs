//! Weighted-random object spawning

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{FallingObject, GameState, ObjectKind};
use crate::tuning::Tuning;

/// Map a uniform roll in [0, 1) to an object kind.
///
/// The lowest band is Bonus, then Hazard, and the remainder is Plain.
pub fn kind_for_roll(roll: f32, tuning: &Tuning) -> ObjectKind {
    if roll < tuning.bonus_chance {
        ObjectKind::Bonus
    } else if roll < tuning.bonus_chance + tuning.hazard_chance {
        ObjectKind::Hazard
    } else {
        ObjectKind::Plain
    }
}

/// Draw an object kind
pub fn roll_kind(rng: &mut Pcg32, tuning: &Tuning) -> ObjectKind {
    kind_for_roll(rng.random::<f32>(), tuning)
}

/// Frames until the next spawn, uniform over the tuned interval
pub fn roll_interval(rng: &mut Pcg32, tuning: &Tuning) -> u32 {
    let (min, max) = tuning.spawn_interval_frames();
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}

/// Uniform sample in [lo, hi), or `lo` when the span is empty
fn sample_span(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

/// Spawn a new object at the top of the play area and add it to the state
pub fn spawn_object(state: &mut GameState, rng: &mut Pcg32, tuning: &Tuning) -> FallingObject {
    let kind = roll_kind(rng, tuning);
    let x = sample_span(rng, 0.0, tuning.spawn_x_max);
    let velocity = sample_span(rng, tuning.min_fall_speed, tuning.max_fall_speed);

    let object = FallingObject::new(
        state.next_object_id(),
        kind,
        Vec2::new(x, tuning.spawn_y),
        velocity,
    );
    log::debug!(
        "Spawned {:?} #{} at x={:.1} speed={:.2}",
        kind,
        object.id,
        x,
        velocity
    );
    state.objects.push(object.clone());
    object
}
