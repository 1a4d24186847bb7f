//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (drivers count frames, not wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (objects kept in spawn order)
//! - No rendering or platform dependencies

pub mod driver;
pub mod interaction;
pub mod motion;
pub mod session;
pub mod spawner;
pub mod state;

pub use driver::Driver;
pub use interaction::{TapOutcome, resolve_tap};
pub use motion::{advance_objects, settle_removals};
pub use session::{Session, Snapshot};
pub use spawner::{kind_for_roll, roll_interval, roll_kind, spawn_object};
pub use state::{
    FallingObject, GameEvent, GameState, GameSummary, LossCause, ObjectKind, ObjectState,
    Outcome, Phase,
};
