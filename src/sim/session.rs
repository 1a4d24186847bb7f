//! Session lifecycle and the cooperative frame scheduler
//!
//! One [`Session`] owns the round state, the RNG, and the three drivers
//! (countdown, spawner, motion). Each frame they run in a fixed order:
//! settle tapped objects, countdown, spawner, motion. Nothing else mutates
//! the state, so no driver ever observes a half-applied update.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::driver::Driver;
use super::interaction::{TapOutcome, resolve_tap};
use super::motion::{advance_objects, settle_removals};
use super::spawner::{roll_interval, spawn_object};
use super::state::{FallingObject, GameEvent, GameState, GameSummary, LossCause, Outcome, Phase};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::tuning::Tuning;

/// Read-only view for the HUD and object rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub score: u32,
    pub lives: u8,
    pub time_remaining: u32,
    pub goal: u32,
    /// Goal progress, 0-100
    pub progress: f32,
    pub objects: Vec<FallingObject>,
    pub summary: Option<GameSummary>,
}

/// A game session
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    tuning: Tuning,
    rng: Pcg32,
    countdown: Driver,
    spawner: Driver,
    motion: Driver,
    /// Simulation frames run since the session was created
    frame: u64,
    accumulator: f32,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create an idle session
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            state: GameState::new(&tuning),
            countdown: Driver::new(tuning.timer_period_frames()),
            spawner: Driver::new(tuning.spawn_interval_frames().0),
            motion: Driver::new(1),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            frame: 0,
            accumulator: 0.0,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        self.state.summary.as_ref()
    }

    /// Whether any driver is still scheduled
    pub fn drivers_armed(&self) -> bool {
        self.countdown.is_armed() || self.spawner.is_armed() || self.motion.is_armed()
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.state.phase,
            score: self.state.score,
            lives: self.state.lives,
            time_remaining: self.state.time_remaining,
            goal: self.state.goal,
            progress: self.state.progress_percent(),
            objects: self.state.objects.clone(),
            summary: self.state.summary.clone(),
        }
    }

    // === Lifecycle ===

    /// Begin a new round. Only valid from Idle or Ended.
    pub fn start(&mut self) -> bool {
        if self.state.phase.is_live() {
            log::debug!("start() ignored while {:?}", self.state.phase);
            return false;
        }

        self.state.reset(&self.tuning);
        self.state.phase = Phase::Running;
        self.accumulator = 0.0;

        self.countdown.set_period(self.tuning.timer_period_frames());
        self.countdown.arm();
        let first_spawn = roll_interval(&mut self.rng, &self.tuning);
        self.spawner.set_period(first_spawn);
        self.spawner.arm();
        self.motion.arm();

        self.events.push(GameEvent::ScoreChanged { score: 0 });
        self.events.push(GameEvent::LivesChanged {
            lives: self.state.lives,
        });
        self.events.push(GameEvent::TimeTick {
            remaining: self.state.time_remaining,
        });
        log::info!(
            "Round started: {}s, goal {}, {} lives",
            self.state.time_remaining,
            self.state.goal,
            self.state.lives
        );
        true
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        self.state.phase = Phase::Paused;
        self.events.push(GameEvent::PauseChanged { paused: true });
        log::info!("Paused");
        true
    }

    /// Paused -> Running
    pub fn resume(&mut self) -> bool {
        if self.state.phase != Phase::Paused {
            return false;
        }
        self.state.phase = Phase::Running;
        self.events.push(GameEvent::PauseChanged { paused: false });
        log::info!("Resumed");
        true
    }

    /// Pause button: flips between Running and Paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Cancel all drivers and clear every object, pending removals included.
    ///
    /// `to` is Ended when the round finished and Idle when leaving for the
    /// menu. Safe to call repeatedly.
    pub fn stop(&mut self, to: Phase) {
        debug_assert!(matches!(to, Phase::Ended | Phase::Idle));
        self.countdown.cancel();
        self.spawner.cancel();
        self.motion.cancel();
        self.accumulator = 0.0;

        if !self.state.objects.is_empty() {
            self.state.objects.clear();
            self.events.push(GameEvent::Cleared);
        }
        self.state.phase = to;
    }

    /// Finish the round because of `cause` and record the summary.
    ///
    /// The outcome comes from the round itself: a timeout is a win iff the
    /// score reached the goal, running out of lives is always a loss.
    pub fn end(&mut self, cause: LossCause) {
        if !self.state.phase.is_live() {
            return;
        }
        self.stop(Phase::Ended);

        let outcome = Outcome::for_end(cause, self.state.score, self.state.goal);
        let summary = GameSummary::new(outcome, self.state.score);
        log::info!(
            "Round over: {:?}, score {}, {}s left",
            outcome,
            summary.final_score,
            self.state.time_remaining
        );
        self.state.summary = Some(summary.clone());
        self.events.push(GameEvent::GameEnded { summary });
    }

    /// Stop whatever is running and start a fresh round
    pub fn restart(&mut self) {
        if self.state.phase.is_live() {
            self.stop(Phase::Ended);
        }
        self.start();
    }

    /// Stop and return to the menu
    pub fn exit_to_menu(&mut self) {
        self.stop(Phase::Idle);
        self.state.summary = None;
        log::info!("Exited to menu");
    }

    // === Input ===

    /// Tap on an object
    pub fn on_tap(&mut self, id: u32) -> TapOutcome {
        let outcome = resolve_tap(&mut self.state, id, &self.tuning, &mut self.events);
        if let Some(cause) = outcome.ending() {
            self.end(cause);
        }
        outcome
    }

    // === Scheduling ===

    /// Run one simulation frame
    pub fn step(&mut self) {
        if !self.drivers_armed() {
            return;
        }
        self.frame += 1;

        settle_removals(&mut self.state, &mut self.events);

        if self.countdown.poll() && self.state.phase == Phase::Running {
            self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
            self.events.push(GameEvent::TimeTick {
                remaining: self.state.time_remaining,
            });
            if self.state.time_remaining == 0 {
                self.end(LossCause::Timeout);
                return;
            }
        }

        if self.spawner.poll() {
            if self.state.phase == Phase::Running {
                let object = spawn_object(&mut self.state, &mut self.rng, &self.tuning);
                self.events.push(GameEvent::ObjectSpawned {
                    id: object.id,
                    kind: object.kind,
                    x: object.pos.x,
                    y: object.pos.y,
                });
            }
            let next = roll_interval(&mut self.rng, &self.tuning);
            self.spawner.set_period(next);
        }

        if self.motion.poll() && self.state.phase == Phase::Running {
            if let Some(cause) = advance_objects(&mut self.state, &self.tuning, &mut self.events) {
                self.end(cause);
            }
        }
    }

    /// Run `frames` simulation frames
    pub fn step_frames(&mut self, frames: u32) {
        for _ in 0..frames {
            self.step();
        }
    }

    /// Feed a wall-clock delta (seconds); runs as many whole frames as fit.
    ///
    /// Returns the number of frames run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.drivers_armed() {
            return 0;
        }
        if !dt.is_finite() {
            log::warn!("Ignoring non-finite frame delta {}", dt);
            return 0;
        }
        let frame_dt = self.tuning.frame_dt();
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= frame_dt && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= frame_dt;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than catching up later
            self.accumulator = self.accumulator.min(frame_dt);
        }
        substeps
    }
}
