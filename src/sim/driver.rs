//! Periodic drivers, counted in simulation frames
//!
//! A driver is armed while a round is live and fires every `period` frames.
//! It keeps counting while the session is paused; callers gate on the phase
//! when it fires, so resuming never replays missed ticks.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Driver {
    period: u32,
    elapsed: u32,
    armed: bool,
}

impl Driver {
    /// A disarmed driver with the given period (clamped to at least one frame)
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            elapsed: 0,
            armed: false,
        }
    }

    /// Start counting from zero
    pub fn arm(&mut self) {
        self.elapsed = 0;
        self.armed = true;
    }

    /// Stop firing. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Change the period; takes effect from the current count
    pub fn set_period(&mut self, period: u32) {
        self.period = period.max(1);
    }

    /// Advance one frame; true when the driver fires
    pub fn poll(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}
