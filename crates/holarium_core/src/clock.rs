//! Monotonic logical clock driving the simulation.
//!
//! One tick per driving-loop iteration; the pattern store also advances the
//! clock once per insertion, so store timestamps and the global tick share a
//! single timeline.

/// Free-running tick counter. Never wraps in practice (u64).
#[derive(Debug, Default, Clone)]
pub struct Clock {
    ticks: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick value.
    pub fn now(&self) -> u64 {
        self.ticks
    }

    /// Advances the clock by one tick.
    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    /// Advances the clock by `n` ticks in one step. The driving loop uses
    /// this to burn an idle budget without iterating tick-by-tick.
    pub fn advance_by(&mut self, n: u64) {
        self.ticks += n;
    }

    /// Resets the timeline to zero.
    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}
