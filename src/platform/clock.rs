//! Fixed timestep pacing
//!
//! Real frame time goes into an accumulator; whole ticks come out. Time is
//! kept as `Duration` so accumulation is exact.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: Duration,
    accumulator: Duration,
    max_substeps: u32,
}

impl FixedStep {
    /// `tick_rate_hz` ticks per second, at most `max_substeps` per frame
    pub fn new(tick_rate_hz: u32, max_substeps: u32) -> Self {
        Self {
            dt: Duration::from_nanos(1_000_000_000 / u64::from(tick_rate_hz.max(1))),
            accumulator: Duration::ZERO,
            max_substeps: max_substeps.max(1),
        }
    }

    pub fn dt(&self) -> Duration {
        self.dt
    }

    /// Feed elapsed real time; returns how many ticks to run now.
    ///
    /// A long stall (debugger, suspended terminal) is clamped to
    /// `max_substeps` ticks instead of being replayed in full.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let cap = self.dt * self.max_substeps;
        self.accumulator = (self.accumulator + elapsed).min(cap);

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_substeps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        steps
    }

    /// Time left until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.dt.saturating_sub(self.accumulator)
    }
}
