//! # Tick Clock
//!
//! Converts wall-clock frame times into whole fixed simulation steps, so the
//! player always advances at the rate its gravity constant was tuned for.

use std::time::Duration;

use log::debug;
use web_time::Instant;

use crate::engine_state::player::TICKS_PER_SECOND;

/// Length of one simulation step.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);
/// Upper bound on steps run for a single frame. Any further backlog is dropped.
pub const MAX_TICKS_PER_FRAME: u32 = 10;

/// Fixed-timestep accumulator.
#[derive(Debug, Clone)]
pub struct TickClock {
    last_time: Instant,
    accumulated: Duration,
}

impl TickClock {
    /// Starts the clock at `now` with nothing accumulated.
    pub fn new(now: Instant) -> Self {
        TickClock {
            last_time: now,
            accumulated: Duration::ZERO,
        }
    }

    /// Advances the clock to `now`.
    ///
    /// # Returns
    /// How many simulation steps to run this frame.
    pub fn advance(&mut self, now: Instant) -> u32 {
        self.accumulated += now.duration_since(self.last_time);
        self.last_time = now;

        let mut ticks = 0;
        while self.accumulated >= TICK_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulated -= TICK_DURATION;
            ticks += 1;
        }

        if self.accumulated >= TICK_DURATION {
            debug!("Dropping {:?} of simulation backlog", self.accumulated);
            self.accumulated = Duration::ZERO;
        }

        ticks
    }

    /// When the next step becomes due.
    pub fn next_tick_at(&self) -> Instant {
        self.last_time + (TICK_DURATION - self.accumulated)
    }
}
