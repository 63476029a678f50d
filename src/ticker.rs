use std::time::{Duration, Instant};

use crate::config::{MIN_TICK_INTERVAL_MS, SPEED_STEP_MS};

/// Fixed-interval pacing for the tick loop.
///
/// The interval can change mid-game; the next fire is measured from the last
/// one, so a change never resets the game or replays missed ticks.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    last_fire: Instant,
    paused: bool,
}

impl Ticker {
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval: clamp_interval(interval),
            last_fire: now,
            paused: false,
        }
    }

    /// Returns true and restarts the period when a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.paused || now.duration_since(self.last_fire) < self.interval {
            return false;
        }
        self.last_fire = now;
        true
    }

    /// Time left until the next tick, zero when one is already due.
    ///
    /// A paused ticker has no next tick and returns [`Duration::MAX`].
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Duration {
        if self.paused {
            return Duration::MAX;
        }
        self.interval
            .saturating_sub(now.duration_since(self.last_fire))
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = clamp_interval(interval);
    }

    /// Shortens the interval by one speed step.
    pub fn faster(&mut self) {
        self.set_interval(
            self.interval
                .saturating_sub(Duration::from_millis(SPEED_STEP_MS)),
        );
    }

    /// Lengthens the interval by one speed step.
    pub fn slower(&mut self) {
        self.set_interval(self.interval + Duration::from_millis(SPEED_STEP_MS));
    }

    /// Stops firing until resumed.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes firing; the first tick comes one full interval after `now`.
    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        self.last_fire = now;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

fn clamp_interval(interval: Duration) -> Duration {
    interval.max(Duration::from_millis(MIN_TICK_INTERVAL_MS))
}
