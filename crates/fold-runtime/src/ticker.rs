#![forbid(unsafe_code)]

//! Cooperative fixed-interval ticking.
//!
//! The paper-fold surface animates on a fixed tick (10 ms by default). There
//! is no background thread: the host loop calls [`TickSource::poll`] with the
//! current time and gets back how many ticks became due since the last poll.
//!
//! # Invariants
//!
//! 1. An inactive ticker never reports due ticks.
//! 2. `cancel()` takes effect immediately; the next `poll` returns 0.
//! 3. A single `poll` never reports more than the catch-up limit. After a long
//!    stall the schedule is rebased on `now` instead of replaying every
//!    missed tick.
//!
//! # Failure Modes
//!
//! - `now` earlier than the last poll (clock went backwards): reports 0 and
//!   keeps the schedule.
//! - Zero interval: clamped to [`MIN_INTERVAL`].

use web_time::{Duration, Instant};

/// Default animation tick interval.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Smallest accepted tick interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Default cap on ticks reported by one poll.
pub const DEFAULT_MAX_CATCH_UP: u32 = 8;

/// Something that schedules animation ticks.
pub trait TickSource {
    /// Arm the source; the first tick is due one interval after `now`.
    fn start(&mut self, now: Instant);

    /// Disarm the source.
    fn cancel(&mut self);

    /// Whether ticks are being scheduled.
    fn is_active(&self) -> bool;

    /// Number of ticks that became due up to `now`.
    fn poll(&mut self, now: Instant) -> u32;

    /// Time until the next tick is due, if active.
    fn next_deadline(&self, now: Instant) -> Option<Duration>;

    /// Tick spacing.
    fn interval(&self) -> Duration;
}

/// A fixed-interval [`TickSource`].
#[derive(Debug, Clone)]
pub struct FixedTicker {
    interval: Duration,
    max_catch_up: u32,
    next_due: Option<Instant>,
    ticks_fired: u64,
}

impl FixedTicker {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            max_catch_up: DEFAULT_MAX_CATCH_UP,
            next_due: None,
            ticks_fired: 0,
        }
    }

    /// Limit how many ticks one poll may report (at least 1).
    #[must_use]
    pub fn with_max_catch_up(mut self, max: u32) -> Self {
        self.max_catch_up = max.max(1);
        self
    }

    /// Total ticks reported since construction.
    #[must_use]
    pub fn ticks_fired(&self) -> u64 {
        self.ticks_fired
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl TickSource for FixedTicker {
    fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
        tracing::trace!(interval_ms = self.interval.as_millis() as u64, "ticker started");
    }

    fn cancel(&mut self) {
        if self.next_due.take().is_some() {
            tracing::trace!("ticker cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut count = 0;
        while due <= now && count < self.max_catch_up {
            count += 1;
            due += self.interval;
        }
        if due <= now {
            // Stalled past the catch-up window.
            tracing::debug!(max = self.max_catch_up, "ticker rebased after stall");
            due = now + self.interval;
        }
        self.next_due = Some(due);
        self.ticks_fired += u64::from(count);
        count
    }

    fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    fn interval(&self) -> Duration {
        self.interval
    }
}
