use std::{
    thread,
    time::{Duration, Instant},
};

/// Source of tick pacing for [`crate::Scheduler::run`].
pub trait FrameClock {
    /// Blocks until the next tick is due.
    fn wait_for_next_frame(&mut self);
}

/// Fixed-rate timer used when no presentation callback drives the loop.
///
/// The first tick is released immediately. Each following deadline is one
/// interval after the previous one, or after the current instant when the
/// loop has fallen behind, so a slow generation never triggers a burst of
/// catch-up ticks.
#[derive(Clone, Debug)]
pub struct TimerClock {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl TimerClock {
    /// Rate used when none is configured.
    pub const DEFAULT_RATE_HZ: f64 = 60.0;

    /// Creates a clock releasing one tick per `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: None,
        }
    }

    /// Creates a clock releasing `rate_hz` ticks per second.
    ///
    /// Returns `None` for rates that are not finite and positive.
    #[must_use]
    pub fn from_rate(rate_hz: f64) -> Option<Self> {
        if !rate_hz.is_finite() || rate_hz <= 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(rate_hz.recip())
            .ok()
            .map(Self::new)
    }

    /// Time between two ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for TimerClock {
    fn default() -> Self {
        Self::new(Duration::from_nanos(
            (1_000_000_000.0 / Self::DEFAULT_RATE_HZ) as u64,
        ))
    }
}

impl FrameClock for TimerClock {
    fn wait_for_next_frame(&mut self) {
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            thread::sleep(deadline - now);
        }
        self.next_deadline = Some(deadline.max(now) + self.interval);
    }
}

/// Clock that never waits; ticks run back to back.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnpacedClock;

impl FrameClock for UnpacedClock {
    fn wait_for_next_frame(&mut self) {}
}
