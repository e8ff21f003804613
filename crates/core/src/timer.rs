use std::time::Duration;

/// Result of advancing a `Countdown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub remaining: Duration,
    /// Set on exactly one tick: the one that drove `remaining` to zero.
    pub expired: bool,
}

/// Per-question countdown driven by externally supplied elapsed time.
///
/// The countdown owns no clock. Callers feed it deltas via `tick`, which
/// keeps it usable from an event loop, a test harness or a fixed-step host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: Duration,
    running: bool,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the countdown with a fresh duration, replacing any previous run.
    pub fn start(&mut self, duration: Duration) {
        self.remaining = duration;
        self.running = true;
    }

    /// Advance by `elapsed`. Idle countdowns report their frozen remaining time.
    pub fn tick(&mut self, elapsed: Duration) -> TimerTick {
        if !self.running {
            return TimerTick {
                remaining: self.remaining,
                expired: false,
            };
        }

        self.remaining = self.remaining.saturating_sub(elapsed);
        let expired = self.remaining.is_zero();
        if expired {
            self.running = false;
        }

        TimerTick {
            remaining: self.remaining,
            expired,
        }
    }

    /// Stop without expiring. Remaining time is kept for display.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Remaining time rounded up to whole seconds, as a countdown label shows it.
    #[must_use]
    pub fn whole_seconds_left(&self) -> u64 {
        let secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}
