//! Pure tick evaluation and scheduler bookkeeping.

use chrono::{DateTime, TimeDelta, Utc};

/// Scheduler loop phase.
///
/// `Idle` before the target is loaded, `Armed` while counting down,
/// `Firing` while a reset is running. A completed fire returns to `Armed`
/// for the new cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Armed,
    Firing,
}

/// What a single tick decided to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Target still ahead; remaining time until it
    Countdown(TimeDelta),
    /// Target has elapsed; trigger the reset
    Fire,
}

/// Decide the outcome of one tick given the target date and current time.
pub fn evaluate(target: DateTime<Utc>, now: DateTime<Utc>) -> TickOutcome {
    let remaining = target - now;
    if remaining > TimeDelta::zero() {
        TickOutcome::Countdown(remaining)
    } else {
        TickOutcome::Fire
    }
}

/// Counters tracked across the daemon's lifetime.
#[derive(Debug, Default)]
pub struct TickStats {
    /// Number of ticks since start
    pub tick_count: u64,
    /// Number of resets fired successfully
    pub resets_fired: u64,
    /// Number of resets that failed
    pub resets_failed: u64,
}

impl TickStats {
    /// Create zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tick.
    pub fn tick(&mut self) {
        self.tick_count += 1;
    }

    /// Record a successful reset.
    pub fn fired(&mut self) {
        self.resets_fired += 1;
    }

    /// Record a failed reset.
    pub fn failed(&mut self) {
        self.resets_failed += 1;
    }
}
