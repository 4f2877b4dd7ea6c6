//! Scheduler loop - ties the recurrence tracker to the batch resetter.
//!
//! State machine: `Idle -> Armed -> Firing -> Armed (new cycle)`. While
//! armed, each tick renders the countdown; once the target elapses the
//! ticker stops, the batch reset runs, the tracker re-arms from "now",
//! and the ticker restarts. Reset failures are logged and never crash
//! the loop.

use crate::config::Config;
use crate::daemon::tick::{Phase, TickOutcome, TickStats, evaluate};
use crate::daemon::ticker::Ticker;
use crate::error::{RescoreError, Result};
use crate::notify::NoticeBoard;
use crate::reset;
use crate::schedule::{RecurrenceTracker, format_remaining};
use crate::state::StateStore;
use crate::store::UserDirectory;
use chrono::{DateTime, TimeDelta, Utc};
use colored::*;
use log::{error, info, warn};
use std::io::Write;
use std::time::Duration;

/// Owns the countdown loop and the firing path.
pub struct Scheduler {
    tracker: RecurrenceTracker,
    ticker: Ticker,
    notices: NoticeBoard,
    phase: Phase,
    stats: TickStats,
    /// Serializes the firing path against re-entry
    reset_in_progress: bool,
}

impl Scheduler {
    /// Build a scheduler from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            tracker: RecurrenceTracker::new(config.schedule.anchor, config.schedule.interval_days),
            ticker: Ticker::new(Duration::from_millis(config.daemon.tick_interval_ms)),
            notices: NoticeBoard::new(TimeDelta::milliseconds(config.notify.show_duration_ms as i64)),
            phase: Phase::Idle,
            stats: TickStats::new(),
            reset_in_progress: false,
        }
    }

    /// Current loop phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Run the scheduler loop until ctrl-c.
    pub async fn run<S: UserDirectory + StateStore>(&mut self, store: &mut S) -> Result<()> {
        let target = self.tracker.next_target(store)?;
        info!("Scheduler armed, next reset at {}", target);

        self.phase = Phase::Armed;
        self.ticker.start();

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    println!();
                    info!(
                        "Shutdown requested after {} ticks ({} resets fired, {} failed)",
                        self.stats.tick_count, self.stats.resets_fired, self.stats.resets_failed
                    );
                    self.ticker.stop();
                    self.phase = Phase::Idle;
                    break;
                }
                _ = self.ticker.tick() => {
                    self.on_tick(store);
                }
            }
        }

        Ok(())
    }

    /// Process one tick: render the countdown or fire the reset.
    fn on_tick<S: UserDirectory + StateStore>(&mut self, store: &mut S) {
        self.stats.tick();
        let now = Utc::now();

        let target = match self.tracker.next_target(store) {
            Ok(target) => target,
            Err(e) => {
                error!("Failed to load next reset date: {e}");
                return;
            }
        };

        match evaluate(target, now) {
            TickOutcome::Countdown(remaining) => {
                self.phase = Phase::Armed;
                self.render(target, remaining, now);
            }
            TickOutcome::Fire => self.fire(store, now),
        }
    }

    /// Fire the batch reset and start a new cycle.
    fn fire<S: UserDirectory + StateStore>(&mut self, store: &mut S, now: DateTime<Utc>) {
        if self.reset_in_progress {
            warn!("Reset already in progress, ignoring trigger");
            return;
        }
        self.reset_in_progress = true;
        self.phase = Phase::Firing;
        self.ticker.stop();

        println!("\r{:<80}", "Time's up! Resetting scores...".yellow());

        match reset::reset_all(store) {
            Ok(count) => {
                self.stats.fired();
                self.notices.post(format!("Scores reset to 0 ({count} users)"), now);
            }
            Err(RescoreError::NoRecords(collection)) => {
                self.stats.failed();
                error!("No documents found in collection {collection:?}");
            }
            Err(e) => {
                self.stats.failed();
                error!("Failed to reset scores: {e}");
            }
        }

        // The new cycle starts from now regardless of the reset outcome.
        match self.tracker.rearm(store, now) {
            Ok(next) => info!("Countdown restarted toward {next}"),
            Err(e) => error!("Failed to persist next reset date: {e}"),
        }

        self.ticker.start();
        self.phase = Phase::Armed;
        self.reset_in_progress = false;
    }

    /// Overwrite the countdown line in place.
    fn render(&mut self, target: DateTime<Utc>, remaining: TimeDelta, now: DateTime<Utc>) {
        let mut line = format!(
            "Next reset {} | {}",
            target.format("%Y-%m-%d %H:%M:%S UTC"),
            format_remaining(remaining).bold()
        );
        if let Some(notice) = self.notices.current(now) {
            line = format!("{line} | {}", notice.green());
        }
        print!("\r{line:<100}");
        let _ = std::io::stdout().flush();
    }
}
