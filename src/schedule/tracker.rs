//! RecurrenceTracker - persisted next-trigger date with fixed-interval advance.
//!
//! The tracker computes and persists a single timestamp through an injected
//! [`StateStore`]. Contract:
//! - `next_target` loads the persisted date, initializing it to the anchor
//!   on first run.
//! - `advance` moves an elapsed target forward by exactly one interval.
//! - `rearm` re-targets from "now" after a reset has fired.
//!
//! All computed targets are normalized to 00:00:00 UTC and never precede
//! the anchor date.

use crate::error::Result;
use crate::state::StateStore;
use chrono::{DateTime, Duration, NaiveTime, SecondsFormat, Utc};
use log::{info, warn};

/// State store key holding the next reset date, RFC 3339 encoded.
pub const NEXT_RESET_KEY: &str = "next_reset_date";

/// Tracks the recurring reset date.
#[derive(Debug, Clone)]
pub struct RecurrenceTracker {
    /// First-ever trigger date; no reset occurs before it
    anchor: DateTime<Utc>,
    /// Fixed recurrence period added to compute the next trigger
    interval: Duration,
}

impl RecurrenceTracker {
    /// Create a tracker with the given anchor date and interval in days.
    pub fn new(anchor: DateTime<Utc>, interval_days: i64) -> Self {
        Self {
            anchor,
            interval: Duration::days(interval_days),
        }
    }

    /// The anchor date this tracker was configured with.
    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// Return the persisted target date, initializing it to the anchor if
    /// none is persisted yet.
    pub fn next_target<S: StateStore + ?Sized>(&self, state: &S) -> Result<DateTime<Utc>> {
        if let Some(target) = self.load(state)? {
            return Ok(target);
        }

        info!("No reset date persisted, initializing to anchor: {}", self.anchor);
        self.persist(state, self.anchor)?;
        Ok(self.anchor)
    }

    /// True iff the target date has passed.
    pub fn has_elapsed<S: StateStore + ?Sized>(&self, state: &S, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.next_target(state)? <= now)
    }

    /// Advance an elapsed target by exactly one interval.
    ///
    /// If the persisted target is still in the future it is returned
    /// unchanged. Otherwise the new target is `max(target, anchor) +
    /// interval`, normalized to midnight UTC. No catch-up loop: a target
    /// stale by several intervals still moves forward only one step per
    /// call.
    pub fn advance<S: StateStore + ?Sized>(&self, state: &S, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let current = self.next_target(state)?;
        if current > now {
            return Ok(current);
        }

        let base = current.max(self.anchor);
        let next = normalize_to_midnight(base + self.interval);
        info!("Advancing reset date: {} -> {}", current, next);
        self.persist(state, next)?;
        Ok(next)
    }

    /// Re-target one interval out from `now`, normalized to midnight UTC.
    ///
    /// Used by the firing path after a reset: the new cycle starts from the
    /// moment the reset ran, not from the (possibly stale) previous target.
    pub fn rearm<S: StateStore + ?Sized>(&self, state: &S, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let next = normalize_to_midnight(now + self.interval);
        info!("New reset date after firing: {}", next);
        self.persist(state, next)?;
        Ok(next)
    }

    fn load<S: StateStore + ?Sized>(&self, state: &S) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = state.get(NEXT_RESET_KEY)? else {
            return Ok(None);
        };

        match DateTime::parse_from_rfc3339(&raw) {
            Ok(parsed) => Ok(Some(parsed.with_timezone(&Utc))),
            Err(e) => {
                // Self-heal: treat a corrupt value as unset rather than
                // wedging the scheduler on every tick.
                warn!("Discarding unparseable {NEXT_RESET_KEY} value {raw:?}: {e}");
                Ok(None)
            }
        }
    }

    fn persist<S: StateStore + ?Sized>(&self, state: &S, target: DateTime<Utc>) -> Result<()> {
        state.set(NEXT_RESET_KEY, &target.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Truncate a timestamp to 00:00:00 UTC on the same day.
fn normalize_to_midnight(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.date_naive().and_time(NaiveTime::MIN).and_utc()
}
