//! Recurrence schedule - tracks the next reset date and the countdown to it
//!
//! The tracker owns a single persisted timestamp: the next time scores
//! should be reset. It initializes from a fixed anchor date, advances by
//! a fixed interval, and normalizes every computed target to midnight UTC.

pub mod countdown;
pub mod tracker;

pub use countdown::format_remaining;
pub use tracker::{NEXT_RESET_KEY, RecurrenceTracker};
