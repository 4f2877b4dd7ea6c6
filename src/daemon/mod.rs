//! Daemon Core - tick evaluation, cancellable ticker, and scheduler loop
//!
//! The daemon is the long-running process that:
//! - Ticks once per second while a reset is armed
//! - Renders the live countdown toward the next reset date
//! - Fires the batch reset when the target elapses, then re-arms

pub mod scheduler;
pub mod tick;
pub mod ticker;

pub use scheduler::Scheduler;
pub use tick::{Phase, TickOutcome, TickStats, evaluate};
pub use ticker::Ticker;
