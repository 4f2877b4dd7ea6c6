//! Rescore - a scheduled score reset daemon
//!
//! Rescore owns a recurring "reset all user scores" date. It persists the
//! next trigger time, renders a live countdown while armed, and zeroes
//! every user's score fields in one atomic batch when the date elapses.

pub mod cli;
pub mod config;
pub mod daemon;
pub mod error;
pub mod notify;
pub mod reset;
pub mod schedule;
pub mod state;
pub mod store;

pub use error::{RescoreError, Result};
