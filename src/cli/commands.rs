//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: foreground daemon with the live countdown (also the default)
//! - reset: manually trigger the batch reset now
//! - status: show the next reset date and remaining time
//! - user: manage records in the user collection

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rescore - scheduled score reset daemon with a live countdown
#[derive(Parser, Debug)]
#[command(name = "rescore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the reset daemon in the foreground (default)
    Run,

    /// Reset all scores now, without touching the schedule
    Reset,

    /// Show the next reset date and time remaining
    Status {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the user collection
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

/// User collection subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Add or replace a user record
    Add {
        /// User ID
        id: String,

        /// Overall score
        #[arg(long, default_value_t = 0)]
        global: i64,

        /// ENEM exam score
        #[arg(long, default_value_t = 0)]
        enem: i64,

        /// OBMEP olympiad score
        #[arg(long, default_value_t = 0)]
        obmep: i64,
    },

    /// List all user records
    List {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}
