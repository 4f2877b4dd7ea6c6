use chrono::Utc;
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use rescore::cli::{Cli, Commands, UserCommands};
use rescore::config::Config;
use rescore::daemon::Scheduler;
use rescore::error::RescoreError;
use rescore::reset;
use rescore::schedule::{RecurrenceTracker, format_remaining};
use rescore::store::{ScoreStore, UserDirectory, UserRecord};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rescore")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("rescore.log");

    // Log to a file so the countdown line owns stdout
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        // Default: run the daemon with the live countdown
        None | Some(Commands::Run) => run_daemon(config),
        Some(Commands::Reset) => handle_reset_command(config),
        Some(Commands::Status { json }) => handle_status_command(*json, config),
        Some(Commands::User { command }) => handle_user_command(command, config),
    }
}

fn run_daemon(config: &Config) -> Result<()> {
    info!("Starting reset daemon");
    println!("{}", "Starting reset daemon (ctrl-c to stop)...".cyan());

    let mut store = ScoreStore::open_at(&config.storage.data_dir)?;
    let mut scheduler = Scheduler::new(config);

    let runtime = tokio::runtime::Runtime::new().context("Failed to build tokio runtime")?;
    runtime.block_on(scheduler.run(&mut store))?;

    Ok(())
}

fn handle_reset_command(config: &Config) -> Result<()> {
    info!("Resetting all scores manually...");

    // Manual trigger bypasses the schedule and leaves the next reset
    // date untouched.
    let mut store = ScoreStore::open_at(&config.storage.data_dir)?;
    match reset::reset_all(&mut store) {
        Ok(count) => {
            println!("{} ({count} users)", "Scores reset to 0".green());
            Ok(())
        }
        Err(RescoreError::NoRecords(collection)) => {
            println!(
                "{}",
                format!("No records in collection {collection:?}, nothing to reset").yellow()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Serialize)]
struct StatusReport {
    next_reset: String,
    remaining: String,
    remaining_seconds: i64,
    users: usize,
}

fn handle_status_command(json: bool, config: &Config) -> Result<()> {
    let store = ScoreStore::open_at(&config.storage.data_dir)?;
    let tracker = RecurrenceTracker::new(config.schedule.anchor, config.schedule.interval_days);

    let target = tracker.next_target(&store)?;
    let remaining = target - Utc::now();

    let report = StatusReport {
        next_reset: target.to_rfc3339(),
        remaining: format_remaining(remaining),
        remaining_seconds: remaining.num_seconds().max(0),
        users: store.count_users()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} {}", "Next reset:".cyan(), report.next_reset);
        println!("{} {}", "Remaining:".cyan(), report.remaining);
        println!("{} {}", "Users:".cyan(), report.users);
    }

    Ok(())
}

fn handle_user_command(command: &UserCommands, config: &Config) -> Result<()> {
    let mut store = ScoreStore::open_at(&config.storage.data_dir)?;

    match command {
        UserCommands::Add { id, global, enem, obmep } => {
            info!("Saving user record: {id}");
            store.upsert_user(&UserRecord::with_scores(id.clone(), *global, *enem, *obmep))?;
            println!("{} {id}", "Saved user:".green());
        }
        UserCommands::List { json } => {
            let users = store.enumerate()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else if users.is_empty() {
                println!("{}", "No users in collection".yellow());
            } else {
                println!("{:<20} {:>12} {:>12} {:>12}", "ID", "GLOBAL", "ENEM", "OBMEP");
                for user in users {
                    println!(
                        "{:<20} {:>12} {:>12} {:>12}",
                        user.id, user.score_global, user.score_enem, user.score_obmep
                    );
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
