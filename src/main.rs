/// Main entry point for the Habit Streak MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use chrono::FixedOffset;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use habit_streak_mcp::{parse_utc_offset, DayClock, HabitTrackerServer};

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|p| p.join(".habit_streak")),
        dirs::data_dir().map(|p| p.join("habit_streak")),
        dirs::config_dir().map(|p| p.join("habit_streak")),
        std::env::current_dir().ok().map(|p| p.join(".habit_streak")),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            // Make sure the directory is actually writable
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("habits.db"));
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let temp_dir = std::env::temp_dir().join("habit_streak");
    std::fs::create_dir_all(&temp_dir)?;
    let temp_path = temp_dir.join("habits.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

fn parse_offset_arg(value: &str) -> Result<FixedOffset, String> {
    parse_utc_offset(value).map_err(|e| e.to_string())
}

/// Command line arguments for the Habit Streak MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// UTC offset that decides which calendar day "today" is (e.g. +02:00, -05:00, Z)
    #[arg(long, value_parser = parse_offset_arg, default_value = "Z", allow_hyphen_values = true)]
    utc_offset: FixedOffset,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_streak_mcp={}", log_level))
        .with_writer(std::io::stderr) // stdout carries JSON-RPC
        .init();

    info!("Starting Habit Streak MCP server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let clock = DayClock::with_offset(args.utc_offset);
    let server = HabitTrackerServer::new(db_path, clock).await?;

    server.run().await?;

    info!("Habit Streak MCP server shutdown complete");
    Ok(())
}
