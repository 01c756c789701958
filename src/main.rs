//! Kiwi Island CLI - play, inspect, and validate island levels.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Kiwi Island - count the kiwi, trap the predators
#[derive(Parser, Debug)]
#[command(name = "kiwi-island")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log filter, e.g. `debug` or `kiwi_island=trace` (default: $RUST_LOG or warn)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a level interactively on stdin
    Play {
        /// Level file (.json or comma-delimited text), or a directory of
        /// level files to pick new games from
        #[arg(required = true)]
        level: PathBuf,

        /// Colour the map with ANSI codes
        #[arg(short, long)]
        color: bool,
    },

    /// Print a level's starting map and status
    Show {
        /// Level file (.json or comma-delimited text)
        #[arg(required = true)]
        level: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Draw the whole island instead of what the player can see
        #[arg(short, long)]
        reveal: bool,
    },

    /// Check that a level loads and starts in a consistent state
    Validate {
        /// Level file to validate
        #[arg(required = true)]
        level: PathBuf,
    },
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    let result = match args.command {
        Commands::Play { level, color } => cli::play::execute(&level, color),
        Commands::Show {
            level,
            format,
            reveal,
        } => cli::show::execute(&level, format, reveal),
        Commands::Validate { level } => cli::validate::execute(&level),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
