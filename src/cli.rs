//! Command-line interface for rgb_guess.

use clap::{Parser, Subcommand};

/// RGB Guess - match a random color with three sliders
#[derive(Parser, Debug)]
#[command(name = "rgb_guess")]
#[command(about = "Color-guessing game in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play rounds interactively on stdin
    Play {
        /// Path to a TOML game config
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Seed for target generation (overrides the config)
        #[arg(long)]
        seed: Option<u64>,

        /// Print session events as JSON after each command
        #[arg(long)]
        events: bool,
    },

    /// Run the tick counter and print each value
    Ticker {
        /// Number of ticks to print before exiting
        #[arg(short, long, default_value = "5")]
        ticks: u64,

        /// Tick period in milliseconds
        #[arg(long, default_value = "1000")]
        period_ms: u64,
    },
}
