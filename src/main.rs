//! RGB Guess - terminal shell
//!
//! Drives the color-guessing library from stdin.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use rgb_guess::{
    Command as ShellCommand, GameConfig, GameShell, PeriodicCounter, RandomColorGenerator, Reply,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            seed,
            events,
        } => run_play(config, seed, events).await,
        Command::Ticker { ticks, period_ms } => run_ticker(ticks, period_ms).await,
    }
}

/// Run the interactive game shell
#[instrument]
async fn run_play(config: Option<PathBuf>, seed: Option<u64>, events: bool) -> Result<()> {
    let config = match config {
        Some(path) => GameConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    }
    .with_seed(seed);

    let source = match config.seed() {
        Some(seed) => RandomColorGenerator::seeded(*seed),
        None => RandomColorGenerator::from_entropy(),
    };
    let mut shell = GameShell::new(config, source);

    println!("Match this color: {}", shell.session().target());
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("error: {}", e);
                continue;
            }
        };
        match shell.execute(command) {
            Ok(Reply::Message(text)) => println!("{}", text),
            Ok(Reply::Quit) => break,
            Err(e) => {
                warn!(error = %e, "Command failed");
                println!("error: {}", e);
            }
        }
        if events {
            for event in shell.drain_events() {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }

    info!("Leaving game shell");
    Ok(())
}

/// Run the tick counter
#[instrument]
async fn run_ticker(ticks: u64, period_ms: u64) -> Result<()> {
    let mut counter = PeriodicCounter::new(Duration::from_millis(period_ms));
    let handle = counter.start();
    let mut rx = counter.subscribe();

    while *rx.borrow_and_update() < ticks {
        rx.changed().await?;
        println!("{}", *rx.borrow());
    }

    counter.stop(&handle);
    Ok(())
}
