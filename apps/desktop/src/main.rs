use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, ManualClock};
use tracing_subscriber::EnvFilter;

mod driver;
mod script;
mod walkthrough;

use driver::Driver;

/// Headless driver for the booking flow. Phase changes, navigation outcomes
/// and frames are printed to stdout as JSON lines; logs go to stderr.
#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Virtual milliseconds between ticks while waiting for transitions to settle.
    #[arg(long, global = true, default_value_t = 16)]
    frame_ms: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Landing, booking details, flights, passengers, payment, boarding pass.
    Walkthrough,
    /// Runs the steps of a JSON script file.
    Script { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    let mut driver = Driver::new(settings, ManualClock::new(), cli.frame_ms, std::io::stdout().lock());

    match cli.command {
        Command::Walkthrough => walkthrough::run(&mut driver).await?,
        Command::Script { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read script '{}'", file.display()))?;
            let steps = script::parse(&raw)
                .with_context(|| format!("invalid script '{}'", file.display()))?;
            script::run(&mut driver, steps)?;
        }
    }

    Ok(())
}
