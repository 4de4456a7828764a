//! Machine Failure Monitor - Main Entry Point

use anyhow::Context;
use clap::{Parser, Subcommand};
use feature_engine::{Scorer, SensorReading};
use monitor::{init_logging, open_session, report, MonitorConfig, Preset, Session};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "machine-monitor")]
#[command(about = "Predict machine failure risk from sensor readings")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./monitor.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one preset reading
    Preset {
        #[arg(value_enum)]
        preset: Preset,
    },
    /// Analyze every preset in turn
    Presets,
    /// Analyze JSON readings from stdin, one per line ("reset" clears history)
    Stdin,
    /// Print the model's feature columns in order
    Names,
}

fn analyze_and_print<S: Scorer>(session: &Session<S>, reading: SensorReading) {
    match session.analyze(reading) {
        Ok(analysis) => println!("{}", report::render_analysis(&analysis)),
        Err(e) => {
            warn!("Analysis rejected: {}", e);
            eprintln!("error: {}", e);
        }
    }
}

fn run_stdin<S: Scorer>(session: &Session<S>) -> anyhow::Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("reset") {
            session.reset()?;
            println!("History reset.");
            continue;
        }
        match serde_json::from_str::<SensorReading>(line) {
            Ok(reading) => analyze_and_print(session, reading),
            Err(e) => {
                warn!("Skipping malformed reading: {}", e);
                eprintln!("error: malformed reading: {}", e);
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config =
        MonitorConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_logging(&config.logging)?;

    info!("=== Machine Failure Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    let session = open_session(&config)?;

    match cli.command {
        Commands::Preset { preset } => {
            info!("Running preset: {}", preset.name());
            analyze_and_print(&session, preset.reading());
        }
        Commands::Presets => {
            for preset in Preset::ALL {
                println!("--- {} ---", preset.name());
                analyze_and_print(&session, preset.reading());
            }
        }
        Commands::Stdin => run_stdin(&session)?,
        Commands::Names => {
            for (idx, name) in session.engine().schema().names().iter().enumerate() {
                println!("{:>2}  {}", idx, name);
            }
            return Ok(());
        }
    }

    print!("{}", report::render_summary(session.history())?);
    Ok(())
}
