//! Ember CLI - Command-line driver for the Ember simulation

mod commands;
mod level;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{run, validate};

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "Headless driver for the Ember platformer simulation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a level headless at a fixed rate
    Run {
        /// Path to level file
        level: String,

        /// Intent script replayed during the run
        #[arg(long)]
        script: Option<String>,

        /// Number of fixed ticks to simulate
        #[arg(long, default_value = "600")]
        ticks: u64,

        /// Simulation rate in Hz
        #[arg(long, default_value = "60")]
        rate: f64,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,

        /// Print only ticks on which events fired
        #[arg(long)]
        events_only: bool,
    },

    /// Validate a level file against structural rules
    Validate {
        /// Path to level file
        level: String,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            level,
            script,
            ticks,
            rate,
            format,
            events_only,
        } => run::run(run::RunArgs {
            level,
            script,
            ticks,
            rate,
            format,
            events_only,
        }),
        Commands::Validate { level } => validate::run(&level),
    }
}
