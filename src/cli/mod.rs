use crate::config::AppConfig;
use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Visa interchange file pipeline
#[derive(Parser)]
#[command(name = "itx")]
#[command(about = "Visa interchange file pipeline: transform, extract, clean, calculate, interchange, store")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands, one per pipeline stage plus an orchestrator.
#[derive(Subcommand)]
pub enum Commands {
    /// Stage 1: normalize and frame raw BASE II lines into transaction rows
    Transform(commands::transform::TransformCommand),
    /// Stage 2: slice positional/secondary-keyed fields out of framed rows
    Extract(commands::extract::ExtractCommand),
    /// Stage 3: coerce extracted fields to their declared semantic type
    Clean(commands::clean::CleanCommand),
    /// Stage 4: resolve ARDEF bindings and compute derived attributes
    Calculate(commands::calculate::CalculateCommand),
    /// Stage 5: bind each transaction to its highest-priority fee rule
    Interchange(commands::interchange::InterchangeCommand),
    /// Stage 6: merge clean, calculated, and interchange frames into one file
    Store(commands::store::StoreCommand),
    /// Run all six stages in order against one client/file
    RunAll(commands::run_all::RunAllCommand),
}

pub fn run() -> AppResult<()> {
    let app_config = AppConfig::load().unwrap_or_else(|_| AppConfig::get_defaults());
    let _guard = crate::logging::init(&app_config.logging.level, &app_config.logging.path);

    let cli = Cli::parse();

    match cli.command {
        Commands::Transform(command) => command.run(),
        Commands::Extract(command) => command.run(),
        Commands::Clean(command) => command.run(),
        Commands::Calculate(command) => command.run(),
        Commands::Interchange(command) => command.run(),
        Commands::Store(command) => command.run(),
        Commands::RunAll(command) => command.run(),
    }
}
