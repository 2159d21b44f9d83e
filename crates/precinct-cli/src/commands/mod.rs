//! CLI command definitions and dispatch.

pub mod migrate;
pub mod officer;

use clap::{Parser, Subcommand};

use precinct_core::config::AppConfig;
use precinct_core::error::AppError;
use precinct_database::Database;

use crate::output::OutputFormat;

/// Precinct records service administration
#[derive(Debug, Parser)]
#[command(name = "precinct", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log store and pool activity to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Officer account management
    Officer(officer::OfficerArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Officer(args) => officer::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_file(config_path)
}

/// Helper: connect the configured backend
pub async fn connect(config: &AppConfig) -> Result<Database, AppError> {
    Database::connect(&config.database).await
}
