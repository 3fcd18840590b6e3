//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for hotelfeed using clap.
//! Running without a subcommand performs an export.

pub mod commands;

use crate::config::LoggingConfig;
use clap::{Parser, Subcommand};
use std::path::Path;

/// hotelfeed - hotel records export tool
#[derive(Parser, Debug)]
#[command(name = "hotelfeed")]
#[command(version, about, long_about = None)]
#[command(author = "Hotelfeed Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml", env = "HOTELFEED_CONFIG")]
    pub config: String,

    /// Path to the .env file with API credentials (ignored when missing)
    #[arg(long, default_value = ".env", env = "HOTELFEED_ENV_FILE")]
    pub env_file: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HOTELFEED_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Also write JSON logs, rotated daily, into this directory
    #[arg(long, env = "HOTELFEED_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Subcommand to execute (default: export)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// File logging settings derived from `--log-dir`
    pub fn logging_config(&self) -> LoggingConfig {
        match &self.log_dir {
            Some(dir) => LoggingConfig {
                local_enabled: true,
                local_path: dir.clone(),
                ..LoggingConfig::default()
            },
            None => LoggingConfig::default(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export all categories and windows to the configured destinations
    Export(commands::export::ExportArgs),

    /// Validate configuration file and environment
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Loads `path` into the process environment
///
/// Variables already set are kept. Returns `Ok(false)` if the file does not
/// exist.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path.as_ref()) {
        Ok(()) => Ok(true),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
