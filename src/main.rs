// Hotelfeed - Hotel records export tool
// Copyright (c) 2025 Hotelfeed Contributors
// Licensed under the MIT License

use clap::Parser;
use hotelfeed::cli::commands::export::ExportArgs;
use hotelfeed::cli::{load_env_file, Cli, Commands};
use hotelfeed::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Variables already present in the environment win over the file
    let env_file_result = load_env_file(&cli.env_file);

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let guard = match init_logging(log_level, &cli.logging_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(if e.is_fatal() { 2 } else { 5 });
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "hotelfeed - hotel records export"
    );

    match env_file_result {
        Ok(true) => tracing::debug!(path = %cli.env_file, "Loaded environment file"),
        Ok(false) => tracing::debug!(path = %cli.env_file, "No environment file found"),
        Err(e) => {
            tracing::error!(path = %cli.env_file, error = %e, "Failed to read environment file");
            eprintln!("Configuration error: failed to read {}: {e}", cli.env_file);
            process::exit(2);
        }
    }

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command; export when none is given
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        None => ExportArgs::default().execute(&cli.config).await,
        Some(Commands::Export(args)) => args.execute(&cli.config).await,
        Some(Commands::ValidateConfig(args)) => args.execute(&cli.config).await,
        Some(Commands::Init(args)) => args.execute().await,
    }
}
