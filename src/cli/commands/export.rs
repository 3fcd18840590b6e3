//! Export command implementation
//!
//! This module implements the `export` command, which runs every
//! category/window operation and prints the run summary.

use crate::config::Settings;
use crate::core::export::{DestinationStatus, ExportCoordinator, ExportSummary};
use crate::log_error_with_context;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug, Default, Clone)]
pub struct ExportArgs {
    /// Fetch and serialize, but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Resolve date windows as if today were this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,
}

impl ExportArgs {
    /// Execute the export command
    ///
    /// Returns the process exit code: 0 all operations succeeded, 1 some
    /// failed, 2 configuration error, 5 fatal error.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting export command");

        let settings = match Settings::load(config_path) {
            Ok(settings) => settings,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        self.execute_with_settings(settings).await
    }

    /// Execute the export with already loaded settings
    pub async fn execute_with_settings(&self, settings: Settings) -> anyhow::Result<i32> {
        if self.dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - No files will be written or uploaded");
            println!();
        }

        let coordinator = match ExportCoordinator::new(settings).await {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(if e.is_fatal() { 2 } else { 5 });
            }
        };

        let mut coordinator = coordinator.with_dry_run(self.dry_run);
        if let Some(today) = self.as_of {
            tracing::info!(as_of = %today, "Overriding today from CLI");
            coordinator = coordinator.with_today(today);
        }

        println!("🚀 Starting export (run {})...", coordinator.run_id());
        println!();

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                log_error_with_context!(&e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(if e.is_fatal() { 2 } else { 5 });
            }
        };

        print_summary(&summary);

        let exit_code = summary.exit_code();
        if exit_code == 0 {
            println!("✅ Export completed successfully!");
        } else {
            println!("⚠️  Export completed with failures");
        }
        Ok(exit_code)
    }
}

/// Prints one line per operation, then every error
pub fn print_summary(summary: &ExportSummary) {
    println!("📊 Export Summary:");
    for window in &summary.windows {
        println!("  Window {window}");
    }
    println!(
        "  Operations: {} ({} succeeded, {} failed)",
        summary.total_operations(),
        summary.successful_operations(),
        summary.failed_operations()
    );
    println!("  Records: {}", summary.total_records());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    for op in &summary.operations {
        let mark = if op.is_successful() { "✅" } else { "❌" };
        println!("  {mark} {} ({} records)", op.artifact, op.record_count);
        if let Some(error) = &op.error {
            println!("      {:?}: {}", error.error_type, error.message);
        }
        for dest in &op.destinations {
            match &dest.status {
                DestinationStatus::Written { location } => {
                    println!("      {} -> {location}", dest.sink);
                }
                DestinationStatus::Failed(error) => {
                    println!("      {} failed: {}", dest.sink, error.message);
                }
            }
        }
    }
    println!();
}
