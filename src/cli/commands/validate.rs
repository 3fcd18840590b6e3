//! Validate config command implementation
//!
//! This module implements the `validate-config` command: it loads the
//! environment and configuration file exactly as an export would and prints
//! what a run would do, without making any request.

use crate::config::Settings;
use crate::core::window::DateRangeResolver;
use crate::domain::Category;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let settings = match Settings::load(config_path) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let today = chrono::Local::now().date_naive();
        let windows = match DateRangeResolver::new(settings.feed.date_ranges.clone())
            .resolve_all(today)
        {
            Ok(w) => w,
            Err(e) => {
                println!("❌ Date ranges are invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print_settings(&settings);
        println!("  Windows (today = {today}):");
        for window in &windows {
            println!("    {window}");
        }
        println!();
        Ok(0)
    }
}

fn print_settings(settings: &Settings) {
    let feed = &settings.feed;

    println!("Configuration Summary:");
    println!("  API Base URL: {}", settings.api.base_url);
    println!("  Token Header: {}", settings.api.token_header);
    println!("  Output Format: {}", feed.output.format);
    if feed.output.local_output.enabled {
        println!("  Local Output: {}", feed.output.local_output.directory);
    }
    if feed.output.s3.enabled {
        println!(
            "  S3 Output: s3://{}/{}",
            feed.output.s3.bucket.as_deref().unwrap_or_default(),
            feed.output.s3.prefix.trim_matches('/')
        );
    }
    println!(
        "  HTTP Timeouts: {}s (connect {}s), max {} pages",
        feed.http.timeout_seconds, feed.http.connect_timeout_seconds, feed.http.max_pages
    );
    println!("  Max Concurrency: {}", feed.export.max_concurrency);

    for category in Category::ALL {
        let dataset = feed.datasets.get(category);
        let sources: Vec<String> = dataset
            .effective_sources(category)
            .iter()
            .map(|s| format!("{} ({})", s.name, s.effective_path()))
            .collect();
        let fields = if dataset.fields.is_empty() {
            "all".to_string()
        } else {
            dataset.fields.join(", ")
        };
        println!("  Dataset {category}:");
        println!("    Sources: {}", sources.join(", "));
        println!("    Fields: {fields}");
    }
}
