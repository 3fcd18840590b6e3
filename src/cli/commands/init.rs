//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing hotelfeed configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your field lists and destinations", self.output);
                println!("  2. Create a .env file with:");
                println!("     - API_BASE_URL (e.g. https://pms.example.com/api)");
                println!("     - API_TOKEN");
                println!("     - API_TOKEN_HEADER (e.g. Authorization)");
                println!("  3. Validate configuration: hotelfeed validate-config");
                println!("  4. Run export: hotelfeed export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}

/// Sample configuration with every section and its defaults
pub fn sample_config() -> &'static str {
    r#"# hotelfeed configuration
#
# API credentials are read from the environment (or .env):
#   API_BASE_URL, API_TOKEN, API_TOKEN_HEADER
# ${VAR} placeholders below are substituted from the environment.

# ============================================================================
# Date windows
# ============================================================================
date_ranges:
  # Day offsets relative to today; both bounds are inclusive
  history:
    start_offset_days: -2
    end_offset_days: -2
  onhand:
    start_offset_days: -1
    end_offset_days: 178
  # Fixed dates replace the computed window; set both start and end
  # manual:
  #   history:
  #     start: 2024-01-01
  #     end: 2024-01-05

# ============================================================================
# Datasets
# ============================================================================
# fields: output columns, in order (empty = every field returned)
# sources: API endpoints to fetch; default is GET /<category>
datasets:
  reservations:
    fields: [reservation_id, arrival, departure, status]
    # merge_key: reservation_id
    # sources:
    #   - name: reservations
    #     path: /reservations
    #     per_page: 200
    #   - name: guests
    #     path: /reservations/guests
    #     fields: [reservation_id, guest_name]
  sales:
    fields: [reservation_id, amount, currency]
  rooms:
    fields: [room_id, room_type, status]

# ============================================================================
# Output
# ============================================================================
output:
  format: csv            # csv | json
  local_output:
    enabled: true
    directory: processed-csv
  s3:
    enabled: false
    # bucket: ${EXPORT_BUCKET}
    prefix: exports
    # region: eu-west-1

# ============================================================================
# HTTP
# ============================================================================
http:
  timeout_seconds: 30
  connect_timeout_seconds: 10
  max_pages: 1000

export:
  # Category/window operations run at once (1-6)
  max_concurrency: 1
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_with, OutputFormat};
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, sample_config()).unwrap();

        let config = load_config_with(&path, &|_: &str| None).unwrap();
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.datasets.rooms.fields.len(), 3);
        assert_eq!(config.http.max_pages, 1000);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");
    }

    #[tokio::test]
    async fn test_init_force_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), sample_config());
    }
}
