//! Configuration management for hotelfeed.
//!
//! Settings come from two places:
//!
//! - **Environment** (usually via `.env`): `API_BASE_URL`, `API_TOKEN` and
//!   `API_TOKEN_HEADER`, all required. See [`ApiSettings`].
//! - **YAML file** (`config.yaml` by default): date windows, per-category
//!   datasets, output format and destinations, HTTP timeouts. See
//!   [`FeedConfig`].
//!
//! The YAML file supports `${VAR_NAME}` substitution and `HOTELFEED_*`
//! overrides, and is validated on load.
//!
//! # Example Configuration
//!
//! ```yaml
//! date_ranges:
//!   onhand:
//!     end_offset_days: 90
//!   manual:
//!     history:
//!       start: 2024-01-01
//!       end: 2024-01-05
//!
//! datasets:
//!   reservations:
//!     fields: [reservation_id, arrival, departure, status]
//!   sales:
//!     fields: [reservation_id, amount, currency]
//!   rooms:
//!     fields: [room_id, room_type, status]
//!
//! output:
//!   format: csv
//!   local_output:
//!     enabled: true
//!     directory: processed-csv
//!   s3:
//!     enabled: true
//!     bucket: ${EXPORT_BUCKET}
//!     prefix: pms
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use hotelfeed::config::Settings;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load("config.yaml")?;
//! println!("API: {}", settings.api.base_url);
//! println!("Format: {}", settings.feed.output.format);
//! # Ok(())
//! # }
//! ```

pub mod env;
pub mod loader;
pub mod schema;
pub mod secret;

pub use env::ApiSettings;
pub use loader::{load_config, load_config_with, Settings};
pub use schema::{
    DatasetConfig, DatasetsConfig, DateParamsConfig, DateRangesConfig, ExportConfig, FeedConfig,
    HttpConfig, LocalOutputConfig, LoggingConfig, ManualRangeConfig, ManualRangesConfig,
    OffsetConfig, OutputConfig, OutputFormat, S3OutputConfig, SourceConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
