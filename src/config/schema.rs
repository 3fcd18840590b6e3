//! Configuration schema types
//!
//! This module defines the structure of the YAML configuration file.

use crate::domain::{Category, WindowName};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Default `[start, end]` day offsets of the history window
pub const DEFAULT_HISTORY_OFFSETS: (i64, i64) = (-2, -2);

/// Default `[start, end]` day offsets of the onhand window
pub const DEFAULT_ONHAND_OFFSETS: (i64, i64) = (-1, 178);

/// Output serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// Pretty-printed JSON array of objects
    Json,
}

impl OutputFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// MIME type used for uploads
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv; charset=utf-8",
            OutputFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Invalid output.format '{other}'. Must be one of: csv, json"
            )),
        }
    }
}

/// Root configuration, mapped from `config.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Date window policy
    #[serde(default)]
    pub date_ranges: DateRangesConfig,

    /// Per-category dataset definitions
    #[serde(default)]
    pub datasets: DatasetsConfig,

    /// Output format and destinations
    #[serde(default)]
    pub output: OutputConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Export run settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl FeedConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting found
    pub fn validate(&self) -> Result<(), String> {
        self.date_ranges.validate()?;
        self.datasets.validate()?;
        self.output.validate()?;
        self.http.validate()?;
        self.export.validate()?;
        Ok(())
    }
}

/// Date window configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRangesConfig {
    /// Offsets of the history window relative to today
    #[serde(default)]
    pub history: OffsetConfig,

    /// Offsets of the onhand window relative to today
    #[serde(default)]
    pub onhand: OffsetConfig,

    /// Fixed date overrides
    #[serde(default)]
    pub manual: ManualRangesConfig,
}

impl DateRangesConfig {
    /// Effective `(start, end)` offsets for a window, filling in defaults
    pub fn offsets(&self, window: WindowName) -> (i64, i64) {
        let (config, (default_start, default_end)) = match window {
            WindowName::History => (&self.history, DEFAULT_HISTORY_OFFSETS),
            WindowName::Onhand => (&self.onhand, DEFAULT_ONHAND_OFFSETS),
        };
        (
            config.start_offset_days.unwrap_or(default_start),
            config.end_offset_days.unwrap_or(default_end),
        )
    }

    /// Manual override for a window, if one is configured
    pub fn manual(&self, window: WindowName) -> Option<&ManualRangeConfig> {
        let manual = match window {
            WindowName::History => self.manual.history.as_ref(),
            WindowName::Onhand => self.manual.onhand.as_ref(),
        };
        manual.filter(|m| !m.is_empty())
    }

    fn validate(&self) -> Result<(), String> {
        for window in WindowName::ALL {
            let (start, end) = self.offsets(window);
            if start > end {
                return Err(format!(
                    "date_ranges.{window}: start_offset_days ({start}) must be <= end_offset_days ({end})"
                ));
            }

            if let Some(manual) = self.manual(window) {
                match (manual.start, manual.end) {
                    (Some(start), Some(end)) if start > end => {
                        return Err(format!(
                            "date_ranges.manual.{window}: start ({start}) must be <= end ({end})"
                        ));
                    }
                    (Some(_), Some(_)) => {}
                    _ => {
                        return Err(format!(
                            "date_ranges.manual.{window} must set both start and end"
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Day offsets relative to today; unset offsets take the window default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OffsetConfig {
    #[serde(default)]
    pub start_offset_days: Option<i64>,

    #[serde(default)]
    pub end_offset_days: Option<i64>,
}

/// Manual overrides for both windows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManualRangesConfig {
    #[serde(default)]
    pub history: Option<ManualRangeConfig>,

    #[serde(default)]
    pub onhand: Option<ManualRangeConfig>,
}

/// A fixed `[start, end]` pair
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManualRangeConfig {
    #[serde(default)]
    pub start: Option<NaiveDate>,

    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl ManualRangeConfig {
    /// An override with neither bound set counts as absent
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Dataset definitions, one per category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetsConfig {
    #[serde(default)]
    pub reservations: DatasetConfig,

    #[serde(default)]
    pub sales: DatasetConfig,

    #[serde(default)]
    pub rooms: DatasetConfig,
}

impl DatasetsConfig {
    pub fn get(&self, category: Category) -> &DatasetConfig {
        match category {
            Category::Reservations => &self.reservations,
            Category::Sales => &self.sales,
            Category::Rooms => &self.rooms,
        }
    }

    fn validate(&self) -> Result<(), String> {
        for category in Category::ALL {
            self.get(category).validate(category)?;
        }
        Ok(())
    }
}

/// One category's dataset: where records come from and which fields to keep
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Ordered output field allow-list; empty keeps every field
    #[serde(default, alias = "output_fields")]
    pub fields: Vec<String>,

    /// API sources feeding this dataset; empty means `GET /<category>`
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    /// Source whose records drive the merge (default: first source)
    #[serde(default)]
    pub primary_source: Option<String>,

    /// Field joining secondary sources onto the primary one
    #[serde(default = "default_merge_key")]
    pub merge_key: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            sources: Vec::new(),
            primary_source: None,
            merge_key: default_merge_key(),
        }
    }
}

impl DatasetConfig {
    /// Sources to fetch, with the implicit `/<category>` source when none are configured
    pub fn effective_sources(&self, category: Category) -> Vec<SourceConfig> {
        if self.sources.is_empty() {
            vec![SourceConfig::implicit(category)]
        } else {
            self.sources.clone()
        }
    }

    /// Name of the primary source
    pub fn primary_source_name(&self, category: Category) -> String {
        if let Some(name) = &self.primary_source {
            return name.clone();
        }
        self.sources
            .first()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| category.as_str().to_string())
    }

    fn validate(&self, category: Category) -> Result<(), String> {
        check_field_list(&format!("datasets.{category}.fields"), &self.fields)?;

        let mut names = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(format!("datasets.{category}.sources: name cannot be empty"));
            }
            if !names.insert(source.name.as_str()) {
                return Err(format!(
                    "datasets.{category}.sources: duplicate source name '{}'",
                    source.name
                ));
            }
            source.validate(category)?;
        }

        if let Some(primary) = &self.primary_source {
            let known = if self.sources.is_empty() {
                primary.as_str() == category.as_str()
            } else {
                names.contains(primary.as_str())
            };
            if !known {
                return Err(format!(
                    "datasets.{category}.primary_source '{primary}' is not a configured source"
                ));
            }
        }

        if self.sources.len() > 1 && self.merge_key.trim().is_empty() {
            return Err(format!(
                "datasets.{category}.merge_key cannot be empty when merging sources"
            ));
        }

        Ok(())
    }
}

/// An API endpoint feeding a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Source name, unique within its dataset
    pub name: String,

    /// Path appended to `API_BASE_URL` (default: `/<name>`)
    #[serde(default)]
    pub path: Option<String>,

    /// Static query parameters
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,

    /// Query parameter names carrying the window dates
    #[serde(default)]
    pub date_params: DateParamsConfig,

    /// Page size sent as `per_page`
    #[serde(default)]
    pub per_page: Option<u32>,

    /// Fields kept from this source's records before merging; empty keeps all
    #[serde(default)]
    pub fields: Vec<String>,

    /// Query parameter carrying the comma-joined requested fields
    #[serde(default)]
    pub fields_param: Option<String>,
}

impl SourceConfig {
    /// The source used when a dataset configures none
    pub fn implicit(category: Category) -> Self {
        Self {
            name: category.as_str().to_string(),
            path: Some(format!("/{category}")),
            params: BTreeMap::new(),
            date_params: DateParamsConfig::default(),
            per_page: None,
            fields: Vec::new(),
            fields_param: Some("fields".to_string()),
        }
    }

    /// Path with a leading `/`
    pub fn effective_path(&self) -> String {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| format!("/{}", self.name));
        if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        }
    }

    fn validate(&self, category: Category) -> Result<(), String> {
        if let Some(path) = &self.path {
            if path.trim().is_empty() {
                return Err(format!(
                    "datasets.{category}.sources.{}.path cannot be empty",
                    self.name
                ));
            }
        }
        if self.per_page == Some(0) {
            return Err(format!(
                "datasets.{category}.sources.{}.per_page must be > 0",
                self.name
            ));
        }
        check_field_list(
            &format!("datasets.{category}.sources.{}.fields", self.name),
            &self.fields,
        )
    }
}

/// Names of the date query parameters; `null` disables one
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateParamsConfig {
    #[serde(default = "default_start_param")]
    pub start: Option<String>,

    #[serde(default = "default_end_param")]
    pub end: Option<String>,
}

impl Default for DateParamsConfig {
    fn default() -> Self {
        Self {
            start: default_start_param(),
            end: default_end_param(),
        }
    }
}

/// Output format and destinations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub local_output: LocalOutputConfig,

    #[serde(default)]
    pub s3: S3OutputConfig,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.local_output.enabled && !self.s3.enabled {
            return Err(
                "At least one output destination must be enabled (output.local_output or output.s3)"
                    .to_string(),
            );
        }

        if self.local_output.enabled && self.local_output.directory.trim().is_empty() {
            return Err("output.local_output.directory cannot be empty".to_string());
        }

        if self.s3.enabled
            && self
                .s3
                .bucket
                .as_ref()
                .map(|b| b.trim().is_empty())
                .unwrap_or(true)
        {
            return Err("output.s3.bucket is required when output.s3.enabled is true".to_string());
        }

        Ok(())
    }
}

/// Local directory destination
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalOutputConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_output_directory")]
    pub directory: String,
}

impl Default for LocalOutputConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: default_output_directory(),
        }
    }
}

/// S3 destination
///
/// Credentials are resolved by the AWS SDK default provider chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct S3OutputConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub bucket: Option<String>,

    /// Key prefix ("virtual directory")
    #[serde(default)]
    pub prefix: String,

    /// AWS region; the SDK default chain decides when unset
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible stores
    #[serde(default)]
    pub endpoint_url: Option<String>,

    #[serde(default)]
    pub force_path_style: bool,
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Upper bound on pages followed per source
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            max_pages: default_max_pages(),
        }
    }
}

impl HttpConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("http.timeout_seconds must be > 0".to_string());
        }
        if self.connect_timeout_seconds == 0 {
            return Err("http.connect_timeout_seconds must be > 0".to_string());
        }
        if self.max_pages == 0 {
            return Err("http.max_pages must be > 0".to_string());
        }
        Ok(())
    }
}

/// Export run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Number of category/window operations run at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1..=6).contains(&self.max_concurrency) {
            return Err(format!(
                "export.max_concurrency must be between 1 and 6, got {}",
                self.max_concurrency
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("Log directory cannot be empty when file logging is enabled".to_string());
        }
        Ok(())
    }
}

fn check_field_list(label: &str, fields: &[String]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for field in fields {
        if field.trim().is_empty() {
            return Err(format!("{label} contains an empty field name"));
        }
        if !seen.insert(field.as_str()) {
            return Err(format!("{label} lists '{field}' more than once"));
        }
    }
    Ok(())
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_merge_key() -> String {
    "reservation_id".to_string()
}

fn default_start_param() -> Option<String> {
    Some("start_date".to_string())
}

fn default_end_param() -> Option<String> {
    Some("end_date".to_string())
}

fn default_output_directory() -> String {
    "processed-csv".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_max_pages() -> usize {
    1000
}

fn default_max_concurrency() -> usize {
    1
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FeedConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(config.output.local_output.enabled);
        assert_eq!(config.output.local_output.directory, "processed-csv");
        assert!(!config.output.s3.enabled);
    }

    #[test]
    fn test_default_offsets() {
        let ranges = DateRangesConfig::default();
        assert_eq!(ranges.offsets(WindowName::History), (-2, -2));
        assert_eq!(ranges.offsets(WindowName::Onhand), (-1, 178));
    }

    #[test]
    fn test_partial_offsets_fill_defaults() {
        let ranges = DateRangesConfig {
            onhand: OffsetConfig {
                start_offset_days: None,
                end_offset_days: Some(30),
            },
            ..Default::default()
        };
        assert_eq!(ranges.offsets(WindowName::Onhand), (-1, 30));
    }

    #[test]
    fn test_reversed_offsets_rejected() {
        let ranges = DateRangesConfig {
            history: OffsetConfig {
                start_offset_days: Some(0),
                end_offset_days: Some(-5),
            },
            ..Default::default()
        };
        let err = ranges.validate().unwrap_err();
        assert!(err.contains("date_ranges.history"));
    }

    #[test]
    fn test_manual_override_validation() {
        let mut ranges = DateRangesConfig::default();
        ranges.manual.onhand = Some(ManualRangeConfig {
            start: Some(date(2024, 3, 1)),
            end: Some(date(2024, 2, 1)),
        });
        assert!(ranges.validate().unwrap_err().contains("manual.onhand"));

        ranges.manual.onhand = Some(ManualRangeConfig {
            start: Some(date(2024, 3, 1)),
            end: None,
        });
        assert!(ranges.validate().unwrap_err().contains("both start and end"));

        ranges.manual.onhand = Some(ManualRangeConfig::default());
        assert!(ranges.validate().is_ok());
        assert!(ranges.manual(WindowName::Onhand).is_none());
    }

    #[test]
    fn test_output_requires_a_destination() {
        let mut output = OutputConfig::default();
        output.local_output.enabled = false;
        assert!(output.validate().is_err());

        output.s3.enabled = true;
        assert!(output.validate().unwrap_err().contains("bucket"));

        output.s3.bucket = Some("exports".to_string());
        assert!(output.validate().is_ok());
    }

    #[test]
    fn test_dataset_implicit_source() {
        let dataset = DatasetConfig::default();
        let sources = dataset.effective_sources(Category::Rooms);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "rooms");
        assert_eq!(sources[0].effective_path(), "/rooms");
        assert_eq!(sources[0].fields_param.as_deref(), Some("fields"));
        assert_eq!(dataset.primary_source_name(Category::Rooms), "rooms");
    }

    #[test]
    fn test_dataset_rejects_unknown_primary_and_duplicates() {
        let source = |name: &str| SourceConfig {
            name: name.to_string(),
            path: None,
            params: BTreeMap::new(),
            date_params: DateParamsConfig::default(),
            per_page: None,
            fields: vec![],
            fields_param: None,
        };

        let mut dataset = DatasetConfig {
            sources: vec![source("bookings"), source("payments")],
            primary_source: Some("guests".to_string()),
            ..Default::default()
        };
        assert!(dataset.validate(Category::Sales).is_err());

        dataset.primary_source = None;
        assert!(dataset.validate(Category::Sales).is_ok());
        assert_eq!(dataset.primary_source_name(Category::Sales), "bookings");

        dataset.sources.push(source("bookings"));
        assert!(dataset
            .validate(Category::Sales)
            .unwrap_err()
            .contains("duplicate"));
    }

    #[test]
    fn test_primary_source_without_sources_must_be_implicit_name() {
        let mut dataset = DatasetConfig {
            primary_source: Some("main".to_string()),
            ..Default::default()
        };
        assert!(dataset
            .validate(Category::Rooms)
            .unwrap_err()
            .contains("primary_source 'main'"));

        dataset.primary_source = Some("rooms".to_string());
        assert!(dataset.validate(Category::Rooms).is_ok());
        assert_eq!(dataset.primary_source_name(Category::Rooms), "rooms");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = serde_yaml::from_str::<FeedConfig>("date_ranges:\n  manul: {}\n");
        assert!(result.is_err());

        let result = serde_yaml::from_str::<FeedConfig>("http:\n  timeout: 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let dataset = DatasetConfig {
            fields: vec!["room_id".to_string(), "room_id".to_string()],
            ..Default::default()
        };
        assert!(dataset.validate(Category::Rooms).is_err());
    }

    #[test]
    fn test_source_path_normalized() {
        let mut source = SourceConfig::implicit(Category::Sales);
        source.path = Some("v2/sales".to_string());
        assert_eq!(source.effective_path(), "/v2/sales");
    }

    #[test]
    fn test_http_config_requires_finite_timeouts() {
        let mut http = HttpConfig::default();
        assert_eq!(http.timeout_seconds, 30);
        assert!(http.validate().is_ok());

        http.timeout_seconds = 0;
        assert!(http.validate().is_err());
    }

    #[test]
    fn test_export_concurrency_bounds() {
        let mut export = ExportConfig::default();
        assert_eq!(export.max_concurrency, 1);
        export.max_concurrency = 7;
        assert!(export.validate().is_err());
        export.max_concurrency = 0;
        assert!(export.validate().is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("xml").is_err());
        assert_eq!(OutputFormat::Json.extension(), "json");
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_dataset_rejected() {
        let yaml = "invoices:\n  fields: [id]\n";
        assert!(serde_yaml::from_str::<DatasetsConfig>(yaml).is_err());
    }
}
