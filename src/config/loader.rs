//! Configuration loader with YAML parsing and environment variable overrides

use super::env::ApiSettings;
use super::schema::{FeedConfig, OutputFormat};
use crate::domain::errors::FeedError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Everything a run needs, built once at startup and read-only afterwards
#[derive(Debug, Clone)]
pub struct Settings {
    /// API base URL and credentials from the environment
    pub api: ApiSettings,

    /// Parsed and validated configuration file
    pub feed: FeedConfig,
}

impl Settings {
    /// Loads the configuration file and API settings from the process environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Loads the configuration file and API settings through `lookup`
    ///
    /// Any error here is a `FeedError::Configuration` and means no request
    /// may be issued.
    pub fn load_with<F>(path: impl AsRef<Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = ApiSettings::from_lookup(&lookup)?;
        let feed = load_config_with(path, &lookup)?;
        Ok(Self { api, feed })
    }
}

/// Loads configuration from a YAML file
///
/// This function:
/// 1. Reads the YAML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the YAML into FeedConfig
/// 4. Applies environment variable overrides (HOTELFEED_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `FeedError::Configuration` if any step fails.
///
/// # Examples
///
/// ```no_run
/// use hotelfeed::config::load_config;
///
/// let config = load_config("config.yaml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FeedConfig> {
    load_config_with(path, &|key: &str| std::env::var(key).ok())
}

/// Same as [`load_config`], reading variables through `lookup`
pub fn load_config_with<F>(path: impl AsRef<Path>, lookup: &F) -> Result<FeedConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(FeedError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FeedError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents, lookup)?;

    // An empty document means "all defaults"
    let mut config: FeedConfig = if contents.trim().is_empty() {
        FeedConfig::default()
    } else {
        serde_yaml::from_str(&contents)
            .map_err(|e| FeedError::Configuration(format!("Failed to parse YAML: {e}")))?
    };

    apply_env_overrides(&mut config, lookup)?;

    config.validate().map_err(|e| {
        FeedError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars<F>(input: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FeedError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match lookup(var_name) {
                Some(value) => value,
                None => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FeedError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the HOTELFEED_* prefix
fn apply_env_overrides<F>(config: &mut FeedConfig, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("HOTELFEED_OUTPUT_FORMAT") {
        config.output.format = val
            .parse::<OutputFormat>()
            .map_err(FeedError::Configuration)?;
    }
    if let Some(val) = lookup("HOTELFEED_OUTPUT_DIRECTORY") {
        config.output.local_output.enabled = true;
        config.output.local_output.directory = val;
    }

    if let Some(val) = lookup("HOTELFEED_S3_BUCKET") {
        config.output.s3.enabled = true;
        config.output.s3.bucket = Some(val);
    }
    if let Some(val) = lookup("HOTELFEED_S3_PREFIX") {
        config.output.s3.prefix = val;
    }
    if let Some(val) = lookup("HOTELFEED_S3_REGION") {
        config.output.s3.region = Some(val);
    }

    if let Some(val) = lookup("HOTELFEED_HTTP_TIMEOUT_SECONDS") {
        config.http.timeout_seconds = val.parse().map_err(|_| {
            FeedError::Configuration(format!(
                "HOTELFEED_HTTP_TIMEOUT_SECONDS must be a positive integer, got '{val}'"
            ))
        })?;
    }

    Ok(())
}
