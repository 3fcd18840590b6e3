//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output on stderr
//! - Configurable log levels, overridable with `RUST_LOG`
//! - JSON file logging with rotation (`--log-dir`)
//!
//! Every line emitted during an export carries the run's `run_id` span field.
//!
//! # Example
//!
//! ```no_run
//! use hotelfeed::logging::init_logging;
//! use hotelfeed::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(category = "sales", window = "onhand", "Fetching");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use hotelfeed::log_error_with_context;
/// use hotelfeed::domain::FeedError;
///
/// let error = FeedError::Configuration("API_TOKEN is not set".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
