//! Domain error types
//!
//! This module defines the error hierarchy for hotelfeed.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main hotelfeed error type
///
/// Configuration errors abort a run before any fetch. Every other variant is
/// scoped to a single export operation and is recorded in the export summary.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Invalid or missing settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure talking to the records API
    #[error("Network error: {0}")]
    Network(String),

    /// Records API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Local file write errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Object storage upload errors
    #[error("Upload error: {0}")]
    Upload(String),

    /// CSV/JSON encoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl FeedError {
    /// Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, FeedError::Configuration(_))
    }
}

/// Records API errors
///
/// Errors returned by the upstream API once a connection was made.
/// These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status
    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// Body could not be decoded as JSON
    #[error("Invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    /// Pagination did not terminate within the page limit
    #[error("Pagination exceeded {max_pages} pages starting at {url}")]
    TooManyPages { url: String, max_pages: usize },
}

impl ApiError {
    /// Upstream status code, if the error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for FeedError {
    fn from(err: csv::Error) -> Self {
        FeedError::Serialization(format!("CSV error: {err}"))
    }
}

impl From<serde_yaml::Error> for FeedError {
    fn from(err: serde_yaml::Error) -> Self {
        FeedError::Configuration(format!("YAML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_display() {
        let err = FeedError::Configuration("API_TOKEN is required".to_string());
        assert_eq!(err.to_string(), "Configuration error: API_TOKEN is required");
    }

    #[test]
    fn test_api_error_conversion() {
        let api_err = ApiError::Status {
            url: "https://api.example.com/sales".to_string(),
            status: 503,
            body: "unavailable".to_string(),
        };
        let err: FeedError = api_err.into();
        assert!(matches!(err, FeedError::Api(_)));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_api_error_status() {
        let err = ApiError::Status {
            url: "u".to_string(),
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(404));

        let err = ApiError::TooManyPages {
            url: "u".to_string(),
            max_pages: 3,
        };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_only_configuration_is_fatal() {
        assert!(FeedError::Configuration("x".into()).is_fatal());
        assert!(!FeedError::Network("x".into()).is_fatal());
        assert!(!FeedError::Upload("x".into()).is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: FeedError = io_err.into();
        assert!(matches!(err, FeedError::Io(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("key: [unclosed").unwrap_err();
        let err: FeedError = yaml_err.into();
        assert!(matches!(err, FeedError::Configuration(_)));
        assert!(err.to_string().contains("YAML parse error"));
    }
}
