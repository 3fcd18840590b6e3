//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{Category, DateWindow, FeedError};
use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Identifier attached to every log line of the run
    pub run_id: String,

    /// Whether sinks were skipped
    pub dry_run: bool,

    /// Resolved windows
    pub windows: Vec<DateWindow>,

    /// One entry per category/window pair, in category then window order
    pub operations: Vec<OperationOutcome>,

    /// Duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(run_id: impl Into<String>, dry_run: bool) -> Self {
        Self {
            run_id: run_id.into(),
            dry_run,
            windows: Vec::new(),
            operations: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn total_operations(&self) -> usize {
        self.operations.len()
    }

    pub fn successful_operations(&self) -> usize {
        self.operations.iter().filter(|op| op.is_successful()).count()
    }

    pub fn failed_operations(&self) -> usize {
        self.total_operations() - self.successful_operations()
    }

    /// Total records across all operations
    pub fn total_records(&self) -> usize {
        self.operations.iter().map(|op| op.record_count).sum()
    }

    /// Every error, with the operation and destination it came from
    pub fn errors(&self) -> Vec<ExportError> {
        let mut errors = Vec::new();
        for op in &self.operations {
            if let Some(error) = &op.error {
                errors.push(error.clone());
            }
            for dest in &op.destinations {
                if let DestinationStatus::Failed(error) = &dest.status {
                    errors.push(error.clone());
                }
            }
        }
        errors
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.operations.iter().all(OperationOutcome::is_successful)
    }

    /// Process exit code: 0 when every operation succeeded, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_successful() {
            0
        } else {
            1
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            dry_run = self.dry_run,
            operations = self.total_operations(),
            successful = self.successful_operations(),
            failed = self.failed_operations(),
            records = self.total_records(),
            duration_secs = self.duration.as_secs_f64(),
            "Export completed"
        );

        for op in &self.operations {
            if op.is_successful() {
                tracing::info!(
                    artifact = %op.artifact,
                    records = op.record_count,
                    sha256 = op.sha256.as_deref().unwrap_or(""),
                    "Operation succeeded"
                );
            } else {
                tracing::warn!(
                    artifact = %op.artifact,
                    records = op.record_count,
                    "Operation failed"
                );
            }
        }

        let errors = self.errors();
        if !errors.is_empty() {
            tracing::warn!(error_count = errors.len(), "Export completed with errors");
            for error in &errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

/// Result of one category/window operation
#[derive(Debug, Clone)]
pub struct OperationOutcome {
    pub category: Category,
    pub window: DateWindow,

    /// Artifact base name, e.g. `sales_onhand`
    pub artifact: String,

    /// Records serialized; zero when the fetch failed
    pub record_count: usize,

    /// Checksum of the serialized artifact
    pub sha256: Option<String>,

    /// Fetch or serialization failure; no sink was attempted when set
    pub error: Option<ExportError>,

    /// Per-sink outcomes
    pub destinations: Vec<DestinationOutcome>,

    pub duration: Duration,
}

impl OperationOutcome {
    pub fn new(category: Category, window: DateWindow, artifact: impl Into<String>) -> Self {
        Self {
            category,
            window,
            artifact: artifact.into(),
            record_count: 0,
            sha256: None,
            error: None,
            destinations: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Succeeded when nothing failed before the sinks and every sink succeeded
    pub fn is_successful(&self) -> bool {
        self.error.is_none() && self.destinations.iter().all(DestinationOutcome::is_written)
    }
}

/// Result of writing one artifact to one sink
#[derive(Debug, Clone)]
pub struct DestinationOutcome {
    /// Sink name (`local`, `s3`)
    pub sink: String,
    pub status: DestinationStatus,
}

impl DestinationOutcome {
    pub fn written(sink: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            sink: sink.into(),
            status: DestinationStatus::Written {
                location: location.into(),
            },
        }
    }

    pub fn failed(sink: impl Into<String>, error: ExportError) -> Self {
        Self {
            sink: sink.into(),
            status: DestinationStatus::Failed(error),
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self.status, DestinationStatus::Written { .. })
    }
}

#[derive(Debug, Clone)]
pub enum DestinationStatus {
    Written { location: String },
    Failed(ExportError),
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Transport failure or timeout
    Network,
    /// Upstream status, bad body, or runaway pagination
    Api,
    /// Local write failure
    Io,
    /// Object storage failure
    Upload,
    /// CSV/JSON encoding failure
    Serialization,
    /// Configuration error
    Configuration,
    /// Unknown error
    Unknown,
}

impl From<&FeedError> for ExportErrorType {
    fn from(error: &FeedError) -> Self {
        match error {
            FeedError::Network(_) => ExportErrorType::Network,
            FeedError::Api(_) => ExportErrorType::Api,
            FeedError::Io(_) => ExportErrorType::Io,
            FeedError::Upload(_) => ExportErrorType::Upload,
            FeedError::Serialization(_) => ExportErrorType::Serialization,
            FeedError::Configuration(_) => ExportErrorType::Configuration,
            FeedError::Other(_) => ExportErrorType::Unknown,
        }
    }
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., artifact and sink)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}

impl From<&FeedError> for ExportError {
    fn from(error: &FeedError) -> Self {
        ExportError::new(error.into(), error.to_string())
    }
}
