//! Export orchestration
//!
//! This module provides the core export logic for hotelfeed, including:
//! - Serialization of records into CSV/JSON artifacts
//! - Export coordination across categories, windows and sinks
//! - Summary and reporting

pub mod coordinator;
pub mod serialize;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use serialize::{cell_text, serialize_records};
pub use summary::{
    DestinationOutcome, DestinationStatus, ExportError, ExportErrorType, ExportSummary,
    OperationOutcome,
};
