//! Artifact sink trait
//!
//! A sink is one output destination. Each operation hands its artifact to
//! every enabled sink, and a failing sink does not stop the others.

use crate::domain::{Artifact, Result};
use async_trait::async_trait;

#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Short destination name used in logs and the summary (`local`, `s3`)
    fn name(&self) -> &str;

    /// Writes the artifact, replacing any previous copy
    ///
    /// Returns the location written to (a path or an `s3://` URL).
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Io` or `FeedError::Upload` depending on the sink.
    async fn write(&self, artifact: &Artifact) -> Result<String>;
}
