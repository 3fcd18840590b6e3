//! Sink factory
//!
//! Builds the enabled output destinations from configuration.

use super::local::LocalSink;
use super::s3::S3Sink;
use super::traits::ArtifactSink;
use crate::config::OutputConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Creates every enabled sink, local first
///
/// # Errors
///
/// Returns an error if an enabled sink cannot be configured.
pub async fn create_sinks(output: &OutputConfig) -> Result<Vec<Arc<dyn ArtifactSink>>> {
    let mut sinks: Vec<Arc<dyn ArtifactSink>> = Vec::new();

    if output.local_output.enabled {
        tracing::info!(directory = %output.local_output.directory, "Creating local output");
        sinks.push(Arc::new(LocalSink::new(&output.local_output.directory)));
    }

    if output.s3.enabled {
        tracing::info!("Creating S3 output");
        sinks.push(Arc::new(S3Sink::new(&output.s3).await?));
    }

    Ok(sinks)
}
