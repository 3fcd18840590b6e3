//! Local directory sink

use super::traits::ArtifactSink;
use crate::domain::{Artifact, FeedError, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes artifacts into a directory, creating it on first use
///
/// Files are written to a temporary file in the same directory and renamed
/// into place, so readers never see a partial file.
#[derive(Debug, Clone)]
pub struct LocalSink {
    directory: PathBuf,
}

impl LocalSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl ArtifactSink for LocalSink {
    fn name(&self) -> &str {
        "local"
    }

    async fn write(&self, artifact: &Artifact) -> Result<String> {
        let directory = self.directory.clone();
        let file_name = artifact.file_name.clone();
        let bytes = artifact.bytes.clone();

        let path = tokio::task::spawn_blocking(move || write_atomic(&directory, &file_name, &bytes))
            .await
            .map_err(|e| FeedError::Io(format!("Local write task failed: {e}")))??;

        tracing::debug!(path = %path.display(), bytes = artifact.size(), "Wrote local artifact");
        Ok(path.display().to_string())
    }
}

fn write_atomic(directory: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(directory).map_err(|e| {
        FeedError::Io(format!(
            "Failed to create output directory {}: {e}",
            directory.display()
        ))
    })?;

    let target = directory.join(file_name);
    let io_err = |e: std::io::Error| FeedError::Io(format!("Failed to write {}: {e}", target.display()));

    let mut tmp = NamedTempFile::new_in(directory).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(&target).map_err(|e| io_err(e.error))?;

    Ok(target)
}
