//! Serialized export artifacts

use sha2::{Digest, Sha256};

/// One serialized dataset, ready to hand to the sinks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Base name, e.g. `reservations_history`
    pub name: String,

    /// Name with extension, e.g. `reservations_history.csv`
    pub file_name: String,

    /// MIME type sent to object storage
    pub content_type: &'static str,

    pub bytes: Vec<u8>,

    /// Number of data rows
    pub record_count: usize,

    /// Hex SHA-256 of `bytes`
    pub sha256: String,
}

impl Artifact {
    pub fn new(
        name: impl Into<String>,
        extension: &str,
        content_type: &'static str,
        bytes: Vec<u8>,
        record_count: usize,
    ) -> Self {
        let name = name.into();
        let sha256 = checksum_bytes(&bytes);
        Self {
            file_name: format!("{name}.{extension}"),
            name,
            content_type,
            bytes,
            record_count,
            sha256,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Hex-encoded SHA-256 of raw bytes
pub fn checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
