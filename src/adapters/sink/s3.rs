//! S3 object storage sink

use super::traits::ArtifactSink;
use crate::config::S3OutputConfig;
use crate::domain::{Artifact, FeedError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

/// Uploads artifacts to `s3://<bucket>/<prefix>/<file_name>`
///
/// Credentials come from the AWS default provider chain.
#[derive(Debug, Clone)]
pub struct S3Sink {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3Sink {
    /// Builds the sink from the output configuration
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Configuration` if no bucket is configured.
    pub async fn new(config: &S3OutputConfig) -> Result<Self> {
        let bucket = config
            .bucket
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                FeedError::Configuration("output.s3.bucket is required for S3 uploads".to_string())
            })?
            .to_string();

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&sdk_config).force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        tracing::info!(
            bucket = %bucket,
            prefix = %config.prefix,
            region = ?sdk_config.region().map(|r| r.as_ref().to_string()),
            "Configured S3 output"
        );

        Ok(Self::with_client(
            Client::from_conf(builder.build()),
            bucket,
            config.prefix.clone(),
        ))
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key_for(&self, file_name: &str) -> String {
        s3_key(&self.prefix, file_name)
    }
}

#[async_trait]
impl ArtifactSink for S3Sink {
    fn name(&self) -> &str {
        "s3"
    }

    async fn write(&self, artifact: &Artifact) -> Result<String> {
        let key = self.key_for(&artifact.file_name);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(artifact.bytes.clone()))
            .content_type(artifact.content_type)
            .metadata("sha256", &artifact.sha256)
            .send()
            .await
            .map_err(|e| {
                FeedError::Upload(format!(
                    "Failed to upload s3://{}/{key}: {}",
                    self.bucket,
                    DisplayErrorContext(&e)
                ))
            })?;

        let location = format!("s3://{}/{key}", self.bucket);
        tracing::debug!(location = %location, bytes = artifact.size(), "Uploaded artifact");
        Ok(location)
    }
}

/// Object key for `file_name` under `prefix`
///
/// Slashes around the prefix are trimmed; an empty prefix puts the object
/// at the bucket root.
pub fn s3_key(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{prefix}/{file_name}")
    }
}
