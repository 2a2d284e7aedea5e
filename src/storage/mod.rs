//! Object storage for generated reports.
//!
//! Handlers talk to the [`ReportStore`] trait only. The production
//! implementation uploads to S3 and hands back a presigned download
//! URL; tests substitute an in-memory store.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use tracing::instrument;

/// Destination for rendered report documents.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Store `bytes` under `key`, overwriting any previous object.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Produce a time-limited download URL for `key`.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String>;
}

/// S3-backed report store.
#[derive(Debug, Clone)]
pub struct S3ReportStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ReportStore {
    /// Build a client from the ambient AWS credential chain.
    pub async fn connect(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.into()))
            .load()
            .await;

        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ReportStore for S3ReportStore {
    #[instrument(skip(self, bytes), fields(bucket = %self.bucket))]
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/pdf")
            .body(ByteStream::from(bytes))
            .send()
            .await
            .with_context(|| format!("Failed to upload {key}"))?;

        Ok(())
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String> {
        let config = PresigningConfig::expires_in(expires_in)
            .context("Invalid presigning expiry")?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .with_context(|| format!("Failed to presign {key}"))?;

        Ok(presigned.uri().to_string())
    }
}
