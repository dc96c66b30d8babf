//! Instance metadata service (IMDS) client.

use std::future::Future;
use std::time::Duration;

use aws_config::imds;
use thiserror::Error;

use crate::config::MetadataConfig;

const REGION_PATH: &str = "/latest/meta-data/placement/region";
const INSTANCE_ID_PATH: &str = "/latest/meta-data/instance-id";

/// Errors returned by a metadata source.
#[derive(Debug, Clone, Error)]
pub enum MetadataError {
    /// The endpoint could not be reached or answered with an error.
    #[error("metadata request for {path} failed: {message}")]
    Request { path: &'static str, message: String },

    /// The endpoint answered with an empty value.
    #[error("metadata service returned no value for {0}")]
    Empty(&'static str),
}

/// Facts the local instance can tell about itself.
pub trait MetadataSource: Send + Sync {
    fn region(&self) -> impl Future<Output = Result<String, MetadataError>> + Send;

    fn instance_id(&self) -> impl Future<Output = Result<String, MetadataError>> + Send;
}

/// IMDSv2 client from `aws-config`, configured to fail fast.
pub struct ImdsMetadata {
    client: imds::Client,
}

impl ImdsMetadata {
    pub fn new(config: &MetadataConfig) -> Self {
        let client = imds::Client::builder()
            .max_attempts(1)
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .read_timeout(Duration::from_millis(config.read_timeout_ms))
            .build();
        Self { client }
    }

    async fn fetch(&self, path: &'static str) -> Result<String, MetadataError> {
        let value = self
            .client
            .get(path)
            .await
            .map_err(|e| MetadataError::Request {
                path,
                message: e.to_string(),
            })?;

        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(MetadataError::Empty(path));
        }
        tracing::debug!(path, "Metadata lookup succeeded");
        Ok(value.to_string())
    }
}

impl std::fmt::Debug for ImdsMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImdsMetadata").finish_non_exhaustive()
    }
}

impl MetadataSource for ImdsMetadata {
    async fn region(&self) -> Result<String, MetadataError> {
        self.fetch(REGION_PATH).await
    }

    async fn instance_id(&self) -> Result<String, MetadataError> {
        self.fetch(INSTANCE_ID_PATH).await
    }
}
