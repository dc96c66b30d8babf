//! Resolves the target instance id and the control-plane region.

use serde::Serialize;

use crate::error::{AsgHealthError, Result};
use crate::identity::metadata::MetadataSource;

/// Instance id value that requests auto-detection.
pub const AUTO_DETECT: &str = "-";

/// Which instance an invocation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceTarget {
    Explicit(String),
    AutoDetect,
}

impl InstanceTarget {
    /// Interpret a raw `-i` value; `-` means auto-detect.
    pub fn parse(raw: &str) -> Self {
        if raw == AUTO_DETECT {
            Self::AutoDetect
        } else {
            Self::Explicit(raw.to_string())
        }
    }
}

/// The resolved identity of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceIdentity {
    pub instance_id: String,
    pub region: String,
}

/// Fills in whatever the caller did not supply, using the metadata source.
#[derive(Debug)]
pub struct IdentityResolver<M> {
    metadata: M,
    region_override: Option<String>,
}

impl<M: MetadataSource> IdentityResolver<M> {
    pub fn new(metadata: M, region_override: Option<String>) -> Self {
        Self {
            metadata,
            region_override: region_override.filter(|r| !r.trim().is_empty()),
        }
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    /// The override if set, else the metadata service's region.
    pub async fn resolve_region(&self) -> Result<String> {
        if let Some(region) = &self.region_override {
            tracing::debug!(region = %region, "Using region override");
            return Ok(region.clone());
        }

        let region = self
            .metadata
            .region()
            .await
            .map_err(|e| AsgHealthError::RegionUnavailable(e.to_string()))?;
        tracing::debug!(region = %region, "Region resolved from metadata service");
        Ok(region)
    }

    /// Returns the explicit id, or asks the metadata service exactly once.
    pub async fn resolve_instance_id(&self, target: &InstanceTarget) -> Result<String> {
        match target {
            InstanceTarget::Explicit(id) => Ok(id.clone()),
            InstanceTarget::AutoDetect => {
                let id = self
                    .metadata
                    .instance_id()
                    .await
                    .map_err(|e| AsgHealthError::IdentityUnavailable(e.to_string()))?;
                tracing::debug!(instance_id = %id, "Instance id resolved from metadata service");
                Ok(id)
            }
        }
    }

    /// Resolve both halves of the identity, instance id first.
    pub async fn resolve(&self, target: &InstanceTarget) -> Result<InstanceIdentity> {
        let instance_id = self.resolve_instance_id(target).await?;
        let region = self.resolve_region().await?;
        Ok(InstanceIdentity { instance_id, region })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::metadata::MetadataError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct ScriptedMetadata {
        region: Option<&'static str>,
        instance_id: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl MetadataSource for ScriptedMetadata {
        async fn region(&self) -> std::result::Result<String, MetadataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.region
                .map(str::to_string)
                .ok_or(MetadataError::Empty("region"))
        }

        async fn instance_id(&self) -> std::result::Result<String, MetadataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.instance_id
                .map(str::to_string)
                .ok_or_else(|| MetadataError::Request {
                    path: "instance-id",
                    message: "connection refused".into(),
                })
        }
    }

    #[test]
    fn test_target_parse() {
        assert_eq!(InstanceTarget::parse("-"), InstanceTarget::AutoDetect);
        assert_eq!(
            InstanceTarget::parse("i-abc123"),
            InstanceTarget::Explicit("i-abc123".into())
        );
    }

    #[tokio::test]
    async fn test_override_preferred_over_metadata() {
        let metadata = ScriptedMetadata {
            region: Some("us-west-2"),
            ..Default::default()
        };
        let resolver = IdentityResolver::new(metadata, Some("eu-central-1".into()));
        assert_eq!(resolver.resolve_region().await.unwrap(), "eu-central-1");
        assert_eq!(resolver.metadata().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_region_from_metadata() {
        let metadata = ScriptedMetadata {
            region: Some("us-west-2"),
            ..Default::default()
        };
        let resolver = IdentityResolver::new(metadata, Some("".into()));
        assert_eq!(resolver.resolve_region().await.unwrap(), "us-west-2");
    }

    #[tokio::test]
    async fn test_region_unavailable() {
        let resolver = IdentityResolver::new(ScriptedMetadata::default(), None);
        let err = resolver.resolve_region().await.unwrap_err();
        assert!(matches!(err, AsgHealthError::RegionUnavailable(_)));
    }

    #[tokio::test]
    async fn test_explicit_id_skips_metadata() {
        let resolver = IdentityResolver::new(ScriptedMetadata::default(), None);
        let id = resolver
            .resolve_instance_id(&InstanceTarget::Explicit("i-abc123".into()))
            .await
            .unwrap();
        assert_eq!(id, "i-abc123");
        assert_eq!(resolver.metadata().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_auto_detect_single_call() {
        let metadata = ScriptedMetadata {
            instance_id: Some("i-0feed"),
            ..Default::default()
        };
        let resolver = IdentityResolver::new(metadata, Some("eu-west-1".into()));
        let identity = resolver.resolve(&InstanceTarget::AutoDetect).await.unwrap();
        assert_eq!(
            identity,
            InstanceIdentity {
                instance_id: "i-0feed".into(),
                region: "eu-west-1".into(),
            }
        );
        assert_eq!(resolver.metadata().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_auto_detect_failure() {
        let resolver = IdentityResolver::new(ScriptedMetadata::default(), None);
        let err = resolver
            .resolve_instance_id(&InstanceTarget::AutoDetect)
            .await
            .unwrap_err();
        assert!(matches!(err, AsgHealthError::IdentityUnavailable(_)));
        assert!(err.to_string().starts_with("Could not determine instance id"));
    }
}
