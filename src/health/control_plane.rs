//! Auto-scaling control-plane client.
//!
//! # Responsibilities
//! - Describe a single instance's auto-scaling membership
//! - Set a single instance's health status
//! - Build the SDK client lazily from ambient credentials and the region
//!
//! # Design Decisions
//! - `AutoScalingApi` is the seam the mediator is generic over
//! - SDK retries are off by default; every failure is terminal
//! - Errors carry the full SDK error context, not just the top-level kind

use std::future::Future;
use std::time::Duration;

use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_autoscaling::config::Region;
use aws_sdk_autoscaling::error::DisplayErrorContext;
use aws_sdk_autoscaling::Client;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::config::ControlPlaneConfig;
use crate::health::state::{HealthStatus, LifecycleState};

/// A read or write against the control plane failed.
#[derive(Debug, Clone, Error)]
#[error("{operation} failed: {message}")]
pub struct ControlPlaneError {
    pub operation: &'static str,
    pub message: String,
}

impl ControlPlaneError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// One auto-scaling membership record for an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsgInstance {
    pub instance_id: String,
    pub auto_scaling_group_name: String,
    pub lifecycle_state: LifecycleState,
    /// `None` when the control plane reports a value this tool does not know.
    pub health_status: Option<HealthStatus>,
}

/// Operations the mediator needs from the control plane.
pub trait AutoScalingApi: Send + Sync {
    /// Describe the instance. An empty vector means it belongs to no group.
    fn describe_instance(
        &self,
        instance_id: &str,
    ) -> impl Future<Output = Result<Vec<AsgInstance>, ControlPlaneError>> + Send;

    /// Set the instance's health status.
    fn set_instance_health(
        &self,
        instance_id: &str,
        status: HealthStatus,
    ) -> impl Future<Output = Result<(), ControlPlaneError>> + Send;
}

const DESCRIBE: &str = "DescribeAutoScalingInstances";
const SET_HEALTH: &str = "SetInstanceHealth";

/// Control-plane client backed by the AWS SDK.
pub struct AwsAutoScaling {
    region: String,
    config: ControlPlaneConfig,
    client: OnceCell<Client>,
}

impl AwsAutoScaling {
    /// Create a client for `region`. No network or credential work happens
    /// until the first call.
    pub fn new(region: impl Into<String>, config: ControlPlaneConfig) -> Self {
        Self {
            region: region.into(),
            config,
            client: OnceCell::new(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                tracing::debug!(region = %self.region, "Building auto-scaling client");
                let timeouts = TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(self.config.operation_timeout_secs))
                    .build();
                let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(self.region.clone()))
                    .retry_config(RetryConfig::standard().with_max_attempts(self.config.max_attempts))
                    .timeout_config(timeouts)
                    .load()
                    .await;
                Client::new(&sdk_config)
            })
            .await
    }
}

impl AutoScalingApi for AwsAutoScaling {
    async fn describe_instance(
        &self,
        instance_id: &str,
    ) -> Result<Vec<AsgInstance>, ControlPlaneError> {
        let output = self
            .client()
            .await
            .describe_auto_scaling_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| ControlPlaneError::new(DESCRIBE, DisplayErrorContext(&e).to_string()))?;

        Ok(output
            .auto_scaling_instances()
            .iter()
            .map(|details| {
                let health = text(details.health_status());
                AsgInstance {
                    instance_id: text(details.instance_id()),
                    auto_scaling_group_name: text(details.auto_scaling_group_name()),
                    lifecycle_state: LifecycleState::from(text(details.lifecycle_state()).as_str()),
                    health_status: HealthStatus::parse(&health),
                }
            })
            .collect())
    }

    async fn set_instance_health(
        &self,
        instance_id: &str,
        status: HealthStatus,
    ) -> Result<(), ControlPlaneError> {
        self.client()
            .await
            .set_instance_health()
            .instance_id(instance_id)
            .health_status(status.as_str())
            .send()
            .await
            .map_err(|e| ControlPlaneError::new(SET_HEALTH, DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}

impl std::fmt::Debug for AwsAutoScaling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsAutoScaling")
            .field("region", &self.region)
            .field("operation_timeout_secs", &self.config.operation_timeout_secs)
            .field("max_attempts", &self.config.max_attempts)
            .field("connected", &self.client.initialized())
            .finish()
    }
}

// Required members are plain `&str` on newer SDK models and `Option<&str>` on
// older ones.
fn text<'a>(value: impl Into<Option<&'a str>>) -> String {
    value.into().unwrap_or_default().to_string()
}
