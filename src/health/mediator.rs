//! Read and mutate a single instance's health through the control plane.

use crate::error::{AsgHealthError, Result};
use crate::health::control_plane::{AsgInstance, AutoScalingApi};
use crate::health::state::{HealthStatus, HealthTransitionResult, LifecycleState};

/// Mediates between the CLI actions and an injected control-plane client.
#[derive(Debug)]
pub struct HealthMediator<C> {
    control_plane: C,
}

impl<C: AutoScalingApi> HealthMediator<C> {
    pub fn new(control_plane: C) -> Self {
        Self { control_plane }
    }

    pub fn control_plane(&self) -> &C {
        &self.control_plane
    }

    /// Returns whether the instance is `InService`, along with its current state.
    pub async fn query_in_service_state(
        &self,
        instance_id: &str,
    ) -> Result<(bool, LifecycleState)> {
        let record = self.lookup(instance_id).await?;
        let state = record.lifecycle_state;
        tracing::info!(instance_id, state = %state, "Fetched lifecycle state");
        Ok((state.is_in_service(), state))
    }

    /// Set the instance's health to `Unhealthy` unless it already is.
    ///
    /// A lookup failure is fatal; the write is never attempted blind.
    pub async fn mark_unhealthy(&self, instance_id: &str) -> Result<HealthTransitionResult> {
        let record = self.lookup(instance_id).await?;

        if is_already_unhealthy(&record) {
            tracing::info!(
                instance_id,
                state = %record.lifecycle_state,
                "Instance already unhealthy, skipping health update"
            );
            return Ok(HealthTransitionResult {
                applied: false,
                prior_state: record.lifecycle_state,
            });
        }

        self.control_plane
            .set_instance_health(instance_id, HealthStatus::Unhealthy)
            .await?;

        tracing::info!(
            instance_id,
            group = %record.auto_scaling_group_name,
            prior_state = %record.lifecycle_state,
            "Instance health set to Unhealthy"
        );

        Ok(HealthTransitionResult {
            applied: true,
            prior_state: record.lifecycle_state,
        })
    }

    async fn lookup(&self, instance_id: &str) -> Result<AsgInstance> {
        let records = self.control_plane.describe_instance(instance_id).await?;
        records
            .into_iter()
            .next()
            .ok_or_else(|| AsgHealthError::InstanceNotInAsg {
                instance_id: instance_id.to_string(),
            })
    }
}

fn is_already_unhealthy(record: &AsgInstance) -> bool {
    record.lifecycle_state == LifecycleState::Unhealthy
        || record.health_status == Some(HealthStatus::Unhealthy)
}
