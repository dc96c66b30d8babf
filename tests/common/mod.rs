//! Shared test doubles for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use asg_health::health::{AsgInstance, AutoScalingApi, ControlPlaneError, HealthStatus, LifecycleState};
use asg_health::identity::{MetadataError, MetadataSource};

/// Call counters shared between a test and the control plane it hands out.
#[derive(Debug, Default)]
pub struct Calls {
    pub describes: AtomicUsize,
    pub writes: AtomicUsize,
}

impl Calls {
    pub fn describes(&self) -> usize {
        self.describes.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

/// In-memory control plane keyed by instance id.
#[derive(Clone, Default)]
pub struct FakeControlPlane {
    instances: Arc<Mutex<HashMap<String, AsgInstance>>>,
    pub calls: Arc<Calls>,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl FakeControlPlane {
    pub fn with_instance(instance_id: &str, state: LifecycleState) -> Self {
        let plane = Self::default();
        plane.instances.lock().unwrap().insert(
            instance_id.to_string(),
            AsgInstance {
                instance_id: instance_id.to_string(),
                auto_scaling_group_name: "web-asg".to_string(),
                lifecycle_state: state,
                health_status: Some(HealthStatus::Healthy),
            },
        );
        plane
    }

    pub fn state_of(&self, instance_id: &str) -> Option<LifecycleState> {
        self.instances
            .lock()
            .unwrap()
            .get(instance_id)
            .map(|i| i.lifecycle_state.clone())
    }
}

impl AutoScalingApi for FakeControlPlane {
    async fn describe_instance(&self, instance_id: &str) -> Result<Vec<AsgInstance>, ControlPlaneError> {
        self.calls.describes.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .instances
            .lock()
            .unwrap()
            .get(instance_id)
            .cloned()
            .into_iter()
            .collect())
    }

    async fn set_instance_health(
        &self,
        instance_id: &str,
        status: HealthStatus,
    ) -> Result<(), ControlPlaneError> {
        self.calls.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(ControlPlaneError::new(
                "SetInstanceHealth",
                "AccessDenied: not authorized to perform autoscaling:SetInstanceHealth",
            ));
        }
        if let Some(instance) = self.instances.lock().unwrap().get_mut(instance_id) {
            instance.health_status = Some(status);
            instance.lifecycle_state = LifecycleState::Unhealthy;
        }
        Ok(())
    }
}

/// Metadata source with fixed answers; `None` simulates an unreachable endpoint.
#[derive(Debug, Default)]
pub struct FakeMetadata {
    pub region: Option<String>,
    pub instance_id: Option<String>,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeMetadata {
    pub fn new(region: &str, instance_id: &str) -> Self {
        Self {
            region: Some(region.to_string()),
            instance_id: Some(instance_id.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MetadataSource for FakeMetadata {
    async fn region(&self) -> Result<String, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.region.clone().ok_or_else(|| MetadataError::Request {
            path: "/latest/meta-data/placement/region",
            message: "connection refused".to_string(),
        })
    }

    async fn instance_id(&self) -> Result<String, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.instance_id.clone().ok_or_else(|| MetadataError::Request {
            path: "/latest/meta-data/instance-id",
            message: "connection refused".to_string(),
        })
    }
}
