//! Health mediation against the auto-scaling control plane.
//!
//! # Data Flow
//! ```text
//! in-service query:
//!     HealthMediator::query_in_service_state
//!     → AutoScalingApi::describe_instance (read)
//!     → (in_service, LifecycleState)
//!
//! mark unhealthy:
//!     HealthMediator::mark_unhealthy
//!     → AutoScalingApi::describe_instance (read)
//!     → already Unhealthy? return applied = false
//!     → AutoScalingApi::set_instance_health (write)
//! ```
//!
//! # State machine (observed, not owned)
//! ```text
//! Pending → InService → Unhealthy → Terminating → Terminated
//! any non-Unhealthy state --mark_unhealthy--> Unhealthy
//! Unhealthy --mark_unhealthy--> Unhealthy (no write)
//! ```
//!
//! # Design Decisions
//! - The control-plane client is injected, never built by the mediator
//! - State is always fetched fresh; nothing is cached between calls
//! - Read-then-write is not atomic; an external change between the two
//!   calls is not detected

pub mod control_plane;
pub mod mediator;
pub mod state;

pub use control_plane::{AsgInstance, AutoScalingApi, AwsAutoScaling, ControlPlaneError};
pub use mediator::HealthMediator;
pub use state::{HealthStatus, HealthTransitionResult, LifecycleState};
