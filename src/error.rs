//! Crate-level error taxonomy.
//!
//! Every failure is terminal for the invocation: nothing here is retried,
//! the driver renders the message to stderr and exits non-zero.

use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::health::control_plane::ControlPlaneError;

/// Errors surfaced by a single `asg-health` invocation.
#[derive(Debug, Error)]
pub enum AsgHealthError {
    /// Neither the override nor the metadata service produced a region.
    #[error("Could not determine region. Error: {0}")]
    RegionUnavailable(String),

    /// Instance id auto-detection failed.
    #[error("Could not determine instance id. Error: {0}")]
    IdentityUnavailable(String),

    /// The control plane returned no record for the instance.
    #[error("No health status found for instance {instance_id}")]
    InstanceNotInAsg { instance_id: String },

    /// Read or write against the control plane failed.
    #[error(transparent)]
    ControlPlane(#[from] ControlPlaneError),

    /// Conflicting or missing command-line flags.
    #[error("{}", .0.join("\n"))]
    Usage(Vec<String>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for crate operations.
pub type Result<T> = std::result::Result<T, AsgHealthError>;
