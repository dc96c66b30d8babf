//! Lifecycle and health values reported by the control plane.
//!
//! # States
//! Values are parsed from the control plane's strings. Anything not listed
//! is kept verbatim in `LifecycleState::Other`; the mediator only cares
//! about `InService` and `Unhealthy`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Lifecycle state of an auto-scaling group member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Pending,
    PendingWait,
    PendingProceed,
    Quarantined,
    InService,
    Unhealthy,
    Terminating,
    TerminatingWait,
    TerminatingProceed,
    Terminated,
    Detaching,
    Detached,
    EnteringStandby,
    Standby,
    /// A state this tool does not name (warm pools, future additions).
    Other(String),
}

impl LifecycleState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::PendingWait => "Pending:Wait",
            Self::PendingProceed => "Pending:Proceed",
            Self::Quarantined => "Quarantined",
            Self::InService => "InService",
            Self::Unhealthy => "Unhealthy",
            Self::Terminating => "Terminating",
            Self::TerminatingWait => "Terminating:Wait",
            Self::TerminatingProceed => "Terminating:Proceed",
            Self::Terminated => "Terminated",
            Self::Detaching => "Detaching",
            Self::Detached => "Detached",
            Self::EnteringStandby => "EnteringStandby",
            Self::Standby => "Standby",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_in_service(&self) -> bool {
        matches!(self, Self::InService)
    }
}

impl From<&str> for LifecycleState {
    fn from(raw: &str) -> Self {
        match raw {
            "Pending" => Self::Pending,
            "Pending:Wait" => Self::PendingWait,
            "Pending:Proceed" => Self::PendingProceed,
            "Quarantined" => Self::Quarantined,
            "InService" => Self::InService,
            "Unhealthy" => Self::Unhealthy,
            "Terminating" => Self::Terminating,
            "Terminating:Wait" => Self::TerminatingWait,
            "Terminating:Proceed" => Self::TerminatingProceed,
            "Terminated" => Self::Terminated,
            "Detaching" => Self::Detaching,
            "Detached" => Self::Detached,
            "EnteringStandby" => Self::EnteringStandby,
            "Standby" => Self::Standby,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for LifecycleState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LifecycleState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Health status attribute of an auto-scaling group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Unhealthy => "Unhealthy",
        }
    }

    /// Parse the control plane's value; anything unrecognised is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Healthy" => Some(Self::Healthy),
            "Unhealthy" => Some(Self::Unhealthy),
            _ => None,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of `mark_unhealthy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthTransitionResult {
    /// False when the instance was already unhealthy and no write was issued.
    pub applied: bool,
    /// Lifecycle state read before the (possible) write.
    pub prior_state: LifecycleState,
}
