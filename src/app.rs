//! Invocation driver.
//!
//! # Data Flow
//! ```text
//! Request
//!     → IdentityResolver (instance id, then region)
//!     → connect(identity) builds the control-plane client
//!     → HealthMediator runs exactly one action
//!     → Outcome / error
//!     → Report (exit code + stdout/stderr lines)
//! ```

use serde::Serialize;

use crate::cli::{Action, Request};
use crate::error::{AsgHealthError, Result};
use crate::health::{AutoScalingApi, HealthMediator, LifecycleState};
use crate::identity::{IdentityResolver, InstanceIdentity, MetadataSource};

/// Result of a completed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Outcome {
    InService {
        instance_id: String,
        region: String,
        in_service: bool,
        state: LifecycleState,
    },
    MarkUnhealthy {
        instance_id: String,
        region: String,
        applied: bool,
        prior_state: LifecycleState,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        match self {
            Self::InService { in_service, .. } => *in_service,
            Self::MarkUnhealthy { .. } => true,
        }
    }
}

/// What the process prints and how it exits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub exit_code: u8,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

/// Resolve the identity, connect, and run the requested action.
pub async fn run<M, C, F>(
    request: &Request,
    resolver: &IdentityResolver<M>,
    connect: F,
) -> Result<Outcome>
where
    M: MetadataSource,
    C: AutoScalingApi,
    F: FnOnce(&InstanceIdentity) -> C,
{
    let identity = resolver.resolve(&request.target).await?;
    let mediator = HealthMediator::new(connect(&identity));
    let InstanceIdentity { instance_id, region } = identity;

    tracing::info!(instance_id = %instance_id, region = %region, action = ?request.action, "Running action");

    match request.action {
        Action::InService => {
            let (in_service, state) = mediator.query_in_service_state(&instance_id).await?;
            Ok(Outcome::InService {
                instance_id,
                region,
                in_service,
                state,
            })
        }
        Action::SetUnhealthy => {
            let result = mediator.mark_unhealthy(&instance_id).await?;
            Ok(Outcome::MarkUnhealthy {
                instance_id,
                region,
                applied: result.applied,
                prior_state: result.prior_state,
            })
        }
    }
}

/// Run the request and turn the result into a report.
pub async fn execute<M, C, F>(request: &Request, resolver: &IdentityResolver<M>, connect: F) -> Report
where
    M: MetadataSource,
    C: AutoScalingApi,
    F: FnOnce(&InstanceIdentity) -> C,
{
    match run(request, resolver, connect).await {
        Ok(outcome) => render(request, &outcome),
        Err(err) => {
            tracing::debug!(error = ?err, "Action failed");
            failure(request.action, &err)
        }
    }
}

/// Report for a completed action.
pub fn render(request: &Request, outcome: &Outcome) -> Report {
    let mut report = Report {
        exit_code: if outcome.is_success() { 0 } else { 1 },
        ..Default::default()
    };

    match outcome {
        Outcome::InService {
            instance_id,
            state,
            in_service: false,
            ..
        } => report.stderr.push(format!(
            "Instance {instance_id} is not 'InService'. State: {state}"
        )),
        Outcome::InService {
            instance_id, state, ..
        } if request.verbose => {
            report
                .stdout
                .push(format!("Instance {instance_id} is showing as '{state}'"));
        }
        Outcome::MarkUnhealthy {
            instance_id,
            applied: false,
            ..
        } if request.verbose => {
            report
                .stdout
                .push(format!("Instance {instance_id} is already 'Unhealthy'"));
        }
        Outcome::MarkUnhealthy { applied: true, .. } if request.verbose => {
            report
                .stdout
                .push("Successfully set the instance health to 'Unhealthy'".to_string());
        }
        _ => {}
    }

    if request.json {
        match serde_json::to_string(outcome) {
            Ok(json) => report.stdout.push(json),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize outcome"),
        }
    }

    report
}

/// Report for a failed invocation.
pub fn failure(action: Action, err: &AsgHealthError) -> Report {
    let message = match (action, err) {
        (Action::SetUnhealthy, AsgHealthError::ControlPlane(_))
        | (Action::SetUnhealthy, AsgHealthError::InstanceNotInAsg { .. }) => {
            format!("Failed to set the health of the instance. Error: {err}")
        }
        _ => err.to_string(),
    };

    Report {
        exit_code: 1,
        stdout: Vec::new(),
        stderr: vec![message],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::InstanceTarget;

    fn request(action: Action, verbose: bool) -> Request {
        Request {
            action,
            target: InstanceTarget::Explicit("i-abc123".into()),
            verbose,
            json: false,
        }
    }

    fn in_service(state: LifecycleState) -> Outcome {
        Outcome::InService {
            instance_id: "i-abc123".into(),
            region: "us-east-1".into(),
            in_service: state.is_in_service(),
            state,
        }
    }

    #[test]
    fn test_quiet_success_prints_nothing() {
        let report = render(&request(Action::InService, false), &in_service(LifecycleState::InService));
        assert_eq!(report, Report::default());
    }

    #[test]
    fn test_verbose_success_line() {
        let report = render(&request(Action::InService, true), &in_service(LifecycleState::InService));
        assert_eq!(report.exit_code, 0);
        assert_eq!(report.stdout, vec!["Instance i-abc123 is showing as 'InService'"]);
    }

    #[test]
    fn test_not_in_service_exits_one() {
        let report = render(&request(Action::InService, false), &in_service(LifecycleState::Pending));
        assert_eq!(report.exit_code, 1);
        assert_eq!(
            report.stderr,
            vec!["Instance i-abc123 is not 'InService'. State: Pending"]
        );
    }

    #[test]
    fn test_json_outcome() {
        let mut req = request(Action::SetUnhealthy, false);
        req.json = true;
        let outcome = Outcome::MarkUnhealthy {
            instance_id: "i-abc123".into(),
            region: "us-east-1".into(),
            applied: false,
            prior_state: LifecycleState::Unhealthy,
        };
        let report = render(&req, &outcome);
        assert_eq!(report.exit_code, 0);

        let json: serde_json::Value = serde_json::from_str(&report.stdout[0]).unwrap();
        assert_eq!(json["action"], "mark_unhealthy");
        assert_eq!(json["applied"], false);
        assert_eq!(json["prior_state"], "Unhealthy");
    }

    #[test]
    fn test_mark_failure_message() {
        let err = AsgHealthError::InstanceNotInAsg {
            instance_id: "i-abc123".into(),
        };
        let report = failure(Action::SetUnhealthy, &err);
        assert_eq!(report.exit_code, 1);
        assert_eq!(
            report.stderr,
            vec!["Failed to set the health of the instance. Error: No health status found for instance i-abc123"]
        );

        let report = failure(Action::InService, &err);
        assert_eq!(report.stderr, vec!["No health status found for instance i-abc123"]);
    }
}
