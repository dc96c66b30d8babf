//! Command-line surface.
//!
//! # Responsibilities
//! - Define flags with clap
//! - Validate that exactly one action and an instance id were given
//! - Produce a `Request` for the driver
//!
//! # Design Decisions
//! - Usage problems are collected and reported together, exit code 1
//! - `-i -` asks the metadata service for the instance id

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{AsgHealthConfig, LogFormat};
use crate::error::{AsgHealthError, Result};
use crate::identity::InstanceTarget;

const HELP_BLURB: &str = "\
Use this tool to check if the EC2 instance is 'InService' in its Auto Scaling group.
It can also set the instance's health to 'Unhealthy', which causes the Auto Scaling
group to start replacing it.

Only a single action can be invoked in a single run.
Credentials are taken from the instance profile or the environment; they cannot be
passed on the command line.";

#[derive(Parser, Debug)]
#[command(name = "asg-health", version, about = "Query or mark an instance's Auto Scaling health")]
#[command(long_about = HELP_BLURB, disable_version_flag = true)]
pub struct Cli {
    /// Instance id of the EC2 instance. `-` detects it from the instance metadata service
    #[arg(short = 'i', long = "instance-id", value_name = "INSTANCE_ID", allow_hyphen_values = true)]
    pub instance_id: Option<String>,

    /// Check whether the instance is 'InService' in its Auto Scaling group
    #[arg(long)]
    pub in_service: bool,

    /// Set the instance to 'Unhealthy' in its Auto Scaling group
    #[arg(long)]
    pub set_unhealthy: bool,

    /// Print success messages as well as errors
    #[arg(long)]
    pub verbose: bool,

    /// Region of the Auto Scaling control plane (overrides AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Path to a TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit diagnostic logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Print the outcome as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Show the version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),
}

/// The single action an invocation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    InService,
    SetUnhealthy,
}

/// A validated invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub action: Action,
    pub target: InstanceTarget,
    pub verbose: bool,
    pub json: bool,
}

impl Cli {
    /// Check flag combinations and build the request.
    pub fn validate(&self) -> Result<Request> {
        let mut errors = Vec::new();

        let action = match (self.in_service, self.set_unhealthy) {
            (true, true) => {
                errors.push("--set-unhealthy and --in-service can not be used together".to_string());
                None
            }
            (true, false) => Some(Action::InService),
            (false, true) => Some(Action::SetUnhealthy),
            (false, false) => {
                errors.push("No action specified".to_string());
                None
            }
        };

        let instance_id = self.instance_id.as_deref().map(str::trim).unwrap_or_default();
        if (self.in_service || self.set_unhealthy) && instance_id.is_empty() {
            errors.push("-i instance_id must be specified".to_string());
        }

        match action {
            Some(action) if errors.is_empty() => Ok(Request {
                action,
                target: InstanceTarget::parse(instance_id),
                verbose: self.verbose,
                json: self.json,
            }),
            _ => Err(AsgHealthError::Usage(errors)),
        }
    }

    /// Layer CLI overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut AsgHealthConfig) {
        if let Some(region) = self.region.as_ref().filter(|r| !r.trim().is_empty()) {
            config.region = Some(region.clone());
        }
        if self.log_json {
            config.logging.format = LogFormat::Json;
        }
    }
}
