//! asg-health
//!
//! One-shot command that checks or changes this instance's health in its
//! Auto Scaling group.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ cli (clap + validation) ──▶ Request
//!                                           │
//!   config file / AWS_REGION ──▶ config ────┤
//!                                           ▼
//!            identity ──── IMDS (instance id, region)
//!                                           │
//!                                           ▼
//!            health::HealthMediator ──── Auto Scaling API
//!                                           │
//!                                           ▼
//!            app::Report ──▶ stdout / stderr + exit code
//! ```

use std::process::ExitCode;

use clap::Parser;

use asg_health::app;
use asg_health::cli::Cli;
use asg_health::config::loader::load_config;
use asg_health::health::AwsAutoScaling;
use asg_health::identity::{IdentityResolver, ImdsMetadata};
use asg_health::observability::logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and must exit 0.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let request = match cli.validate() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    cli.apply_to(&mut config);

    init_logging(&config.logging, request.verbose);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "asg-health starting");

    let resolver = IdentityResolver::new(ImdsMetadata::new(&config.metadata), config.region.clone());
    let control_plane = config.control_plane.clone();

    let report = app::execute(&request, &resolver, |identity| {
        AwsAutoScaling::new(identity.region.clone(), control_plane)
    })
    .await;

    for line in &report.stdout {
        println!("{line}");
    }
    for line in &report.stderr {
        eprintln!("{line}");
    }

    ExitCode::from(report.exit_code)
}
