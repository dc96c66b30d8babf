//! Auto Scaling instance health tool.
//!
//! Reports whether an EC2 instance is `InService` in its Auto Scaling group,
//! or marks it `Unhealthy` so the group replaces it.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod health;
pub mod identity;
pub mod observability;

pub use config::AsgHealthConfig;
pub use error::{AsgHealthError, Result};
pub use health::HealthMediator;
pub use identity::IdentityResolver;
