//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::AsgHealthConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides the configured region.
pub const REGION_ENV: &str = "AWS_REGION";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply the environment
/// override and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<AsgHealthConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => AsgHealthConfig::default(),
    };

    apply_region_override(&mut config, std::env::var(REGION_ENV).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse configuration from TOML text without touching the environment.
pub fn parse_config(content: &str) -> Result<AsgHealthConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

fn parse_file(path: &Path) -> Result<AsgHealthConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Replace the configured region with the environment value when present.
/// An empty variable counts as unset.
pub fn apply_region_override(config: &mut AsgHealthConfig, env_region: Option<String>) {
    if let Some(region) = env_region.filter(|r| !r.trim().is_empty()) {
        tracing::debug!(region = %region, "Region taken from {}", REGION_ENV);
        config.region = Some(region);
    }
}
