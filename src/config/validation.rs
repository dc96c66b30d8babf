//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AsgHealthConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::AsgHealthConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Check value ranges that serde cannot express.
pub fn validate_config(config: &AsgHealthConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(region) = &config.region {
        if region.trim().is_empty() {
            errors.push(ValidationError::new("region", "must not be blank when set"));
        }
    }

    if config.metadata.connect_timeout_ms == 0 {
        errors.push(ValidationError::new("metadata.connect_timeout_ms", "must be > 0"));
    }
    if config.metadata.read_timeout_ms == 0 {
        errors.push(ValidationError::new("metadata.read_timeout_ms", "must be > 0"));
    }
    if config.control_plane.operation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "control_plane.operation_timeout_secs",
            "must be > 0",
        ));
    }
    if config.control_plane.max_attempts == 0 {
        errors.push(ValidationError::new("control_plane.max_attempts", "must be >= 1"));
    }
    if config.logging.level.trim().is_empty() {
        errors.push(ValidationError::new("logging.level", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&AsgHealthConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AsgHealthConfig::default();
        config.region = Some(" ".into());
        config.metadata.read_timeout_ms = 0;
        config.control_plane.max_attempts = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["region", "metadata.read_timeout_ms", "control_plane.max_attempts"]
        );
    }
}
