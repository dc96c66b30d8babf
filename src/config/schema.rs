//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the optional
//! TOML config file.

use serde::{Deserialize, Serialize};

/// Root configuration for a single invocation.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AsgHealthConfig {
    /// Explicit control-plane region. When unset the metadata service is asked.
    pub region: Option<String>,

    /// Instance metadata service settings.
    pub metadata: MetadataConfig,

    /// Auto-scaling control-plane settings.
    pub control_plane: ControlPlaneConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Instance metadata service (IMDS) settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// TCP connect timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Response read timeout in milliseconds.
    pub read_timeout_ms: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 1_000,
            read_timeout_ms: 1_000,
        }
    }
}

/// Auto-scaling control-plane settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlPlaneConfig {
    /// Upper bound for a single API operation, in seconds.
    pub operation_timeout_secs: u64,

    /// Total attempts per API call. 1 disables SDK retries.
    pub max_attempts: u32,
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            operation_timeout_secs: 30,
            max_attempts: 1,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format for diagnostic events.
    pub format: LogFormat,

    /// Default filter level when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            level: "warn".to_string(),
        }
    }
}
