//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize, apply AWS_REGION)
//!     → validation.rs (semantic checks)
//!     → AsgHealthConfig (validated, immutable)
//!     → CLI flags layered on top by the driver
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the tool runs without any file
//! - Environment override beats the file, CLI flags beat both
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AsgHealthConfig;
pub use schema::ControlPlaneConfig;
pub use schema::LogFormat;
pub use schema::LoggingConfig;
pub use schema::MetadataConfig;
