//! Instance identity and region resolution.
//!
//! # Data Flow
//! ```text
//! instance id:
//!     explicit id → used verbatim
//!     "-"         → MetadataSource::instance_id (one request, no retry)
//!
//! region:
//!     override (CLI flag / AWS_REGION / config file)
//!     → otherwise MetadataSource::region
//! ```
//!
//! # Design Decisions
//! - The metadata source is a trait so resolution is testable off-instance
//! - Failures propagate as `IdentityUnavailable` / `RegionUnavailable`

pub mod metadata;
pub mod resolver;

pub use metadata::{ImdsMetadata, MetadataError, MetadataSource};
pub use resolver::{IdentityResolver, InstanceIdentity, InstanceTarget, AUTO_DETECT};
