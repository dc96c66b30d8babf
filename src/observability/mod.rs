//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! identity / health / driver
//!     → tracing events with structured fields (instance_id, region, state)
//!     → logging.rs subscriber (stderr, pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - Diagnostics go to stderr so stdout stays clean for `--json` output
//! - `RUST_LOG` always wins over config and `--verbose`

pub mod logging;
