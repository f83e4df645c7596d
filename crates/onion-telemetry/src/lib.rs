//! Structured logging for Onion pipelines.
//!
//! Pipelines emit [`tracing`] events and spans; this crate installs a
//! subscriber that renders them.
//!
//! | Event | Level | Fields |
//! |-------|-------|--------|
//! | `pipeline.run` span | DEBUG | `layers`, `inputs`, `delivery` |
//! | Layer resolved | TRACE | `layer`, `parameters` |
//! | Layer entered | TRACE | `layer`, `inputs` |
//! | Resolution failed | DEBUG | `layer`, `error` |
//! | Capability not satisfied | DEBUG | `layer`, `capability` |
//!
//! Failures raised by layers are returned to the caller and never logged by
//! the pipeline.
//!
//! # Example
//!
//! ```rust,no_run
//! use onion_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development().with_level("onion_pipeline=trace"))?;
//! tracing::info!("pipeline ready");
//! # Ok::<(), onion_telemetry::TelemetryError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/onion-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
