//! Typed configuration for Onion pipelines.
//!
//! This crate loads pipeline and logging settings with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`OnionConfig`] has two sections:
//!
//! - [`PipelineSection`] - required capability, parameter delivery,
//!   terminal method and the ordered layer list
//! - [`LoggingSection`] - filter, format and formatter options
//!
//! # Example
//!
//! ```no_run
//! use onion_config::ConfigLoader;
//! use onion_pipeline::fixtures;
//!
//! # fn main() -> Result<(), onion_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_file("onion.toml")?
//!     .with_env_prefix("ONION")
//!     .load()?;
//!
//! config.init_logging()?;
//! let pipeline = config.build_pipeline(fixtures::container());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [pipeline]
//! required_capability = "middleware"
//! parameter_setter = "set_parameters"
//! terminal_method = "handle"
//!
//! [[pipeline.layers]]
//! id = "separator"
//! position = "inner"
//! parameters = { separator = "_" }
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Scalar values can be overridden with `PREFIX__SECTION__KEY` variables.
//! An empty value clears an optional setting:
//!
//! - `ONION__PIPELINE__PARAMETER_SETTER=` (back to constructor delivery)
//! - `ONION__PIPELINE__TERMINAL_METHOD=execute`
//! - `ONION__LOGGING__FORMAT=pretty`

#![doc(html_root_url = "https://docs.rs/onion-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::OnionConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LayerEntry, LoggingSection, PipelineSection};
