//! # Onion Core
//!
//! Core types shared by every Onion crate.
//!
//! This crate provides the foundational, domain-agnostic values that flow
//! through a layered pipeline:
//!
//! - [`LayerId`] - Opaque key identifying a layer implementation
//! - [`Args`] - Positional inputs handed to layers and the terminal
//! - [`Parameters`] - Ordered name/value map used to configure a layer
//! - [`Overrides`] - Call-time parameter overrides keyed by [`LayerId`]
//! - [`Handler`] / [`Terminal`] - The innermost operation being wrapped
//! - [`PipelineError`] / [`ResolveError`] - Standard error types
//!
//! # Example
//!
//! ```
//! use onion_core::{args, params, Overrides, Value};
//!
//! let inputs = args!["bar", 42];
//! assert_eq!(inputs.len(), 2);
//!
//! let defaults = params! { "separator" => "_", "limit" => 3 };
//! let overrides = Overrides::new().with("separator", params! { "separator" => "-" });
//!
//! let effective = defaults.merged(overrides.get("separator"));
//! assert_eq!(effective.get_str("separator"), Some("-"));
//! assert_eq!(effective.get("limit"), Some(&Value::from(3)));
//! ```

#![doc(html_root_url = "https://docs.rs/onion-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod args;
mod error;
mod handler;
mod id;
mod params;

pub use args::Args;
pub use error::{ErrorKind, PipelineError, PipelineResult, ResolveError};
pub use handler::{Handler, Terminal, DEFAULT_TERMINAL_METHOD};
pub use id::LayerId;
pub use params::{Overrides, Parameters};

/// JSON value type used for inputs, parameters and results.
pub use serde_json::Value;

/// Builds an [`Args`] list from positional expressions.
///
/// Each expression is converted with [`Value::from`].
///
/// ```
/// use onion_core::args;
///
/// assert!(args![].is_empty());
/// assert_eq!(args!["a", 1].get_str(0), Some("a"));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::from(vec![$($crate::Value::from($value)),+])
    };
}

/// Builds a [`Parameters`] map from `name => value` pairs.
///
/// ```
/// use onion_core::params;
///
/// let parameters = params! { "separator" => "_" };
/// assert_eq!(parameters.get_str("separator"), Some("_"));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Parameters::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::Parameters::new()$(.with($name, $crate::Value::from($value)))+
    };
}
