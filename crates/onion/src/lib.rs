//! # Onion
//!
//! **Layered interceptor pipeline**
//!
//! Onion wraps a single terminal operation in an ordered set of layers. Each
//! layer can inspect or rewrite the inputs, decide whether to continue, and
//! inspect or rewrite the result:
//!
//! - 🧅 **Two insertion policies** – inner layers nest in call order, outer
//!   layers wrap everything added before them
//! - 🔌 **Pluggable resolution** – layers are built per run by a [`Resolver`](pipeline::Resolver),
//!   with constructor or setter parameter delivery
//! - 🎛️ **Call-time overrides** – replace registration parameters per run
//! - 🛡️ **Contract checks** – reject layers lacking a required capability
//!   before anything runs
//!
//! ## Quick Start
//!
//! ```
//! use onion::prelude::*;
//!
//! struct Shout;
//!
//! impl Layer for Shout {
//!     fn execute(&self, args: Args, next: Next<'_>) -> PipelineResult<Value> {
//!         let inner = next.run_with(args)?;
//!         Ok(Value::from(inner.as_str().unwrap_or_default().to_uppercase()))
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.bind("shout", |_| Ok(Shout));
//!
//! let mut pipeline = Pipeline::new(std::sync::Arc::new(container));
//! pipeline.add_inner_layer("shout", params! {});
//!
//! let hello = Terminal::callable(|args| {
//!     Ok(Value::from(format!("hello, {}", args.get_str(0).unwrap_or("you"))))
//! });
//! assert_eq!(pipeline.call(hello, args!["world"]).unwrap(), "HELLO, WORLD");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller ─▶ outer layers ─▶ inner layers ─▶ terminal
//!        ◀─              ◀─              ◀─
//! ```

#![doc(html_root_url = "https://docs.rs/onion/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use onion_core as core;

// Re-export pipeline types
pub use onion_pipeline as pipeline;

// Re-export configuration types
pub use onion_config as config;

// Re-export telemetry types
pub use onion_telemetry as telemetry;

// Re-export construction macros
pub use onion_core::{args, params};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use onion::prelude::*;
///
/// let overrides = Overrides::new().with("auth", params! { "realm" => "admin" });
/// assert_eq!(overrides.len(), 1);
/// ```
pub mod prelude {
    pub use onion_core::{
        args, params, Args, ErrorKind, Handler, LayerId, Overrides, Parameters, PipelineError,
        PipelineResult, ResolveError, Terminal, Value,
    };

    pub use onion_pipeline::{
        Capability, Container, FnLayer, Layer, LayerDescriptor, Next, ParameterDelivery,
        Pipeline, PipelineBuilder, Position, Resolver,
    };

    pub use onion_config::{ConfigError, ConfigLoader, OnionConfig};

    pub use onion_telemetry::{init_logging, LogConfig, LogFormat};
}
