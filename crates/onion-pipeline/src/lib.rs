//! # Onion Pipeline
//!
//! Layered interceptor pipeline for the Onion crates.
//!
//! A [`Pipeline`] wraps a terminal operation in an ordered set of layers.
//! Each layer receives the positional inputs and a [`Next`] continuation; it
//! may act before and after calling inward, call inward more than once, or
//! not at all.
//!
//! ## Nesting
//!
//! ```text
//!            add_outer_layer(O)
//!   ┌──────────────────────────────────────┐
//!   │ O   add_inner_layer(A)               │
//!   │   ┌──────────────────────────────┐   │
//!   │   │ A   add_inner_layer(B)       │   │
//!   │   │   ┌──────────────────────┐   │   │
//!   │   │   │ B     terminal       │   │   │
//!   │   │   └──────────────────────┘   │   │
//!   │   └──────────────────────────────┘   │
//!   └──────────────────────────────────────┘
//! ```
//!
//! ## Key Features
//!
//! - **Deferred resolution**: layers are stored as descriptors and resolved
//!   through a [`Resolver`] on every run, so call-time overrides apply
//! - **Contract checks**: an optional [`Capability`] every layer must
//!   satisfy before anything runs
//! - **Parameter delivery**: construction arguments or a named setter
//!   ([`ParameterDelivery`])
//! - **Terminals**: closures or [`Handler`](onion_core::Handler) objects
//!
//! ## Example
//!
//! ```
//! use onion_core::{args, params, Overrides, Terminal};
//! use onion_pipeline::{fixtures, Pipeline};
//!
//! let pipeline = Pipeline::builder(fixtures::container())
//!     .inner_layer(fixtures::SEPARATOR, params! { "separator" => "_" })
//!     .build();
//!
//! let greet = Terminal::callable(|_| Ok("hello, world!".into()));
//! assert_eq!(pipeline.call(greet, args![]).unwrap(), "hello,_world!");
//!
//! let greet = Terminal::callable(|_| Ok("hello, world!".into()));
//! let overrides = Overrides::new().with(fixtures::SEPARATOR, params! { "separator" => "-" });
//! assert_eq!(pipeline.run(greet, args![], &overrides).unwrap(), "hello,-world!");
//! ```

#![doc(html_root_url = "https://docs.rs/onion-pipeline/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod capability;
pub mod delivery;
pub mod descriptor;
pub mod fixtures;
pub mod layer;
pub mod pipeline;
pub mod resolver;

pub use capability::Capability;
pub use delivery::ParameterDelivery;
pub use descriptor::{LayerDescriptor, Position};
pub use layer::{AsAny, FnLayer, Layer, Next};
pub use pipeline::{Pipeline, PipelineBuilder, SharedResolver};
pub use resolver::{BindingBuilder, Container, Resolver};
