//! Test fixtures for pipeline development and testing.
//!
//! This module provides ready-made layers, terminals and a pre-wired
//! [`Container`] that can be used in tests across the Onion crates.
//!
//! # Example
//!
//! ```
//! use onion_core::{params, Terminal};
//! use onion_pipeline::{fixtures, Pipeline};
//!
//! let mut pipeline = Pipeline::new(fixtures::container());
//! pipeline
//!     .add_inner_layer(fixtures::FRAMING, params! { "tag" => "MW1" })
//!     .add_inner_layer(fixtures::FRAMING, params! { "tag" => "MW2" });
//!
//! let result = pipeline.call(Terminal::handler(&fixtures::Foo), Default::default());
//! assert_eq!(result.unwrap(), "MW1BMW2BfooMW2AMW1A");
//! ```

use crate::layer::{Layer, Next};
use crate::pipeline::SharedResolver;
use crate::resolver::Container;
use onion_core::{Args, Handler, PipelineError, PipelineResult, ResolveError, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Identifier of [`Framing`].
pub const FRAMING: &str = "framing";

/// Identifier of [`Separator`].
pub const SEPARATOR: &str = "separator";

/// Identifier of [`SetterSeparator`].
pub const SETTER_SEPARATOR: &str = "setter-separator";

/// Identifier of [`Deny`].
pub const DENY: &str = "deny";

/// Identifier of [`Failing`].
pub const FAILING: &str = "failing";

/// Identifier of [`Plain`].
pub const PLAIN: &str = "plain";

/// Capability declared by every fixture layer except [`Plain`].
pub const MIDDLEWARE: &str = "middleware";

/// Setter registered for [`SetterSeparator`].
pub const SET_PARAMETERS: &str = "set_parameters";

/// Returns the text of `value`, or an empty string for non-strings.
#[must_use]
pub fn text(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

/// Surrounds the inner result with `{tag}B` and `{tag}A`.
#[derive(Debug, Clone)]
pub struct Framing {
    /// Marker written before and after the inner result.
    pub tag: String,
}

impl Layer for Framing {
    fn execute(&self, args: Args, next: Next<'_>) -> PipelineResult<Value> {
        let inner = next.run_with(args)?;
        Ok(Value::from(format!("{0}B{1}{0}A", self.tag, text(&inner))))
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &[MIDDLEWARE]
    }
}

/// Replaces spaces in the inner result; configured through its constructor.
#[derive(Debug, Clone)]
pub struct Separator {
    /// Replacement for every space.
    pub separator: String,
}

impl Layer for Separator {
    fn execute(&self, _args: Args, next: Next<'_>) -> PipelineResult<Value> {
        let inner = next.run()?;
        Ok(Value::from(text(&inner).replace(' ', &self.separator)))
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &[MIDDLEWARE]
    }
}

/// Replaces spaces in the inner result; configured through
/// [`SET_PARAMETERS`].
#[derive(Debug, Clone)]
pub struct SetterSeparator {
    /// Replacement for every space.
    pub separator: String,
    /// Number of times the setter ran on this instance.
    pub configured: usize,
}

impl Default for SetterSeparator {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            configured: 0,
        }
    }
}

impl Layer for SetterSeparator {
    fn execute(&self, _args: Args, next: Next<'_>) -> PipelineResult<Value> {
        let inner = next.run()?;
        Ok(Value::from(text(&inner).replace(' ', &self.separator)))
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &[MIDDLEWARE]
    }
}

/// Short-circuits with its `response` parameter; never calls inward.
#[derive(Debug, Clone)]
pub struct Deny {
    /// Value returned in place of the inner result.
    pub response: Value,
}

impl Layer for Deny {
    fn execute(&self, _args: Args, _next: Next<'_>) -> PipelineResult<Value> {
        Ok(self.response.clone())
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &[MIDDLEWARE]
    }
}

/// Fails with its `message` parameter.
#[derive(Debug, Clone)]
pub struct Failing {
    /// Message of the raised error.
    pub message: String,
}

impl Layer for Failing {
    fn execute(&self, _args: Args, _next: Next<'_>) -> PipelineResult<Value> {
        Err(PipelineError::failed(self.message.clone()))
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &[MIDDLEWARE]
    }
}

/// Pass-through layer declaring no capabilities.
#[derive(Debug, Clone, Default)]
pub struct Plain;

impl Layer for Plain {
    fn execute(&self, args: Args, next: Next<'_>) -> PipelineResult<Value> {
        next.run_with(args)
    }
}

/// Pass-through layer counting its executions.
#[derive(Debug, Clone)]
pub struct Counting {
    hits: Arc<AtomicUsize>,
}

impl Counting {
    /// Creates a layer incrementing `hits` on every execution.
    pub fn new(hits: Arc<AtomicUsize>) -> Self {
        Self { hits }
    }
}

impl Layer for Counting {
    fn execute(&self, args: Args, next: Next<'_>) -> PipelineResult<Value> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        next.run_with(args)
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &[MIDDLEWARE]
    }
}

/// Terminal returning `"foo"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Foo;

impl Handler for Foo {
    fn handle(&self, _args: Args) -> PipelineResult<Value> {
        Ok(Value::from("foo"))
    }
}

/// Terminal echoing its single input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bar;

impl Handler for Bar {
    fn handle(&self, args: Args) -> PipelineResult<Value> {
        Ok(args.get(0).cloned().unwrap_or(Value::Null))
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }
}

/// Terminal counting its invocations and returning `"done"`.
#[derive(Debug, Clone, Default)]
pub struct CountingTerminal {
    hits: Arc<AtomicUsize>,
}

impl CountingTerminal {
    /// Creates a terminal with a fresh counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times the terminal ran.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Handler for CountingTerminal {
    fn handle(&self, _args: Args) -> PipelineResult<Value> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        Ok(Value::from("done"))
    }
}

/// Registers every fixture layer on `container`.
///
/// | Identifier           | Layer               | Parameters                      |
/// |----------------------|---------------------|---------------------------------|
/// | [`FRAMING`]          | [`Framing`]         | `tag` (required)                |
/// | [`SEPARATOR`]        | [`Separator`]       | `separator` (required)          |
/// | [`SETTER_SEPARATOR`] | [`SetterSeparator`] | `separator` (setter)          |
/// | [`DENY`]             | [`Deny`]            | `response` (defaults to null)   |
/// | [`FAILING`]          | [`Failing`]         | `message` (defaults to "failed")|
/// | [`PLAIN`]            | [`Plain`]           | none                            |
pub fn register(container: &mut Container) {
    container.bind(FRAMING, |params| {
        Ok(Framing {
            tag: params.require_str("tag")?.to_string(),
        })
    });

    container.bind(SEPARATOR, |params| {
        Ok(Separator {
            separator: params.require_str("separator")?.to_string(),
        })
    });

    container
        .bind(SETTER_SEPARATOR, |_| Ok(SetterSeparator::default()))
        .setter(SET_PARAMETERS, |layer: &mut SetterSeparator, params| {
            if let Some(value) = params.get("separator") {
                layer.separator = value
                    .as_str()
                    .ok_or_else(|| ResolveError::invalid_parameter("separator", "expected a string"))?
                    .to_string();
            }
            layer.configured += 1;
            Ok(())
        });

    container.bind(DENY, |params| {
        Ok(Deny {
            response: params.get("response").cloned().unwrap_or(Value::Null),
        })
    });

    container.bind(FAILING, |params| {
        Ok(Failing {
            message: params.get_str("message").unwrap_or("failed").to_string(),
        })
    });

    container.bind(PLAIN, |_| Ok(Plain));
}

/// Registers a [`Counting`] layer under `id` sharing `hits`.
pub fn register_counting(container: &mut Container, id: &str, hits: Arc<AtomicUsize>) {
    container.bind(id, move |_| Ok(Counting::new(hits.clone())));
}

/// Returns a shared resolver with every fixture layer registered.
#[must_use]
pub fn container() -> SharedResolver {
    let mut container = Container::new();
    register(&mut container);
    Arc::new(container)
}
