//! Terminal operations.
//!
//! The terminal is the innermost unit of work a pipeline decorates. It is
//! either a bare closure ([`Terminal::Callable`]) or an object implementing
//! [`Handler`] ([`Terminal::Object`]), in which case the pipeline invokes a
//! named method on it.

use crate::args::Args;
use crate::error::{PipelineError, PipelineResult};
use serde_json::Value;
use std::fmt;

/// Method invoked on terminal objects unless a pipeline is configured
/// otherwise.
pub const DEFAULT_TERMINAL_METHOD: &str = "handle";

/// An object that can act as a pipeline terminal.
///
/// Implementors provide [`handle`](Handler::handle). Objects exposing more
/// than one entry point override [`invoke`](Handler::invoke) to dispatch on
/// the method name configured on the pipeline.
///
/// # Example
///
/// ```
/// use onion_core::{args, Args, Handler, PipelineResult, Value};
///
/// struct Echo;
///
/// impl Handler for Echo {
///     fn handle(&self, args: Args) -> PipelineResult<Value> {
///         Ok(args.get(0).cloned().unwrap_or(Value::Null))
///     }
///
///     fn arity(&self) -> Option<usize> {
///         Some(1)
///     }
/// }
///
/// assert_eq!(Echo.invoke("handle", args!["bar"]).unwrap(), "bar");
/// ```
pub trait Handler: Send + Sync {
    /// Handles the positional inputs.
    fn handle(&self, args: Args) -> PipelineResult<Value>;

    /// Number of positional inputs this handler expects, if fixed.
    fn arity(&self) -> Option<usize> {
        None
    }

    /// Invokes the method called `method`.
    ///
    /// The default dispatches [`DEFAULT_TERMINAL_METHOD`] to
    /// [`handle`](Handler::handle) and rejects every other name.
    fn invoke(&self, method: &str, args: Args) -> PipelineResult<Value> {
        if method == DEFAULT_TERMINAL_METHOD {
            self.handle(args)
        } else {
            Err(PipelineError::method_not_found(method))
        }
    }
}

/// The innermost operation wrapped by a pipeline.
pub enum Terminal<'a> {
    /// A directly invocable closure.
    Callable(Box<dyn Fn(Args) -> PipelineResult<Value> + 'a>),
    /// An object whose named method is invoked.
    Object(&'a dyn Handler),
}

impl<'a> Terminal<'a> {
    /// Wraps a closure.
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(Args) -> PipelineResult<Value> + 'a,
    {
        Self::Callable(Box::new(f))
    }

    /// Wraps a handler object.
    pub fn handler(handler: &'a dyn Handler) -> Self {
        Self::Object(handler)
    }

    /// Invokes the terminal with `args`.
    ///
    /// Closures are called directly; objects have `method` invoked on them
    /// after their declared arity, if any, is checked.
    pub fn invoke(&self, method: &str, args: Args) -> PipelineResult<Value> {
        match self {
            Self::Callable(f) => f(args),
            Self::Object(handler) => {
                if let Some(expected) = handler.arity() {
                    if expected != args.len() {
                        return Err(PipelineError::arity_mismatch(
                            "terminal",
                            expected,
                            args.len(),
                        ));
                    }
                }
                handler.invoke(method, args)
            }
        }
    }
}

impl fmt::Debug for Terminal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Terminal::Callable"),
            Self::Object(_) => f.write_str("Terminal::Object"),
        }
    }
}
