//! Core layer trait and continuation type.
//!
//! This module defines the [`Layer`] trait every pipeline layer implements,
//! and [`Next`], the continuation a layer calls to hand control inward.
//!
//! A layer sees the positional inputs of the run, may rewrite them, decides
//! whether to continue, and may transform whatever comes back:
//!
//! ```
//! use onion_core::{Args, PipelineResult, Value};
//! use onion_pipeline::{Layer, Next};
//!
//! struct Shout;
//!
//! impl Layer for Shout {
//!     fn execute(&self, args: Args, next: Next<'_>) -> PipelineResult<Value> {
//!         let inner = next.run()?;
//!         Ok(Value::from(inner.as_str().unwrap_or_default().to_uppercase()))
//!     }
//! }
//! ```

use onion_core::{Args, LayerId, PipelineError, PipelineResult, Terminal, Value};
use std::any::Any;
use std::fmt;

/// Upcasting helper giving access to a layer's concrete type.
///
/// Implemented for every `'static` type; resolvers use it to hand a
/// `&mut dyn Layer` to a setter typed on the concrete layer.
pub trait AsAny: Any {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A unit of cross-cutting behavior wrapped around the terminal.
///
/// # Invariants
///
/// - Calling `next` zero times short-circuits: nothing inward runs and the
///   layer's own return value travels outward.
/// - Calling `next` more than once re-runs everything inward each time.
/// - Errors returned from `next` should be propagated unless the layer is
///   deliberately handling them.
pub trait Layer: AsAny + Send {
    /// Runs this layer.
    ///
    /// `args` are the positional inputs as received from the layer outward
    /// of this one (or from the caller of the run). `next` continues inward.
    fn execute(&self, args: Args, next: Next<'_>) -> PipelineResult<Value>;

    /// Number of positional inputs this layer expects, if fixed.
    ///
    /// A mismatch is reported as [`PipelineError::ArityMismatch`] the first
    /// time the layer is invoked.
    fn arity(&self) -> Option<usize> {
        None
    }

    /// Capability names this layer declares.
    ///
    /// Consulted by [`Capability::declared`](crate::Capability::declared).
    fn capabilities(&self) -> &'static [&'static str] {
        &[]
    }
}

/// A resolved layer bound to the identifier it was resolved from.
pub(crate) struct Frame {
    id: LayerId,
    instance: Box<dyn Layer>,
}

impl Frame {
    pub(crate) fn new(id: LayerId, instance: Box<dyn Layer>) -> Self {
        Self { id, instance }
    }

    fn execute(&self, args: Args, next: Next<'_>) -> PipelineResult<Value> {
        if let Some(expected) = self.instance.arity() {
            if expected != args.len() {
                return Err(PipelineError::arity_mismatch(
                    format!("layer [ {} ]", self.id),
                    expected,
                    args.len(),
                ));
            }
        }

        tracing::trace!(layer = %self.id, inputs = args.len(), "Entering layer");
        self.instance.execute(args, next)
    }
}

/// Continuation representing everything inward of the current layer.
///
/// `Next` borrows the frames resolved for the current run and the terminal.
/// It can be invoked any number of times; each call runs the remaining
/// layers and the terminal afresh.
pub struct Next<'a> {
    chain: &'a [Frame],
    terminal: &'a Terminal<'a>,
    method: &'a str,
    args: Args,
}

impl<'a> Next<'a> {
    /// Creates the outermost continuation over `chain` and `terminal`.
    pub(crate) fn new(
        chain: &'a [Frame],
        terminal: &'a Terminal<'a>,
        method: &'a str,
        args: Args,
    ) -> Self {
        Self {
            chain,
            terminal,
            method,
            args,
        }
    }

    /// Continues inward with the inputs the current layer received.
    pub fn run(&self) -> PipelineResult<Value> {
        self.run_with(self.args.clone())
    }

    /// Continues inward with replacement inputs.
    pub fn run_with(&self, args: Args) -> PipelineResult<Value> {
        match self.chain.split_first() {
            Some((frame, rest)) => {
                let next = Next {
                    chain: rest,
                    terminal: self.terminal,
                    method: self.method,
                    args: args.clone(),
                };
                frame.execute(args, next)
            }
            None => self.terminal.invoke(self.method, args),
        }
    }

    /// Returns the inputs this continuation will use for [`run`](Next::run).
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Returns the number of layers still to run before the terminal.
    pub fn remaining(&self) -> usize {
        self.chain.len()
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.chain.len())
            .field("terminal", self.terminal)
            .field("method", &self.method)
            .field("args", &self.args)
            .finish()
    }
}

/// A layer backed by a closure.
///
/// # Example
///
/// ```
/// use onion_pipeline::FnLayer;
///
/// let timing = FnLayer::new(|_args, next| {
///     let started = std::time::Instant::now();
///     let result = next.run();
///     tracing::debug!(elapsed = ?started.elapsed(), "inner layers finished");
///     result
/// });
/// ```
pub struct FnLayer<F> {
    func: F,
}

impl<F> FnLayer<F>
where
    F: Fn(Args, Next<'_>) -> PipelineResult<Value> + Send + 'static,
{
    /// Creates a new closure-backed layer.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Layer for FnLayer<F>
where
    F: Fn(Args, Next<'_>) -> PipelineResult<Value> + Send + 'static,
{
    fn execute(&self, args: Args, next: Next<'_>) -> PipelineResult<Value> {
        (self.func)(args, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onion_core::{args, ErrorKind};
    use serde_json::json;

    struct Wrap {
        tag: &'static str,
    }

    impl Layer for Wrap {
        fn execute(&self, _args: Args, next: Next<'_>) -> PipelineResult<Value> {
            let inner = next.run()?;
            Ok(json!(format!(
                "{}B{}{}A",
                self.tag,
                inner.as_str().unwrap_or_default(),
                self.tag
            )))
        }
    }

    struct Unary;

    impl Layer for Unary {
        fn execute(&self, args: Args, next: Next<'_>) -> PipelineResult<Value> {
            next.run_with(args)
        }

        fn arity(&self) -> Option<usize> {
            Some(1)
        }
    }

    #[test]
    fn test_next_terminal_only() {
        let terminal = Terminal::callable(|_| Ok(json!("t")));
        let next = Next::new(&[], &terminal, "handle", Args::new());
        assert_eq!(next.remaining(), 0);
        assert_eq!(next.run().unwrap(), json!("t"));
    }

    #[test]
    fn test_frames_nest_in_slice_order() {
        let chain = vec![
            Frame::new("one".into(), Box::new(Wrap { tag: "1" })),
            Frame::new("two".into(), Box::new(Wrap { tag: "2" })),
        ];
        let terminal = Terminal::callable(|_| Ok(json!("t")));
        let next = Next::new(&chain, &terminal, "handle", Args::new());

        assert_eq!(next.run().unwrap(), json!("1B2Bt2A1A"));
    }

    #[test]
    fn test_next_can_run_twice() {
        let chain = vec![Frame::new(
            "twice".into(),
            Box::new(FnLayer::new(|_args, next| {
                let first = next.run()?;
                let second = next.run()?;
                Ok(json!(format!(
                    "{}{}",
                    first.as_str().unwrap_or_default(),
                    second.as_str().unwrap_or_default()
                )))
            })),
        )];
        let terminal = Terminal::callable(|_| Ok(json!("t")));
        let next = Next::new(&chain, &terminal, "handle", Args::new());

        assert_eq!(next.run().unwrap(), json!("tt"));
    }

    #[test]
    fn test_run_with_replaces_args() {
        let chain = vec![Frame::new(
            "rewrite".into(),
            Box::new(FnLayer::new(|_args, next| {
                next.run_with(args!["rewritten"])
            })),
        )];
        let terminal = Terminal::callable(|args| Ok(args.get(0).cloned().unwrap_or(Value::Null)));
        let next = Next::new(&chain, &terminal, "handle", args!["original"]);

        assert_eq!(next.run().unwrap(), json!("rewritten"));
    }

    #[test]
    fn test_arity_mismatch_surfaces_on_invocation() {
        let chain = vec![Frame::new("unary".into(), Box::new(Unary))];
        let terminal = Terminal::callable(|_| Ok(Value::Null));

        let ok = Next::new(&chain, &terminal, "handle", args!["x"]);
        assert!(ok.run().is_ok());

        let bad = Next::new(&chain, &terminal, "handle", Args::new());
        let err = bad.run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArityMismatch);
        assert!(err.to_string().contains("unary"));
    }

    #[test]
    fn test_as_any_downcast() {
        let mut layer: Box<dyn Layer> = Box::new(Wrap { tag: "x" });
        assert!(layer.as_ref().as_any().is::<Wrap>());
        let wrap = layer.as_mut().as_any_mut().downcast_mut::<Wrap>().unwrap();
        wrap.tag = "y";
        assert!(!layer.as_ref().as_any().is::<Unary>());
    }

    #[test]
    fn test_next_debug() {
        let terminal = Terminal::callable(|_| Ok(Value::Null));
        let next = Next::new(&[], &terminal, "handle", Args::new());
        let debug = format!("{next:?}");
        assert!(debug.contains("remaining"));
        assert!(debug.contains("Terminal::Callable"));
    }
}
