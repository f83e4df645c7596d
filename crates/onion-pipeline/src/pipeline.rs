//! Layered interceptor pipeline.
//!
//! A [`Pipeline`] wraps a terminal operation in an ordered set of layers.
//! Layers are registered as [`LayerDescriptor`]s and resolved afresh on every
//! run, so call-time [`Overrides`] always take effect.
//!
//! ## Ordering
//!
//! ```text
//! add_inner_layer(A); add_inner_layer(B)   =>   A( B( terminal ) )
//! add_outer_layer(A); add_outer_layer(B)   =>   B( A( terminal ) )
//! ```
//!
//! Inner layers read top-to-bottom as nesting order. Each outer layer wraps
//! everything registered before it.
//!
//! ## Run lifecycle
//!
//! 1. **Building** - every descriptor is resolved through the [`Resolver`],
//!    innermost first, with its effective parameters and checked against the
//!    required [`Capability`]. The first failure aborts the run before a
//!    layer executes.
//! 2. **Running** - the outermost continuation is invoked with the inputs;
//!    control passes inward one layer at a time.
//! 3. **Done** - the outermost layer returns and its value is the result.
//!
//! Failures raised while running pass through unchanged.
//!
//! Span and event field names are the ones listed in `onion_telemetry::fields`.

use crate::capability::Capability;
use crate::delivery::ParameterDelivery;
use crate::descriptor::{LayerDescriptor, Position};
use crate::layer::{Frame, Next};
use crate::resolver::Resolver;
use onion_core::{
    Args, LayerId, Overrides, Parameters, PipelineError, PipelineResult, Terminal, Value,
    DEFAULT_TERMINAL_METHOD,
};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// A shared resolver handle.
pub type SharedResolver = Arc<dyn Resolver>;

/// An ordered set of layers wrapped around a terminal operation.
///
/// A pipeline is configured once and may be run any number of times,
/// including concurrently from several threads. Runs share nothing but the
/// descriptor list and the resolver.
///
/// # Example
///
/// ```
/// use onion_core::{args, Overrides, Terminal, Value};
/// use onion_pipeline::fixtures;
/// use onion_pipeline::Pipeline;
///
/// let mut pipeline = Pipeline::new(fixtures::container());
/// pipeline
///     .add_inner_layer(fixtures::FRAMING, onion_core::params! { "tag" => "1" })
///     .add_inner_layer(fixtures::FRAMING, onion_core::params! { "tag" => "2" });
///
/// let result = pipeline
///     .run(Terminal::callable(|_| Ok(Value::from("t"))), args![], &Overrides::new())
///     .unwrap();
///
/// assert_eq!(result, "1B2Bt2A1A");
/// ```
pub struct Pipeline {
    /// Descriptors in outer-to-inner order
    layers: VecDeque<LayerDescriptor>,

    /// Collaborator that constructs layer instances
    resolver: SharedResolver,

    /// Capability every resolved layer must satisfy
    required_capability: Option<Capability>,

    /// How parameters reach resolved layers
    delivery: ParameterDelivery,

    /// Method invoked on terminal objects
    terminal_method: String,
}

impl Pipeline {
    /// Creates an empty pipeline using constructor delivery, no required
    /// capability and the default terminal method.
    pub fn new(resolver: SharedResolver) -> Self {
        Self {
            layers: VecDeque::new(),
            resolver,
            required_capability: None,
            delivery: ParameterDelivery::default(),
            terminal_method: DEFAULT_TERMINAL_METHOD.to_string(),
        }
    }

    /// Creates a new pipeline builder.
    #[must_use]
    pub fn builder(resolver: SharedResolver) -> PipelineBuilder {
        PipelineBuilder::new(resolver)
    }

    /// Adds a layer, inside every registered layer when `append_to_inner`
    /// is `true` and outside all of them otherwise.
    pub fn add_layer(
        &mut self,
        id: impl Into<LayerId>,
        parameters: Parameters,
        append_to_inner: bool,
    ) -> &mut Self {
        self.push(LayerDescriptor::new(
            id,
            parameters,
            Position::from_append_to_inner(append_to_inner),
        ))
    }

    /// Adds a layer inside every registered layer.
    pub fn add_inner_layer(&mut self, id: impl Into<LayerId>, parameters: Parameters) -> &mut Self {
        self.add_layer(id, parameters, true)
    }

    /// Adds a layer outside every registered layer.
    pub fn add_outer_layer(&mut self, id: impl Into<LayerId>, parameters: Parameters) -> &mut Self {
        self.add_layer(id, parameters, false)
    }

    /// Inserts a descriptor according to its position.
    pub fn push(&mut self, descriptor: LayerDescriptor) -> &mut Self {
        match descriptor.position() {
            Position::Inner => self.layers.push_back(descriptor),
            Position::Outer => self.layers.push_front(descriptor),
        }
        self
    }

    /// Runs `terminal` wrapped in every layer.
    ///
    /// `inputs` are handed to the outermost layer; `overrides` replace
    /// registration parameters, per identifier, for this run only.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Resolution`] if a layer cannot be resolved
    /// - [`PipelineError::ContractViolation`] if a layer lacks the required
    ///   capability
    ///
    /// Both abort the run before any layer executes. Any other error comes
    /// from a layer or the terminal and is returned unchanged.
    pub fn run(
        &self,
        terminal: Terminal<'_>,
        inputs: Args,
        overrides: &Overrides,
    ) -> PipelineResult<Value> {
        let span = tracing::debug_span!(
            "pipeline.run",
            layers = self.layers.len(),
            inputs = inputs.len(),
            delivery = %self.delivery,
        );
        let _enter = span.enter();

        let chain = self.build_chain(overrides)?;
        Next::new(&chain, &terminal, &self.terminal_method, inputs.clone()).run_with(inputs)
    }

    /// Runs `terminal` with `inputs` and no overrides.
    pub fn call(&self, terminal: Terminal<'_>, inputs: Args) -> PipelineResult<Value> {
        self.run(terminal, inputs, &Overrides::new())
    }

    /// Resolves every descriptor, innermost first, and returns the frames in
    /// outer-to-inner order.
    fn build_chain(&self, overrides: &Overrides) -> PipelineResult<Vec<Frame>> {
        // Contract failures must abort before anything runs, so every layer
        // is resolved up front.
        let mut chain = Vec::with_capacity(self.layers.len());

        for descriptor in self.layers.iter().rev() {
            let id = descriptor.id();
            let parameters = descriptor.parameters().merged(overrides.get(id));

            let instance = self
                .delivery
                .instantiate(self.resolver.as_ref(), id, &parameters)
                .map_err(|e| {
                    tracing::debug!(layer = %id, error = %e, "Layer resolution failed");
                    PipelineError::from(e)
                })?;

            if let Some(capability) = &self.required_capability {
                if !capability.is_satisfied_by(instance.as_ref()) {
                    tracing::debug!(
                        layer = %id,
                        capability = capability.name(),
                        "Layer does not satisfy the required capability"
                    );
                    return Err(PipelineError::contract_violation(id, capability.name()));
                }
            }

            tracing::trace!(layer = %id, parameters = parameters.len(), "Resolved layer");
            chain.push(Frame::new(id.clone(), instance));
        }

        chain.reverse();
        Ok(chain)
    }

    /// Returns the layer identifiers in outer-to-inner order.
    #[must_use]
    pub fn layer_ids(&self) -> Vec<&LayerId> {
        self.layers.iter().map(LayerDescriptor::id).collect()
    }

    /// Iterates over the descriptors in outer-to-inner order.
    pub fn descriptors(&self) -> impl Iterator<Item = &LayerDescriptor> {
        self.layers.iter()
    }

    /// Returns the number of registered layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if no layers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the capability every layer must satisfy, if any.
    pub fn required_capability(&self) -> Option<&Capability> {
        self.required_capability.as_ref()
    }

    /// Returns the parameter delivery strategy.
    pub fn parameter_delivery(&self) -> &ParameterDelivery {
        &self.delivery
    }

    /// Returns the method invoked on terminal objects.
    pub fn terminal_method(&self) -> &str {
        &self.terminal_method
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("layers", &self.layer_ids())
            .field("required_capability", &self.required_capability)
            .field("delivery", &self.delivery)
            .field("terminal_method", &self.terminal_method)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`Pipeline`].
///
/// # Example
///
/// ```
/// use onion_core::params;
/// use onion_pipeline::{fixtures, Capability, Pipeline};
///
/// let pipeline = Pipeline::builder(fixtures::container())
///     .required_capability(Capability::declared(fixtures::MIDDLEWARE))
///     .parameter_setter("set_parameters")
///     .inner_layer(fixtures::SETTER_SEPARATOR, params! { "separator" => "_" })
///     .build();
///
/// assert_eq!(pipeline.len(), 1);
/// assert_eq!(pipeline.parameter_delivery().setter_name(), Some("set_parameters"));
/// ```
pub struct PipelineBuilder {
    pipeline: Pipeline,
}

impl PipelineBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new(resolver: SharedResolver) -> Self {
        Self {
            pipeline: Pipeline::new(resolver),
        }
    }

    /// Requires every resolved layer to satisfy `capability`.
    #[must_use]
    pub fn required_capability(mut self, capability: Capability) -> Self {
        self.pipeline.required_capability = Some(capability);
        self
    }

    /// Sets the parameter delivery strategy.
    #[must_use]
    pub fn parameter_delivery(mut self, delivery: ParameterDelivery) -> Self {
        self.pipeline.delivery = delivery;
        self
    }

    /// Delivers parameters through the setter named `method`.
    #[must_use]
    pub fn parameter_setter(self, method: impl Into<String>) -> Self {
        self.parameter_delivery(ParameterDelivery::setter(method))
    }

    /// Sets the method invoked on terminal objects.
    #[must_use]
    pub fn terminal_method(mut self, method: impl Into<String>) -> Self {
        self.pipeline.terminal_method = method.into();
        self
    }

    /// Adds a layer; see [`Pipeline::add_layer`].
    #[must_use]
    pub fn layer(mut self, id: impl Into<LayerId>, parameters: Parameters, append_to_inner: bool) -> Self {
        self.pipeline.add_layer(id, parameters, append_to_inner);
        self
    }

    /// Adds an inner layer.
    #[must_use]
    pub fn inner_layer(self, id: impl Into<LayerId>, parameters: Parameters) -> Self {
        self.layer(id, parameters, true)
    }

    /// Adds an outer layer.
    #[must_use]
    pub fn outer_layer(self, id: impl Into<LayerId>, parameters: Parameters) -> Self {
        self.layer(id, parameters, false)
    }

    /// Adds a descriptor.
    #[must_use]
    pub fn descriptor(mut self, descriptor: LayerDescriptor) -> Self {
        self.pipeline.push(descriptor);
        self
    }

    /// Builds the pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        self.pipeline
    }
}
