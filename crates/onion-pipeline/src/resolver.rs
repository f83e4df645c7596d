//! Layer resolution.
//!
//! A pipeline never constructs layers itself. It asks a [`Resolver`] to turn
//! a [`LayerId`] plus a fully computed parameter set into an instance, and,
//! for setter-style delivery, to invoke a named setter on that instance.
//!
//! [`Container`] is the bundled resolver: factories are registered per
//! identifier at startup, optionally with named setters.
//!
//! # Example
//!
//! ```rust
//! use onion_core::{params, Args, LayerId, PipelineResult, Value};
//! use onion_pipeline::{Container, Layer, Next, Resolver};
//!
//! struct Prefix {
//!     prefix: String,
//! }
//!
//! impl Layer for Prefix {
//!     fn execute(&self, _args: Args, next: Next<'_>) -> PipelineResult<Value> {
//!         let inner = next.run()?;
//!         Ok(Value::from(format!("{}{}", self.prefix, inner.as_str().unwrap_or_default())))
//!     }
//! }
//!
//! let mut container = Container::new();
//! container
//!     .bind("prefix", |params| {
//!         Ok(Prefix { prefix: params.require_str("prefix")?.to_string() })
//!     })
//!     .setter("set_prefix", |layer: &mut Prefix, params| {
//!         layer.prefix = params.get_str("prefix").unwrap_or_default().to_string();
//!         Ok(())
//!     });
//!
//! let layer = container.resolve(&LayerId::new("prefix"), &params! { "prefix" => ">" });
//! assert!(layer.is_ok());
//! assert!(container.resolve(&LayerId::new("missing"), &params! {}).is_err());
//! ```

use crate::layer::Layer;
use onion_core::{LayerId, Parameters, ResolveError};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Factory/DI collaborator that produces layer instances.
///
/// # Thread Safety
///
/// Resolvers are shared by every run of a pipeline and must be
/// `Send + Sync`. Instances they return are owned by the run that asked for
/// them.
pub trait Resolver: Send + Sync {
    /// Constructs the layer registered under `id` from `arguments`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if `id` is unknown or the arguments are
    /// unusable.
    fn resolve(&self, id: &LayerId, arguments: &Parameters) -> Result<Box<dyn Layer>, ResolveError>;

    /// Invokes the setter named `method` on a freshly resolved instance.
    ///
    /// The default implementation supports no setters.
    fn invoke_setter(
        &self,
        id: &LayerId,
        instance: &mut dyn Layer,
        method: &str,
        parameters: &Parameters,
    ) -> Result<(), ResolveError> {
        let _ = (instance, parameters);
        Err(ResolveError::setter_not_found(id, method))
    }
}

type Factory = Box<dyn Fn(&Parameters) -> Result<Box<dyn Layer>, ResolveError> + Send + Sync>;

type Setter = Box<dyn Fn(&mut dyn Layer, &Parameters) -> Result<(), ResolveError> + Send + Sync>;

struct Binding {
    factory: Factory,
    setters: HashMap<String, Setter>,
}

/// A resolver backed by registered factories.
///
/// The container stores one factory per identifier plus any number of named
/// setters. Binding an identifier twice replaces the earlier binding.
#[derive(Default)]
pub struct Container {
    bindings: HashMap<LayerId, Binding>,
}

impl Container {
    /// Creates a new empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Registers a factory for `id`.
    ///
    /// The factory receives the construction arguments computed by the
    /// pipeline (empty under setter-style delivery).
    pub fn bind<L, F>(&mut self, id: impl Into<LayerId>, factory: F) -> BindingBuilder<'_, L>
    where
        L: Layer,
        F: Fn(&Parameters) -> Result<L, ResolveError> + Send + Sync + 'static,
    {
        let id = id.into();
        let binding = Binding {
            factory: Box::new(move |arguments: &Parameters| {
                factory(arguments).map(|layer| Box::new(layer) as Box<dyn Layer>)
            }),
            setters: HashMap::new(),
        };

        let binding = match self.bindings.entry(id.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(binding);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(binding),
        };

        BindingBuilder {
            id,
            binding,
            _layer: PhantomData,
        }
    }

    /// Registers a default-constructed layer under [`LayerId::of::<L>()`](LayerId::of).
    ///
    /// Construction arguments are ignored; parameters reach such layers
    /// through setters.
    pub fn bind_default<L>(&mut self) -> BindingBuilder<'_, L>
    where
        L: Layer + Default,
    {
        self.bind(LayerId::of::<L>(), |_| Ok(L::default()))
    }

    /// Checks if a binding exists for `id`.
    #[must_use]
    pub fn contains(&self, id: &LayerId) -> bool {
        self.bindings.contains_key(id)
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn binding(&self, id: &LayerId) -> Result<&Binding, ResolveError> {
        self.bindings
            .get(id)
            .ok_or_else(|| ResolveError::not_registered(id))
    }
}

impl Resolver for Container {
    fn resolve(&self, id: &LayerId, arguments: &Parameters) -> Result<Box<dyn Layer>, ResolveError> {
        (self.binding(id)?.factory)(arguments)
    }

    fn invoke_setter(
        &self,
        id: &LayerId,
        instance: &mut dyn Layer,
        method: &str,
        parameters: &Parameters,
    ) -> Result<(), ResolveError> {
        let setter = self
            .binding(id)?
            .setters
            .get(method)
            .ok_or_else(|| ResolveError::setter_not_found(id, method))?;
        setter(instance, parameters)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("binding_count", &self.bindings.len())
            .finish()
    }
}

/// Adds setters to a freshly registered binding.
pub struct BindingBuilder<'c, L> {
    id: LayerId,
    binding: &'c mut Binding,
    _layer: PhantomData<fn() -> L>,
}

impl<L: Layer> BindingBuilder<'_, L> {
    /// Registers a setter named `method`.
    ///
    /// The setter receives the concrete layer and the effective parameters.
    pub fn setter<S>(self, method: impl Into<String>, setter: S) -> Self
    where
        S: Fn(&mut L, &Parameters) -> Result<(), ResolveError> + Send + Sync + 'static,
    {
        let id = self.id.clone();
        let erased: Setter = Box::new(move |instance: &mut dyn Layer, parameters: &Parameters| {
            let layer = instance
                .as_any_mut()
                .downcast_mut::<L>()
                .ok_or_else(|| ResolveError::type_mismatch::<L>(&id))?;
            setter(layer, parameters)
        });
        self.binding.setters.insert(method.into(), erased);
        self
    }

    /// Returns the identifier being configured.
    pub fn id(&self) -> &LayerId {
        &self.id
    }
}
