//! Parameter delivery strategies.

use crate::layer::Layer;
use crate::resolver::Resolver;
use onion_core::{LayerId, Parameters, ResolveError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How effective parameters reach a resolved layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterDelivery {
    /// Parameters are passed to the resolver as construction arguments.
    #[default]
    Constructor,
    /// The layer is resolved without arguments, then the named setter is
    /// invoked with the parameters (always, even when they are empty).
    Setter(String),
}

impl ParameterDelivery {
    /// Setter-style delivery through `method`.
    pub fn setter(method: impl Into<String>) -> Self {
        Self::Setter(method.into())
    }

    /// Returns the setter name, if any.
    pub fn setter_name(&self) -> Option<&str> {
        match self {
            Self::Constructor => None,
            Self::Setter(method) => Some(method),
        }
    }

    /// Resolves `id` through `resolver`, delivering `parameters` according
    /// to this strategy.
    pub fn instantiate(
        &self,
        resolver: &dyn Resolver,
        id: &LayerId,
        parameters: &Parameters,
    ) -> Result<Box<dyn Layer>, ResolveError> {
        match self {
            Self::Constructor => resolver.resolve(id, parameters),
            Self::Setter(method) => {
                let mut instance = resolver.resolve(id, &Parameters::new())?;
                resolver.invoke_setter(id, instance.as_mut(), method, parameters)?;
                Ok(instance)
            }
        }
    }
}

impl fmt::Display for ParameterDelivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructor => f.write_str("constructor"),
            Self::Setter(method) => write!(f, "setter({method})"),
        }
    }
}
