//! Layer descriptors.

use onion_core::{LayerId, Parameters};
use serde::{Deserialize, Serialize};

/// Where a layer is inserted relative to the layers already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Appended next to the terminal, inside every layer added so far.
    #[default]
    Inner,
    /// Prepended outside every layer added so far.
    Outer,
}

impl Position {
    /// Maps the `append_to_inner` flag of [`Pipeline::add_layer`](crate::Pipeline::add_layer).
    #[must_use]
    pub const fn from_append_to_inner(append_to_inner: bool) -> Self {
        if append_to_inner {
            Self::Inner
        } else {
            Self::Outer
        }
    }

    /// Returns the position name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Outer => "outer",
        }
    }
}

/// Registration record for one layer of a pipeline.
///
/// Descriptors are immutable once created. Registering the same identifier
/// twice yields two descriptors and therefore two layer instances per run.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDescriptor {
    id: LayerId,
    parameters: Parameters,
    position: Position,
}

impl LayerDescriptor {
    /// Creates a descriptor.
    pub fn new(id: impl Into<LayerId>, parameters: Parameters, position: Position) -> Self {
        Self {
            id: id.into(),
            parameters,
            position,
        }
    }

    /// Creates an inner descriptor.
    pub fn inner(id: impl Into<LayerId>, parameters: Parameters) -> Self {
        Self::new(id, parameters, Position::Inner)
    }

    /// Creates an outer descriptor.
    pub fn outer(id: impl Into<LayerId>, parameters: Parameters) -> Self {
        Self::new(id, parameters, Position::Outer)
    }

    /// Returns the layer identifier.
    pub fn id(&self) -> &LayerId {
        &self.id
    }

    /// Returns the registration-time parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns the insertion position.
    pub fn position(&self) -> Position {
        self.position
    }
}
