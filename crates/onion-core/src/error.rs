//! Error types for Onion.
//!
//! This module provides [`PipelineError`], the error returned by every
//! pipeline run, and [`ResolveError`], the error a resolver reports when it
//! cannot produce a layer instance.
//!
//! # Error Kinds
//!
//! | Variant | [`ErrorKind`] code | Raised |
//! |---|---|---|
//! | `ContractViolation` | `CONTRACT_VIOLATION` | while building the chain |
//! | `Resolution` | `RESOLUTION_FAILURE` | while building the chain |
//! | `ArityMismatch` | `ARITY_MISMATCH` | on first invocation of the frame |
//! | `MethodNotFound` | `METHOD_NOT_FOUND` | when invoking a terminal object |
//! | `Failed` | `LAYER_FAILURE` | by layer or terminal code |
//!
//! Errors raised by layers and terminals travel outward through the chain
//! untouched; the pipeline never catches, retries or rewrites them.

use crate::id::LayerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using [`PipelineError`].
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Stable classification of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A resolved layer does not satisfy the required capability.
    ContractViolation,
    /// The resolver could not produce a layer instance.
    ResolutionFailure,
    /// A frame was invoked with the wrong number of positional inputs.
    ArityMismatch,
    /// The terminal object has no method with the configured name.
    MethodNotFound,
    /// A layer or the terminal reported a failure.
    LayerFailure,
}

impl ErrorKind {
    /// Returns the stable string code for this kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ContractViolation => "CONTRACT_VIOLATION",
            Self::ResolutionFailure => "RESOLUTION_FAILURE",
            Self::ArityMismatch => "ARITY_MISMATCH",
            Self::MethodNotFound => "METHOD_NOT_FOUND",
            Self::LayerFailure => "LAYER_FAILURE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors reported by a resolver.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Nothing is registered under the identifier.
    #[error("no layer registered for [ {id} ]")]
    NotRegistered {
        /// The unknown identifier.
        id: LayerId,
    },

    /// A required construction parameter was not supplied.
    #[error("missing required parameter [ {parameter} ]")]
    MissingParameter {
        /// The missing parameter name.
        parameter: String,
    },

    /// A construction parameter has an unusable value.
    #[error("invalid parameter [ {parameter} ]: {reason}")]
    InvalidParameter {
        /// The offending parameter name.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The layer has no setter with the requested name.
    #[error("layer [ {id} ] has no setter named [ {method} ]")]
    SetterNotFound {
        /// The layer identifier.
        id: LayerId,
        /// The requested setter name.
        method: String,
    },

    /// The instance handed to a setter is not of the registered type.
    #[error("layer [ {id} ] is not an instance of [ {expected} ]")]
    TypeMismatch {
        /// The layer identifier.
        id: LayerId,
        /// The type the setter was registered for.
        expected: &'static str,
    },
}

impl ResolveError {
    /// Creates an error for an unknown identifier.
    pub fn not_registered(id: impl Into<LayerId>) -> Self {
        Self::NotRegistered { id: id.into() }
    }

    /// Creates an error for a missing construction parameter.
    pub fn missing_parameter(parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            parameter: parameter.into(),
        }
    }

    /// Creates an error for an invalid construction parameter.
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates an error for an unknown setter.
    pub fn setter_not_found(id: impl Into<LayerId>, method: impl Into<String>) -> Self {
        Self::SetterNotFound {
            id: id.into(),
            method: method.into(),
        }
    }

    /// Creates an error for a setter applied to an instance of another type.
    pub fn type_mismatch<T: ?Sized>(id: impl Into<LayerId>) -> Self {
        Self::TypeMismatch {
            id: id.into(),
            expected: std::any::type_name::<T>(),
        }
    }
}

/// Standard error type for pipeline runs.
///
/// # Example
///
/// ```
/// use onion_core::{ErrorKind, PipelineError};
///
/// let err = PipelineError::contract_violation("auth", "middleware");
/// assert_eq!(err.kind(), ErrorKind::ContractViolation);
/// assert!(err.to_string().contains("auth"));
/// assert!(err.to_string().contains("middleware"));
/// ```
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A resolved layer does not satisfy the required capability.
    #[error("layer [ {layer} ] does not satisfy the required capability [ {capability} ]")]
    ContractViolation {
        /// The offending layer identifier.
        layer: LayerId,
        /// The capability every layer must satisfy.
        capability: String,
    },

    /// The resolver failed to produce a layer.
    #[error("failed to resolve layer: {0}")]
    Resolution(#[from] ResolveError),

    /// A frame received a different number of inputs than it declares.
    #[error("{subject} expects {expected} argument(s) but was invoked with {actual}")]
    ArityMismatch {
        /// Description of the frame (`layer [ id ]` or `terminal`).
        subject: String,
        /// Declared arity.
        expected: usize,
        /// Number of inputs supplied.
        actual: usize,
    },

    /// The terminal object does not expose the configured method.
    #[error("terminal has no method named [ {method} ]")]
    MethodNotFound {
        /// The configured method name.
        method: String,
    },

    /// A failure raised by a layer or the terminal.
    #[error("{message}")]
    Failed {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl PipelineError {
    /// Creates a contract violation error.
    pub fn contract_violation(layer: impl Into<LayerId>, capability: impl Into<String>) -> Self {
        Self::ContractViolation {
            layer: layer.into(),
            capability: capability.into(),
        }
    }

    /// Creates an arity mismatch error.
    pub fn arity_mismatch(subject: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            subject: subject.into(),
            expected,
            actual,
        }
    }

    /// Creates a missing terminal method error.
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            method: method.into(),
        }
    }

    /// Creates a failure with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a failure wrapping an underlying error.
    pub fn failed_with_source(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Failed {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ContractViolation { .. } => ErrorKind::ContractViolation,
            Self::Resolution(_) => ErrorKind::ResolutionFailure,
            Self::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            Self::MethodNotFound { .. } => ErrorKind::MethodNotFound,
            Self::Failed { .. } => ErrorKind::LayerFailure,
        }
    }

    /// Returns `true` if the run was aborted before any layer executed.
    #[must_use]
    pub const fn is_build_failure(&self) -> bool {
        matches!(self, Self::ContractViolation { .. } | Self::Resolution(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_error_kind_codes() {
        assert_eq!(ErrorKind::ContractViolation.code(), "CONTRACT_VIOLATION");
        assert_eq!(ErrorKind::ResolutionFailure.code(), "RESOLUTION_FAILURE");
        assert_eq!(ErrorKind::ArityMismatch.to_string(), "ARITY_MISMATCH");
        assert_eq!(ErrorKind::MethodNotFound.code(), "METHOD_NOT_FOUND");
        assert_eq!(ErrorKind::LayerFailure.code(), "LAYER_FAILURE");
    }

    #[test]
    fn test_error_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::ContractViolation).unwrap();
        assert_eq!(json, "\"CONTRACT_VIOLATION\"");
    }

    #[test]
    fn test_contract_violation_display() {
        let err = PipelineError::contract_violation("foo", "FooInterface");
        assert_eq!(
            err.to_string(),
            "layer [ foo ] does not satisfy the required capability [ FooInterface ]"
        );
        assert!(err.is_build_failure());
    }

    #[test]
    fn test_resolution_from_resolve_error() {
        let err: PipelineError = ResolveError::not_registered("ghost").into();
        assert_eq!(err.kind(), ErrorKind::ResolutionFailure);
        assert!(err.is_build_failure());
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_arity_mismatch_display() {
        let err = PipelineError::arity_mismatch("layer [ bar ]", 1, 0);
        assert_eq!(
            err.to_string(),
            "layer [ bar ] expects 1 argument(s) but was invoked with 0"
        );
        assert!(!err.is_build_failure());
    }

    #[test]
    fn test_failed_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = PipelineError::failed_with_source("could not load", io);
        assert_eq!(err.kind(), ErrorKind::LayerFailure);
        assert_eq!(err.to_string(), "could not load");
        assert!(err.source().is_some());
        assert!(PipelineError::failed("plain").source().is_none());
    }

    #[test]
    fn test_resolve_error_messages() {
        assert!(ResolveError::missing_parameter("separator")
            .to_string()
            .contains("separator"));
        assert!(ResolveError::setter_not_found("baz", "set_parameters")
            .to_string()
            .contains("set_parameters"));
        assert!(ResolveError::type_mismatch::<String>("baz")
            .to_string()
            .contains("String"));
    }

    #[test]
    fn test_result_alias() {
        let ok: PipelineResult<u8> = Ok(1);
        assert_ok!(ok);
        let err: PipelineResult<u8> = Err(PipelineError::method_not_found("run"));
        assert_err!(err);
    }
}
