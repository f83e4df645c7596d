//! Required layer capabilities.
//!
//! A pipeline may be configured with a [`Capability`] every resolved layer
//! must satisfy before the run is allowed to start. How "satisfies" is
//! decided is pluggable:
//!
//! - [`Capability::declared`] - the layer lists the name in
//!   [`Layer::capabilities`]
//! - [`Capability::of_type`] - the layer instance is a specific type
//! - [`Capability::custom`] - any predicate over `&dyn Layer`

use crate::layer::Layer;
use std::fmt;
use std::sync::Arc;

type Check = Arc<dyn Fn(&dyn Layer) -> bool + Send + Sync>;

/// A named structural requirement on layer instances.
#[derive(Clone)]
pub struct Capability {
    name: String,
    check: Check,
}

impl Capability {
    /// Requires layers to declare `name` in [`Layer::capabilities`].
    pub fn declared(name: impl Into<String>) -> Self {
        let name = name.into();
        let expected = name.clone();
        Self {
            name,
            check: Arc::new(move |layer: &dyn Layer| {
                layer.capabilities().iter().any(|declared| *declared == expected)
            }),
        }
    }

    /// Requires layers to be instances of `T`.
    pub fn of_type<T: Layer>() -> Self {
        Self {
            name: std::any::type_name::<T>().to_string(),
            check: Arc::new(|layer: &dyn Layer| layer.as_any().is::<T>()),
        }
    }

    /// Uses an arbitrary predicate.
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&dyn Layer) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Returns the capability name reported in contract violations.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if `layer` satisfies this capability.
    pub fn is_satisfied_by(&self, layer: &dyn Layer) -> bool {
        (self.check)(layer)
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Next;
    use onion_core::{Args, PipelineResult, Value};

    struct Audited;

    impl Layer for Audited {
        fn execute(&self, _args: Args, next: Next<'_>) -> PipelineResult<Value> {
            next.run()
        }

        fn capabilities(&self) -> &'static [&'static str] {
            &["middleware", "audited"]
        }
    }

    struct Plain;

    impl Layer for Plain {
        fn execute(&self, _args: Args, next: Next<'_>) -> PipelineResult<Value> {
            next.run()
        }
    }

    #[test]
    fn test_declared_capability() {
        let capability = Capability::declared("audited");
        assert_eq!(capability.name(), "audited");
        assert!(capability.is_satisfied_by(&Audited));
        assert!(!capability.is_satisfied_by(&Plain));
    }

    #[test]
    fn test_type_capability() {
        let capability = Capability::of_type::<Plain>();
        assert!(capability.name().ends_with("Plain"));
        assert!(capability.is_satisfied_by(&Plain));
        assert!(!capability.is_satisfied_by(&Audited));
    }

    #[test]
    fn test_custom_capability() {
        let capability = Capability::custom("has-any", |layer| !layer.capabilities().is_empty());
        assert!(capability.is_satisfied_by(&Audited));
        assert!(!capability.is_satisfied_by(&Plain));
    }

    #[test]
    fn test_capability_debug() {
        let debug = format!("{:?}", Capability::declared("middleware"));
        assert!(debug.contains("middleware"));
    }
}
