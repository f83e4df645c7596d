//! Layer parameters and call-time overrides.

use crate::error::ResolveError;
use crate::id::LayerId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Ordered mapping from parameter name to value.
///
/// Parameters are bound to a layer at registration time and delivered to the
/// layer when it is resolved, either as construction arguments or through a
/// named setter. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(IndexMap<String, Value>);

impl Parameters {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Adds a parameter, returning the updated map.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a parameter, returning the previous value if any.
    ///
    /// Replacing an existing name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Returns the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns the value bound to `name` if it is a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Returns the string bound to `name`, or a [`ResolveError`] if it is
    /// missing or not a string.
    pub fn require_str(&self, name: &str) -> Result<&str, ResolveError> {
        match self.0.get(name) {
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(ResolveError::invalid_parameter(
                name,
                format!("expected a string, got {other}"),
            )),
            None => Err(ResolveError::missing_parameter(name)),
        }
    }

    /// Returns `true` if `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameters are bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Returns a copy of these parameters with `overrides` applied.
    ///
    /// Overriding entries replace values in place; names only present in
    /// `overrides` are appended. Names not mentioned are inherited.
    #[must_use]
    pub fn merged(&self, overrides: Option<&Parameters>) -> Parameters {
        let mut merged = self.clone();
        if let Some(overrides) = overrides {
            for (name, value) in overrides.iter() {
                merged.0.insert(name.clone(), value.clone());
            }
        }
        merged
    }
}

impl From<IndexMap<String, Value>> for Parameters {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Call-time parameter overrides keyed by layer identifier.
///
/// Overrides apply to every layer registered under the same identifier in a
/// given run, regardless of position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides(HashMap<LayerId, Parameters>);

impl Overrides {
    /// Creates an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Adds overrides for a layer, returning the updated set.
    #[must_use]
    pub fn with(mut self, id: impl Into<LayerId>, parameters: Parameters) -> Self {
        self.insert(id, parameters);
        self
    }

    /// Sets the overrides for a layer, replacing any previous ones.
    pub fn insert(&mut self, id: impl Into<LayerId>, parameters: Parameters) -> Option<Parameters> {
        self.0.insert(id.into(), parameters)
    }

    /// Returns the overrides registered for a layer.
    pub fn get<Q>(&self, id: &Q) -> Option<&Parameters>
    where
        LayerId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.get(id)
    }

    /// Returns the number of layers with overrides.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no overrides are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<LayerId>> FromIterator<(K, Parameters)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, Parameters)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, p)| (id.into(), p)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_parameters_with_and_get() {
        let parameters = Parameters::new().with("separator", "_").with("limit", 3);
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters.get_str("separator"), Some("_"));
        assert_eq!(parameters.get("limit"), Some(&json!(3)));
        assert!(parameters.contains("limit"));
        assert!(!parameters.contains("missing"));
    }

    #[test]
    fn test_require_str() {
        let parameters = params! { "separator" => "_", "limit" => 3 };
        assert_eq!(parameters.require_str("separator").unwrap(), "_");

        let err = parameters.require_str("missing").unwrap_err();
        assert!(err.to_string().contains("missing"));

        let err = parameters.require_str("limit").unwrap_err();
        assert!(err.to_string().contains("expected a string"));
    }

    #[test]
    fn test_merged_override_wins() {
        let defaults = params! { "separator" => "_", "limit" => 3 };
        let overrides = params! { "separator" => "-" };

        let merged = defaults.merged(Some(&overrides));
        assert_eq!(merged.get_str("separator"), Some("-"));
        assert_eq!(merged.get("limit"), Some(&json!(3)));

        // defaults untouched
        assert_eq!(defaults.get_str("separator"), Some("_"));
    }

    #[test]
    fn test_merged_preserves_order_and_appends_new_keys() {
        let defaults = params! { "a" => 1, "b" => 2 };
        let overrides = params! { "c" => 3, "a" => 10 };

        let merged = defaults.merged(Some(&overrides));
        let names: Vec<&str> = merged.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(merged.get("a"), Some(&json!(10)));
    }

    #[test]
    fn test_merged_without_overrides() {
        let defaults = params! { "a" => 1 };
        assert_eq!(defaults.merged(None), defaults);
        assert!(Parameters::new().merged(None).is_empty());
    }

    #[test]
    fn test_overrides_lookup() {
        let overrides = Overrides::new().with("sep", params! { "separator" => "_" });
        assert_eq!(overrides.len(), 1);
        assert!(overrides.get("sep").is_some());
        assert!(overrides.get(&LayerId::new("sep")).is_some());
        assert!(overrides.get("other").is_none());
        assert!(Overrides::new().is_empty());
    }

    #[test]
    fn test_parameters_serde_roundtrip_keeps_order() {
        let parameters = params! { "z" => 1, "a" => 2 };
        let json = serde_json::to_string(&parameters).unwrap();
        assert_eq!(json, r#"{"z":1,"a":2}"#);
    }

    proptest! {
        #[test]
        fn prop_merge_keeps_all_keys(
            defaults in proptest::collection::vec(("[a-e]", 0i64..10), 0..6),
            overrides in proptest::collection::vec(("[a-e]", 10i64..20), 0..6),
        ) {
            let defaults: Parameters = defaults.into_iter().collect();
            let overrides: Parameters = overrides.into_iter().collect();
            let merged = defaults.merged(Some(&overrides));

            for (name, value) in overrides.iter() {
                prop_assert_eq!(merged.get(name), Some(value));
            }
            for (name, value) in defaults.iter() {
                if !overrides.contains(name) {
                    prop_assert_eq!(merged.get(name), Some(value));
                }
            }
        }
    }
}
