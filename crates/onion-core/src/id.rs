//! Layer identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque key identifying a layer implementation.
///
/// Identifiers are what a resolver turns into concrete layer instances.
/// They are usually short names (`"auth"`, `"rate_limit"`) or derived from
/// a Rust type with [`LayerId::of`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    /// Creates an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives an identifier from a type's fully qualified name.
    ///
    /// ```
    /// use onion_core::LayerId;
    ///
    /// struct Auth;
    ///
    /// assert!(LayerId::of::<Auth>().as_str().ends_with("Auth"));
    /// ```
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&LayerId> for LayerId {
    fn from(id: &LayerId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for LayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct SampleLayer;

    #[test]
    fn test_layer_id_from_str() {
        let id = LayerId::from("auth");
        assert_eq!(id.as_str(), "auth");
        assert_eq!(id.to_string(), "auth");
        assert!(!id.is_empty());
    }

    #[test]
    fn test_layer_id_of_type() {
        let id = LayerId::of::<SampleLayer>();
        assert!(id.as_str().contains("SampleLayer"));
        assert_eq!(id, LayerId::of::<SampleLayer>());
    }

    #[test]
    fn test_layer_id_borrow_lookup() {
        let mut map = HashMap::new();
        map.insert(LayerId::new("auth"), 1);
        assert_eq!(map.get("auth"), Some(&1));
    }

    #[test]
    fn test_layer_id_serde_transparent() {
        let id = LayerId::new("auth");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"auth\"");
        let back: LayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
