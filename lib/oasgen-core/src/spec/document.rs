use derive_more::Deref;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{SpecMap, Specable, Specification};

/// A projected document: the top-level map of the specification, ready to serialize.
///
/// This is what the cache stores and what callers receive. It dereferences to a JSON
/// object, so [`Value::pointer`] and [`Value::get`] are available.
#[derive(Debug, Clone, PartialEq, Serialize, Deref)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    /// The top-level keys, in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .as_object()
            .into_iter()
            .flat_map(|map| map.keys().map(String::as_str))
    }

    /// Consumes the document and returns the JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::from(SpecMap::new())
    }
}

impl From<SpecMap> for Document {
    fn from(value: SpecMap) -> Self {
        Self(Value::Object(value))
    }
}

impl From<&Specification> for Document {
    fn from(value: &Specification) -> Self {
        Self::from(value.to_spec())
    }
}

// Only top-level maps are documents.
impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        SpecMap::deserialize(deserializer).map(Self::from)
    }
}
