use serde_json::Value;

use super::{Field, SpecMap, Specable, ToSpecValue, field, spec_node};

/// A `$ref` pointer to a reusable component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    location: String,
}

impl Reference {
    /// Creates a reference to an arbitrary location.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// References `#/components/schemas/{name}`.
    pub fn schema(name: &str) -> Self {
        Self::new(format!("#/components/schemas/{name}"))
    }

    /// References `#/components/responses/{name}`.
    pub fn response(name: &str) -> Self {
        Self::new(format!("#/components/responses/{name}"))
    }

    /// The referenced location.
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Specable for Reference {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![field("ref", &self.location)]
    }

    // `$ref` does not follow the camel case convention
    fn to_spec(&self) -> SpecMap {
        let mut result = SpecMap::new();
        result.insert("$ref".to_string(), Value::String(self.location.clone()));
        result
    }
}

spec_node!(Reference);

/// Either a reference to a component or an inline value.
#[derive(Debug, Clone, PartialEq)]
pub enum RefOr<T> {
    /// A `$ref` to a registered component.
    Ref(Reference),
    /// The inline value.
    T(T),
}

impl<T> RefOr<T> {
    /// Returns the inline value, if any.
    pub fn as_inline(&self) -> Option<&T> {
        match self {
            Self::Ref(_) => None,
            Self::T(value) => Some(value),
        }
    }

    /// Returns the inline value mutably, if any.
    pub fn as_inline_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ref(_) => None,
            Self::T(value) => Some(value),
        }
    }
}

impl<T> From<Reference> for RefOr<T> {
    fn from(value: Reference) -> Self {
        Self::Ref(value)
    }
}

impl<T> ToSpecValue for RefOr<T>
where
    T: ToSpecValue,
{
    fn to_spec_value(&self) -> Option<Value> {
        match self {
            Self::Ref(reference) => reference.to_spec_value(),
            Self::T(value) => value.to_spec_value(),
        }
    }
}
