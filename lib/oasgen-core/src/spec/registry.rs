use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde_json::Value;
use utoipa::openapi::{Ref, RefOr};

use super::{Shape, ToSpecValue};

/// Named data shapes, referenced from the document with `$ref`.
///
/// Names are unique and stable within one assembly pass: registering an equal shape
/// under the same name returns that name again, a different shape claiming a taken
/// name gets a suffixed name derived from its content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRegistry {
    entries: IndexMap<String, Shape>,
}

impl SchemaRegistry {
    /// Registers a shape and returns the name it is registered under.
    pub fn register(&mut self, name: &str, shape: Shape) -> String {
        let base_name = sanitize_name(name);

        let Some(existing) = self.entries.get(&base_name) else {
            self.entries.insert(base_name.clone(), shape);
            return base_name;
        };
        if *existing == shape {
            return base_name;
        }

        // Conflict detected - use a hash-based suffix
        let mut candidate = format!("{base_name}_{:x}", fingerprint(&shape) & 0xFFFF);
        let mut attempt = 1;
        while let Some(existing) = self.entries.get(&candidate) {
            if *existing == shape {
                return candidate;
            }
            attempt += 1;
            candidate = format!("{base_name}_{:x}_{attempt}", fingerprint(&shape) & 0xFFFF);
        }

        tracing::warn!(
            base_name = %base_name,
            resolved_name = %candidate,
            "Schema name conflict resolved using hash-based naming"
        );
        self.entries.insert(candidate.clone(), shape);
        candidate
    }

    /// Registers a shape and returns a `$ref` to it.
    pub fn register_ref(&mut self, name: &str, shape: Shape) -> Shape {
        let name = self.register(name, shape);
        Self::reference(&name)
    }

    /// A `$ref` to a schema component.
    pub fn reference(name: &str) -> Shape {
        RefOr::Ref(Ref::from_schema_name(name))
    }

    /// Looks up a registered shape.
    pub fn resolve(&self, name: &str) -> Option<&Shape> {
        self.entries.get(name)
    }

    /// Iterates over the registered shapes, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Shape)> {
        self.entries.iter().map(|(name, shape)| (name.as_str(), shape))
    }

    /// The number of registered shapes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no shape is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ToSpecValue for SchemaRegistry {
    fn to_spec_value(&self) -> Option<Value> {
        self.entries.to_spec_value()
    }
}

/// Component names must match `^[a-zA-Z0-9._-]+$`.
fn sanitize_name(name: &str) -> String {
    let result = name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect::<String>();
    if result.is_empty() {
        "Schema".to_string()
    } else {
        result
    }
}

fn fingerprint(shape: &Shape) -> u64 {
    let mut hasher = DefaultHasher::new();
    serde_json::to_string(shape)
        .unwrap_or_default()
        .hash(&mut hasher);
    hasher.finish()
}
