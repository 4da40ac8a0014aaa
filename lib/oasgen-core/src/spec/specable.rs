use indexmap::IndexMap;
use serde_json::Value;
use utoipa::openapi::{RefOr, Schema};

/// A projected document fragment: keys in wire order, values ready for serialization.
pub type SpecMap = serde_json::Map<String, Value>;

/// Conversion of a field value into its wire representation.
///
/// Returning `None` means the value is absent and the field will be omitted.
pub trait ToSpecValue {
    /// Projects the value, or `None` if there is nothing to emit.
    fn to_spec_value(&self) -> Option<Value>;
}

/// One entry of a node's field list: the field name and its value accessor.
pub type Field<'a> = (&'static str, &'a dyn ToSpecValue);

/// Declares a field list entry.
pub fn field<'a>(name: &'static str, value: &'a dyn ToSpecValue) -> Field<'a> {
    (name, value)
}

/// A node of the OpenAPI document.
///
/// Each node declares its ordered field list with [`Specable::oas_fields`]; the
/// default [`Specable::to_spec`] walks that list and builds the wire map:
///
/// - field names are renamed to lower camel case (`operation_id` → `operationId`),
/// - nested nodes, sequences and maps are projected recursively,
/// - absent values, empty sequences and empty maps are omitted.
///
/// The output keeps the order of the field list, not an alphabetical order.
pub trait Specable {
    /// The ordered `(field name, value accessor)` pairs of this node.
    fn oas_fields(&self) -> Vec<Field<'_>>;

    /// Projects this node into a wire map.
    fn to_spec(&self) -> SpecMap {
        project(self.oas_fields())
    }
}

/// Projects a field list into a wire map, applying the renaming and omission rules.
pub fn project(fields: Vec<Field<'_>>) -> SpecMap {
    let mut result = SpecMap::new();
    for (field, value) in fields {
        let Some(value) = value.to_spec_value() else {
            continue;
        };
        if is_omitted(&value) {
            continue;
        }
        result.insert(wire_name(field), value);
    }
    result
}

/// Converts a field name to the wire naming convention.
pub(crate) fn wire_name(field: &str) -> String {
    use cruet::*;
    field.to_camel_case()
}

fn is_omitted(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Implements [`ToSpecValue`] for document nodes by delegating to [`Specable::to_spec`].
macro_rules! spec_node {
    ($($node:ty),+ $(,)?) => {
        $(
            impl $crate::spec::ToSpecValue for $node {
                fn to_spec_value(&self) -> Option<serde_json::Value> {
                    Some(serde_json::Value::Object($crate::spec::Specable::to_spec(self)))
                }
            }
        )+
    };
}
pub(crate) use spec_node;

impl ToSpecValue for String {
    fn to_spec_value(&self) -> Option<Value> {
        Some(Value::String(self.clone()))
    }
}

impl ToSpecValue for &'static str {
    fn to_spec_value(&self) -> Option<Value> {
        Some(Value::String((*self).to_string()))
    }
}

impl ToSpecValue for bool {
    fn to_spec_value(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }
}

impl ToSpecValue for Value {
    fn to_spec_value(&self) -> Option<Value> {
        Some(self.clone())
    }
}

impl<T> ToSpecValue for Option<T>
where
    T: ToSpecValue,
{
    fn to_spec_value(&self) -> Option<Value> {
        self.as_ref().and_then(ToSpecValue::to_spec_value)
    }
}

impl<T> ToSpecValue for Vec<T>
where
    T: ToSpecValue,
{
    fn to_spec_value(&self) -> Option<Value> {
        let items = self
            .iter()
            .filter_map(ToSpecValue::to_spec_value)
            .collect();
        Some(Value::Array(items))
    }
}

impl<T> ToSpecValue for IndexMap<String, T>
where
    T: ToSpecValue,
{
    fn to_spec_value(&self) -> Option<Value> {
        let map = self
            .iter()
            .filter_map(|(key, value)| Some((key.clone(), value.to_spec_value()?)))
            .collect();
        Some(Value::Object(map))
    }
}

impl ToSpecValue for RefOr<Schema> {
    fn to_spec_value(&self) -> Option<Value> {
        match serde_json::to_value(self) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%error, "cannot project schema");
                None
            }
        }
    }
}
