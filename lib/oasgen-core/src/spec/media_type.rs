use indexmap::IndexMap;
use serde_json::Value;

use super::{Field, Shape, Specable, field, spec_node};

/// The schema and examples of one content type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaType {
    schema: Option<Shape>,
    examples: IndexMap<String, Example>,
}

impl MediaType {
    /// Creates a media type for a schema.
    pub fn new(schema: Shape) -> Self {
        Self {
            schema: Some(schema),
            examples: IndexMap::new(),
        }
    }

    /// Adds a named example.
    pub fn add_example(&mut self, name: impl Into<String>, example: Example) {
        self.examples.insert(name.into(), example);
    }

    /// The media type schema.
    pub fn schema(&self) -> Option<&Shape> {
        self.schema.as_ref()
    }

    /// The named examples.
    pub fn examples(&self) -> &IndexMap<String, Example> {
        &self.examples
    }
}

impl Specable for MediaType {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![field("schema", &self.schema), field("examples", &self.examples)]
    }
}

/// An example payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    summary: Option<String>,
    value: Value,
}

impl Example {
    /// Creates an example from its value.
    pub fn new(value: Value) -> Self {
        Self {
            summary: None,
            value,
        }
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

impl Specable for Example {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![field("summary", &self.summary), field("value", &self.value)]
    }
}

spec_node!(MediaType, Example);
