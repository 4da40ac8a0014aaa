use indexmap::IndexMap;

use super::{Field, MediaType, Specable, field, spec_node};

/// The request body of an operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    description: Option<String>,
    content: IndexMap<String, MediaType>,
    required: bool,
}

impl RequestBody {
    /// Creates an empty request body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the body as required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the content for a media type.
    pub fn with_content(mut self, content_type: impl Into<String>, media: MediaType) -> Self {
        self.content.insert(content_type.into(), media);
        self
    }

    /// The media type entries.
    pub fn content(&self) -> &IndexMap<String, MediaType> {
        &self.content
    }

    /// Mutable access to the media type entries.
    pub fn content_mut(&mut self) -> &mut IndexMap<String, MediaType> {
        &mut self.content
    }

    /// Whether the body is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Specable for RequestBody {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("description", &self.description),
            field("content", &self.content),
            field("required", &self.required),
        ]
    }
}

spec_node!(RequestBody);
