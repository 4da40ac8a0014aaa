use indexmap::IndexMap;

use super::{Field, MediaType, RefOr, Specable, field, spec_node};

/// The responses of an operation keyed by status code.
pub type Responses = IndexMap<String, RefOr<Response>>;

/// One response of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    description: String,
    content: IndexMap<String, MediaType>,
}

impl Response {
    /// Creates a response without content.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: IndexMap::new(),
        }
    }

    /// Sets the content for a media type.
    pub fn with_content(mut self, content_type: impl Into<String>, media: MediaType) -> Self {
        self.content.insert(content_type.into(), media);
        self
    }

    /// The response description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The media type entries.
    pub fn content(&self) -> &IndexMap<String, MediaType> {
        &self.content
    }

    /// Mutable access to the media type entries.
    pub fn content_mut(&mut self) -> &mut IndexMap<String, MediaType> {
        &mut self.content
    }
}

impl Specable for Response {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("description", &self.description),
            field("content", &self.content),
        ]
    }
}

spec_node!(Response);
