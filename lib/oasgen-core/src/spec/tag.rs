use super::{Field, Specable, field, spec_node};

/// A tag used to group operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    description: Option<String>,
}

impl Tag {
    /// Creates a tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The tag name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Specable for Tag {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("name", &self.name),
            field("description", &self.description),
        ]
    }
}

/// A link to external documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDocs {
    description: Option<String>,
    url: String,
}

impl ExternalDocs {
    /// Creates an external documentation link.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            description: None,
            url: url.into(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Specable for ExternalDocs {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("description", &self.description),
            field("url", &self.url),
        ]
    }
}

spec_node!(Tag, ExternalDocs);
