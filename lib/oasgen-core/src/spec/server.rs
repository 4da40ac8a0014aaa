use indexmap::IndexMap;

use super::{Field, Specable, field, spec_node};

/// A server hosting the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    url: String,
    description: Option<String>,
    variables: IndexMap<String, ServerVariable>,
}

impl Server {
    /// Creates a server from its URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
            variables: IndexMap::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a variable used for substitution in the URL template.
    pub fn add_variable(mut self, name: impl Into<String>, variable: ServerVariable) -> Self {
        self.variables.insert(name.into(), variable);
        self
    }

    /// The server URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The server description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Specable for Server {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("url", &self.url),
            field("description", &self.description),
            field("variables", &self.variables),
        ]
    }
}

/// A variable for server URL template substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerVariable {
    default: String,
    enum_values: Vec<String>,
    description: Option<String>,
}

impl ServerVariable {
    /// Creates a variable with its default value.
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            enum_values: Vec::new(),
            description: None,
        }
    }

    /// Restricts the variable to a set of values.
    pub fn with_enum(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Specable for ServerVariable {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("default", &self.default),
            field("enum", &self.enum_values),
            field("description", &self.description),
        ]
    }
}

spec_node!(Server, ServerVariable);
