use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::{Field, Shape, Specable, ToSpecValue, field, spec_node};
use crate::ConfigurationError;

/// Where a parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterIn {
    /// Inside the path template (`/users/{id}`).
    Path,
    /// In the query string.
    Query,
    /// As a request header.
    Header,
    /// As a cookie.
    Cookie,
}

impl ParameterIn {
    /// The wire name of the location.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterIn {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            "cookie" => Ok(Self::Cookie),
            _ => Err(ConfigurationError::invalid_option(
                "parameter location",
                value,
                "path, query, header, cookie",
            )),
        }
    }
}

impl ToSpecValue for ParameterIn {
    fn to_spec_value(&self) -> Option<Value> {
        Some(Value::String(self.as_str().to_string()))
    }
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    location: ParameterIn,
    description: Option<String>,
    required: bool,
    schema: Option<Shape>,
}

impl Parameter {
    /// Creates a parameter.
    ///
    /// Path parameters are always required.
    pub fn new(name: impl Into<String>, location: ParameterIn) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            required: location == ParameterIn::Path,
            schema: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the parameter as required, path parameters stay required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required || self.location == ParameterIn::Path;
        self
    }

    /// Sets the parameter schema.
    pub fn with_schema(mut self, schema: Shape) -> Self {
        self.schema = Some(schema);
        self
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter location.
    pub fn location(&self) -> ParameterIn {
        self.location
    }

    /// Whether the parameter is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The parameter description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Specable for Parameter {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("name", &self.name),
            field("in", &self.location),
            field("description", &self.description),
            field("required", &self.required),
            field("schema", &self.schema),
        ]
    }
}

spec_node!(Parameter);
