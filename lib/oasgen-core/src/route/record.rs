use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

/// The documented HTTP verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Verb {
    /// Every verb.
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// The upper case verb name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str() == normalized)
            .ok_or_else(|| {
                ConfigurationError::invalid_option(
                    "http_verbs",
                    value,
                    "GET, POST, PUT, PATCH, DELETE",
                )
            })
    }
}

impl From<Verb> for http::Method {
    fn from(value: Verb) -> Self {
        match value {
            Verb::Get => Self::GET,
            Verb::Post => Self::POST,
            Verb::Put => Self::PUT,
            Verb::Patch => Self::PATCH,
            Verb::Delete => Self::DELETE,
        }
    }
}

/// A response the handler was observed to produce, e.g. a `render json: @user, status: :created`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The body type expression, when known.
    pub shape: Option<String>,
}

impl ObservedResponse {
    /// Creates an observed response.
    pub fn new(status: u16, shape: Option<&str>) -> Self {
        Self {
            status,
            shape: shape.map(ToString::to_string),
        }
    }
}

/// One route as extracted from the host application.
///
/// `container` is the handler container path (`api/v1/users`), `action` the handler
/// name inside it (`index`). `documentation` is `None` when the handler source is not
/// available, e.g. for a dynamically defined handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    /// The HTTP verb.
    pub verb: Verb,
    /// The route path as declared, e.g. `/users/:id(.:format)`.
    pub path: String,
    /// The handler container path.
    pub container: String,
    /// The handler name.
    pub action: String,
    /// The handler documentation text.
    pub documentation: Option<String>,
    /// The container documentation text.
    pub container_documentation: Option<String>,
    /// Tags extracted alongside the route.
    pub tags: Vec<String>,
    /// Responses observed in the handler body.
    pub observed_responses: Vec<ObservedResponse>,
}

impl RouteRecord {
    /// Creates a route record without documentation.
    pub fn new(
        verb: Verb,
        path: impl Into<String>,
        container: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            verb,
            path: path.into(),
            container: container.into(),
            action: action.into(),
            documentation: None,
            container_documentation: None,
            tags: Vec::new(),
            observed_responses: Vec::new(),
        }
    }

    /// Sets the handler documentation.
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Sets the container documentation.
    pub fn with_container_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.container_documentation = Some(documentation.into());
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Adds an observed response.
    pub fn with_observed_response(mut self, status: u16, shape: Option<&str>) -> Self {
        self.observed_responses
            .push(ObservedResponse::new(status, shape));
        self
    }

    /// `container#action`
    pub fn display_name(&self) -> String {
        format!("{}#{}", self.container, self.action)
    }
}
