use super::{
    Field, Parameter, RequestBody, Responses, SecurityRequirement, Specable, field, spec_node,
};

/// The documented behavior of one HTTP verb at one path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    tags: Vec<String>,
    summary: Option<String>,
    description: Option<String>,
    operation_id: Option<String>,
    parameters: Vec<Parameter>,
    request_body: Option<RequestBody>,
    responses: Responses,
    security: Option<Vec<SecurityRequirement>>,
}

impl Operation {
    /// Creates an empty operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the operation id.
    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Sets the parameters.
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the request body.
    pub fn with_request_body(mut self, request_body: Option<RequestBody>) -> Self {
        self.request_body = request_body;
        self
    }

    /// Sets the responses.
    pub fn with_responses(mut self, responses: Responses) -> Self {
        self.responses = responses;
        self
    }

    /// Sets the operation level security.
    ///
    /// `None` inherits the document security, an empty list opts the operation out.
    pub fn with_security(mut self, security: Option<Vec<SecurityRequirement>>) -> Self {
        self.security = security;
        self
    }

    /// The operation id.
    pub fn operation_id(&self) -> Option<&str> {
        self.operation_id.as_deref()
    }

    /// The tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The summary.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The parameters.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The request body.
    pub fn request_body(&self) -> Option<&RequestBody> {
        self.request_body.as_ref()
    }

    /// The responses.
    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    /// The operation level security.
    pub fn security(&self) -> Option<&[SecurityRequirement]> {
        self.security.as_deref()
    }
}

impl Specable for Operation {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("tags", &self.tags),
            field("summary", &self.summary),
            field("description", &self.description),
            field("operation_id", &self.operation_id),
            field("parameters", &self.parameters),
            field("request_body", &self.request_body),
            field("responses", &self.responses),
            field("security", &self.security),
        ]
    }
}

spec_node!(Operation);
