use http::StatusCode;
use indexmap::IndexMap;

use super::{BuildContext, ContentBuilder};
use crate::config::DefaultResponse;
use crate::route::OasRoute;
use crate::spec::{MediaType, RefOr, Reference, Response, Responses};

/// Builds one response.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    status: u16,
    description: Option<String>,
    content: IndexMap<String, MediaType>,
}

impl ResponseBuilder {
    /// Starts a response for a status code.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Sets the description, the canonical reason is used otherwise.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.is_empty() {
            self.description = Some(description);
        }
        self
    }

    /// Sets the content.
    pub fn with_content(mut self, content: IndexMap<String, MediaType>) -> Self {
        self.content = content;
        self
    }

    /// Builds the response.
    pub fn build(self) -> Response {
        let description = self.description.unwrap_or_else(|| canonical_reason(self.status));
        let mut result = Response::new(description);
        for (content_type, media) in self.content {
            result = result.with_content(content_type, media);
        }
        result
    }
}

fn canonical_reason(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|it| it.canonical_reason())
        .unwrap_or("Response")
        .to_string()
}

/// Builds the responses of an operation.
///
/// Explicit `@response` annotations come first, then observed responses (when
/// discovery is enabled) for the remaining status codes. A route without any 2xx
/// response gets a success response. Default error responses are then added, as references to
/// `components.responses`, when they apply to the route.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsesBuilder;

impl ResponsesBuilder {
    /// Builds the responses of a route; `authenticated` tells whether the route needs credentials.
    pub fn build(ctx: &mut BuildContext<'_>, route: &OasRoute, authenticated: bool) -> Responses {
        let mut result = Responses::new();

        for annotation in route.responses() {
            let mut content = ContentBuilder::new();
            if let Some(schema) = &annotation.schema {
                content = content.with_type(ctx, &schema.expression);
            }
            for example in route
                .response_examples()
                .filter(|it| it.status == Some(annotation.status))
            {
                content = content.add_example(&example.description, example.value.clone());
            }
            let response = ResponseBuilder::new(annotation.status)
                .with_description(annotation.description.clone())
                .with_content(content.build())
                .build();
            result
                .entry(annotation.status.to_string())
                .or_insert(RefOr::T(response));
        }

        if ctx.config().autodiscover_responses() {
            for observed in route.observed_responses() {
                let key = observed.status.to_string();
                if result.contains_key(&key) {
                    continue;
                }
                let mut content = ContentBuilder::new();
                if let Some(shape) = &observed.shape {
                    content = content.with_type(ctx, shape);
                }
                let response = ResponseBuilder::new(observed.status)
                    .with_content(content.build())
                    .build();
                result.insert(key, RefOr::T(response));
            }
        }

        if !result.keys().any(|status| status.starts_with('2')) {
            let status = success_status(route.action());
            result.insert(
                status.to_string(),
                RefOr::T(ResponseBuilder::new(status).build()),
            );
        }

        if ctx.config().set_default_responses() {
            let defaults = ctx.config().possible_default_responses().to_vec();
            for default in defaults {
                let key = default.status().as_u16().to_string();
                if !applies(default, route, authenticated) || result.contains_key(&key) {
                    continue;
                }
                Self::register_default(ctx, default);
                result.insert(
                    key,
                    RefOr::Ref(Reference::response(default.component_name())),
                );
            }
        }

        result
    }

    fn register_default(ctx: &mut BuildContext<'_>, default: DefaultResponse) {
        if ctx
            .components()
            .responses()
            .contains_key(default.component_name())
        {
            return;
        }
        let config = ctx.config();
        let expression = match default {
            DefaultResponse::UnprocessableEntity => config.response_body_of_unprocessable_entity(),
            _ => config.response_body_of_default(),
        };
        let content = ContentBuilder::new().with_type(ctx, expression).build();
        let response = ResponseBuilder::new(default.status().as_u16())
            .with_content(content)
            .build();
        ctx.components_mut()
            .add_response(default.component_name(), response);
    }
}

fn success_status(action: &str) -> u16 {
    match action {
        "create" => 201,
        "destroy" => 204,
        _ => 200,
    }
}

fn applies(default: DefaultResponse, route: &OasRoute, authenticated: bool) -> bool {
    match default {
        DefaultResponse::NotFound => matches!(route.action(), "show" | "update" | "destroy"),
        DefaultResponse::Unauthorized | DefaultResponse::Forbidden => authenticated,
        DefaultResponse::UnprocessableEntity => matches!(route.action(), "create" | "update"),
        DefaultResponse::InternalServerError => true,
    }
}
