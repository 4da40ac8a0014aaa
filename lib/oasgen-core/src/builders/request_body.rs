use super::describe::model_name;
use super::{BuildContext, ContentBuilder, content::lookup_model};
use crate::route::OasRoute;
use crate::spec::RequestBody;
use crate::Verb;

/// Builds the request body of an operation.
///
/// An explicit `@request_body` always wins. Otherwise, when enabled, create and update
/// style verbs get the model named after the container (`users` gives `User`), if the
/// metadata source knows it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBodyBuilder;

impl RequestBodyBuilder {
    /// Builds the request body, `None` if there is nothing to document.
    pub fn build(ctx: &mut BuildContext<'_>, route: &OasRoute) -> Option<RequestBody> {
        if let Some(body) = route.request_body() {
            let content = Self::with_examples(ContentBuilder::new(), route)
                .with_type(ctx, &body.schema.expression)
                .build();
            let mut result = RequestBody::new().with_required(body.schema.required);
            if !body.description.is_empty() {
                result = result.with_description(body.description.clone());
            }
            for (content_type, media) in content {
                result = result.with_content(content_type, media);
            }
            return Some(result);
        }

        if !ctx.config().autodiscover_request_body()
            || !matches!(route.verb(), Verb::Post | Verb::Put | Verb::Patch)
        {
            return None;
        }

        let model = model_name(route.container())?;
        let Some(shape) = lookup_model(ctx, &model) else {
            tracing::debug!(route = %route.display_name(), %model, "no request body discovered");
            return None;
        };
        let content = Self::with_examples(ContentBuilder::new(), route)
            .with_shape(shape)
            .build();
        let mut result = RequestBody::new().with_required(true);
        for (content_type, media) in content {
            result = result.with_content(content_type, media);
        }
        Some(result)
    }

    fn with_examples(mut content: ContentBuilder, route: &OasRoute) -> ContentBuilder {
        for example in route.request_body_examples() {
            content = content.add_example(&example.description, example.value.clone());
        }
        content
    }
}
