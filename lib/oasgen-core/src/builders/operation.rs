use super::describe::{controller_tag, generate_description, namespace_tag};
use super::{BuildContext, ParameterBuilder, RequestBodyBuilder, ResponsesBuilder};
use crate::config::DefaultTagsFrom;
use crate::route::OasRoute;
use crate::spec::{Operation, SecurityRequirement};

/// Builds the operation of one route.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationBuilder;

impl OperationBuilder {
    /// Builds the operation, registering its shapes and default responses in the context.
    pub fn build(ctx: &mut BuildContext<'_>, route: &OasRoute) -> Operation {
        let security = Self::security(ctx, route);
        let authenticated = match &security {
            Some(requirements) => !requirements.is_empty(),
            None => {
                ctx.config().authenticate_all_routes_by_default()
                    && !ctx.config().security_schemas().is_empty()
            }
        };

        let operation_id = Self::operation_id(ctx, route);
        let summary = route
            .summary()
            .or_else(|| route.docstring().summary())
            .map(ToString::to_string)
            .or_else(|| generate_description(route.verb(), route.path()));
        let description = route
            .docstring()
            .description()
            .filter(|it| Some(*it) != summary.as_deref())
            .map(ToString::to_string);

        let parameters = ParameterBuilder::build(ctx, route);
        let request_body = RequestBodyBuilder::build(ctx, route);
        let responses = ResponsesBuilder::build(ctx, route, authenticated);

        Operation::new()
            .with_tags(Self::tags(ctx, route))
            .with_summary(summary)
            .with_description(description)
            .with_operation_id(operation_id)
            .with_parameters(parameters)
            .with_request_body(request_body)
            .with_responses(responses)
            .with_security(security)
    }

    /// `users` + `index` gives `indexUsers`, `api/v1/users` + `show` gives `showApiV1Users`.
    fn operation_id(ctx: &mut BuildContext<'_>, route: &OasRoute) -> String {
        use cruet::*;
        let container = route.container().replace('/', "_");
        let candidate = format!("{}_{container}", route.action()).to_camel_case();
        let suffix = route.verb().as_str().to_lowercase().to_pascal_case();
        ctx.claim_operation_id(candidate, &suffix)
    }

    fn tags(ctx: &BuildContext<'_>, route: &OasRoute) -> Vec<String> {
        if !route.tags().is_empty() {
            return route.tags().to_vec();
        }
        let tag = match ctx.config().default_tags_from() {
            DefaultTagsFrom::Namespace => namespace_tag(relative_path(ctx, route.path())),
            DefaultTagsFrom::Controller => controller_tag(route.container()),
        };
        tag.into_iter().collect()
    }

    /// `Some(empty)` for `@no_auth`, the named schemes for `@auth`, `None` to inherit.
    fn security(ctx: &BuildContext<'_>, route: &OasRoute) -> Option<Vec<SecurityRequirement>> {
        if route.is_no_auth() {
            return Some(Vec::new());
        }
        let names = route.auth_schemes()?;
        let schemes = ctx.config().security_schemas();
        let requirements = names
            .iter()
            .filter(|name| {
                let known = schemes.contains_key(name.as_str());
                if !known {
                    tracing::warn!(route = %route.display_name(), scheme = %name, "unknown security scheme ignored");
                }
                known
            })
            .map(SecurityRequirement::new)
            .collect();
        Some(requirements)
    }
}

fn relative_path<'p>(ctx: &BuildContext<'_>, path: &'p str) -> &'p str {
    let api_path = ctx.config().api_path().trim_end_matches('/');
    path.strip_prefix(api_path).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{RouteBuilder, RouteRecord, StaticMetadataSource, Verb};
    use crate::spec::{PredefinedScheme, ToSpecValue};
    use crate::{Configuration, DefaultTagsFrom};

    fn secured() -> Configuration {
        Configuration::builder()
            .with_security_schema(PredefinedScheme::BearerJwt)
            .with_default_responses(false)
            .build()
            .unwrap_or_default()
    }

    fn build(config: &Configuration, record: &RouteRecord) -> Operation {
        let source = StaticMetadataSource::new();
        let mut ctx = BuildContext::new(config, &source);
        OperationBuilder::build(&mut ctx, &RouteBuilder::build(record))
    }

    #[test]
    fn should_build_documented_operation() {
        let record = RouteRecord::new(Verb::Get, "/users/:id(.:format)", "users", "show")
            .with_documentation(
                "# Show one user\n# Includes the profile.\n# @tags Users, Accounts\n# @no_auth",
            );

        let operation = build(&secured(), &record);

        insta::assert_snapshot!(
            operation.to_spec_value().map(|it| it.to_string()).unwrap_or_default(),
            @r#"{"tags":["Users","Accounts"],"summary":"Show one user","description":"Show one user\nIncludes the profile.","operationId":"showUsers","parameters":[{"name":"id","in":"path","required":true,"schema":{"type":"string"}}],"responses":{"200":{"description":"OK"}}}"#
        );
        assert_eq!(operation.security(), Some([].as_slice()));
    }

    #[test]
    fn should_generate_summary_and_default_tag() {
        let config = Configuration::builder()
            .with_api_path("/api/v1")
            .build()
            .unwrap_or_default();
        let record = RouteRecord::new(Verb::Delete, "/api/v1/blog_posts/:id", "api/v1/blog_posts", "destroy");

        let operation = build(&config, &record);

        assert_eq!(operation.summary(), Some("Delete blog_post by ID"));
        assert_eq!(operation.tags(), ["Blog Posts"]);
        assert_eq!(operation.operation_id(), Some("destroyApiV1BlogPosts"));
    }

    #[test]
    fn should_use_controller_tag_when_configured() {
        let config = Configuration::builder()
            .with_default_tags_from(DefaultTagsFrom::Controller)
            .build()
            .unwrap_or_default();
        let record = RouteRecord::new(Verb::Get, "/members", "admin/people", "index");

        let operation = build(&config, &record);

        assert_eq!(operation.tags(), ["People"]);
    }

    #[test]
    fn should_keep_known_auth_schemes_only() {
        let record = RouteRecord::new(Verb::Post, "/users", "users", "create")
            .with_documentation("# @auth [bearer_jwt, ghost]");

        let operation = build(&secured(), &record);

        let names = operation
            .security()
            .unwrap_or_default()
            .iter()
            .map(|it| it.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["bearer_jwt"]);
    }

    #[test]
    fn should_deduplicate_operation_ids() {
        let config = Configuration::default();
        let source = StaticMetadataSource::new();
        let mut ctx = BuildContext::new(&config, &source);
        let put = RouteRecord::new(Verb::Put, "/users/:id", "users", "update");
        let patch = RouteRecord::new(Verb::Patch, "/users/:id", "users", "update");

        let first = OperationBuilder::build(&mut ctx, &RouteBuilder::build(&put));
        let second = OperationBuilder::build(&mut ctx, &RouteBuilder::build(&patch));

        assert_eq!(first.operation_id(), Some("updateUsers"));
        assert_eq!(second.operation_id(), Some("updateUsersPatch"));
    }
}
