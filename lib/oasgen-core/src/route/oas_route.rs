use std::sync::LazyLock;

use regex::Regex;

use super::docstring::{
    Annotation, BodyAnnotation, Docstring, ExampleAnnotation, ParameterAnnotation,
    ResponseAnnotation,
};
use super::{ObservedResponse, RouteRecord, Verb};

static DYNAMIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:*](?<name>\w+)").expect("a valid regex"));

/// A route ready for the builder chain.
///
/// Built once per extracted route by [`RouteBuilder`], never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OasRoute {
    handler_identity: String,
    display_name: String,
    verb: Verb,
    path: String,
    container: String,
    action: String,
    docstring: Docstring,
    annotations: Vec<Annotation>,
    tags: Vec<String>,
    observed_responses: Vec<ObservedResponse>,
}

impl OasRoute {
    /// The qualified handler name, e.g. `Api::V1::UsersController#index`.
    pub fn handler_identity(&self) -> &str {
        &self.handler_identity
    }

    /// The short handler name, e.g. `api/v1/users#index`.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The HTTP verb.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The normalized path template, e.g. `/users/{id}`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The handler container path.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// The handler name.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The handler documentation.
    pub fn docstring(&self) -> &Docstring {
        &self.docstring
    }

    /// Handler then container annotations, deduplicated.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Tags, handler level first, deduplicated.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Responses observed in the handler body.
    pub fn observed_responses(&self) -> &[ObservedResponse] {
        &self.observed_responses
    }

    /// The `@summary` annotation.
    pub fn summary(&self) -> Option<&str> {
        self.annotations.iter().find_map(|it| match it {
            Annotation::Summary(summary) => Some(summary.as_str()),
            _ => None,
        })
    }

    /// Whether the route carries an `@tags` annotation.
    pub fn has_tag_annotation(&self) -> bool {
        self.annotations
            .iter()
            .any(|it| matches!(it, Annotation::Tags(_)))
    }

    /// Whether the route is marked `@oas_include`.
    pub fn is_explicitly_included(&self) -> bool {
        self.annotations.contains(&Annotation::OasInclude)
    }

    /// Whether the route is marked `@no_auth`.
    pub fn is_no_auth(&self) -> bool {
        self.annotations.contains(&Annotation::NoAuth)
    }

    /// The schemes listed by the first `@auth` annotation.
    pub fn auth_schemes(&self) -> Option<&[String]> {
        self.annotations.iter().find_map(|it| match it {
            Annotation::Auth(schemes) => Some(schemes.as_slice()),
            _ => None,
        })
    }

    /// The `@parameter` annotations.
    pub fn parameters(&self) -> impl Iterator<Item = &ParameterAnnotation> {
        self.annotations.iter().filter_map(|it| match it {
            Annotation::Parameter(param) => Some(param),
            _ => None,
        })
    }

    /// The first `@request_body` annotation.
    pub fn request_body(&self) -> Option<&BodyAnnotation> {
        self.annotations.iter().find_map(|it| match it {
            Annotation::RequestBody(body) => Some(body),
            _ => None,
        })
    }

    /// The `@request_body_example` annotations.
    pub fn request_body_examples(&self) -> impl Iterator<Item = &ExampleAnnotation> {
        self.annotations.iter().filter_map(|it| match it {
            Annotation::RequestBodyExample(example) => Some(example),
            _ => None,
        })
    }

    /// The `@response` annotations.
    pub fn responses(&self) -> impl Iterator<Item = &ResponseAnnotation> {
        self.annotations.iter().filter_map(|it| match it {
            Annotation::Response(response) => Some(response),
            _ => None,
        })
    }

    /// The `@response_example` annotations.
    pub fn response_examples(&self) -> impl Iterator<Item = &ExampleAnnotation> {
        self.annotations.iter().filter_map(|it| match it {
            Annotation::ResponseExample(example) => Some(example),
            _ => None,
        })
    }
}

/// Turns a [`RouteRecord`] into an [`OasRoute`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteBuilder;

impl RouteBuilder {
    /// Builds the route.
    ///
    /// A record without handler documentation degrades to an empty docstring.
    pub fn build(record: &RouteRecord) -> OasRoute {
        let display_name = record.display_name();

        let docstring = match &record.documentation {
            Some(text) => Docstring::parse(text),
            None => {
                tracing::warn!(handler = %display_name, "handler documentation unavailable");
                Docstring::default()
            }
        };
        let container_annotations = record
            .container_documentation
            .as_deref()
            .map(Docstring::parse)
            .map(Docstring::into_annotations)
            .unwrap_or_default();

        let mut annotations = Vec::new();
        for annotation in docstring.annotations().iter().cloned().chain(container_annotations) {
            if !annotations.contains(&annotation) {
                annotations.push(annotation);
            }
        }

        let annotated_tags = annotations.iter().filter_map(|it| match it {
            Annotation::Tags(tags) => Some(tags.iter()),
            _ => None,
        });
        let mut tags = Vec::<String>::new();
        for tag in annotated_tags.flatten().chain(&record.tags) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        OasRoute {
            handler_identity: handler_identity(&record.container, &record.action),
            display_name,
            verb: record.verb,
            path: normalize_path(&record.path),
            container: record.container.clone(),
            action: record.action.clone(),
            docstring,
            annotations,
            tags,
            observed_responses: record.observed_responses.clone(),
        }
    }
}

/// `api/v1/users` + `index` gives `Api::V1::UsersController#index`.
fn handler_identity(container: &str, action: &str) -> String {
    use cruet::*;
    let container = container
        .split('/')
        .filter(|it| !it.is_empty())
        .map(|it| it.to_pascal_case())
        .collect::<Vec<_>>()
        .join("::");
    format!("{container}Controller#{action}")
}

/// Normalizes a declared route path into a path template.
///
/// `(.:format)` is dropped, optional groups are flattened, `:id` and `*glob` become
/// `{id}` and `{glob}`.
pub(crate) fn normalize_path(path: &str) -> String {
    let path = path.replace("(.:format)", "");
    let path = path.replace(['(', ')'], "");
    let path = DYNAMIC_SEGMENT.replace_all(&path, "{$name}");
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/users(.:format)", "/users")]
    #[case("/users/:id(.:format)", "/users/{id}")]
    #[case("/users/:user_id/posts/:id", "/users/{user_id}/posts/{id}")]
    #[case("/files/*path", "/files/{path}")]
    #[case("/search(/:page)", "/search/{page}")]
    #[case("/", "/")]
    #[case("users/", "/users")]
    fn should_normalize_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(input), expected);
    }

    #[test]
    fn should_build_handler_identity() {
        let record = RouteRecord::new(Verb::Get, "/api/v1/users", "api/v1/users", "index");

        let route = RouteBuilder::build(&record);

        assert_eq!(route.handler_identity(), "Api::V1::UsersController#index");
        assert_eq!(route.display_name(), "api/v1/users#index");
    }

    #[test]
    fn should_merge_handler_and_container_annotations() {
        let record = RouteRecord::new(Verb::Get, "/users", "users", "index")
            .with_documentation("# List users\n# @tags Users\n# @auth [bearer]")
            .with_container_documentation("# @tags Admin, Users\n# @auth [basic]")
            .with_tag("Legacy");

        let route = RouteBuilder::build(&record);

        assert_eq!(route.tags(), ["Users", "Admin", "Legacy"]);
        assert_eq!(route.auth_schemes(), Some(["bearer".to_string()].as_slice()));
        assert!(route.has_tag_annotation());
        assert_eq!(route.docstring().summary(), Some("List users"));
    }

    #[test]
    fn should_degrade_missing_documentation() {
        let record = RouteRecord::new(Verb::Post, "/users", "users", "create");

        let route = RouteBuilder::build(&record);

        assert_eq!(route.docstring(), &Docstring::default());
        assert!(route.annotations().is_empty());
    }
}
