//! Handler documentation: doc-marker stripping and `@annotation` parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::spec::ParameterIn;

/// Lines mentioning one of these are linter directives or reminders, not documentation.
const IGNORED_LINE_MARKERS: &[&str] = &["rubocop", "clippy", "eslint", "TODO"];

/// Per-line doc markers, longest first.
const DOC_MARKERS: &[&str] = &["//!", "///", "#"];

static PARAMETER_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^\s(]+)\s*\((?P<location>\w+)\)\s*(?P<rest>.*)$")
        .expect("a valid regex")
});

static STATUS_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<description>.*?)\s*\((?P<status>\d{3})\)\s*(?P<rest>.*)$")
        .expect("a valid regex")
});

/// A type reference inside an annotation: `[!User]` is a required `User`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// The type expression, e.g. `Array<User>`.
    pub expression: String,
    /// Whether the type was prefixed with `!`.
    pub required: bool,
}

impl TypeRef {
    fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.strip_prefix('!') {
            Some(rest) => Self {
                expression: rest.trim().to_string(),
                required: true,
            },
            None => Self {
                expression: text.to_string(),
                required: false,
            },
        }
    }
}

/// `@parameter name(location) [!Type] description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterAnnotation {
    /// The parameter name.
    pub name: String,
    /// Where the parameter is sent.
    pub location: ParameterIn,
    /// The parameter type.
    pub schema: TypeRef,
    /// The description.
    pub description: String,
}

/// `@request_body description [!Type]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyAnnotation {
    /// The description.
    pub description: String,
    /// The body type.
    pub schema: TypeRef,
}

/// `@response description(code) [Type]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseAnnotation {
    /// The description.
    pub description: String,
    /// The HTTP status code.
    pub status: u16,
    /// The body type, if any.
    pub schema: Option<TypeRef>,
}

/// `@request_body_example description [Type] <json>` or
/// `@response_example description(code) [Type] <json>`
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleAnnotation {
    /// The description, used as example summary.
    pub description: String,
    /// The HTTP status code, for response examples.
    pub status: Option<u16>,
    /// The example payload.
    pub value: Value,
}

/// A structured `@name` line of the documentation.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// `@summary <text>`
    Summary(String),
    /// `@tags A, B`
    Tags(Vec<String>),
    /// `@no_auth`
    NoAuth,
    /// `@auth [scheme_a, scheme_b]`
    Auth(Vec<String>),
    /// `@oas_include`
    OasInclude,
    /// `@parameter`
    Parameter(ParameterAnnotation),
    /// `@request_body`
    RequestBody(BodyAnnotation),
    /// `@request_body_example`
    RequestBodyExample(ExampleAnnotation),
    /// `@response`
    Response(ResponseAnnotation),
    /// `@response_example`
    ResponseExample(ExampleAnnotation),
}

impl Annotation {
    /// Parses an annotation from its text, without the leading `@`.
    ///
    /// Returns `None` for unknown or malformed annotations.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (name, rest) = text
            .split_once(char::is_whitespace)
            .map_or((text, ""), |(name, rest)| (name, rest.trim()));

        let result = match name {
            "summary" => (!rest.is_empty()).then(|| Self::Summary(rest.to_string())),
            "tags" => Some(Self::Tags(split_list(rest))),
            "no_auth" => Some(Self::NoAuth),
            "auth" => Some(Self::Auth(split_list(
                rest.trim_start_matches('[').trim_end_matches(']'),
            ))),
            "oas_include" => Some(Self::OasInclude),
            "parameter" => parse_parameter(rest).map(Self::Parameter),
            "request_body" => parse_body(rest).map(Self::RequestBody),
            "request_body_example" => parse_example(rest, false).map(Self::RequestBodyExample),
            "response" => parse_response(rest).map(Self::Response),
            "response_example" => parse_example(rest, true).map(Self::ResponseExample),
            _ => {
                tracing::debug!(annotation = name, "unknown annotation ignored");
                return None;
            }
        };

        if result.is_none() {
            tracing::warn!(annotation = name, text = rest, "malformed annotation skipped");
        }
        result
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|it| !it.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Splits `text` around its first top level `[...]` group.
///
/// Returns the text before the group, the group content, and the text after.
fn split_bracketed(text: &str) -> Option<(&str, &str, &str)> {
    let start = text.find('[')?;
    let mut depth = 0_usize;
    for (index, ch) in text.char_indices().skip_while(|(index, _)| *index < start) {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    let (before, group) = text.split_at(start);
                    let (group, after) = group.split_at(index - start + 1);
                    let inner = group.trim_start_matches('[').trim_end_matches(']');
                    return Some((before.trim(), inner, after.trim()));
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_parameter(text: &str) -> Option<ParameterAnnotation> {
    let captures = PARAMETER_HEAD.captures(text)?;
    let location = captures["location"].parse::<ParameterIn>().ok()?;
    let (_, schema, description) = split_bracketed(&captures["rest"])?;

    Some(ParameterAnnotation {
        name: captures["name"].to_string(),
        location,
        schema: TypeRef::parse(schema),
        description: description.to_string(),
    })
}

fn parse_body(text: &str) -> Option<BodyAnnotation> {
    let (description, schema, _) = split_bracketed(text)?;

    Some(BodyAnnotation {
        description: description.to_string(),
        schema: TypeRef::parse(schema),
    })
}

fn parse_response(text: &str) -> Option<ResponseAnnotation> {
    let captures = STATUS_HEAD.captures(text)?;
    let status = captures["status"].parse().ok()?;
    let schema = split_bracketed(&captures["rest"]).map(|(_, schema, _)| TypeRef::parse(schema));

    Some(ResponseAnnotation {
        description: captures["description"].to_string(),
        status,
        schema,
    })
}

fn parse_example(text: &str, with_status: bool) -> Option<ExampleAnnotation> {
    let (head, _, payload) = split_bracketed(text)?;
    let (description, status) = if with_status {
        let captures = STATUS_HEAD.captures(head)?;
        (
            captures["description"].to_string(),
            Some(captures["status"].parse().ok()?),
        )
    } else {
        (head.to_string(), None)
    };

    let value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, "example payload is not valid JSON");
            return None;
        }
    };

    Some(ExampleAnnotation {
        description,
        status,
        value,
    })
}

/// Parsed handler documentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Docstring {
    summary: Option<String>,
    description: Option<String>,
    annotations: Vec<Annotation>,
}

impl Docstring {
    /// Parses documentation text.
    ///
    /// Doc markers (`#`, `///`, `//!`) are stripped per line and linter or TODO lines
    /// dropped. Lines starting with `@` open an annotation; the following indented
    /// lines continue it. Remaining lines are prose: the first line is the summary,
    /// the whole prose the description.
    pub fn parse(text: &str) -> Self {
        let mut prose = Vec::new();
        let mut raw_annotations = Vec::new();
        let mut pending: Option<String> = None;

        for raw in normalize_lines(text) {
            let indented = raw.starts_with(char::is_whitespace);
            let line = raw.trim();
            if let Some(annotation) = line.strip_prefix('@') {
                raw_annotations.extend(pending.replace(annotation.to_string()));
                continue;
            }
            match pending.as_mut() {
                Some(current) if indented && !line.is_empty() => {
                    current.push('\n');
                    current.push_str(line);
                }
                Some(_) => {
                    raw_annotations.extend(pending.take());
                    prose.push(line);
                }
                None => prose.push(line),
            }
        }
        raw_annotations.extend(pending);

        let prose = prose.join("\n");
        let prose = prose.trim();
        let summary = prose
            .lines()
            .next()
            .map(str::trim)
            .filter(|it| !it.is_empty())
            .map(ToString::to_string);
        let description = (!prose.is_empty()).then(|| prose.to_string());
        let annotations = raw_annotations
            .iter()
            .filter_map(|it| Annotation::parse(it))
            .collect();

        Self {
            summary,
            description,
            annotations,
        }
    }

    /// The first prose line.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The whole prose.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The annotations, in documentation order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub(crate) fn into_annotations(self) -> Vec<Annotation> {
        self.annotations
    }
}

fn normalize_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .filter(|line| !IGNORED_LINE_MARKERS.iter().any(|marker| line.contains(marker)))
        .map(strip_doc_marker)
}

// Keeps the indentation after the marker: it tells annotation continuations apart.
fn strip_doc_marker(line: &str) -> &str {
    let trimmed = line.trim_start();
    DOC_MARKERS
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
        .map_or(line, |rest| rest.strip_prefix(' ').unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn should_strip_markers_and_ignored_lines() {
        let doc = Docstring::parse(
            "# Lists the users.\n\
             # rubocop:disable Metrics/AbcSize\n\
             #\n\
             # Paginated, newest first.\n\
             # TODO remove legacy format",
        );

        assert_eq!(doc.summary(), Some("Lists the users."));
        assert_eq!(
            doc.description(),
            Some("Lists the users.\n\nPaginated, newest first.")
        );
        assert!(doc.annotations().is_empty());
    }

    #[test]
    fn should_parse_rust_doc_markers() {
        let doc = Docstring::parse("/// Creates a user.\n/// @tags Users, Admin\n/// @no_auth");

        assert_eq!(doc.summary(), Some("Creates a user."));
        assert_eq!(
            doc.annotations(),
            [
                Annotation::Tags(vec!["Users".to_string(), "Admin".to_string()]),
                Annotation::NoAuth,
            ]
        );
    }

    #[test]
    fn should_parse_parameter() {
        let annotation = Annotation::parse("parameter page(query) [!Integer] The page number");

        assert_eq!(
            annotation,
            Some(Annotation::Parameter(ParameterAnnotation {
                name: "page".to_string(),
                location: ParameterIn::Query,
                schema: TypeRef {
                    expression: "Integer".to_string(),
                    required: true,
                },
                description: "The page number".to_string(),
            }))
        );
    }

    #[test]
    fn should_parse_request_body_with_nested_type() {
        let annotation = Annotation::parse("request_body The user [!Hash{ name: !String, tags: Array<String> }]");

        let Some(Annotation::RequestBody(body)) = &annotation else {
            panic!("expected a request body, got {annotation:?}");
        };
        assert_eq!(body.description, "The user");
        assert_eq!(body.schema.expression, "Hash{ name: !String, tags: Array<String> }");
        assert!(body.schema.required);
    }

    #[rstest]
    #[case("response Success(200) [Array<User>]", 200, Some("Array<User>"))]
    #[case("response Created (201) [User]", 201, Some("User"))]
    #[case("response No content(204)", 204, None)]
    fn should_parse_response(
        #[case] text: &str,
        #[case] status: u16,
        #[case] expression: Option<&str>,
    ) {
        let Some(Annotation::Response(response)) = Annotation::parse(text) else {
            panic!("expected a response for {text}");
        };

        assert_eq!(response.status, status);
        assert_eq!(
            response.schema.map(|it| it.expression).as_deref(),
            expression
        );
    }

    #[test]
    fn should_parse_multiline_example() {
        let doc = Docstring::parse(
            "# @response_example Found(200) [User]\n\
             #   { \"id\": 1,\n\
             #     \"name\": \"Ada\" }\n\
             #\n\
             # Trailing prose.",
        );

        assert_eq!(
            doc.annotations(),
            [Annotation::ResponseExample(ExampleAnnotation {
                description: "Found".to_string(),
                status: Some(200),
                value: json!({ "id": 1, "name": "Ada" }),
            })]
        );
        assert_eq!(doc.summary(), Some("Trailing prose."));
    }

    #[test]
    fn should_end_annotation_on_unindented_line() {
        let doc = Docstring::parse("# @tags Users\n# Returns every user.");

        assert_eq!(
            doc.annotations(),
            [Annotation::Tags(vec!["Users".to_string()])]
        );
        assert_eq!(doc.summary(), Some("Returns every user."));
    }

    #[test]
    fn should_continue_annotation_on_indented_line() {
        let doc = Docstring::parse(
            "/// @request_body_example Ada [User]\n\
             ///   { \"name\": \"Ada\" }\n\
             /// Creates a user.",
        );

        assert_eq!(
            doc.annotations(),
            [Annotation::RequestBodyExample(ExampleAnnotation {
                description: "Ada".to_string(),
                status: None,
                value: json!({ "name": "Ada" }),
            })]
        );
        assert_eq!(doc.summary(), Some("Creates a user."));
    }

    #[rstest]
    #[case("parameter id [Integer] missing location")]
    #[case("parameter id(body) [Integer] bad location")]
    #[case("request_body no type")]
    #[case("response missing status [User]")]
    #[case("request_body_example bad [User] {not json}")]
    #[case("unknown_annotation whatever")]
    fn should_skip_malformed_annotation(#[case] text: &str) {
        assert_eq!(Annotation::parse(text), None);
    }

    #[test]
    fn should_parse_auth_list() {
        assert_eq!(
            Annotation::parse("auth [bearer, api_key_header]"),
            Some(Annotation::Auth(vec![
                "bearer".to_string(),
                "api_key_header".to_string()
            ]))
        );
    }
}
