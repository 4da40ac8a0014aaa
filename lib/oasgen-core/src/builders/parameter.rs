use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::{BuildContext, TypeExpr, content::resolve_shape};
use crate::route::{OasRoute, ParameterAnnotation};
use crate::spec::{Parameter, ParameterIn};

static PATH_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w+)}").expect("a valid regex"));

/// Builds the parameters of an operation.
///
/// Path parameters come from the path template as required strings; `@parameter`
/// annotations add parameters or override the discovered ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterBuilder;

impl ParameterBuilder {
    /// Builds the parameters of a route, path parameters first.
    pub fn build(ctx: &mut BuildContext<'_>, route: &OasRoute) -> Vec<Parameter> {
        let mut result = IndexMap::<(String, ParameterIn), Parameter>::new();

        for captures in PATH_PARAM.captures_iter(route.path()) {
            let name = captures["name"].to_string();
            let schema = resolve_shape(ctx, &TypeExpr::String);
            let param = Parameter::new(name.clone(), ParameterIn::Path).with_schema(schema);
            result.insert((name, ParameterIn::Path), param);
        }

        for annotation in route.parameters() {
            let param = Self::from_annotation(ctx, annotation);
            result.insert((annotation.name.clone(), annotation.location), param);
        }

        result.into_values().collect()
    }

    /// Builds one parameter from its annotation.
    pub fn from_annotation(ctx: &mut BuildContext<'_>, annotation: &ParameterAnnotation) -> Parameter {
        let mut param = Parameter::new(annotation.name.clone(), annotation.location)
            .with_required(annotation.schema.required);
        if !annotation.description.is_empty() {
            param = param.with_description(annotation.description.clone());
        }
        match annotation.schema.expression.parse::<TypeExpr>() {
            Ok(expr) => param.with_schema(resolve_shape(ctx, &expr)),
            Err(error) => {
                tracing::warn!(%error, parameter = %annotation.name, "parameter type ignored");
                param
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{RouteBuilder, RouteRecord, StaticMetadataSource, Verb};
    use crate::Configuration;

    #[test]
    fn should_discover_and_override_path_parameters() {
        let config = Configuration::default();
        let source = StaticMetadataSource::new();
        let mut ctx = BuildContext::new(&config, &source);
        let record = RouteRecord::new(Verb::Get, "/users/:user_id/posts/:id", "posts", "show")
            .with_documentation(
                "# @parameter id(path) [Integer] The post id\n# @parameter expand(query) [Boolean] Expand relations",
            );
        let route = RouteBuilder::build(&record);

        let params = ParameterBuilder::build(&mut ctx, &route);

        let summary = params
            .iter()
            .map(|it| format!("{}:{}:{}", it.name(), it.location(), it.is_required()))
            .collect::<Vec<_>>();
        assert_eq!(summary, ["user_id:path:true", "id:path:true", "expand:query:false"]);
        assert_eq!(params.get(1).and_then(Parameter::description), Some("The post id"));
    }
}
