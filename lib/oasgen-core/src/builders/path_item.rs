use indexmap::IndexMap;

use super::{BuildContext, OperationBuilder};
use crate::route::OasRoute;
use crate::spec::{Operation, Parameter, Paths, RequestBody, Responses};

/// Groups routes by path: one [`PathItem`](crate::spec::PathItem) per path, one operation per verb slot.
#[derive(Debug, Default)]
pub struct PathItemBuilder {
    paths: Paths,
}

impl PathItemBuilder {
    /// Starts with no paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the operation of a route and places it under its path.
    ///
    /// A second route on the same path and verb is merged into the existing operation.
    pub fn add_route(&mut self, ctx: &mut BuildContext<'_>, route: &OasRoute) {
        let operation = OperationBuilder::build(ctx, route);
        let slot = self
            .paths
            .entry(route.path().to_string())
            .or_default()
            .slot_mut(route.verb());
        *slot = Some(match slot.take() {
            Some(current) => {
                tracing::debug!(path = %route.path(), verb = %route.verb(), "merging operations");
                merge_operation(current, operation)
            }
            None => operation,
        });
    }

    /// The paths built so far.
    pub fn build(self) -> Paths {
        self.paths
    }
}

/// Merges two operations of the same slot, the current one winning on conflicts.
fn merge_operation(current: Operation, new: Operation) -> Operation {
    let operation_id = current
        .operation_id()
        .or(new.operation_id())
        .unwrap_or_default()
        .to_string();

    Operation::new()
        .with_tags(merge_tags(current.tags(), new.tags()))
        .with_summary(current.summary().or(new.summary()).map(ToString::to_string))
        .with_description(
            current
                .description()
                .or(new.description())
                .map(ToString::to_string),
        )
        .with_operation_id(operation_id)
        .with_parameters(merge_parameters(current.parameters(), new.parameters()))
        .with_request_body(merge_request_body(current.request_body(), new.request_body()))
        .with_responses(merge_responses(current.responses(), new.responses()))
        .with_security(new.security().or(current.security()).map(<[_]>::to_vec))
}

fn merge_tags(current: &[String], new: &[String]) -> Vec<String> {
    let mut result = current.to_vec();
    result.extend_from_slice(new);
    result.sort();
    result.dedup();
    result
}

fn merge_parameters(current: &[Parameter], new: &[Parameter]) -> Vec<Parameter> {
    let mut result = IndexMap::new();
    for param in current.iter().chain(new) {
        result
            .entry((param.name().to_string(), param.location()))
            .or_insert_with(|| param.clone());
    }
    result.into_values().collect()
}

fn merge_request_body(
    current: Option<&RequestBody>,
    new: Option<&RequestBody>,
) -> Option<RequestBody> {
    match (current, new) {
        (Some(current), Some(new)) => {
            let mut merged = current.clone();
            merged = merged.with_required(current.is_required() || new.is_required());
            for (content_type, media) in new.content() {
                merged
                    .content_mut()
                    .entry(content_type.clone())
                    .or_insert_with(|| media.clone());
            }
            Some(merged)
        }
        (current, new) => current.or(new).cloned(),
    }
}

fn merge_responses(current: &Responses, new: &Responses) -> Responses {
    let mut result = current.clone();
    for (status, response) in new {
        result
            .entry(status.clone())
            .or_insert_with(|| response.clone());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{RouteBuilder, RouteRecord, StaticMetadataSource, Verb};
    use crate::Configuration;

    fn paths(records: &[RouteRecord]) -> Paths {
        let config = Configuration::builder()
            .with_default_responses(false)
            .build()
            .unwrap_or_default();
        let source = StaticMetadataSource::new();
        let mut ctx = BuildContext::new(&config, &source);
        let mut builder = PathItemBuilder::new();
        for record in records {
            builder.add_route(&mut ctx, &RouteBuilder::build(record));
        }
        builder.build()
    }

    #[test]
    fn should_group_routes_by_path() {
        let paths = paths(&[
            RouteRecord::new(Verb::Get, "/users", "users", "index"),
            RouteRecord::new(Verb::Post, "/users", "users", "create"),
            RouteRecord::new(Verb::Get, "/users/:id", "users", "show"),
        ]);

        let summary = paths
            .iter()
            .map(|(path, item)| {
                let verbs = item.operations().map(|(verb, _)| verb.as_str()).collect::<Vec<_>>();
                format!("{path} {}", verbs.join(","))
            })
            .collect::<Vec<_>>();
        assert_eq!(summary, ["/users GET,POST", "/users/{id} GET"]);
    }

    #[test]
    fn should_merge_operations_on_the_same_slot() {
        let paths = paths(&[
            RouteRecord::new(Verb::Get, "/users(.:format)", "users", "index")
                .with_documentation("# List users\n# @tags Users\n# @parameter page(query) [Integer] The page"),
            RouteRecord::new(Verb::Get, "/users", "admin/users", "index")
                .with_documentation("# @tags Admin\n# @parameter sort(query) [String] The sort order"),
        ]);

        let operation = paths.get("/users").and_then(|it| it.slot(Verb::Get));

        assert_eq!(operation.map(Operation::tags), Some(["Admin", "Users"].map(String::from).as_slice()));
        assert_eq!(operation.and_then(Operation::summary), Some("List users"));
        assert_eq!(operation.and_then(Operation::operation_id), Some("indexUsers"));
        let params = operation
            .map(|it| it.parameters().iter().map(Parameter::name).collect::<Vec<_>>())
            .unwrap_or_default();
        assert_eq!(params, ["page", "sort"]);
    }
}
