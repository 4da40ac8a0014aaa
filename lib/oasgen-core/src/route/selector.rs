use super::{OasRoute, RouteRecord};
use crate::{Configuration, IncludeMode};

/// Decides which routes end up in the document.
#[derive(Debug, Clone, Copy)]
pub struct RouteSelector<'a> {
    config: &'a Configuration,
}

impl<'a> RouteSelector<'a> {
    /// Creates a selector for a configuration.
    pub fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    /// Whether a raw record is documented: below the API path, with a documented verb,
    /// and not ignored.
    pub fn accepts_record(&self, record: &RouteRecord, normalized_path: &str) -> bool {
        is_below(normalized_path, self.config.api_path())
            && self.config.http_verbs().contains(&record.verb)
            && !self.is_ignored(record)
    }

    /// Whether a built route passes the include mode.
    pub fn accepts_route(&self, route: &OasRoute) -> bool {
        match self.config.include_mode() {
            IncludeMode::All => true,
            IncludeMode::WithTags => route.has_tag_annotation(),
            IncludeMode::Explicit => route.is_explicitly_included(),
        }
    }

    fn is_ignored(&self, record: &RouteRecord) -> bool {
        let display_name = record.display_name();
        self.config
            .ignored_actions()
            .iter()
            .any(|ignored| *ignored == record.container || *ignored == display_name)
    }
}

fn is_below(path: &str, api_path: &str) -> bool {
    let prefix = api_path.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::route::{RouteBuilder, Verb};

    #[rstest]
    #[case("/api/users", "/api", true)]
    #[case("/api", "/api/", true)]
    #[case("/apis/users", "/api", false)]
    #[case("/users", "/", true)]
    fn should_check_api_path(#[case] path: &str, #[case] api_path: &str, #[case] expected: bool) {
        assert_eq!(is_below(path, api_path), expected);
    }

    #[test]
    fn should_ignore_containers_and_actions() {
        let config = Configuration::builder()
            .add_ignored_action("projects")
            .add_ignored_action("users#new")
            .build()
            .unwrap_or_default();
        let selector = RouteSelector::new(&config);

        let project = RouteRecord::new(Verb::Get, "/projects", "projects", "index");
        let new_user = RouteRecord::new(Verb::Get, "/users/new", "users", "new");
        let users = RouteRecord::new(Verb::Get, "/users", "users", "index");

        assert!(!selector.accepts_record(&project, "/projects"));
        assert!(!selector.accepts_record(&new_user, "/users/new"));
        assert!(selector.accepts_record(&users, "/users"));
    }

    #[test]
    fn should_filter_verbs() {
        let config = Configuration::builder()
            .with_http_verbs([Verb::Get])
            .build()
            .unwrap_or_default();
        let selector = RouteSelector::new(&config);

        let create = RouteRecord::new(Verb::Post, "/users", "users", "create");

        assert!(!selector.accepts_record(&create, "/users"));
    }

    #[rstest]
    #[case(IncludeMode::All, "# List", true)]
    #[case(IncludeMode::WithTags, "# List", false)]
    #[case(IncludeMode::WithTags, "# @tags Users", true)]
    #[case(IncludeMode::Explicit, "# @tags Users", false)]
    #[case(IncludeMode::Explicit, "# @oas_include", true)]
    fn should_apply_include_mode(
        #[case] mode: IncludeMode,
        #[case] documentation: &str,
        #[case] expected: bool,
    ) {
        let config = Configuration::builder()
            .with_include_mode(mode)
            .build()
            .unwrap_or_default();
        let record =
            RouteRecord::new(Verb::Get, "/users", "users", "index").with_documentation(documentation);

        let route = RouteBuilder::build(&record);

        assert_eq!(RouteSelector::new(&config).accepts_route(&route), expected);
    }
}
