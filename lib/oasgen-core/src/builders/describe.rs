use crate::Verb;

/// Common API path prefixes that are not business resources.
const SKIP_PATH_PREFIXES: &[&str] = &[
    "api", "v1", "v2", "v3", "rest", "service", "public", "internal",
];

fn is_param(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

fn resource_segments(path: &str) -> Vec<&str> {
    let segments = path
        .split('/')
        .filter(|it| !it.is_empty())
        .collect::<Vec<_>>();
    let start = segments
        .iter()
        .take_while(|segment| SKIP_PATH_PREFIXES.contains(segment))
        .count();
    segments.into_iter().skip(start).collect()
}

/// A human readable summary derived from the verb and the path.
pub(crate) fn generate_description(verb: Verb, path: &str) -> Option<String> {
    let segments = resource_segments(path);
    let first = *segments.first()?;
    let last = *segments.last()?;
    let has_id = segments.iter().any(|it| is_param(it));

    let resource = if segments.len() == 1 {
        first
    } else if is_param(last) {
        segments
            .iter()
            .rev()
            .find(|it| !is_param(it))
            .copied()
            .unwrap_or(first)
    } else {
        match last {
            "import" => return Some(format!("Import {first}")),
            "upload" => return Some(format!("Upload {first}")),
            "export" => return Some(format!("Export {first}")),
            "search" => return Some(format!("Search {first}")),
            _ => last,
        }
    };

    let summary = match (verb, has_id) {
        (Verb::Get, true) => format!("Retrieve {} by ID", singularize(resource)),
        (Verb::Get, false) => format!("Retrieve {resource}"),
        (Verb::Post, true) => format!("Create {} by ID", singularize(resource)),
        (Verb::Post, false) => format!("Create {}", singularize(resource)),
        (Verb::Put, true) => format!("Update {} by ID", singularize(resource)),
        (Verb::Put, false) => format!("Update {resource}"),
        (Verb::Patch, true) => format!("Partially update {} by ID", singularize(resource)),
        (Verb::Patch, false) => format!("Partially update {resource}"),
        (Verb::Delete, true) => format!("Delete {} by ID", singularize(resource)),
        (Verb::Delete, false) => format!("Delete {resource}"),
    };
    Some(summary)
}

/// The first resource segment of the path, titleized: `/api/v1/user_groups/{id}` gives `User Groups`.
pub(crate) fn namespace_tag(path: &str) -> Option<String> {
    use cruet::*;
    let segments = resource_segments(path);
    let first = segments.into_iter().find(|it| !is_param(it))?;
    Some(first.to_title_case())
}

/// The container name, titleized: `api/v1/user_groups` gives `User Groups`.
pub(crate) fn controller_tag(container: &str) -> Option<String> {
    use cruet::*;
    let name = container.rsplit('/').find(|it| !it.is_empty())?;
    Some(name.to_title_case())
}

/// The model name a container is about: `api/v1/users` gives `User`.
pub(crate) fn model_name(container: &str) -> Option<String> {
    use cruet::*;
    let name = container.rsplit('/').find(|it| !it.is_empty())?;
    Some(singularize(name).to_pascal_case())
}

/// Singularizes an English word, with the irregular plurals `cruet` misses.
pub(crate) fn singularize(word: &str) -> String {
    match word {
        "children" => return "child".to_string(),
        "people" => return "person".to_string(),
        "data" => return "datum".to_string(),
        "feet" => return "foot".to_string(),
        "teeth" => return "tooth".to_string(),
        "geese" => return "goose".to_string(),
        "men" => return "man".to_string(),
        "women" => return "woman".to_string(),
        _ => {}
    }

    use cruet::*;
    let result = word.to_singular();
    if result.is_empty() {
        word.to_string()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Verb::Get, "/users", Some("Retrieve users"))]
    #[case(Verb::Post, "/users", Some("Create user"))]
    #[case(Verb::Get, "/users/{id}", Some("Retrieve user by ID"))]
    #[case(Verb::Patch, "/users/{id}", Some("Partially update user by ID"))]
    #[case(Verb::Delete, "/api/v1/users/{id}", Some("Delete user by ID"))]
    #[case(Verb::Post, "/observations/import", Some("Import observations"))]
    #[case(Verb::Get, "/users/search", Some("Search users"))]
    #[case(Verb::Get, "/users/{user_id}/posts/{id}", Some("Retrieve post by ID"))]
    #[case(Verb::Get, "/api", None)]
    #[case(Verb::Get, "/", None)]
    fn should_generate_description(
        #[case] verb: Verb,
        #[case] path: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(generate_description(verb, path).as_deref(), expected);
    }

    #[rstest]
    #[case("/users", Some("Users"))]
    #[case("/api/v1/user_groups/{id}", Some("User Groups"))]
    #[case("/", None)]
    fn should_derive_namespace_tag(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(namespace_tag(path).as_deref(), expected);
    }

    #[test]
    fn should_derive_names_from_container() {
        assert_eq!(controller_tag("api/v1/users").as_deref(), Some("Users"));
        assert_eq!(model_name("api/v1/people").as_deref(), Some("Person"));
        assert_eq!(model_name("blog_posts").as_deref(), Some("BlogPost"));
    }

    #[test]
    fn should_singularize() {
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("children"), "child");
    }
}
