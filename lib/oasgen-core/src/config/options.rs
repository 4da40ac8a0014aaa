use std::fmt;
use std::str::FromStr;

use http::StatusCode;
use serde::{Deserialize, Serialize};

use super::ConfigurationError;

/// Which routes end up in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludeMode {
    /// Every selected route.
    #[default]
    All,
    /// Only routes carrying a `@tags` annotation.
    WithTags,
    /// Only routes carrying an `@oas_include` annotation.
    Explicit,
}

impl IncludeMode {
    const ALL: [Self; 3] = [Self::All, Self::WithTags, Self::Explicit];

    /// The configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::WithTags => "with_tags",
            Self::Explicit => "explicit",
        }
    }
}

/// Where default operation tags come from when a route has no `@tags`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultTagsFrom {
    /// The first path segment below the API base path.
    #[default]
    Namespace,
    /// The handler container name.
    Controller,
}

impl DefaultTagsFrom {
    const ALL: [Self; 2] = [Self::Namespace, Self::Controller];

    /// The configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Controller => "controller",
        }
    }
}

/// Error responses that can be added to every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultResponse {
    /// 404, for actions addressing one resource.
    NotFound,
    /// 401, for authenticated routes.
    Unauthorized,
    /// 403, for authenticated routes.
    Forbidden,
    /// 500, for every route.
    InternalServerError,
    /// 422, for create and update actions.
    UnprocessableEntity,
}

impl DefaultResponse {
    /// Every default response.
    pub const ALL: [Self; 5] = [
        Self::NotFound,
        Self::Unauthorized,
        Self::Forbidden,
        Self::InternalServerError,
        Self::UnprocessableEntity,
    ];

    /// The configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::InternalServerError => "internal_server_error",
            Self::UnprocessableEntity => "unprocessable_entity",
        }
    }

    /// The HTTP status.
    pub fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// The name under `components.responses`.
    pub fn component_name(self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::InternalServerError => "InternalServerError",
            Self::UnprocessableEntity => "UnprocessableEntity",
        }
    }
}

macro_rules! config_enum {
    ($name:ident, $option:literal) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConfigurationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_ascii_lowercase();
                Self::ALL
                    .into_iter()
                    .find(|it| it.as_str() == normalized)
                    .ok_or_else(|| {
                        let expected = Self::ALL.map(Self::as_str).join(", ");
                        ConfigurationError::invalid_option($option, value, expected)
                    })
            }
        }
    };
}

config_enum!(IncludeMode, "include_mode");
config_enum!(DefaultTagsFrom, "default_tags_from");
config_enum!(DefaultResponse, "possible_default_responses");

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("all", IncludeMode::All)]
    #[case("with_tags", IncludeMode::WithTags)]
    #[case("EXPLICIT", IncludeMode::Explicit)]
    fn should_parse_include_mode(#[case] input: &str, #[case] expected: IncludeMode) {
        assert_eq!(input.parse::<IncludeMode>().ok(), Some(expected));
    }

    #[test]
    fn should_reject_unknown_include_mode() {
        let error = "some".parse::<IncludeMode>().unwrap_err();

        insta::assert_snapshot!(
            error.to_string(),
            @"invalid value 'some' for include_mode, expected one of: all, with_tags, explicit"
        );
    }

    #[test]
    fn should_deserialize_snake_case() {
        let value: DefaultResponse =
            serde_json::from_str(r#""unprocessable_entity""#).unwrap_or(DefaultResponse::NotFound);

        assert_eq!(value, DefaultResponse::UnprocessableEntity);
        assert_eq!(value.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn should_display_default_tags_from() {
        assert_eq!(DefaultTagsFrom::Controller.to_string(), "controller");
        assert_eq!("namespace".parse::<DefaultTagsFrom>().ok(), Some(DefaultTagsFrom::Namespace));
    }
}
