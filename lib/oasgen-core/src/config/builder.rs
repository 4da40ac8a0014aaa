use std::time::Duration;

use indexmap::IndexMap;

use super::{
    CacheConfig, CacheKeyGenerator, Configuration, ConfigurationError, DefaultResponse,
    DefaultTagsFrom, IncludeMode, Servers,
};
use crate::builders::TypeExpr;
use crate::spec::{ExternalDocs, Info, PredefinedScheme, SecurityScheme, Server, Tag};
use crate::Verb;

/// Builder for [`Configuration`].
///
/// # Default Configuration
///
/// - **Info**: title `OasGen`, version `1.0.0`
/// - **Servers**: `http://localhost:3000` (Local)
/// - **API path**: `/`
/// - **HTTP verbs**: GET, POST, PUT, PATCH, DELETE
/// - **Include mode**: all routes, default tags from the namespace
/// - **Auto-discovery**: request bodies and responses
/// - **Security**: every route authenticated by default, no scheme configured
/// - **Default responses**: all five, with a `{ status, error }` body
/// - **Cache**: disabled, one hour TTL
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use oasgen_core::{Configuration, IncludeMode, PredefinedScheme};
///
/// # fn example() -> Result<(), oasgen_core::ConfigurationError> {
/// let config = Configuration::builder()
///     .with_api_path("/api")
///     .with_include_mode(IncludeMode::WithTags)
///     .with_security_schema(PredefinedScheme::BearerJwt)
///     .with_caching(true)
///     .with_cache_ttl(Duration::from_secs(300))
///     .build()?;
///
/// assert_eq!(config.api_path(), "/api");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        let config = Configuration {
            info: Info::default(),
            servers: Servers::default(),
            tags: Vec::new(),
            external_docs: None,
            api_path: "/".to_string(),
            ignored_actions: Vec::new(),
            http_verbs: Verb::ALL.to_vec(),
            include_mode: IncludeMode::default(),
            default_tags_from: DefaultTagsFrom::default(),
            autodiscover_request_body: true,
            autodiscover_responses: true,
            authenticate_all_routes_by_default: true,
            security_schemas: IndexMap::new(),
            set_default_responses: true,
            possible_default_responses: DefaultResponse::ALL.to_vec(),
            response_body_of_default: "Hash{ status: !Integer, error: String }".to_string(),
            response_body_of_unprocessable_entity: "Hash{ errors: Array<String> }".to_string(),
            environment: "development".to_string(),
            cache: CacheConfig::default(),
        };
        Self { config }
    }
}

impl ConfigurationBuilder {
    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::InvalidApiPath`] if the API path does not start with `/`
    /// - [`ConfigurationError::InvalidTypeExpression`] if a default response body cannot be parsed
    pub fn build(self) -> Result<Configuration, ConfigurationError> {
        let config = self.config;

        if !config.api_path.starts_with('/') {
            return Err(ConfigurationError::InvalidApiPath {
                path: config.api_path,
            });
        }

        for (option, expression) in [
            ("response_body_of_default", &config.response_body_of_default),
            (
                "response_body_of_unprocessable_entity",
                &config.response_body_of_unprocessable_entity,
            ),
        ] {
            expression.parse::<TypeExpr>().map_err(|error| {
                ConfigurationError::InvalidTypeExpression {
                    option: option.to_string(),
                    reason: error.to_string(),
                }
            })?;
        }

        Ok(config)
    }

    pub(super) fn into_configuration(self) -> Configuration {
        self.config
    }

    /// Sets the info object.
    pub fn with_info(mut self, info: Info) -> Self {
        self.config.info = info;
        self
    }

    /// Sets the server list, static or computed.
    pub fn with_servers(mut self, servers: impl Into<Servers>) -> Self {
        self.config.servers = servers.into();
        self
    }

    /// Adds a static server.
    ///
    /// A computed server list is replaced by a static list holding this server.
    pub fn add_server(mut self, server: Server) -> Self {
        match &mut self.config.servers {
            Servers::Static(servers) => servers.push(server),
            Servers::Computed(_) => self.config.servers = Servers::Static(vec![server]),
        }
        self
    }

    /// Adds a document level tag.
    pub fn add_tag(mut self, tag: Tag) -> Self {
        self.config.tags.push(tag);
        self
    }

    /// Sets the external documentation link.
    pub fn with_external_docs(mut self, external_docs: ExternalDocs) -> Self {
        self.config.external_docs = Some(external_docs);
        self
    }

    /// Sets the API base path.
    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.config.api_path = api_path.into();
        self
    }

    /// Ignores a container (`users`) or an action (`users#new`).
    pub fn add_ignored_action(mut self, action: impl Into<String>) -> Self {
        self.config.ignored_actions.push(action.into());
        self
    }

    /// Sets the documented HTTP verbs.
    pub fn with_http_verbs(mut self, verbs: impl IntoIterator<Item = Verb>) -> Self {
        self.config.http_verbs = verbs.into_iter().collect();
        self
    }

    /// Sets the include mode.
    pub fn with_include_mode(mut self, mode: IncludeMode) -> Self {
        self.config.include_mode = mode;
        self
    }

    /// Sets where default tags come from.
    pub fn with_default_tags_from(mut self, source: DefaultTagsFrom) -> Self {
        self.config.default_tags_from = source;
        self
    }

    /// Enables or disables request body inference.
    pub fn with_autodiscover_request_body(mut self, enabled: bool) -> Self {
        self.config.autodiscover_request_body = enabled;
        self
    }

    /// Enables or disables response inference.
    pub fn with_autodiscover_responses(mut self, enabled: bool) -> Self {
        self.config.autodiscover_responses = enabled;
        self
    }

    /// Makes every route authenticated unless marked `@no_auth`.
    pub fn with_authenticate_all_routes_by_default(mut self, enabled: bool) -> Self {
        self.config.authenticate_all_routes_by_default = enabled;
        self
    }

    /// Uses a predefined security scheme, replacing the configured ones.
    pub fn with_security_schema(mut self, scheme: PredefinedScheme) -> Self {
        self.config.security_schemas = IndexMap::from([(scheme.name().to_string(), scheme.scheme())]);
        self
    }

    /// Adds a named security scheme.
    pub fn add_security_schema(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.config.security_schemas.insert(name.into(), scheme);
        self
    }

    /// Enables or disables default error responses.
    pub fn with_default_responses(mut self, enabled: bool) -> Self {
        self.config.set_default_responses = enabled;
        self
    }

    /// Sets the default error responses that may be added.
    pub fn with_possible_default_responses(
        mut self,
        responses: impl IntoIterator<Item = DefaultResponse>,
    ) -> Self {
        self.config.possible_default_responses = responses.into_iter().collect();
        self
    }

    /// Sets the body type expression of the default error responses.
    pub fn with_response_body_of_default(mut self, expression: impl Into<String>) -> Self {
        self.config.response_body_of_default = expression.into();
        self
    }

    /// Sets the body type expression of the unprocessable entity response.
    pub fn with_response_body_of_unprocessable_entity(
        mut self,
        expression: impl Into<String>,
    ) -> Self {
        self.config.response_body_of_unprocessable_entity = expression.into();
        self
    }

    /// Sets the deployment environment.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.config.environment = environment.into();
        self
    }

    /// Enables or disables caching.
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.config.cache.enabled = enabled;
        self
    }

    /// Sets the cache time-to-live.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache.ttl = ttl;
        self
    }

    /// Sets a custom cache key generator.
    pub fn with_cache_key_generator(mut self, generator: CacheKeyGenerator) -> Self {
        self.config.cache.key_generator = Some(generator);
        self
    }

    /// Enables or disables cache debug events.
    pub fn with_cache_debug(mut self, enabled: bool) -> Self {
        self.config.cache.debug = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_defaults() {
        let config = Configuration::builder().build();

        let Ok(config) = config else {
            panic!("default configuration should be valid");
        };
        assert_eq!(config.info().title(), "OasGen");
        assert_eq!(config.api_path(), "/");
        assert_eq!(config.include_mode(), IncludeMode::All);
        assert_eq!(config.http_verbs().len(), 5);
        assert_eq!(config.possible_default_responses().len(), 5);
        assert!(!config.cache().enabled());
        assert_eq!(config.cache().ttl(), Duration::from_secs(3600));
        assert!(config.security_schemas().is_empty());
    }

    #[test]
    fn should_reject_relative_api_path() {
        let error = Configuration::builder()
            .with_api_path("api")
            .build()
            .unwrap_err();

        insta::assert_snapshot!(error.to_string(), @"invalid api_path 'api': must start with '/'");
    }

    #[test]
    fn should_reject_invalid_default_body() {
        let error = Configuration::builder()
            .with_response_body_of_default("Hash{ status: }")
            .build()
            .unwrap_err();

        assert!(matches!(
            error,
            ConfigurationError::InvalidTypeExpression { ref option, .. } if option == "response_body_of_default"
        ));
    }

    #[test]
    fn should_select_predefined_security_schema() {
        let config = Configuration::builder()
            .add_security_schema("custom", SecurityScheme::basic())
            .with_security_schema(PredefinedScheme::ApiKeyHeader)
            .into_configuration();

        let names = config.security_schemas().keys().collect::<Vec<_>>();
        assert_eq!(names, ["api_key_header"]);
    }
}
