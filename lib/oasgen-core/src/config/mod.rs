//! Document and cache configuration.
//!
//! A [`Configuration`] is built once with a [`ConfigurationBuilder`] and passed by
//! reference to the assembler and the cache layer.

use std::fmt::{self, Debug};
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;

use crate::spec::{ExternalDocs, Info, SecurityScheme, Tag};
use crate::Verb;

mod builder;
mod context;
mod error;
mod options;
mod servers;

pub use self::builder::ConfigurationBuilder;
pub use self::context::RequestContext;
pub use self::error::ConfigurationError;
pub use self::options::{DefaultResponse, DefaultTagsFrom, IncludeMode};
pub use self::servers::Servers;

/// Default time-to-live of a cached document.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Everything that shapes the produced document and its caching.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub(crate) info: Info,
    pub(crate) servers: Servers,
    pub(crate) tags: Vec<Tag>,
    pub(crate) external_docs: Option<ExternalDocs>,
    pub(crate) api_path: String,
    pub(crate) ignored_actions: Vec<String>,
    pub(crate) http_verbs: Vec<Verb>,
    pub(crate) include_mode: IncludeMode,
    pub(crate) default_tags_from: DefaultTagsFrom,
    pub(crate) autodiscover_request_body: bool,
    pub(crate) autodiscover_responses: bool,
    pub(crate) authenticate_all_routes_by_default: bool,
    pub(crate) security_schemas: IndexMap<String, SecurityScheme>,
    pub(crate) set_default_responses: bool,
    pub(crate) possible_default_responses: Vec<DefaultResponse>,
    pub(crate) response_body_of_default: String,
    pub(crate) response_body_of_unprocessable_entity: String,
    pub(crate) environment: String,
    pub(crate) cache: CacheConfig,
}

impl Configuration {
    /// Starts a configuration with the defaults.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// The info object.
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// The server list.
    pub fn servers(&self) -> &Servers {
        &self.servers
    }

    /// The document level tags.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The external documentation link.
    pub fn external_docs(&self) -> Option<&ExternalDocs> {
        self.external_docs.as_ref()
    }

    /// The API base path, only routes below it are documented.
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// The ignored containers (`users`) or actions (`users#new`).
    pub fn ignored_actions(&self) -> &[String] {
        &self.ignored_actions
    }

    /// The documented HTTP verbs.
    pub fn http_verbs(&self) -> &[Verb] {
        &self.http_verbs
    }

    /// Which routes end up in the document.
    pub fn include_mode(&self) -> IncludeMode {
        self.include_mode
    }

    /// Where default tags come from.
    pub fn default_tags_from(&self) -> DefaultTagsFrom {
        self.default_tags_from
    }

    /// Whether request bodies are inferred for create and update actions.
    pub fn autodiscover_request_body(&self) -> bool {
        self.autodiscover_request_body
    }

    /// Whether responses are inferred from observed render statements.
    pub fn autodiscover_responses(&self) -> bool {
        self.autodiscover_responses
    }

    /// Whether every route requires authentication unless marked otherwise.
    pub fn authenticate_all_routes_by_default(&self) -> bool {
        self.authenticate_all_routes_by_default
    }

    /// The security schemes, by name.
    pub fn security_schemas(&self) -> &IndexMap<String, SecurityScheme> {
        &self.security_schemas
    }

    /// Whether default error responses are added.
    pub fn set_default_responses(&self) -> bool {
        self.set_default_responses
    }

    /// The default error responses that may be added.
    pub fn possible_default_responses(&self) -> &[DefaultResponse] {
        &self.possible_default_responses
    }

    /// Body type expression of the default error responses.
    pub fn response_body_of_default(&self) -> &str {
        &self.response_body_of_default
    }

    /// Body type expression of the unprocessable entity response.
    pub fn response_body_of_unprocessable_entity(&self) -> &str {
        &self.response_body_of_unprocessable_entity
    }

    /// The deployment environment.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// The cache settings.
    pub fn cache(&self) -> &CacheConfig {
        &self.cache
    }
}

impl Default for Configuration {
    fn default() -> Self {
        ConfigurationBuilder::default().into_configuration()
    }
}

/// Cache settings.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub(crate) enabled: bool,
    pub(crate) ttl: Duration,
    pub(crate) key_generator: Option<CacheKeyGenerator>,
    pub(crate) debug: bool,
}

impl CacheConfig {
    /// Whether caching is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The time-to-live of a cached document.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The custom key generator.
    pub fn key_generator(&self) -> Option<&CacheKeyGenerator> {
        self.key_generator.as_ref()
    }

    /// Whether cache debug events are emitted.
    pub fn debug(&self) -> bool {
        self.debug
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl: DEFAULT_CACHE_TTL,
            key_generator: None,
            debug: false,
        }
    }
}

type KeyFn = dyn Fn(Option<&RequestContext>, &Configuration) -> String + Send + Sync;

/// A custom cache key generator.
///
/// It receives the request context and the configuration snapshot of the call.
#[derive(Clone)]
pub struct CacheKeyGenerator(Arc<KeyFn>);

impl CacheKeyGenerator {
    /// Wraps a key generation function.
    pub fn new<F>(generate: F) -> Self
    where
        F: Fn(Option<&RequestContext>, &Configuration) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(generate))
    }

    /// Generates a key.
    pub fn generate(&self, ctx: Option<&RequestContext>, config: &Configuration) -> String {
        (self.0)(ctx, config)
    }
}

impl Debug for CacheKeyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CacheKeyGenerator").finish_non_exhaustive()
    }
}
