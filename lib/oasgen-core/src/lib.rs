//! # OasGen Core
//!
//! Assemble OpenAPI 3.1 documents from the route metadata of a web application.
//!
//! The host application describes its routes through a [`MetadataSource`](route::MetadataSource):
//! verb, path, handler container and action, and the handler documentation. The
//! documentation may carry `@annotations` (`@summary`, `@tags`, `@parameter`,
//! `@request_body`, `@response`, ...) that refine the generated operations.
//!
//! - **[`SpecificationAssembler`]** - selects the routes and builds one [`Specification`](spec::Specification)
//! - **[`CacheLayer`](cache::CacheLayer)** - memoizes the projected [`Document`] per request key
//!
//! ## Quick Start
//!
//! ```rust
//! use oasgen_core::route::{RouteRecord, StaticMetadataSource, Verb};
//! use oasgen_core::{Configuration, Document, PredefinedScheme, SpecificationAssembler};
//!
//! # fn main() -> Result<(), oasgen_core::ConfigurationError> {
//! let source = StaticMetadataSource::new()
//!     .with_route(
//!         RouteRecord::new(Verb::Get, "/users(.:format)", "users", "index")
//!             .with_documentation("# List the users\n# @tags Users"),
//!     )
//!     .with_route(
//!         RouteRecord::new(Verb::Post, "/users", "users", "create")
//!             .with_documentation("# @request_body The user [!Hash{ name: !String }]"),
//!     );
//!
//! let config = Configuration::builder()
//!     .with_security_schema(PredefinedScheme::BearerJwt)
//!     .build()?;
//!
//! let spec = SpecificationAssembler::new(&config).assemble(&source, None)?;
//! let document = Document::from(&spec);
//!
//! assert!(document.pointer("/paths/~1users/get").is_some());
//! assert!(document.pointer("/paths/~1users/post/requestBody").is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Documentation annotations
//!
//! ```text
//! # Show a user
//! #
//! # @tags Users
//! # @auth [bearer_jwt]
//! # @parameter expand(query) [Boolean] Include the relations
//! # @response The user(200) [User]
//! # @response_example Ada(200) [User] { "id": 1, "name": "Ada" }
//! ```
//!
//! Type expressions are `String`, `Integer`, `Number`, `Boolean`, `Date`, `DateTime`,
//! `Object`, `Array<T>`, `Hash{ key: T, required: !T }` and model names, resolved with
//! [`MetadataSource::model_shape`](route::MetadataSource::model_shape) and registered
//! under `components.schemas`.
//!
//! ## Caching
//!
//! With [`ConfigurationBuilder::with_caching`], the [`CacheLayer`](cache::CacheLayer)
//! keeps documents in a [`CacheStore`](cache::CacheStore) for the configured TTL. The
//! in-process [`MemoryStore`](cache::MemoryStore) works with the default key; an
//! [`ExternalStore`](cache::ExternalStore) requires a [`CacheKeyGenerator`].
//!
//! ## Error Handling
//!
//! - [`ConfigurationError`] - invalid options, malformed servers, missing key generator
//! - [`CacheError`](cache::CacheError) - configuration and store failures of the cache layer

mod assembler;
pub mod builders;
pub mod cache;
mod config;
pub mod route;
pub mod spec;

#[cfg(feature = "yaml")]
mod yaml;

pub use self::assembler::SpecificationAssembler;
pub use self::config::{
    CacheConfig, CacheKeyGenerator, Configuration, ConfigurationBuilder, ConfigurationError,
    DEFAULT_CACHE_TTL, DefaultResponse, DefaultTagsFrom, IncludeMode, RequestContext, Servers,
};
pub use self::route::Verb;
pub use self::spec::{Document, PredefinedScheme, SecurityScheme};

#[cfg(feature = "yaml")]
pub use self::yaml::{ToYaml, YamlError};
