//! The OpenAPI document tree.
//!
//! Every node declares its ordered field list through [`Specable`] and is projected to
//! a plain map with [`Specable::to_spec`]: lower camel case keys, absent and empty
//! values omitted.

mod components;
mod document;
mod info;
mod media_type;
mod operation;
mod parameter;
mod path_item;
mod reference;
mod registry;
mod request_body;
mod response;
mod security;
mod server;
mod specable;
mod specification;
mod tag;

pub use self::components::Components;
pub use self::document::Document;
pub use self::info::{Contact, Info, License};
pub use self::media_type::{Example, MediaType};
pub use self::operation::Operation;
pub use self::parameter::{Parameter, ParameterIn};
pub use self::path_item::PathItem;
pub use self::reference::{RefOr, Reference};
pub use self::registry::SchemaRegistry;
pub use self::request_body::RequestBody;
pub use self::response::{Response, Responses};
pub use self::security::{
    ApiKeyLocation, OAuth2Flow, OAuth2Flows, PredefinedScheme, SecurityRequirement,
    SecurityScheme,
};
pub use self::server::{Server, ServerVariable};
pub use self::specable::{Field, SpecMap, Specable, ToSpecValue, field, project};
pub(crate) use self::specable::spec_node;
pub use self::specification::{OPENAPI_VERSION, Paths, Specification};
pub use self::tag::{ExternalDocs, Tag};

/// A data shape: an inline schema or a `$ref` to a registered one.
pub type Shape = utoipa::openapi::RefOr<utoipa::openapi::Schema>;
