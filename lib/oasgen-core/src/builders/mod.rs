//! The builder chain: from one [`OasRoute`](crate::route::OasRoute) to its path item,
//! operation, parameters, request body and responses.
//!
//! Builders share a [`BuildContext`] for the whole assembly pass; it owns the
//! components registered along the way. Explicit annotations always win over
//! discovery, and discovery never fails the pass.

mod content;
mod context;
mod describe;
mod operation;
mod parameter;
mod path_item;
mod request_body;
mod response;
mod shape;

pub use self::content::ContentBuilder;
pub use self::context::BuildContext;
pub use self::operation::OperationBuilder;
pub use self::parameter::ParameterBuilder;
pub use self::path_item::PathItemBuilder;
pub use self::request_body::RequestBodyBuilder;
pub use self::response::{ResponseBuilder, ResponsesBuilder};
pub use self::shape::{HashField, TypeExpr, TypeExprError};
