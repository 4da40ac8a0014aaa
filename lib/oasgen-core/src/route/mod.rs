//! Route metadata: what the host application provides, and the routes built from it.

mod docstring;
mod oas_route;
mod record;
mod selector;
mod source;

pub use self::docstring::{
    Annotation, BodyAnnotation, Docstring, ExampleAnnotation, ParameterAnnotation,
    ResponseAnnotation, TypeRef,
};
pub use self::oas_route::{OasRoute, RouteBuilder};
pub(crate) use self::oas_route::normalize_path;
pub use self::record::{ObservedResponse, RouteRecord, Verb};
pub use self::selector::RouteSelector;
pub use self::source::{MetadataSource, StaticMetadataSource};
