use indexmap::IndexMap;

use super::RouteRecord;
use crate::spec::Shape;

/// Where route metadata comes from.
///
/// Implementations extract route tables and handler documentation from the host
/// application; the assembler never parses host source code itself.
pub trait MetadataSource {
    /// The routes of the application, in declaration order.
    fn route_metadata(&self) -> Vec<RouteRecord>;

    /// The data shape of a named model, e.g. `User`.
    ///
    /// Returning `None` means the model is unknown.
    fn model_shape(&self, name: &str) -> Option<Shape> {
        let _ = name;
        None
    }
}

impl<S> MetadataSource for &S
where
    S: MetadataSource + ?Sized,
{
    fn route_metadata(&self) -> Vec<RouteRecord> {
        (**self).route_metadata()
    }

    fn model_shape(&self, name: &str) -> Option<Shape> {
        (**self).model_shape(name)
    }
}

/// A [`MetadataSource`] holding pre-extracted routes and models.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataSource {
    routes: Vec<RouteRecord>,
    models: IndexMap<String, Shape>,
}

impl StaticMetadataSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route.
    pub fn with_route(mut self, route: RouteRecord) -> Self {
        self.routes.push(route);
        self
    }

    /// Adds a named model shape.
    pub fn with_model(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.models.insert(name.into(), shape);
        self
    }
}

impl MetadataSource for StaticMetadataSource {
    fn route_metadata(&self) -> Vec<RouteRecord> {
        self.routes.clone()
    }

    fn model_shape(&self, name: &str) -> Option<Shape> {
        self.models.get(name).cloned()
    }
}
