use indexmap::IndexMap;
use serde_json::Value;
use utoipa::openapi::schema::{ArrayBuilder, KnownFormat, ObjectBuilder, SchemaFormat, Type};
use utoipa::openapi::{RefOr, Schema};

use super::{BuildContext, TypeExpr};
use crate::spec::{Example, MediaType, Shape};

/// The media type of every produced content entry.
pub(crate) fn json_media_type() -> String {
    mime::APPLICATION_JSON.essence_str().to_string()
}

/// Builds the content map of a request body or a response.
///
/// Named models are registered in the schema registry and referenced, literal types are
/// inlined.
#[derive(Debug, Default)]
pub struct ContentBuilder {
    schema: Option<Shape>,
    examples: IndexMap<String, Example>,
}

impl ContentBuilder {
    /// Starts an empty content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schema from a type expression.
    ///
    /// An unparseable expression is skipped with a warning.
    pub fn with_type(mut self, ctx: &mut BuildContext<'_>, expression: &str) -> Self {
        match expression.parse::<TypeExpr>() {
            Ok(expr) => self.schema = Some(resolve_shape(ctx, &expr)),
            Err(error) => tracing::warn!(%error, "type ignored"),
        }
        self
    }

    /// Sets the schema.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.schema = Some(shape);
        self
    }

    /// Adds an example, named after its summary.
    pub fn add_example(mut self, summary: &str, value: Value) -> Self {
        let name = example_name(summary, self.examples.len());
        self.examples
            .insert(name, Example::new(value).with_summary(summary));
        self
    }

    /// Whether nothing was set.
    pub fn is_empty(&self) -> bool {
        self.schema.is_none() && self.examples.is_empty()
    }

    /// Builds the content map, empty if nothing was set.
    pub fn build(self) -> IndexMap<String, MediaType> {
        if self.is_empty() {
            return IndexMap::new();
        }
        let mut media = self.schema.map(MediaType::new).unwrap_or_default();
        for (name, example) in self.examples {
            media.add_example(name, example);
        }
        IndexMap::from([(json_media_type(), media)])
    }
}

fn example_name(summary: &str, index: usize) -> String {
    let name = slug::slugify(summary);
    if name.is_empty() {
        format!("example{}", index + 1)
    } else {
        name
    }
}

/// Converts a type expression into a shape, registering named models.
pub(crate) fn resolve_shape(ctx: &mut BuildContext<'_>, expr: &TypeExpr) -> Shape {
    match expr {
        TypeExpr::String => primitive(Type::String, None),
        TypeExpr::Integer => primitive(Type::Integer, None),
        TypeExpr::Number => primitive(Type::Number, None),
        TypeExpr::Boolean => primitive(Type::Boolean, None),
        TypeExpr::Date => primitive(Type::String, Some(KnownFormat::Date)),
        TypeExpr::DateTime => primitive(Type::String, Some(KnownFormat::DateTime)),
        TypeExpr::Object => primitive(Type::Object, None),
        TypeExpr::Array(None) => RefOr::T(Schema::Array(ArrayBuilder::new().build())),
        TypeExpr::Array(Some(inner)) => {
            let items = resolve_shape(ctx, inner);
            RefOr::T(Schema::Array(ArrayBuilder::new().items(items).build()))
        }
        TypeExpr::Hash(fields) => {
            let mut object = ObjectBuilder::new().schema_type(Type::Object);
            for field in fields {
                object = object.property(&field.name, resolve_shape(ctx, &field.shape));
                if field.required {
                    object = object.required(&field.name);
                }
            }
            RefOr::T(Schema::Object(object.build()))
        }
        TypeExpr::Named(name) => resolve_model(ctx, name),
    }
}

/// Registers a named model from the metadata source, if it is known.
pub(crate) fn lookup_model(ctx: &mut BuildContext<'_>, name: &str) -> Option<Shape> {
    let shape = ctx.source().model_shape(name)?;
    Some(ctx.components_mut().schemas_mut().register_ref(name, shape))
}

fn resolve_model(ctx: &mut BuildContext<'_>, name: &str) -> Shape {
    lookup_model(ctx, name).unwrap_or_else(|| {
        tracing::warn!(model = name, "unknown model, using a generic object");
        primitive(Type::Object, None)
    })
}

fn primitive(schema_type: Type, format: Option<KnownFormat>) -> Shape {
    let object = ObjectBuilder::new()
        .schema_type(schema_type)
        .format(format.map(SchemaFormat::KnownFormat));
    RefOr::T(Schema::Object(object.build()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::route::StaticMetadataSource;
    use crate::Configuration;

    fn shape_json(expression: &str, source: &StaticMetadataSource) -> (Value, usize) {
        let config = Configuration::default();
        let mut ctx = BuildContext::new(&config, source);
        let shape = ContentBuilder::new()
            .with_type(&mut ctx, expression)
            .schema
            .map(|it| serde_json::to_value(it).unwrap_or_default())
            .unwrap_or_default();
        (shape, ctx.components().schemas().len())
    }

    #[test]
    fn should_inline_literal_hash() {
        let (shape, registered) = shape_json(
            "Hash{ status: !Integer, error: String }",
            &StaticMetadataSource::new(),
        );

        assert_eq!(
            shape,
            json!({
                "type": "object",
                "properties": {
                    "status": { "type": "integer" },
                    "error": { "type": "string" }
                },
                "required": ["status"]
            })
        );
        assert_eq!(registered, 0);
    }

    #[test]
    fn should_reference_known_model() {
        let source = StaticMetadataSource::new().with_model(
            "User",
            RefOr::T(Schema::Object(ObjectBuilder::new().schema_type(Type::Object).build())),
        );

        let (shape, registered) = shape_json("Array<User>", &source);

        assert_eq!(
            shape,
            json!({ "type": "array", "items": { "$ref": "#/components/schemas/User" } })
        );
        assert_eq!(registered, 1);
    }

    #[test]
    fn should_fall_back_for_unknown_model() {
        let (shape, registered) = shape_json("Ghost", &StaticMetadataSource::new());

        assert_eq!(shape, json!({ "type": "object" }));
        assert_eq!(registered, 0);
    }

    #[test]
    fn should_name_examples_after_summary() {
        let content = ContentBuilder::new()
            .add_example("A valid user", json!({ "name": "Ada" }))
            .add_example("", json!({}))
            .build();

        let media = content.get("application/json");
        let names = media
            .map(|it| it.examples().keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        assert_eq!(names, ["a-valid-user", "example2"]);
    }
}
