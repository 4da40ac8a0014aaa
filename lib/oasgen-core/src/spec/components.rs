use indexmap::IndexMap;

use super::{Field, Response, SchemaRegistry, SecurityScheme, Specable, field, spec_node};

/// Reusable objects of the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components {
    schemas: SchemaRegistry,
    responses: IndexMap<String, Response>,
    security_schemes: IndexMap<String, SecurityScheme>,
}

impl Components {
    /// Creates empty components.
    pub fn new() -> Self {
        Self::default()
    }

    /// The schema registry.
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Mutable access to the schema registry.
    pub fn schemas_mut(&mut self) -> &mut SchemaRegistry {
        &mut self.schemas
    }

    /// Registers a reusable response, the first registration wins.
    pub fn add_response(&mut self, name: impl Into<String>, response: Response) {
        self.responses.entry(name.into()).or_insert(response);
    }

    /// The reusable responses.
    pub fn responses(&self) -> &IndexMap<String, Response> {
        &self.responses
    }

    /// Registers a security scheme.
    pub fn add_security_scheme(&mut self, name: impl Into<String>, scheme: SecurityScheme) {
        self.security_schemes.insert(name.into(), scheme);
    }

    /// The security schemes.
    pub fn security_schemes(&self) -> &IndexMap<String, SecurityScheme> {
        &self.security_schemes
    }
}

impl Specable for Components {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("schemas", &self.schemas),
            field("responses", &self.responses),
            field("security_schemes", &self.security_schemes),
        ]
    }
}

spec_node!(Components);
