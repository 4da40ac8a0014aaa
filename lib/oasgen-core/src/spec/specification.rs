use indexmap::IndexMap;

use super::{
    Components, ExternalDocs, Field, Info, PathItem, SecurityRequirement, Server, Specable, Tag,
    field, spec_node,
};

/// The OpenAPI version of the produced documents.
pub const OPENAPI_VERSION: &str = "3.1.0";

/// The paths of the document, keyed by normalized path template.
pub type Paths = IndexMap<String, PathItem>;

/// The root of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    openapi: &'static str,
    info: Info,
    servers: Vec<Server>,
    paths: Paths,
    components: Components,
    security: Vec<SecurityRequirement>,
    tags: Vec<Tag>,
    external_docs: Option<ExternalDocs>,
}

impl Specification {
    /// Creates an empty specification.
    pub fn new(info: Info) -> Self {
        Self {
            openapi: OPENAPI_VERSION,
            info,
            servers: Vec::new(),
            paths: Paths::new(),
            components: Components::new(),
            security: Vec::new(),
            tags: Vec::new(),
            external_docs: None,
        }
    }

    /// Sets the servers.
    pub fn with_servers(mut self, servers: Vec<Server>) -> Self {
        self.servers = servers;
        self
    }

    /// Sets the document level tags.
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the document level security.
    pub fn with_security(mut self, security: Vec<SecurityRequirement>) -> Self {
        self.security = security;
        self
    }

    /// Sets the external documentation link.
    pub fn with_external_docs(mut self, external_docs: Option<ExternalDocs>) -> Self {
        self.external_docs = external_docs;
        self
    }

    /// Sets the paths and their components.
    pub fn with_paths(mut self, paths: Paths, components: Components) -> Self {
        self.paths = paths;
        self.components = components;
        self
    }

    /// The info object.
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// The servers.
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// The paths.
    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// The components.
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// The document level security.
    pub fn security(&self) -> &[SecurityRequirement] {
        &self.security
    }
}

impl Specable for Specification {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("openapi", &self.openapi),
            field("info", &self.info),
            field("servers", &self.servers),
            field("paths", &self.paths),
            field("components", &self.components),
            field("security", &self.security),
            field("tags", &self.tags),
            field("external_docs", &self.external_docs),
        ]
    }
}

spec_node!(Specification);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_project_minimal_specification() {
        let spec = Specification::new(Info::new("Empty", "0.1.0"))
            .with_servers(vec![Server::new("http://localhost:3000")]);

        insta::assert_snapshot!(
            serde_json::to_string(&spec.to_spec()).unwrap_or_default(),
            @r#"{"openapi":"3.1.0","info":{"title":"Empty","version":"0.1.0"},"servers":[{"url":"http://localhost:3000"}]}"#
        );
    }
}
