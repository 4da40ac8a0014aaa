use crate::builders::{BuildContext, PathItemBuilder};
use crate::config::{Configuration, ConfigurationError, RequestContext};
use crate::route::{MetadataSource, OasRoute, RouteBuilder, RouteSelector, normalize_path};
use crate::spec::{SecurityRequirement, Specification};

/// Assembles a [`Specification`] from the routes of a [`MetadataSource`].
///
/// # Example
///
/// ```rust
/// use oasgen_core::route::{RouteRecord, StaticMetadataSource, Verb};
/// use oasgen_core::{Configuration, SpecificationAssembler};
///
/// # fn main() -> Result<(), oasgen_core::ConfigurationError> {
/// let source = StaticMetadataSource::new()
///     .with_route(RouteRecord::new(Verb::Get, "/users", "users", "index"));
/// let config = Configuration::default();
///
/// let spec = SpecificationAssembler::new(&config).assemble(&source, None)?;
///
/// assert!(spec.paths().contains_key("/users"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SpecificationAssembler<'a> {
    config: &'a Configuration,
}

impl<'a> SpecificationAssembler<'a> {
    /// Creates an assembler for a configuration.
    pub fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    /// Selects the routes of the source, builds them and assembles the document.
    ///
    /// Servers are evaluated against the request context, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MalformedServer`] if the server list yields a
    /// malformed server.
    pub fn assemble(
        &self,
        source: &dyn MetadataSource,
        ctx: Option<&RequestContext>,
    ) -> Result<Specification, ConfigurationError> {
        let servers = self.config.servers().resolve(ctx)?;
        let routes = self.routes(source);
        let spec = self.build(source, &routes).with_servers(servers);

        tracing::info!(
            routes = routes.len(),
            paths = spec.paths().len(),
            schemas = spec.components().schemas().len(),
            "specification assembled"
        );
        Ok(spec)
    }

    /// The built routes of the source that end up in the document.
    pub fn routes(&self, source: &dyn MetadataSource) -> Vec<OasRoute> {
        let selector = RouteSelector::new(self.config);
        source
            .route_metadata()
            .iter()
            .filter(|record| selector.accepts_record(record, &normalize_path(&record.path)))
            .map(RouteBuilder::build)
            .filter(|route| selector.accepts_route(route))
            .collect()
    }

    /// Assembles the document from already built routes, without servers.
    ///
    /// Routes sharing a path are merged into one path item, under their verb slot.
    pub fn build(&self, source: &dyn MetadataSource, routes: &[OasRoute]) -> Specification {
        let mut ctx = BuildContext::new(self.config, source);
        for (name, scheme) in self.config.security_schemas() {
            ctx.components_mut()
                .add_security_scheme(name.clone(), scheme.clone());
        }

        let mut paths = PathItemBuilder::new();
        for route in routes {
            paths.add_route(&mut ctx, route);
        }

        Specification::new(self.config.info().clone())
            .with_paths(paths.build(), ctx.into_components())
            .with_tags(self.config.tags().to_vec())
            .with_external_docs(self.config.external_docs().cloned())
            .with_security(self.global_security())
    }

    /// One requirement per configured scheme when routes are authenticated by default.
    pub fn global_security(&self) -> Vec<SecurityRequirement> {
        if !self.config.authenticate_all_routes_by_default() {
            return Vec::new();
        }
        self.config
            .security_schemas()
            .keys()
            .map(SecurityRequirement::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::route::{RouteRecord, StaticMetadataSource, Verb};
    use crate::spec::{Document, PredefinedScheme, Server};
    use crate::{IncludeMode, Servers};

    fn source() -> StaticMetadataSource {
        StaticMetadataSource::new()
            .with_route(RouteRecord::new(Verb::Get, "/users", "users", "index"))
            .with_route(
                RouteRecord::new(Verb::Get, "/health", "health", "show")
                    .with_documentation("# Health check\n# @no_auth\n# @oas_include"),
            )
            .with_route(RouteRecord::new(Verb::Get, "/rails/info", "rails/info", "index"))
    }

    #[test]
    fn should_assemble_selected_routes() {
        let config = Configuration::builder()
            .add_ignored_action("rails/info")
            .build()
            .unwrap_or_default();

        let spec = SpecificationAssembler::new(&config)
            .assemble(&source(), None)
            .unwrap_or_else(|_| Specification::new(config.info().clone()));

        let paths = spec.paths().keys().cloned().collect::<Vec<_>>();
        assert_eq!(paths, ["/users", "/health"]);
        assert_eq!(spec.servers().len(), 1);
    }

    #[test]
    fn should_apply_include_mode() {
        let config = Configuration::builder()
            .with_include_mode(IncludeMode::Explicit)
            .build()
            .unwrap_or_default();

        let routes = SpecificationAssembler::new(&config).routes(&source());

        let names = routes.iter().map(OasRoute::display_name).collect::<Vec<_>>();
        assert_eq!(names, ["health#show"]);
    }

    #[test]
    fn should_compute_global_security() {
        let secured = Configuration::builder()
            .with_security_schema(PredefinedScheme::Bearer)
            .build()
            .unwrap_or_default();
        let optional = Configuration::builder()
            .with_security_schema(PredefinedScheme::Bearer)
            .with_authenticate_all_routes_by_default(false)
            .build()
            .unwrap_or_default();

        let spec = SpecificationAssembler::new(&secured).build(&source(), &[]);
        let document = Document::from(&spec);

        assert_eq!(document.pointer("/security"), Some(&json!([{ "bearer": [] }])));
        assert!(document.pointer("/components/securitySchemes/bearer").is_some());
        assert!(SpecificationAssembler::new(&optional).global_security().is_empty());
    }

    #[test]
    fn should_fail_on_malformed_server() {
        let config = Configuration::builder()
            .with_servers(Servers::computed(|_| vec![Server::new("")]))
            .build()
            .unwrap_or_default();

        let result = SpecificationAssembler::new(&config).assemble(&source(), None);

        insta::assert_snapshot!(
            result.err().map(|it| it.to_string()).unwrap_or_default(),
            @"malformed server #0 '': the URL is empty"
        );
    }
}
