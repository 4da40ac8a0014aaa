use std::collections::HashSet;

use crate::route::MetadataSource;
use crate::spec::Components;
use crate::Configuration;

/// Shared state of one assembly pass.
///
/// Owns the components being registered and the operation ids already handed out.
pub struct BuildContext<'a> {
    config: &'a Configuration,
    source: &'a dyn MetadataSource,
    components: Components,
    operation_ids: HashSet<String>,
}

impl<'a> BuildContext<'a> {
    /// Starts a pass.
    pub fn new(config: &'a Configuration, source: &'a dyn MetadataSource) -> Self {
        Self {
            config,
            source,
            components: Components::new(),
            operation_ids: HashSet::new(),
        }
    }

    /// The configuration of the pass.
    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    /// The metadata source of the pass.
    pub fn source(&self) -> &'a dyn MetadataSource {
        self.source
    }

    /// The components registered so far.
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Mutable access to the components.
    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    /// Reserves an operation id, returning a unique variant if it is taken.
    pub fn claim_operation_id(&mut self, candidate: String, suffix: &str) -> String {
        if self.operation_ids.insert(candidate.clone()) {
            return candidate;
        }
        let mut result = format!("{candidate}{suffix}");
        let mut attempt = 1;
        while !self.operation_ids.insert(result.clone()) {
            attempt += 1;
            result = format!("{candidate}{suffix}{attempt}");
        }
        tracing::debug!(%candidate, %result, "operation id already used");
        result
    }

    /// Ends the pass, returning the registered components.
    pub fn into_components(self) -> Components {
        self.components
    }
}
