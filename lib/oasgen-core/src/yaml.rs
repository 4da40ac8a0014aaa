//! YAML serialization support using serde-saphyr.
//!
//! Only available with the `yaml` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use oasgen_core::{Configuration, Document, SpecificationAssembler, ToYaml};
//!
//! let config = Configuration::default();
//! let spec = SpecificationAssembler::new(&config).assemble(&source, None)?;
//!
//! std::fs::write("openapi.yml", Document::from(&spec).to_yaml()?)?;
//! ```

use serde::Serialize;

/// Error type for YAML serialization operations.
pub type YamlError = serde_saphyr::ser_error::Error;

/// Extension trait for serializing types to YAML.
///
/// Implemented for every [`Serialize`] type, including the projected [`Document`](crate::Document).
pub trait ToYaml: Serialize + Sized {
    /// Serializes this value to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`YamlError`] if serialization fails.
    fn to_yaml(&self) -> Result<String, YamlError> {
        serde_saphyr::to_string(self)
    }
}

impl<T: Serialize + Sized> ToYaml for T {}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::spec::{Document, Info, Specification};

    #[test]
    fn should_serialize_document_to_yaml() {
        let spec = Specification::new(Info::new("Pets", "1.0.0"));

        let yaml = Document::from(&spec)
            .to_yaml()
            .expect("should serialize to YAML");

        assert_snapshot!(yaml, @r"
        openapi: 3.1.0
        info:
          title: Pets
          version: 1.0.0
        ");
    }
}
