use super::{Field, Specable, field, spec_node};

/// General information about the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    title: String,
    summary: Option<String>,
    description: Option<String>,
    terms_of_service: Option<String>,
    contact: Option<Contact>,
    license: Option<License>,
    version: String,
}

impl Info {
    /// Creates an `Info` with a title and a version.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: None,
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
            version: version.into(),
        }
    }

    /// Sets the short summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the (markdown) description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the terms of service URL.
    pub fn with_terms_of_service(mut self, url: impl Into<String>) -> Self {
        self.terms_of_service = Some(url.into());
        self
    }

    /// Sets the contact.
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Sets the license.
    pub fn with_license(mut self, license: License) -> Self {
        self.license = Some(license);
        self
    }

    /// The API title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The API version.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Default for Info {
    fn default() -> Self {
        Self::new("OasGen", "1.0.0")
            .with_summary("OasGen: automatic API documentation")
    }
}

impl Specable for Info {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("title", &self.title),
            field("summary", &self.summary),
            field("description", &self.description),
            field("terms_of_service", &self.terms_of_service),
            field("contact", &self.contact),
            field("license", &self.license),
            field("version", &self.version),
        ]
    }
}

/// Contact information for the exposed API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    name: Option<String>,
    url: Option<String>,
    email: Option<String>,
}

impl Contact {
    /// Creates a contact with a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the contact URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl Specable for Contact {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("name", &self.name),
            field("url", &self.url),
            field("email", &self.email),
        ]
    }
}

/// License information for the exposed API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    name: String,
    identifier: Option<String>,
    url: Option<String>,
}

impl License {
    /// Creates a license with a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: None,
            url: None,
        }
    }

    /// Sets the SPDX identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the license URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl Specable for License {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("name", &self.name),
            field("identifier", &self.identifier),
            field("url", &self.url),
        ]
    }
}

spec_node!(Info, Contact, License);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_project_info() {
        let info = Info::new("Users API", "2.0.0")
            .with_terms_of_service("https://example.com/tos")
            .with_contact(Contact::new("a-team").with_email("team@example.com"))
            .with_license(License::new("MIT").with_identifier("MIT"));

        insta::assert_snapshot!(
            serde_json::to_string(&info.to_spec()).unwrap_or_default(),
            @r#"{"title":"Users API","termsOfService":"https://example.com/tos","contact":{"name":"a-team","email":"team@example.com"},"license":{"name":"MIT","identifier":"MIT"},"version":"2.0.0"}"#
        );
    }
}
