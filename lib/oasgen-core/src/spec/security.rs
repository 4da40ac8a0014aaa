//! Security schemes and requirements.
//!
//! Schemes are registered in `components.securitySchemes`; requirements reference
//! them by name, either for the whole document or for one operation:
//!
//! ```yaml
//! components:
//!   securitySchemes:
//!     bearer_jwt:
//!       type: http
//!       scheme: bearer
//!       bearerFormat: JWT
//! security:
//!   - bearer_jwt: []
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::{Value, json};
use utoipa::openapi::security::{
    ApiKey as UtoipaApiKey, ApiKeyValue, AuthorizationCode, ClientCredentials, Flow, Http,
    HttpAuthScheme, OAuth2 as UtoipaOAuth2, OpenIdConnect as UtoipaOpenIdConnect, Scopes,
    SecurityScheme as UtoipaSecurityScheme,
};

use super::ToSpecValue;
use crate::ConfigurationError;

/// OpenAPI security scheme.
///
/// Every variant but [`SecurityScheme::MutualTls`] maps onto a `utoipa` security scheme.
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityScheme {
    /// HTTP Bearer authentication (RFC 6750).
    Bearer {
        /// Optional format hint (e.g., "JWT")
        format: Option<String>,
        /// Description for documentation
        description: Option<String>,
    },

    /// HTTP Basic authentication (RFC 7617).
    Basic {
        /// Description for documentation
        description: Option<String>,
    },

    /// API key passed in a header, a query parameter, or a cookie.
    ApiKey {
        /// Name of the header, query parameter, or cookie
        name: String,
        /// Where the API key is passed
        location: ApiKeyLocation,
        /// Description for documentation
        description: Option<String>,
    },

    /// OAuth 2.0 authentication.
    OAuth2 {
        /// OAuth2 flows configuration
        flows: Box<OAuth2Flows>,
        /// Description for documentation
        description: Option<String>,
    },

    /// OpenID Connect Discovery.
    OpenIdConnect {
        /// OpenID Connect discovery URL
        open_id_connect_url: String,
        /// Description for documentation
        description: Option<String>,
    },

    /// Mutual TLS, the client presents a certificate.
    MutualTls {
        /// Description for documentation
        description: Option<String>,
    },
}

impl SecurityScheme {
    /// HTTP Bearer authentication.
    pub fn bearer() -> Self {
        Self::Bearer {
            format: None,
            description: None,
        }
    }

    /// HTTP Bearer authentication with a format hint.
    pub fn bearer_with_format(format: impl Into<String>) -> Self {
        Self::Bearer {
            format: Some(format.into()),
            description: None,
        }
    }

    /// HTTP Basic authentication.
    pub fn basic() -> Self {
        Self::Basic { description: None }
    }

    /// API key authentication.
    pub fn api_key(name: impl Into<String>, location: ApiKeyLocation) -> Self {
        Self::ApiKey {
            name: name.into(),
            location,
            description: None,
        }
    }

    /// OpenID Connect authentication.
    pub fn openid_connect(url: impl Into<String>) -> Self {
        Self::OpenIdConnect {
            open_id_connect_url: url.into(),
            description: None,
        }
    }

    /// OAuth2 authentication.
    pub fn oauth2(flows: OAuth2Flows) -> Self {
        Self::OAuth2 {
            flows: Box::new(flows),
            description: None,
        }
    }

    /// Mutual TLS authentication.
    pub fn mutual_tls() -> Self {
        Self::MutualTls { description: None }
    }

    /// Adds a description to the security scheme.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        match &mut self {
            Self::Bearer {
                description: desc, ..
            }
            | Self::ApiKey {
                description: desc, ..
            }
            | Self::OAuth2 {
                description: desc, ..
            }
            | Self::OpenIdConnect {
                description: desc, ..
            }
            | Self::Basic { description: desc }
            | Self::MutualTls { description: desc } => *desc = Some(description.into()),
        }
        self
    }

    /// Converts this security scheme to a utoipa scheme, `None` for mutual TLS.
    pub(crate) fn to_utoipa(&self) -> Option<UtoipaSecurityScheme> {
        let result = match self {
            Self::Bearer {
                format,
                description,
            } => {
                let mut http = Http::new(HttpAuthScheme::Bearer);
                http.bearer_format.clone_from(format);
                http.description.clone_from(description);
                UtoipaSecurityScheme::Http(http)
            }
            Self::Basic { description } => {
                let mut http = Http::new(HttpAuthScheme::Basic);
                http.description.clone_from(description);
                UtoipaSecurityScheme::Http(http)
            }
            Self::ApiKey {
                name,
                location,
                description,
            } => {
                let value = match description {
                    Some(desc) => ApiKeyValue::with_description(name, desc),
                    None => ApiKeyValue::new(name),
                };
                let api_key = match location {
                    ApiKeyLocation::Header => UtoipaApiKey::Header(value),
                    ApiKeyLocation::Query => UtoipaApiKey::Query(value),
                    ApiKeyLocation::Cookie => UtoipaApiKey::Cookie(value),
                };
                UtoipaSecurityScheme::ApiKey(api_key)
            }
            Self::OAuth2 { flows, description } => {
                let mut oauth2 = flows.to_utoipa();
                oauth2.description.clone_from(description);
                UtoipaSecurityScheme::OAuth2(oauth2)
            }
            Self::OpenIdConnect {
                open_id_connect_url,
                description,
            } => {
                let mut oidc = UtoipaOpenIdConnect::new(open_id_connect_url);
                oidc.description.clone_from(description);
                UtoipaSecurityScheme::OpenIdConnect(oidc)
            }
            Self::MutualTls { .. } => return None,
        };
        Some(result)
    }
}

impl ToSpecValue for SecurityScheme {
    fn to_spec_value(&self) -> Option<Value> {
        if let Self::MutualTls { description } = self {
            let mut value = json!({ "type": "mutualTLS" });
            if let (Some(desc), Some(map)) = (description, value.as_object_mut()) {
                map.insert("description".to_string(), Value::String(desc.clone()));
            }
            return Some(value);
        }
        let scheme = self.to_utoipa()?;
        match serde_json::to_value(scheme) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%error, "cannot project security scheme");
                None
            }
        }
    }
}

/// Location where an API key is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiKeyLocation {
    /// API key in HTTP header
    Header,
    /// API key in query parameter
    Query,
    /// API key in cookie
    Cookie,
}

/// OAuth2 flow configurations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OAuth2Flows {
    /// Authorization Code flow
    pub authorization_code: Option<OAuth2Flow>,
    /// Client Credentials flow
    pub client_credentials: Option<OAuth2Flow>,
}

impl OAuth2Flows {
    /// OAuth2 authorization code flow.
    pub fn authorization_code(
        authorization_url: impl Into<String>,
        token_url: impl Into<String>,
        scopes: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            authorization_code: Some(OAuth2Flow {
                authorization_url: Some(authorization_url.into()),
                token_url: token_url.into(),
                scopes: collect_scopes(scopes),
            }),
            ..Default::default()
        }
    }

    /// OAuth2 client credentials flow.
    pub fn client_credentials(
        token_url: impl Into<String>,
        scopes: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            client_credentials: Some(OAuth2Flow {
                authorization_url: None,
                token_url: token_url.into(),
                scopes: collect_scopes(scopes),
            }),
            ..Default::default()
        }
    }

    fn to_utoipa(&self) -> UtoipaOAuth2 {
        let mut flows = Vec::new();

        if let Some(flow) = &self.authorization_code {
            let scopes = Scopes::from_iter(flow.scopes.clone());
            flows.push(Flow::AuthorizationCode(AuthorizationCode::new(
                flow.authorization_url.as_deref().unwrap_or_default(),
                &flow.token_url,
                scopes,
            )));
        }

        if let Some(flow) = &self.client_credentials {
            let scopes = Scopes::from_iter(flow.scopes.clone());
            flows.push(Flow::ClientCredentials(ClientCredentials::new(
                &flow.token_url,
                scopes,
            )));
        }

        UtoipaOAuth2::new(flows)
    }
}

fn collect_scopes(
    scopes: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
) -> IndexMap<String, String> {
    scopes
        .into_iter()
        .map(|(name, desc)| (name.into(), desc.into()))
        .collect()
}

/// OAuth2 flow configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuth2Flow {
    /// Authorization URL, unused by the client credentials flow
    pub authorization_url: Option<String>,
    /// Token URL
    pub token_url: String,
    /// Available scopes
    pub scopes: IndexMap<String, String>,
}

/// Ready-made security schemes, selected by name in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredefinedScheme {
    /// `api_key` cookie.
    ApiKeyCookie,
    /// `X-API-Key` header.
    ApiKeyHeader,
    /// `api_key` query parameter.
    ApiKeyQuery,
    /// HTTP Basic.
    Basic,
    /// HTTP Bearer.
    Bearer,
    /// HTTP Bearer with a JWT.
    BearerJwt,
    /// Mutual TLS.
    MutualTls,
}

impl PredefinedScheme {
    const ALL: [Self; 7] = [
        Self::ApiKeyCookie,
        Self::ApiKeyHeader,
        Self::ApiKeyQuery,
        Self::Basic,
        Self::Bearer,
        Self::BearerJwt,
        Self::MutualTls,
    ];

    /// The name the scheme is registered under.
    pub fn name(self) -> &'static str {
        match self {
            Self::ApiKeyCookie => "api_key_cookie",
            Self::ApiKeyHeader => "api_key_header",
            Self::ApiKeyQuery => "api_key_query",
            Self::Basic => "basic",
            Self::Bearer => "bearer",
            Self::BearerJwt => "bearer_jwt",
            Self::MutualTls => "mutual_tls",
        }
    }

    /// The scheme definition.
    pub fn scheme(self) -> SecurityScheme {
        match self {
            Self::ApiKeyCookie => SecurityScheme::api_key("api_key", ApiKeyLocation::Cookie)
                .with_description("API key passed via cookie"),
            Self::ApiKeyHeader => SecurityScheme::api_key("X-API-Key", ApiKeyLocation::Header)
                .with_description("API key passed via HTTP header"),
            Self::ApiKeyQuery => SecurityScheme::api_key("api_key", ApiKeyLocation::Query)
                .with_description("API key passed via URL query parameter"),
            Self::Basic => SecurityScheme::basic().with_description("Basic Authentication"),
            Self::Bearer => SecurityScheme::bearer().with_description("Bearer Authentication"),
            Self::BearerJwt => SecurityScheme::bearer_with_format("JWT")
                .with_description("Bearer Authentication with JWT"),
            Self::MutualTls => {
                SecurityScheme::mutual_tls().with_description("Mutual TLS authentication")
            }
        }
    }
}

impl fmt::Display for PredefinedScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PredefinedScheme {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name() == value.trim())
            .ok_or_else(|| {
                let expected = Self::ALL.map(Self::name).join(", ");
                ConfigurationError::invalid_option("security_schema", value, expected)
            })
    }
}

/// A security requirement: a scheme name and the scopes it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityRequirement {
    /// Name of the security scheme (must match a registered scheme)
    pub name: String,
    /// Required scopes (empty for non-OAuth schemes)
    pub scopes: Vec<String>,
}

impl SecurityRequirement {
    /// A requirement without scopes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scopes: Vec::new(),
        }
    }

    /// A requirement with scopes.
    pub fn with_scopes(
        name: impl Into<String>,
        scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToSpecValue for SecurityRequirement {
    fn to_spec_value(&self) -> Option<Value> {
        let scopes = self.scopes.iter().cloned().map(Value::String).collect();
        let mut map = serde_json::Map::new();
        map.insert(self.name.clone(), Value::Array(scopes));
        Some(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn project(scheme: &SecurityScheme) -> String {
        scheme
            .to_spec_value()
            .map(|value| value.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn should_project_bearer_jwt() {
        let value = PredefinedScheme::BearerJwt.scheme().to_spec_value();

        assert_eq!(
            value,
            Some(json!({
                "type": "http",
                "scheme": "bearer",
                "bearerFormat": "JWT",
                "description": "Bearer Authentication with JWT"
            }))
        );
    }

    #[test]
    fn should_project_api_key_header() {
        let value = SecurityScheme::api_key("X-API-Key", ApiKeyLocation::Header).to_spec_value();

        assert_eq!(
            value,
            Some(json!({ "type": "apiKey", "name": "X-API-Key", "in": "header" }))
        );
    }

    #[test]
    fn should_project_mutual_tls() {
        insta::assert_snapshot!(
            project(&SecurityScheme::mutual_tls().with_description("mTLS")),
            @r#"{"type":"mutualTLS","description":"mTLS"}"#
        );
    }

    #[test]
    fn should_project_requirement_with_scopes() {
        let requirement = SecurityRequirement::with_scopes("oauth2", ["read", "write"]);

        assert_eq!(
            requirement.to_spec_value(),
            Some(json!({ "oauth2": ["read", "write"] }))
        );
    }

    #[rstest]
    #[case("api_key_cookie", PredefinedScheme::ApiKeyCookie)]
    #[case("bearer", PredefinedScheme::Bearer)]
    #[case("bearer_jwt", PredefinedScheme::BearerJwt)]
    #[case("mutual_tls", PredefinedScheme::MutualTls)]
    fn should_parse_predefined_scheme(#[case] name: &str, #[case] expected: PredefinedScheme) {
        assert_eq!(name.parse::<PredefinedScheme>().ok(), Some(expected));
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn should_reject_unknown_predefined_scheme() {
        let error = "digest".parse::<PredefinedScheme>().unwrap_err();

        insta::assert_snapshot!(
            error.to_string(),
            @"invalid value 'digest' for security_schema, expected one of: api_key_cookie, api_key_header, api_key_query, basic, bearer, bearer_jwt, mutual_tls"
        );
    }
}
