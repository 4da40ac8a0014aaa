use http::{HeaderMap, Request, header};

/// What the caller knows about the incoming request that asked for the document.
///
/// Used to compute dynamic server lists and cache keys.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    host: Option<String>,
    scheme: Option<String>,
    headers: HeaderMap,
}

impl RequestContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the requested host (without port).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the request scheme.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the request headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// The requested host.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The first label of the host, when the host has at least three labels.
    pub fn subdomain(&self) -> Option<&str> {
        let host = self.host.as_deref()?;
        let mut labels = host.split('.');
        let first = labels.next()?;
        (labels.count() >= 2).then_some(first)
    }

    /// The request scheme.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// The request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The base URL of the request, e.g. `https://api.example.com`.
    pub fn base_url(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        let scheme = self.scheme.as_deref().unwrap_or("http");
        Some(format!("{scheme}://{host}"))
    }
}

impl<B> From<&Request<B>> for RequestContext {
    fn from(request: &Request<B>) -> Self {
        let uri = request.uri();
        let host = uri.host().map(ToString::to_string).or_else(|| {
            request
                .headers()
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.split(':').next().unwrap_or(value).to_string())
        });

        Self {
            host,
            scheme: uri.scheme_str().map(ToString::to_string),
            headers: request.headers().clone(),
        }
    }
}
