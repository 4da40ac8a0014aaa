use std::fmt::{self, Debug};
use std::sync::Arc;

use super::{ConfigurationError, RequestContext};
use crate::spec::Server;

type ServerFn = dyn Fn(Option<&RequestContext>) -> Vec<Server> + Send + Sync;

/// The server list of the document: a static list, or computed per request.
#[derive(Clone)]
pub enum Servers {
    /// A fixed list.
    Static(Vec<Server>),
    /// Evaluated on every access, never memoized.
    Computed(Arc<ServerFn>),
}

impl Servers {
    /// A server list computed from the request context.
    pub fn computed<F>(compute: F) -> Self
    where
        F: Fn(Option<&RequestContext>) -> Vec<Server> + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(compute))
    }

    /// Evaluates the server list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MalformedServer`] if an entry has an empty URL or a
    /// URL containing whitespace.
    pub fn resolve(&self, ctx: Option<&RequestContext>) -> Result<Vec<Server>, ConfigurationError> {
        let servers = match self {
            Self::Static(servers) => servers.clone(),
            Self::Computed(compute) => compute(ctx),
        };
        for (index, server) in servers.iter().enumerate() {
            check_server(index, server)?;
        }
        Ok(servers)
    }
}

fn check_server(index: usize, server: &Server) -> Result<(), ConfigurationError> {
    let url = server.url();
    let reason = if url.trim().is_empty() {
        "the URL is empty"
    } else if url.chars().any(char::is_whitespace) {
        "the URL contains whitespace"
    } else {
        return Ok(());
    };
    Err(ConfigurationError::MalformedServer {
        index,
        url: url.to_string(),
        reason: reason.to_string(),
    })
}

impl Default for Servers {
    fn default() -> Self {
        Self::Static(vec![
            Server::new("http://localhost:3000").with_description("Local"),
        ])
    }
}

impl From<Vec<Server>> for Servers {
    fn from(value: Vec<Server>) -> Self {
        Self::Static(value)
    }
}

impl Debug for Servers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(servers) => f.debug_tuple("Static").field(servers).finish(),
            Self::Computed(_) => f.debug_tuple("Computed").finish_non_exhaustive(),
        }
    }
}
