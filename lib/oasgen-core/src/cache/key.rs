use std::sync::LazyLock;

use regex::Regex;

use super::StoreKind;
use crate::config::{Configuration, ConfigurationError, RequestContext};

static UNSAFE_KEY_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_-]").expect("a valid regex"));

const KEY_PREFIX: &str = "oas_spec";

/// The default cache key of a configuration and a request.
///
/// It is built from the API path, the include mode, the sorted ignored actions, the
/// environment and the request host (`default` without a host), every character
/// outside `[a-zA-Z0-9_-]` replaced by `_`.
///
/// ```rust
/// use oasgen_core::{Configuration, RequestContext, cache::default_key};
///
/// let config = Configuration::default();
/// let ctx = RequestContext::new().with_host("api.example.com");
///
/// assert_eq!(
///     default_key(&config, Some(&ctx)),
///     "oas_spec___all__development_api_example_com"
/// );
/// ```
pub fn default_key(config: &Configuration, ctx: Option<&RequestContext>) -> String {
    let mut ignored = config.ignored_actions().to_vec();
    ignored.sort();
    let host = ctx.and_then(RequestContext::host).unwrap_or("default");

    let raw = [
        KEY_PREFIX,
        config.api_path(),
        config.include_mode().as_str(),
        &ignored.join(","),
        config.environment(),
        host,
    ]
    .join("_");
    UNSAFE_KEY_CHARS.replace_all(&raw, "_").into_owned()
}

/// The key of a call: the custom generator output when one is configured, unchanged,
/// the default key otherwise.
pub(crate) fn derive_key(
    config: &Configuration,
    ctx: Option<&RequestContext>,
    store: StoreKind,
    generator_required: bool,
) -> Result<String, ConfigurationError> {
    match config.cache().key_generator() {
        Some(generator) => Ok(generator.generate(ctx, config)),
        None if generator_required => Err(ConfigurationError::MissingKeyGenerator { store }),
        None => Ok(default_key(config, ctx)),
    }
}
