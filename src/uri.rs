//! URI helpers shared by the builder and the reader.

use crate::error::{CatalogError, Result};
use url::Url;

/// True when `uri` carries a scheme and can stand on its own.
pub fn is_absolute(uri: &str) -> bool {
    Url::parse(uri).is_ok()
}

/// Resolve `uri` against `base`. Absolute URIs come back untouched.
pub fn resolve_against(base: &str, uri: &str) -> Result<String> {
    if is_absolute(uri) {
        return Ok(uri.to_string());
    }
    let base_url = Url::parse(base).map_err(|source| CatalogError::InvalidBase {
        uri: uri.to_string(),
        base: base.to_string(),
        source,
    })?;
    base_url
        .join(uri)
        .map(String::from)
        .map_err(|source| CatalogError::InvalidBase {
            uri: uri.to_string(),
            base: base.to_string(),
            source,
        })
}

/// Rebase `uri` against the first available base, failing when a relative
/// URI has nothing to resolve against.
pub fn rebase(uri: &str, local: Option<&str>, scope: Option<&str>) -> Result<String> {
    if is_absolute(uri) {
        return Ok(uri.to_string());
    }
    match local.or(scope) {
        Some(base) => resolve_against(base, uri),
        None => Err(CatalogError::MissingBase {
            uri: uri.to_string(),
        }),
    }
}
