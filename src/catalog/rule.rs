//! Closed set of catalog rule kinds.
//!
//! External-identifier classes: system 1, rewriteSystem 2, systemSuffix 3,
//! delegateSystem 4, public and delegatePublic 6, nextCatalog 7.
//! URI classes: uri 1, rewriteURI 2, uriSuffix 3, delegateURI 4,
//! nextCatalog 5. The two spaces are never compared with each other.

use crate::catalog::Catalog;
use crate::catalog::index::Ranked;
use crate::prefer::Prefer;
use std::sync::Arc;

#[derive(Debug)]
pub(crate) enum ExternalRule {
    System {
        system_id: String,
        uri: String,
    },
    RewriteSystem {
        start: String,
        rewrite_prefix: String,
    },
    SystemSuffix {
        suffix: String,
        uri: String,
    },
    DelegateSystem {
        start: String,
        catalog: Arc<Catalog>,
    },
    Public {
        public_id: String,
        uri: String,
        prefer: Prefer,
    },
    DelegatePublic {
        start: String,
        catalog: Arc<Catalog>,
        prefer: Prefer,
    },
    NextCatalog(Arc<Catalog>),
}

impl ExternalRule {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            ExternalRule::System { .. } => "system",
            ExternalRule::RewriteSystem { .. } => "rewriteSystem",
            ExternalRule::SystemSuffix { .. } => "systemSuffix",
            ExternalRule::DelegateSystem { .. } => "delegateSystem",
            ExternalRule::Public { .. } => "public",
            ExternalRule::DelegatePublic { .. } => "delegatePublic",
            ExternalRule::NextCatalog(_) => "nextCatalog",
        }
    }

    pub(crate) fn map(&self, public_id: Option<&str>, system_id: Option<&str>) -> Option<String> {
        match self {
            ExternalRule::System {
                system_id: expected,
                uri,
            } => (system_id == Some(expected.as_str())).then(|| uri.clone()),
            ExternalRule::RewriteSystem {
                start,
                rewrite_prefix,
            } => system_id
                .filter(|s| s.starts_with(start.as_str()))
                .map(|s| s.replacen(start.as_str(), rewrite_prefix, 1)),
            ExternalRule::SystemSuffix { suffix, uri } => system_id
                .filter(|s| s.ends_with(suffix.as_str()))
                .map(|_| uri.clone()),
            ExternalRule::DelegateSystem { start, catalog } => system_id
                .filter(|s| s.starts_with(start.as_str()))
                .and_then(|_| catalog.map_external_identifier(public_id, system_id)),
            ExternalRule::Public {
                public_id: expected,
                uri,
                prefer,
            } => (prefer.admits(system_id) && public_id == Some(expected.as_str()))
                .then(|| uri.clone()),
            ExternalRule::DelegatePublic {
                start,
                catalog,
                prefer,
            } => {
                if !prefer.admits(system_id) {
                    return None;
                }
                public_id
                    .filter(|p| p.starts_with(start.as_str()))
                    .and_then(|_| catalog.map_external_identifier(public_id, system_id))
            }
            ExternalRule::NextCatalog(catalog) => {
                catalog.map_external_identifier(public_id, system_id)
            }
        }
    }
}

impl Ranked for ExternalRule {
    fn class(&self) -> u8 {
        match self {
            ExternalRule::System { .. } => 1,
            ExternalRule::RewriteSystem { .. } => 2,
            ExternalRule::SystemSuffix { .. } => 3,
            ExternalRule::DelegateSystem { .. } => 4,
            ExternalRule::Public { .. } | ExternalRule::DelegatePublic { .. } => 6,
            ExternalRule::NextCatalog(_) => 7,
        }
    }

    fn specificity(&self) -> usize {
        match self {
            ExternalRule::RewriteSystem { start, .. }
            | ExternalRule::DelegateSystem { start, .. }
            | ExternalRule::DelegatePublic { start, .. } => start.len(),
            ExternalRule::SystemSuffix { suffix, .. } => suffix.len(),
            ExternalRule::System { .. }
            | ExternalRule::Public { .. }
            | ExternalRule::NextCatalog(_) => 0,
        }
    }
}

#[derive(Debug)]
pub(crate) enum UriRule {
    Uri { name: String, uri: String },
    RewriteUri { start: String, rewrite_prefix: String },
    UriSuffix { suffix: String, uri: String },
    DelegateUri { start: String, catalog: Arc<Catalog> },
    NextCatalog(Arc<Catalog>),
}

impl UriRule {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            UriRule::Uri { .. } => "uri",
            UriRule::RewriteUri { .. } => "rewriteURI",
            UriRule::UriSuffix { .. } => "uriSuffix",
            UriRule::DelegateUri { .. } => "delegateURI",
            UriRule::NextCatalog(_) => "nextCatalog",
        }
    }

    pub(crate) fn map(&self, requested: &str) -> Option<String> {
        match self {
            UriRule::Uri { name, uri } => (requested == name.as_str()).then(|| uri.clone()),
            UriRule::RewriteUri {
                start,
                rewrite_prefix,
            } => requested
                .starts_with(start.as_str())
                .then(|| requested.replacen(start.as_str(), rewrite_prefix, 1)),
            UriRule::UriSuffix { suffix, uri } => {
                requested.ends_with(suffix.as_str()).then(|| uri.clone())
            }
            UriRule::DelegateUri { start, catalog } => {
                if requested.starts_with(start.as_str()) {
                    catalog.map_uri(requested)
                } else {
                    None
                }
            }
            UriRule::NextCatalog(catalog) => catalog.map_uri(requested),
        }
    }
}

impl Ranked for UriRule {
    fn class(&self) -> u8 {
        match self {
            UriRule::Uri { .. } => 1,
            UriRule::RewriteUri { .. } => 2,
            UriRule::UriSuffix { .. } => 3,
            UriRule::DelegateUri { .. } => 4,
            UriRule::NextCatalog(_) => 5,
        }
    }

    fn specificity(&self) -> usize {
        match self {
            UriRule::RewriteUri { start, .. } | UriRule::DelegateUri { start, .. } => start.len(),
            UriRule::UriSuffix { suffix, .. } => suffix.len(),
            UriRule::Uri { .. } | UriRule::NextCatalog(_) => 0,
        }
    }
}
