//! Immutable catalogs produced by the builder, and their composite.

use crate::catalog::builder::{CatalogBuilder, Root};
use crate::catalog::index::Prioritized;
use crate::catalog::mapper::{CatalogMapper, ExternalIdentifierMapper, UriMapper};
use crate::catalog::rule::{ExternalRule, UriRule};
use crate::prefer::Prefer;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Priority-ordered rule set answering external-identifier and URI lookups.
///
/// A catalog never changes after the builder hands it out, so it can be
/// shared freely between threads and queried concurrently.
#[derive(Debug, Default)]
pub struct Catalog {
    external: Vec<Prioritized<ExternalRule>>,
    uri: Vec<Prioritized<UriRule>>,
}

impl Catalog {
    /// Start building a catalog rooted at `base` with the given preference.
    pub fn builder(prefer: Option<Prefer>, base: Option<&str>) -> CatalogBuilder<Root> {
        CatalogBuilder::new(prefer, base)
    }

    /// A catalog with no rules; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_rules(
        external: Vec<Prioritized<ExternalRule>>,
        uri: Vec<Prioritized<UriRule>>,
    ) -> Self {
        Self { external, uri }
    }

    /// First mapping produced by the external-identifier rules, in priority
    /// order.
    pub fn map_external_identifier(
        &self,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Option<String> {
        self.external.iter().find_map(|entry| {
            let mapped = entry.rule().map(public_id, system_id)?;
            trace!(
                rule = entry.rule().kind(),
                rank = ?entry.rank(),
                ?public_id,
                ?system_id,
                %mapped,
                "external identifier mapped"
            );
            Some(mapped)
        })
    }

    /// First mapping produced by the URI rules, in priority order.
    pub fn map_uri(&self, uri: &str) -> Option<String> {
        self.uri.iter().find_map(|entry| {
            let mapped = entry.rule().map(uri)?;
            trace!(rule = entry.rule().kind(), rank = ?entry.rank(), uri, %mapped, "uri mapped");
            Some(mapped)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.external.is_empty() && self.uri.is_empty()
    }

    /// Number of external-identifier rules, next catalogs included.
    pub fn external_rule_count(&self) -> usize {
        self.external.len()
    }

    /// Number of URI rules, next catalogs included.
    pub fn uri_rule_count(&self) -> usize {
        self.uri.len()
    }

    /// `(kind, class, specificity, order)` of every external-identifier rule
    /// in lookup order.
    pub fn external_rule_ranks(&self) -> Vec<(&'static str, u8, usize, usize)> {
        self.external
            .iter()
            .map(|entry| {
                let (class, specificity, order) = entry.rank();
                (entry.rule().kind(), class, specificity, order)
            })
            .collect()
    }

    /// `(kind, class, specificity, order)` of every URI rule in lookup order.
    pub fn uri_rule_ranks(&self) -> Vec<(&'static str, u8, usize, usize)> {
        self.uri
            .iter()
            .map(|entry| {
                let (class, specificity, order) = entry.rank();
                (entry.rule().kind(), class, specificity, order)
            })
            .collect()
    }
}

impl ExternalIdentifierMapper for Catalog {
    fn map_external_identifier(
        &self,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Option<String> {
        Catalog::map_external_identifier(self, public_id, system_id)
    }
}

impl UriMapper for Catalog {
    fn map_uri(&self, uri: &str) -> Option<String> {
        Catalog::map_uri(self, uri)
    }
}

/// Ordered OR over independently built catalogs.
///
/// Unlike `nextCatalog`, no priority metadata is involved: the first catalog
/// (in construction order) that yields a mapping wins.
#[derive(Clone, Default)]
pub struct CompositeCatalog {
    catalogs: Vec<Arc<dyn CatalogMapper>>,
}

impl CompositeCatalog {
    pub fn new(catalogs: Vec<Arc<dyn CatalogMapper>>) -> Self {
        Self { catalogs }
    }

    pub fn push(&mut self, catalog: Arc<dyn CatalogMapper>) {
        self.catalogs.push(catalog);
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

impl<T: CatalogMapper + 'static> FromIterator<Arc<T>> for CompositeCatalog {
    fn from_iter<I: IntoIterator<Item = Arc<T>>>(iter: I) -> Self {
        Self {
            catalogs: iter
                .into_iter()
                .map(|catalog| catalog as Arc<dyn CatalogMapper>)
                .collect(),
        }
    }
}

impl fmt::Debug for CompositeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeCatalog")
            .field("catalogs", &self.catalogs.len())
            .finish()
    }
}

impl ExternalIdentifierMapper for CompositeCatalog {
    fn map_external_identifier(
        &self,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Option<String> {
        self.catalogs
            .iter()
            .find_map(|catalog| catalog.map_external_identifier(public_id, system_id))
    }
}

impl UriMapper for CompositeCatalog {
    fn map_uri(&self, uri: &str) -> Option<String> {
        self.catalogs.iter().find_map(|catalog| catalog.map_uri(uri))
    }
}
