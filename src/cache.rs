//! Memoization of parsed catalogs by resolved location.
//!
//! The reader asks the cache for every catalog description it loads, keyed by
//! the location the resolver settled on, so a description referenced from
//! several places is parsed once.

use crate::catalog::Catalog;
use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub trait CatalogCache: Send + Sync {
    /// Return the catalog stored under `key`, computing and storing it on a
    /// miss. Failed computations are not stored.
    fn resolve(
        &self,
        key: &str,
        compute: &mut dyn FnMut() -> Result<Arc<Catalog>>,
    ) -> Result<Arc<Catalog>>;
}

/// Cache that never stores; every call computes.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl CatalogCache for NoCache {
    fn resolve(
        &self,
        _key: &str,
        compute: &mut dyn FnMut() -> Result<Arc<Catalog>>,
    ) -> Result<Arc<Catalog>> {
        compute()
    }
}

/// Map-backed cache.
///
/// The computation runs without holding the lock, so concurrent first
/// requests for one key may each parse the description; the first result to
/// be stored is the one every caller gets back, and it never changes.
#[derive(Debug, Default)]
pub struct SimpleCatalogCache {
    entries: RwLock<HashMap<String, Arc<Catalog>>>,
}

impl SimpleCatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<Catalog>> {
        self.entries.read().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl CatalogCache for SimpleCatalogCache {
    fn resolve(
        &self,
        key: &str,
        compute: &mut dyn FnMut() -> Result<Arc<Catalog>>,
    ) -> Result<Arc<Catalog>> {
        if let Some(hit) = self.get(key) {
            debug!(key, "catalog cache hit");
            return Ok(hit);
        }
        debug!(key, "catalog cache miss");
        let computed = compute()?;
        let mut entries = self.entries.write();
        let stored = entries.entry(key.to_string()).or_insert(computed);
        Ok(Arc::clone(stored))
    }
}
