//! Fluent catalog construction.
//!
//! A builder accumulates rules into two prioritized indexes (external
//! identifiers and URIs) and freezes them into a [`Catalog`] on `end()`.
//! Scopes are tracked in the type:
//!
//! - `CatalogBuilder<Root>`: `end()` yields the catalog.
//! - `CatalogBuilder<Group<S>>`: shares the parent's indexes, only the default
//!   `prefer`/`base` differ; `end()` hands back the parent builder.
//! - `CatalogBuilder<Delegate<S>>`: a detached builder whose catalog is
//!   registered in the parent (as a delegate or next catalog) on `end()`.
//!
//! Relative URIs are rebased when the rule is added, and public rules resolve
//! their preference at the same moment, so every configuration error surfaces
//! here and never during lookup.

use crate::catalog::Catalog;
use crate::catalog::index::RuleIndex;
use crate::catalog::rule::{ExternalRule, UriRule};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::prefer::{Prefer, resolve_prefer};
use crate::uri::rebase;
use std::mem;
use std::sync::Arc;

#[derive(Debug, Default)]
struct RuleSet {
    external: RuleIndex<ExternalRule>,
    uri: RuleIndex<UriRule>,
}

impl RuleSet {
    fn into_catalog(self) -> Catalog {
        Catalog::from_rules(self.external.into_sorted(), self.uri.into_sorted())
    }
}

/// Outermost scope.
#[derive(Debug)]
pub struct Root;

/// Group scope nested in `S`.
#[derive(Debug)]
pub struct Group<S> {
    parent: Box<CatalogBuilder<S>>,
}

/// Detached scope building a catalog for the parent `S`.
#[derive(Debug)]
pub struct Delegate<S> {
    parent: Box<CatalogBuilder<S>>,
    target: DelegateTarget,
}

#[derive(Debug)]
enum DelegateTarget {
    Public(String),
    System(String),
    Uri(String),
    Next,
}

#[derive(Debug)]
pub struct CatalogBuilder<S = Root> {
    rules: RuleSet,
    prefer: Option<Prefer>,
    base: Option<String>,
    default_prefer: Option<Prefer>,
    scope: S,
}

impl CatalogBuilder<Root> {
    pub fn new(prefer: Option<Prefer>, base: Option<&str>) -> Self {
        Self {
            rules: RuleSet::default(),
            prefer,
            base: base.map(str::to_owned),
            default_prefer: None,
            scope: Root,
        }
    }

    /// Like [`CatalogBuilder::new`], falling back to the configured default
    /// preference wherever a scope declares none.
    pub fn with_config(config: &CatalogConfig, prefer: Option<Prefer>, base: Option<&str>) -> Self {
        Self {
            default_prefer: config.default_prefer,
            ..Self::new(prefer, base)
        }
    }

    pub fn end(self) -> Catalog {
        self.rules.into_catalog()
    }
}

impl<S> CatalogBuilder<Group<S>> {
    /// Close the group; its rules stay in the parent's indexes.
    pub fn end(self) -> CatalogBuilder<S> {
        let mut parent = *self.scope.parent;
        parent.rules = self.rules;
        parent
    }
}

impl<S> CatalogBuilder<Delegate<S>> {
    /// Freeze the detached catalog and register it in the parent scope.
    pub fn end(self) -> Result<CatalogBuilder<S>> {
        let catalog = Arc::new(self.rules.into_catalog());
        let parent = *self.scope.parent;
        match self.scope.target {
            DelegateTarget::Public(start) => parent.add_delegate_public(&start, catalog),
            DelegateTarget::System(start) => Ok(parent.add_delegate_system(&start, catalog)),
            DelegateTarget::Uri(start) => Ok(parent.add_delegate_uri(&start, catalog)),
            DelegateTarget::Next => Ok(parent.add_next_catalog(catalog)),
        }
    }
}

impl<S> CatalogBuilder<S> {
    /// Preference declared for (or inherited by) this scope.
    pub fn prefer(&self) -> Option<Prefer> {
        self.prefer
    }

    /// Base URI declared for (or inherited by) this scope.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Open a group. Unset attributes are inherited from this scope.
    pub fn add_group(mut self, prefer: Option<Prefer>, base: Option<&str>) -> CatalogBuilder<Group<S>> {
        let rules = mem::take(&mut self.rules);
        CatalogBuilder {
            rules,
            prefer: prefer.or(self.prefer),
            base: base.map(str::to_owned).or_else(|| self.base.clone()),
            default_prefer: self.default_prefer,
            scope: Group {
                parent: Box::new(self),
            },
        }
    }

    /// Run `f` inside a group scope and restore this scope's defaults
    /// afterwards. Equivalent to `add_group(..)` + `end()`, but keeps the
    /// builder type unchanged so groups can nest to any depth.
    pub fn with_group<F>(mut self, prefer: Option<Prefer>, base: Option<&str>, f: F) -> Result<Self>
    where
        F: FnOnce(Self) -> Result<Self>,
    {
        let saved_prefer = self.prefer;
        let saved_base = self.base.clone();
        self.prefer = prefer.or(saved_prefer);
        if let Some(base) = base {
            self.base = Some(base.to_owned());
        }
        let mut inner = f(self)?;
        inner.prefer = saved_prefer;
        inner.base = saved_base;
        Ok(inner)
    }

    pub fn add_public(mut self, public_id: &str, uri: &str, base: Option<&str>) -> Result<Self> {
        let prefer = resolve_prefer(self.prefer, self.default_prefer, "public", public_id)?;
        let uri = rebase(uri, base, self.base.as_deref())?;
        self.rules.external.insert(ExternalRule::Public {
            public_id: public_id.to_owned(),
            uri,
            prefer,
        });
        Ok(self)
    }

    pub fn add_system(mut self, system_id: &str, uri: &str, base: Option<&str>) -> Result<Self> {
        let uri = rebase(uri, base, self.base.as_deref())?;
        self.rules.external.insert(ExternalRule::System {
            system_id: system_id.to_owned(),
            uri,
        });
        Ok(self)
    }

    pub fn add_system_suffix(mut self, suffix: &str, uri: &str, base: Option<&str>) -> Result<Self> {
        let uri = rebase(uri, base, self.base.as_deref())?;
        self.rules.external.insert(ExternalRule::SystemSuffix {
            suffix: suffix.to_owned(),
            uri,
        });
        Ok(self)
    }

    /// Replace the leading `start` of matching system ids with
    /// `rewrite_prefix`. The prefix is used verbatim, never rebased.
    pub fn add_rewrite_system(mut self, start: &str, rewrite_prefix: &str) -> Self {
        self.rules.external.insert(ExternalRule::RewriteSystem {
            start: start.to_owned(),
            rewrite_prefix: rewrite_prefix.to_owned(),
        });
        self
    }

    pub fn add_uri(mut self, name: &str, uri: &str, base: Option<&str>) -> Result<Self> {
        let uri = rebase(uri, base, self.base.as_deref())?;
        self.rules.uri.insert(UriRule::Uri {
            name: name.to_owned(),
            uri,
        });
        Ok(self)
    }

    pub fn add_uri_suffix(mut self, suffix: &str, uri: &str, base: Option<&str>) -> Result<Self> {
        let uri = rebase(uri, base, self.base.as_deref())?;
        self.rules.uri.insert(UriRule::UriSuffix {
            suffix: suffix.to_owned(),
            uri,
        });
        Ok(self)
    }

    pub fn add_rewrite_uri(mut self, start: &str, rewrite_prefix: &str) -> Self {
        self.rules.uri.insert(UriRule::RewriteUri {
            start: start.to_owned(),
            rewrite_prefix: rewrite_prefix.to_owned(),
        });
        self
    }

    /// Forward whole lookups whose public id starts with `start` to `catalog`.
    pub fn add_delegate_public(mut self, start: &str, catalog: Arc<Catalog>) -> Result<Self> {
        let prefer = resolve_prefer(self.prefer, self.default_prefer, "delegatePublic", start)?;
        self.rules.external.insert(ExternalRule::DelegatePublic {
            start: start.to_owned(),
            catalog,
            prefer,
        });
        Ok(self)
    }

    /// Forward whole lookups whose system id starts with `start` to `catalog`.
    pub fn add_delegate_system(mut self, start: &str, catalog: Arc<Catalog>) -> Self {
        self.rules.external.insert(ExternalRule::DelegateSystem {
            start: start.to_owned(),
            catalog,
        });
        self
    }

    /// Forward URI lookups starting with `start` to `catalog`.
    pub fn add_delegate_uri(mut self, start: &str, catalog: Arc<Catalog>) -> Self {
        self.rules.uri.insert(UriRule::DelegateUri {
            start: start.to_owned(),
            catalog,
        });
        self
    }

    /// Consult `catalog` after every rule declared directly in this catalog.
    pub fn add_next_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.rules
            .external
            .insert(ExternalRule::NextCatalog(Arc::clone(&catalog)));
        self.rules.uri.insert(UriRule::NextCatalog(catalog));
        self
    }

    /// Open a detached scope whose catalog becomes a `delegatePublic` for
    /// `start` on `end()`.
    pub fn open_delegate_public(
        self,
        start: &str,
        prefer: Option<Prefer>,
        base: Option<&str>,
    ) -> CatalogBuilder<Delegate<S>> {
        self.open_delegate(DelegateTarget::Public(start.to_owned()), prefer, base)
    }

    /// Open a detached scope whose catalog becomes a `delegateSystem` for `start`.
    pub fn open_delegate_system(
        self,
        start: &str,
        prefer: Option<Prefer>,
        base: Option<&str>,
    ) -> CatalogBuilder<Delegate<S>> {
        self.open_delegate(DelegateTarget::System(start.to_owned()), prefer, base)
    }

    /// Open a detached scope whose catalog becomes a `delegateURI` for `start`.
    pub fn open_delegate_uri(
        self,
        start: &str,
        prefer: Option<Prefer>,
        base: Option<&str>,
    ) -> CatalogBuilder<Delegate<S>> {
        self.open_delegate(DelegateTarget::Uri(start.to_owned()), prefer, base)
    }

    /// Open a detached scope whose catalog is appended as a next catalog.
    pub fn open_next_catalog(
        self,
        prefer: Option<Prefer>,
        base: Option<&str>,
    ) -> CatalogBuilder<Delegate<S>> {
        self.open_delegate(DelegateTarget::Next, prefer, base)
    }

    fn open_delegate(
        self,
        target: DelegateTarget,
        prefer: Option<Prefer>,
        base: Option<&str>,
    ) -> CatalogBuilder<Delegate<S>> {
        CatalogBuilder {
            rules: RuleSet::default(),
            prefer,
            base: base.map(str::to_owned),
            default_prefer: self.default_prefer,
            scope: Delegate {
                parent: Box::new(self),
                target,
            },
        }
    }
}
