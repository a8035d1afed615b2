//! Catalog description reader.
//!
//! Reads OASIS XML catalog descriptions and replays them onto a
//! [`CatalogBuilder`]. Every element must live in the catalog namespace; the
//! root must be `catalog`; `group` elements recurse; `delegate*` and
//! `nextCatalog` elements pull in further descriptions through the injected
//! location resolver and cache.
//!
//! Relative `uri` attributes resolve against the nearest `xml:base`, and the
//! root scope falls back to the description's own location.

use crate::cache::{CatalogCache, NoCache};
use crate::catalog::{Catalog, CatalogBuilder, CompositeCatalog};
use crate::error::{CatalogError, Result};
use crate::location::{Location, LocationResolver};
use crate::prefer::Prefer;
use crate::uri::resolve_against;
use roxmltree::{Document, Node, ParsingOptions};
use std::sync::Arc;
use tracing::debug;

/// Namespace every catalog element must belong to.
pub const CATALOG_NAMESPACE: &str = "urn:oasis:names:tc:entity:xmlns:xml:catalog";
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

pub struct CatalogReader<R> {
    resolver: R,
    cache: Arc<dyn CatalogCache>,
}

impl<R: LocationResolver> CatalogReader<R> {
    /// Reader without caching.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            cache: Arc::new(NoCache),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn CatalogCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Locate and read the description named by `system_id`.
    pub fn parse(&self, system_id: &str) -> Result<Arc<Catalog>> {
        let mut chain = Vec::new();
        self.load(system_id, None, &mut chain)
    }

    /// Read each reference in order and OR the results together.
    pub fn parse_all<'r, I>(&self, references: I) -> Result<CompositeCatalog>
    where
        I: IntoIterator<Item = &'r str>,
    {
        references
            .into_iter()
            .map(|reference| self.parse(reference))
            .collect::<Result<Vec<_>>>()
            .map(|catalogs| catalogs.into_iter().collect())
    }

    /// Read a description that has already been fetched. Nested references
    /// still go through the resolver and cache.
    pub fn parse_location(&self, location: &Location) -> Result<Catalog> {
        let mut chain = vec![location.system_id.clone()];
        self.read(location, &mut chain)
    }

    fn load(
        &self,
        reference: &str,
        base: Option<&str>,
        chain: &mut Vec<String>,
    ) -> Result<Arc<Catalog>> {
        let location = match self.resolver.resolve(reference, base) {
            Ok(Some(location)) => location,
            Ok(None) => {
                return Err(CatalogError::Unresolved {
                    reference: reference.to_string(),
                    base: base.map(str::to_owned),
                });
            }
            Err(source) => {
                return Err(CatalogError::ResolverFailed {
                    reference: reference.to_string(),
                    base: base.map(str::to_owned),
                    source: source.into(),
                });
            }
        };
        if chain.contains(&location.system_id) {
            return Err(CatalogError::Cycle {
                location: location.system_id.clone(),
                chain: chain.join(" -> "),
            });
        }
        self.cache.resolve(&location.system_id, &mut || {
            chain.push(location.system_id.clone());
            let catalog = self.read(&location, chain);
            chain.pop();
            catalog.map(Arc::new)
        })
    }

    fn read(&self, location: &Location, chain: &mut Vec<String>) -> Result<Catalog> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let document = Document::parse_with_options(&location.content, options).map_err(
            |source| CatalogError::Malformed {
                location: location.system_id.clone(),
                source,
            },
        )?;
        let root = document.root_element();
        expect_namespace(root)?;
        if root.tag_name().name() != "catalog" {
            return Err(CatalogError::UnexpectedRoot {
                tag: root.tag_name().name().to_string(),
                location: location.system_id.clone(),
            });
        }
        // Descriptions always declare their preference; a configured default
        // only reaches scopes built in code.
        let prefer = required_prefer(root)?;
        let base = declared_base(root, Some(&location.system_id))?
            .unwrap_or_else(|| location.system_id.clone());
        let builder = CatalogBuilder::new(Some(prefer), Some(&base));
        let catalog = self.children(builder, root, location, chain)?.end();
        debug!(
            location = %location.system_id,
            external_rules = catalog.external_rule_count(),
            uri_rules = catalog.uri_rule_count(),
            "read catalog"
        );
        Ok(catalog)
    }

    fn children(
        &self,
        mut builder: CatalogBuilder,
        node: Node<'_, '_>,
        location: &Location,
        chain: &mut Vec<String>,
    ) -> Result<CatalogBuilder> {
        for child in node.children().filter(|n| n.is_element()) {
            builder = self.element(builder, child, location, chain)?;
        }
        Ok(builder)
    }

    fn element(
        &self,
        builder: CatalogBuilder,
        element: Node<'_, '_>,
        location: &Location,
        chain: &mut Vec<String>,
    ) -> Result<CatalogBuilder> {
        expect_namespace(element)?;
        let base = declared_base(element, builder.base())?;
        let base = base.as_deref();
        match element.tag_name().name() {
            "group" => {
                let prefer = required_prefer(element)?;
                builder.with_group(Some(prefer), base, |group| {
                    self.children(group, element, location, chain)
                })
            }
            "public" => builder.add_public(
                required(element, "publicId")?,
                required(element, "uri")?,
                base,
            ),
            "system" => builder.add_system(
                required(element, "systemId")?,
                required(element, "uri")?,
                base,
            ),
            "rewriteSystem" => Ok(builder.add_rewrite_system(
                required(element, "systemIdStartString")?,
                required(element, "rewritePrefix")?,
            )),
            "systemSuffix" => builder.add_system_suffix(
                required(element, "systemIdSuffix")?,
                required(element, "uri")?,
                base,
            ),
            "delegatePublic" => {
                let start = required(element, "publicIdStartString")?;
                let catalog = self.nested(element, location, chain)?;
                builder.add_delegate_public(start, catalog)
            }
            "delegateSystem" => {
                let start = required(element, "systemIdStartString")?;
                let catalog = self.nested(element, location, chain)?;
                Ok(builder.add_delegate_system(start, catalog))
            }
            "uri" => builder.add_uri(required(element, "name")?, required(element, "uri")?, base),
            "rewriteURI" => Ok(builder.add_rewrite_uri(
                required(element, "uriStartString")?,
                required(element, "rewritePrefix")?,
            )),
            "uriSuffix" => builder.add_uri_suffix(
                required(element, "uriSuffix")?,
                required(element, "uri")?,
                base,
            ),
            "delegateURI" => {
                let start = required(element, "uriStartString")?;
                let catalog = self.nested(element, location, chain)?;
                Ok(builder.add_delegate_uri(start, catalog))
            }
            "nextCatalog" => {
                let catalog = self.nested(element, location, chain)?;
                Ok(builder.add_next_catalog(catalog))
            }
            other => Err(CatalogError::UnknownTag {
                tag: other.to_string(),
                location: location.system_id.clone(),
            }),
        }
    }

    /// Load the description named by the element's `catalog` attribute,
    /// relative to the description being read.
    fn nested(
        &self,
        element: Node<'_, '_>,
        location: &Location,
        chain: &mut Vec<String>,
    ) -> Result<Arc<Catalog>> {
        let reference = required(element, "catalog")?;
        self.load(reference, Some(&location.system_id), chain)
    }
}

fn expect_namespace(element: Node<'_, '_>) -> Result<()> {
    match element.tag_name().namespace() {
        Some(CATALOG_NAMESPACE) => Ok(()),
        found => Err(CatalogError::WrongNamespace {
            element: element.tag_name().name().to_string(),
            expected: CATALOG_NAMESPACE,
            found: found.map_or_else(|| "no namespace".to_string(), |ns| format!("'{ns}'")),
        }),
    }
}

fn required<'a>(element: Node<'a, '_>, attribute: &'static str) -> Result<&'a str> {
    element
        .attribute(attribute)
        .ok_or_else(|| CatalogError::MissingAttribute {
            element: element.tag_name().name().to_string(),
            attribute,
        })
}

fn required_prefer(element: Node<'_, '_>) -> Result<Prefer> {
    let value = required(element, "prefer")?;
    Prefer::try_from(value).map_err(|_| CatalogError::InvalidPrefer {
        element: element.tag_name().name().to_string(),
        value: value.to_string(),
    })
}

/// The element's `xml:base`, resolved against the enclosing base when it is
/// relative.
fn declared_base(element: Node<'_, '_>, enclosing: Option<&str>) -> Result<Option<String>> {
    let Some(declared) = element.attribute((XML_NAMESPACE, "base")) else {
        return Ok(None);
    };
    match enclosing {
        Some(enclosing) => resolve_against(enclosing, declared).map(Some),
        None => Ok(Some(declared.to_string())),
    }
}
