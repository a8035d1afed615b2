//! Mapping capabilities and resolver decorators.
//!
//! `ExternalIdentifierMapper` and `UriMapper` are the two questions a catalog
//! answers. Downstream document pipelines usually already own a resolver
//! keyed by identifiers or hrefs; the decorators here put a catalog in front
//! of such a resolver without the resolver knowing about catalogs.

use std::sync::Arc;

/// Maps a `(public id, system id)` pair to a replacement location.
pub trait ExternalIdentifierMapper {
    fn map_external_identifier(
        &self,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Option<String>;

    /// Wrap `inner` so requests reach it with the mapped system id.
    fn decorate_resource_resolver<R>(self, inner: R) -> CatalogResourceResolver<Self, R>
    where
        Self: Sized,
        R: ResourceResolver,
    {
        CatalogResourceResolver {
            mapper: self,
            inner,
        }
    }
}

/// Maps a URI to a replacement location.
pub trait UriMapper {
    fn map_uri(&self, uri: &str) -> Option<String>;

    /// Wrap `inner` so hrefs reach it already mapped.
    fn decorate_uri_resolver<R>(self, inner: R) -> CatalogUriResolver<Self, R>
    where
        Self: Sized,
        R: UriResolver,
    {
        CatalogUriResolver {
            mapper: self,
            inner,
        }
    }
}

/// Both mapping capabilities, shareable across threads.
pub trait CatalogMapper: ExternalIdentifierMapper + UriMapper + Send + Sync {}

impl<T> CatalogMapper for T where T: ExternalIdentifierMapper + UriMapper + Send + Sync {}

impl<T: ExternalIdentifierMapper + ?Sized> ExternalIdentifierMapper for Arc<T> {
    fn map_external_identifier(
        &self,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Option<String> {
        (**self).map_external_identifier(public_id, system_id)
    }
}

impl<T: UriMapper + ?Sized> UriMapper for Arc<T> {
    fn map_uri(&self, uri: &str) -> Option<String> {
        (**self).map_uri(uri)
    }
}

/// A resource lookup as issued by schema/DTD loaders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceRequest<'a> {
    pub kind: &'a str,
    pub namespace: Option<&'a str>,
    pub public_id: Option<&'a str>,
    pub system_id: Option<&'a str>,
    pub base_uri: Option<&'a str>,
}

/// Resolver keyed by resource type, namespace, identifiers and base URI.
pub trait ResourceResolver {
    type Resource;

    fn resolve_resource(&self, request: ResourceRequest<'_>) -> Self::Resource;
}

impl<F, O> ResourceResolver for F
where
    F: Fn(ResourceRequest<'_>) -> O,
{
    type Resource = O;

    fn resolve_resource(&self, request: ResourceRequest<'_>) -> O {
        self(request)
    }
}

/// Resolver keyed by an href and an optional base.
pub trait UriResolver {
    type Output;

    fn resolve(&self, href: &str, base: Option<&str>) -> Self::Output;
}

impl<F, O> UriResolver for F
where
    F: Fn(&str, Option<&str>) -> O,
{
    type Output = O;

    fn resolve(&self, href: &str, base: Option<&str>) -> O {
        self(href, base)
    }
}

#[derive(Clone, Debug)]
pub struct CatalogResourceResolver<M, R> {
    mapper: M,
    inner: R,
}

impl<M, R> ResourceResolver for CatalogResourceResolver<M, R>
where
    M: ExternalIdentifierMapper,
    R: ResourceResolver,
{
    type Resource = R::Resource;

    fn resolve_resource(&self, request: ResourceRequest<'_>) -> R::Resource {
        let mapped = self
            .mapper
            .map_external_identifier(request.public_id, request.system_id);
        self.inner.resolve_resource(ResourceRequest {
            system_id: mapped.as_deref().or(request.system_id),
            ..request
        })
    }
}

#[derive(Clone, Debug)]
pub struct CatalogUriResolver<M, R> {
    mapper: M,
    inner: R,
}

impl<M, R> UriResolver for CatalogUriResolver<M, R>
where
    M: UriMapper,
    R: UriResolver,
{
    type Output = R::Output;

    fn resolve(&self, href: &str, base: Option<&str>) -> R::Output {
        match self.mapper.map_uri(href) {
            Some(mapped) => self.inner.resolve(&mapped, base),
            None => self.inner.resolve(href, base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::prefer::Prefer;

    fn catalog() -> Arc<Catalog> {
        let catalog = Catalog::builder(Some(Prefer::Public), Some("file:///dtd/"))
            .add_public("-//X//Y//EN", "y.dtd", None)
            .unwrap()
            .add_uri("http://x/schema.xsd", "schema.xsd", None)
            .unwrap()
            .end();
        Arc::new(catalog)
    }

    #[test]
    fn resource_resolver_sees_mapped_system_id() {
        let resolver = catalog().decorate_resource_resolver(|request: ResourceRequest<'_>| {
            request.system_id.map(str::to_string)
        });
        let request = ResourceRequest {
            kind: "http://www.w3.org/TR/REC-xml",
            namespace: None,
            public_id: Some("-//X//Y//EN"),
            system_id: Some("http://x/y.dtd"),
            base_uri: None,
        };
        assert_eq!(
            resolver.resolve_resource(request).as_deref(),
            Some("file:///dtd/y.dtd")
        );

        let unmapped = ResourceRequest {
            public_id: Some("-//Other//EN"),
            ..request
        };
        assert_eq!(
            resolver.resolve_resource(unmapped).as_deref(),
            Some("http://x/y.dtd")
        );
    }

    #[test]
    fn uri_resolver_passes_unmapped_href_through() {
        let resolver = catalog().decorate_uri_resolver(|href: &str, base: Option<&str>| {
            format!("{href}|{}", base.unwrap_or("-"))
        });
        assert_eq!(
            resolver.resolve("http://x/schema.xsd", Some("http://doc/")),
            "file:///dtd/schema.xsd|http://doc/"
        );
        assert_eq!(resolver.resolve("other.xsd", None), "other.xsd|-");
    }
}
