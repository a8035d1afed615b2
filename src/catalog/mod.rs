//! Catalog resolution engine.
//!
//! A [`Catalog`] holds two priority-ordered rule lists, one answering
//! external-identifier lookups and one answering URI lookups. Catalogs are
//! built with [`CatalogBuilder`] (directly in code or by the document reader)
//! and are immutable afterwards. [`CompositeCatalog`] ORs independently built
//! catalogs together.

pub mod builder;
mod index;
pub mod mapper;
pub mod model;
mod rule;

pub use builder::{CatalogBuilder, Delegate, Group, Root};
pub use mapper::{
    CatalogMapper, CatalogResourceResolver, CatalogUriResolver, ExternalIdentifierMapper,
    ResourceRequest, ResourceResolver, UriMapper, UriResolver,
};
pub use model::{Catalog, CompositeCatalog};
