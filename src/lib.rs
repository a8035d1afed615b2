//! OASIS XML Catalogs resolution.
//!
//! A catalog rewrites external identifiers (public/system ids) and plain URIs
//! into replacement locations, typically local copies of network resources.
//! Catalogs are built in code with [`CatalogBuilder`] or read from catalog
//! descriptions with [`CatalogReader`], and answer lookups through
//! [`Catalog::map_external_identifier`] and [`Catalog::map_uri`].
//!
//! ```text
//! let reader = CatalogReader::new(FileLocationResolver::new())
//!     .with_cache(Arc::new(SimpleCatalogCache::new()));
//! let catalog = reader.parse("/etc/xml/catalog")?;
//! catalog.map_external_identifier(Some("-//OASIS//DTD DocBook XML V4.1.2//EN"), None);
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod location;
pub mod prefer;
pub mod reader;
pub mod uri;

pub use cache::{CatalogCache, NoCache, SimpleCatalogCache};
pub use catalog::{
    Catalog, CatalogBuilder, CatalogMapper, CatalogResourceResolver, CatalogUriResolver,
    CompositeCatalog, Delegate, ExternalIdentifierMapper, Group, ResourceRequest,
    ResourceResolver, Root, UriMapper, UriResolver,
};
pub use config::{CatalogConfig, ENV_CATALOG_FILES, ENV_DEFAULT_PREFER, split_list};
pub use error::{CatalogError, ErrorKind, Result};
pub use location::{FileLocationResolver, Location, LocationResolver};
pub use prefer::{Prefer, UnknownPrefer};
pub use reader::{CATALOG_NAMESPACE, CatalogReader};
