//! Error taxonomy for catalog construction and loading.
//!
//! Lookups never fail; every variant here comes out of the builder, the
//! document reader, or the location resolver they depend on. `kind()` groups
//! the variants into the three families callers usually branch on.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Coarse classification of a [`CatalogError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A rule could not be registered with the attributes in scope.
    Configuration,
    /// A catalog description does not follow the catalog format.
    Format,
    /// A referenced catalog description could not be located.
    Resolution,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("no 'base' attribute was specified but was needed to resolve non-absolute URI '{uri}'")]
    MissingBase { uri: String },

    #[error("cannot resolve URI '{uri}' against base '{base}'")]
    InvalidBase {
        uri: String,
        base: String,
        #[source]
        source: url::ParseError,
    },

    #[error(
        "no 'prefer' attribute was specified for {rule} rule '{identifier}' and no default preference is configured"
    )]
    MissingPrefer {
        rule: &'static str,
        identifier: String,
    },

    #[error("invalid default preference '{value}' in {variable}, expected 'public' or 'system'")]
    InvalidDefaultPrefer {
        variable: &'static str,
        value: String,
    },

    #[error("catalog element '{element}' must belong to the '{expected}' namespace, found {found}")]
    WrongNamespace {
        element: String,
        expected: &'static str,
        found: String,
    },

    #[error("unknown tag '{tag}' in catalog '{location}'")]
    UnknownTag { tag: String, location: String },

    #[error("attribute '{attribute}' of element '{element}' is required")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("invalid prefer value '{value}' on element '{element}', expected 'public' or 'system'")]
    InvalidPrefer { element: String, value: String },

    #[error("root element must be 'catalog' and not '{tag}' in '{location}'")]
    UnexpectedRoot { tag: String, location: String },

    #[error("could not parse catalog '{location}'")]
    Malformed {
        location: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("could not resolve catalog '{reference}' against base {base:?}")]
    Unresolved {
        reference: String,
        base: Option<String>,
    },

    #[error("location resolver failed for catalog '{reference}' against base {base:?}")]
    ResolverFailed {
        reference: String,
        base: Option<String>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("catalog '{location}' references itself through {chain}")]
    Cycle { location: String, chain: String },
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::MissingBase { .. }
            | CatalogError::InvalidBase { .. }
            | CatalogError::MissingPrefer { .. }
            | CatalogError::InvalidDefaultPrefer { .. } => ErrorKind::Configuration,
            CatalogError::WrongNamespace { .. }
            | CatalogError::UnknownTag { .. }
            | CatalogError::MissingAttribute { .. }
            | CatalogError::InvalidPrefer { .. }
            | CatalogError::UnexpectedRoot { .. }
            | CatalogError::Malformed { .. } => ErrorKind::Format,
            CatalogError::Unresolved { .. }
            | CatalogError::ResolverFailed { .. }
            | CatalogError::Cycle { .. } => ErrorKind::Resolution,
        }
    }
}
