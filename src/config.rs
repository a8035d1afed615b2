//! Process-wide catalog defaults.
//!
//! Nothing in the crate reads the environment on its own; callers build a
//! `CatalogConfig` (usually via [`CatalogConfig::from_env`]) and hand it to
//! [`crate::CatalogBuilder::with_config`]. Catalog descriptions always declare
//! `prefer`, so the default only fills scopes built in code.

use crate::error::{CatalogError, Result};
use crate::prefer::Prefer;
use std::env;
use std::env::VarError;

/// Default preference for catalogs that declare none.
pub const ENV_DEFAULT_PREFER: &str = "XML_CATALOG_PREFER";
/// Whitespace/comma separated list of catalog references to load by default.
pub const ENV_CATALOG_FILES: &str = "XML_CATALOG_FILES";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Preference used when a scope declares none.
    pub default_prefer: Option<Prefer>,
    /// Catalog references consulted, in order, when the caller names none.
    pub catalog_files: Vec<String>,
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_non_empty)
    }

    /// Build a config from an arbitrary variable lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_prefer = match lookup(ENV_DEFAULT_PREFER).filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(Prefer::try_from(raw.trim()).map_err(|_| {
                CatalogError::InvalidDefaultPrefer {
                    variable: ENV_DEFAULT_PREFER,
                    value: raw.clone(),
                }
            })?),
            None => None,
        };
        let catalog_files = lookup(ENV_CATALOG_FILES)
            .map(|raw| split_list(&raw))
            .unwrap_or_default();
        Ok(Self {
            default_prefer,
            catalog_files,
        })
    }

    pub fn with_default_prefer(mut self, prefer: Option<Prefer>) -> Self {
        self.default_prefer = prefer;
        self
    }
}

pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        Ok(_) => None,
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(os)) => Some(os.to_string_lossy().into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_prefer_and_catalog_list() {
        let config = CatalogConfig::from_lookup(lookup_from(&[
            (ENV_DEFAULT_PREFER, "System"),
            (ENV_CATALOG_FILES, "/etc/xml/catalog  docbook.xml,extra.xml"),
        ]))
        .unwrap();
        assert_eq!(config.default_prefer, Some(Prefer::System));
        assert_eq!(
            config.catalog_files,
            vec!["/etc/xml/catalog", "docbook.xml", "extra.xml"]
        );
    }

    #[test]
    fn empty_values_are_unset() {
        let config =
            CatalogConfig::from_lookup(lookup_from(&[(ENV_DEFAULT_PREFER, "  ")])).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn invalid_prefer_is_a_configuration_error() {
        let err = CatalogConfig::from_lookup(lookup_from(&[(ENV_DEFAULT_PREFER, "sometimes")]))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidDefaultPrefer { ref value, .. } if value == "sometimes"
        ));
    }
}
