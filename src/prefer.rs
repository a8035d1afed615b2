//! Public/system preference policy.
//!
//! A catalog scope either prefers public identifiers or system identifiers.
//! The setting only matters to `public` and `delegatePublic` rules: when the
//! scope prefers system identifiers and the request carries a system id, those
//! rules step aside so system-id rules (or the system id itself) win.

use crate::error::{CatalogError, Result};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prefer {
    Public,
    System,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown preference '{0}', expected 'public' or 'system'")]
pub struct UnknownPrefer(pub String);

impl Prefer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prefer::Public => "public",
            Prefer::System => "system",
        }
    }

    /// Whether a public-id rule governed by this preference may answer a
    /// request carrying `system_id`.
    ///
    /// This is the whole of the preference wrapper: `System` suppresses the
    /// rule as soon as any system id is present, `Public` never does.
    pub fn admits(&self, system_id: Option<&str>) -> bool {
        match self {
            Prefer::Public => true,
            Prefer::System => system_id.is_none(),
        }
    }
}

impl fmt::Display for Prefer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Prefer {
    type Error = UnknownPrefer;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("public") {
            Ok(Prefer::Public)
        } else if value.eq_ignore_ascii_case("system") {
            Ok(Prefer::System)
        } else {
            Err(UnknownPrefer(value.to_string()))
        }
    }
}

/// Pick the scope preference, falling back to the configured default.
///
/// Called when a public-id rule is registered, so a missing preference fails
/// at construction instead of at lookup time.
pub(crate) fn resolve_prefer(
    local: Option<Prefer>,
    default: Option<Prefer>,
    rule: &'static str,
    identifier: &str,
) -> Result<Prefer> {
    local
        .or(default)
        .ok_or_else(|| CatalogError::MissingPrefer {
            rule,
            identifier: identifier.to_string(),
        })
}
