//! Locating catalog descriptions.
//!
//! The reader never touches storage itself; it asks a `LocationResolver` to
//! turn a reference (as written in a `catalog` attribute, or handed to
//! `CatalogReader::parse`) into the text of a description plus the location
//! it was finally read from.

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// A fetched catalog description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// Final, absolute location. Used as cache key and as the base for
    /// references made from inside the description.
    pub system_id: String,
    pub content: String,
}

impl Location {
    pub fn new(system_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            system_id: system_id.into(),
            content: content.into(),
        }
    }
}

pub trait LocationResolver: Send + Sync {
    /// `Ok(None)` means the reference does not designate anything this
    /// resolver can read.
    fn resolve(&self, reference: &str, base: Option<&str>) -> Result<Option<Location>>;
}

impl<T: LocationResolver + ?Sized> LocationResolver for &T {
    fn resolve(&self, reference: &str, base: Option<&str>) -> Result<Option<Location>> {
        (**self).resolve(reference, base)
    }
}

impl<T: LocationResolver + ?Sized> LocationResolver for std::sync::Arc<T> {
    fn resolve(&self, reference: &str, base: Option<&str>) -> Result<Option<Location>> {
        (**self).resolve(reference, base)
    }
}

/// Reads descriptions from the local file system.
///
/// References may be plain paths or `file:` URLs. Relative references are
/// joined against `base` when one is given, otherwise against `root` (the
/// current directory by default). Other schemes are not fetched.
#[derive(Clone, Debug, Default)]
pub struct FileLocationResolver {
    root: Option<PathBuf>,
}

impl FileLocationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve base-less relative references against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn target_url(&self, reference: &str, base: Option<&str>) -> Result<Url> {
        if let Ok(url) = Url::parse(reference) {
            // Single-letter schemes are Windows drive letters, not URLs.
            if url.scheme().len() > 1 {
                return Ok(url);
            }
        }
        if let Some(base) = base {
            let base_url =
                Url::parse(base).with_context(|| format!("parsing catalog base '{base}'"))?;
            return base_url
                .join(reference)
                .with_context(|| format!("joining '{reference}' onto '{base}'"));
        }
        let path = Path::new(reference);
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            match &self.root {
                Some(root) => root.join(path),
                None => std::env::current_dir()
                    .context("reading current directory")?
                    .join(path),
            }
        };
        Url::from_file_path(&absolute)
            .map_err(|_| anyhow!("cannot express {} as a file URL", absolute.display()))
    }
}

impl LocationResolver for FileLocationResolver {
    fn resolve(&self, reference: &str, base: Option<&str>) -> Result<Option<Location>> {
        let url = self.target_url(reference, base)?;
        if url.scheme() != "file" {
            debug!(%url, "skipping non-file catalog location");
            return Ok(None);
        }
        let path = url
            .to_file_path()
            .map_err(|_| anyhow!("catalog URL {url} does not name a local file"))?;
        if !path.is_file() {
            debug!(path = %path.display(), "catalog file not found");
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        debug!(%url, bytes = content.len(), "read catalog description");
        Ok(Some(Location {
            system_id: url.to_string(),
            content,
        }))
    }
}
