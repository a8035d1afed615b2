#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use xcatalog::CATALOG_NAMESPACE;

/// Wrap `body` in a catalog root declaring `prefer`.
pub fn catalog_xml(prefer: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<catalog xmlns="{CATALOG_NAMESPACE}" prefer="{prefer}">
{body}
</catalog>
"#
    )
}

/// Same as `catalog_xml` with an explicit root `xml:base`.
pub fn catalog_xml_with_base(prefer: &str, base: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<catalog xmlns="{CATALOG_NAMESPACE}" prefer="{prefer}" xml:base="{base}">
{body}
</catalog>
"#
    )
}

// Temporary directory of catalog files, removed on drop.
pub struct TempCatalogs {
    dir: TempDir,
}

impl TempCatalogs {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("creating temp catalog dir")?,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

pub fn resolve_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_catalog-resolve"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    Ok(output)
}

pub fn parse_resolution(bytes: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(bytes).context("stdout is not UTF-8")?;
    serde_json::from_str(text.trim()).with_context(|| format!("parsing resolution '{text}'"))
}
