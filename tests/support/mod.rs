#![allow(dead_code)]

use anyhow::{Result, anyhow, bail};
use std::collections::BTreeMap;
use std::sync::Mutex;
use url::Url;
use xcatalog::{Location, LocationResolver};

/// Base under which in-memory descriptions are registered.
pub const MEMORY_ROOT: &str = "file:///catalogs/";

// In-memory location resolver. Relative references join onto the base (or
// MEMORY_ROOT) the way a file resolver would, and every request is recorded.
#[derive(Default)]
pub struct MemoryResolver {
    documents: BTreeMap<String, String>,
    failing: BTreeMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `content` under `name` relative to MEMORY_ROOT.
    pub fn with(mut self, name: &str, content: impl Into<String>) -> Self {
        self.documents.insert(absolute(name), content.into());
        self
    }

    /// Make requests for `name` fail with `message`.
    pub fn failing(mut self, name: &str, message: &str) -> Self {
        self.failing.insert(absolute(name), message.to_string());
        self
    }

    /// Resolved locations requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }

    pub fn request_count(&self, name: &str) -> usize {
        let target = absolute(name);
        self.requests().iter().filter(|r| **r == target).count()
    }
}

impl LocationResolver for MemoryResolver {
    fn resolve(&self, reference: &str, base: Option<&str>) -> Result<Option<Location>> {
        let base = Url::parse(base.unwrap_or(MEMORY_ROOT))?;
        let target = base.join(reference)?.to_string();
        self.requests
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push(target.clone());
        if let Some(message) = self.failing.get(&target) {
            bail!("{message}");
        }
        Ok(self
            .documents
            .get(&target)
            .map(|content| Location::new(target.clone(), content.clone())))
    }
}

pub fn absolute(name: &str) -> String {
    Url::parse(MEMORY_ROOT)
        .and_then(|root| root.join(name))
        .map(String::from)
        .map_err(|err| anyhow!("bad fixture name {name}: {err}"))
        .expect("fixture names are valid relative URLs")
}
