//! Catalog stores.
//!
//! The recommender never talks to a database directly; it receives a
//! [`CatalogStore`] and asks it for a fresh snapshot on every request.

use crate::error::Result;
use crate::parser;
use crate::types::CatalogEntry;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read access to the full movie catalog.
///
/// `Send + Sync` lets one store be shared by concurrent requests.
pub trait CatalogStore: Send + Sync {
    /// Returns the name of this store (for logging/debugging)
    fn name(&self) -> &str;

    /// Read every entry, in the store's natural enumeration order.
    fn snapshot(&self) -> Result<Vec<CatalogEntry>>;
}

/// A fixed catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: Vec<CatalogEntry>,
}

impl InMemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CatalogEntry> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl CatalogStore for InMemoryCatalog {
    fn name(&self) -> &str {
        "InMemoryCatalog"
    }

    fn snapshot(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }
}

/// A catalog exported to a JSON file.
///
/// The file is re-read on every snapshot, so edits are picked up by the next
/// request without a restart.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for JsonFileCatalog {
    fn name(&self) -> &str {
        "JsonFileCatalog"
    }

    fn snapshot(&self) -> Result<Vec<CatalogEntry>> {
        let entries = parser::parse_catalog(&self.path)?;
        debug!(
            "Read {} catalog entries from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }
}
