//! Document stores: loading and saving the document model.
//!
//! A store implements one container format. Stores are collected in a
//! [`StoreRegistry`] which dispatches on file extension.
//!
//! # Example
//!
//! ```no_run
//! use docfill::store::StoreRegistry;
//! use std::path::Path;
//!
//! fn main() -> docfill::Result<()> {
//!     let registry = StoreRegistry::with_defaults();
//!     let doc = registry.load(Path::new("template.json"))?;
//!     registry.save(&doc, Path::new("output/cv.txt"))?;
//!     Ok(())
//! }
//! ```

mod json;
mod text;

pub use json::{JsonFormat, JsonStore};
pub use text::TextStore;

use crate::error::{Error, Result};
use crate::model::Document;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Trait for document container formats.
///
/// Implement this trait to add support for a new format. Only
/// [`DocumentStore::decode`] and [`DocumentStore::encode`] are required;
/// file handling has default implementations.
pub trait DocumentStore: Send + Sync {
    /// Get the supported file extensions for this store.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["json"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this store.
    fn name(&self) -> &str;

    /// Decode a document from bytes.
    fn decode(&self, bytes: &[u8]) -> Result<Document>;

    /// Encode a document to bytes.
    fn encode(&self, doc: &Document) -> Result<Vec<u8>>;

    /// Load a document from a file.
    fn load(&self, path: &Path) -> Result<Document> {
        let bytes = fs::read(path)?;
        self.decode(&bytes)
    }

    /// Save a document to a file, creating missing parent directories.
    fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        let bytes = self.encode(doc)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Whether an office converter opens files of this format as the
    /// document they describe. Serialized models are not renderable.
    fn is_renderable(&self) -> bool {
        false
    }

    /// Check if this store supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document stores.
///
/// The registry maps file extensions to stores and provides convenient
/// methods for loading and saving by path.
pub struct StoreRegistry {
    stores: HashMap<String, Arc<dyn DocumentStore>>,
    by_name: HashMap<String, Arc<dyn DocumentStore>>,
}

impl StoreRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the built-in stores (JSON and plain text).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonStore::new()));
        registry.register(Arc::new(TextStore::new()));
        registry
    }

    /// Register a store.
    ///
    /// The store will be registered for all its supported extensions.
    pub fn register(&mut self, store: Arc<dyn DocumentStore>) {
        for ext in store.supported_extensions() {
            self.stores.insert(ext.to_lowercase(), store.clone());
        }
        self.by_name.insert(store.name().to_lowercase(), store);
    }

    /// Get a store by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentStore>> {
        self.stores.get(&ext.to_lowercase()).cloned()
    }

    /// Get a store by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentStore>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.stores.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.stores.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Get the store responsible for `path`.
    pub fn for_path(&self, path: &Path) -> Result<Arc<dyn DocumentStore>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!("'{}' has no file extension", path.display()))
            })?;

        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no store for extension '{}'", ext)))
    }

    /// Fail with [`Error::UnsupportedFormat`] unless the store for `path`
    /// writes files an external converter can render.
    pub fn ensure_renderable(&self, path: &Path) -> Result<()> {
        let store = self.for_path(path)?;
        if store.is_renderable() {
            Ok(())
        } else {
            Err(Error::UnsupportedFormat(format!(
                "{} output '{}' cannot be rendered to PDF; use a .txt output",
                store.name(),
                path.display()
            )))
        }
    }

    /// Load a document using the store for the path's extension.
    pub fn load(&self, path: &Path) -> Result<Document> {
        self.for_path(path)?.load(path)
    }

    /// Save a document using the store for the path's extension.
    pub fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        self.for_path(path)?.save(doc, path)
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
