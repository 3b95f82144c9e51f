//! JSON document container.

use super::DocumentStore;
use crate::error::Result;
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Stores the full document model (runs, styles, paragraph formats, tables)
/// as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonStore {
    format: JsonFormat,
}

impl JsonStore {
    /// Create a new JSON store writing pretty-printed output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format and return self.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl DocumentStore for JsonStore {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut bytes = match self.format {
            JsonFormat::Pretty => serde_json::to_vec_pretty(doc)?,
            JsonFormat::Compact => serde_json::to_vec(doc)?,
        };
        bytes.push(b'\n');
        Ok(bytes)
    }
}
