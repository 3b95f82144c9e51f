//! Plain-text container: one paragraph per line.
//!
//! Loading gives every line a single default-styled run. Saving writes each
//! body paragraph as one line and each table row as tab-separated cells;
//! styling is dropped.

use super::DocumentStore;
use crate::error::{Error, Result};
use crate::model::{Document, Element, Paragraph};

/// Plain UTF-8 text store.
#[derive(Debug, Clone, Default)]
pub struct TextStore {
    _private: (),
}

impl TextStore {
    /// Create a new text store.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentStore for TextStore {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn is_renderable(&self) -> bool {
        true
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::Store(format!("text template is not valid UTF-8: {}", e)))?;
        Ok(Document::from_elements(text.lines().map(Paragraph::with_text)))
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut output = String::new();
        for (_, element) in doc.elements() {
            match element {
                Element::Paragraph(p) => output.push_str(&p.plain_text()),
                Element::Table(t) => output.push_str(&t.plain_text()),
            }
            output.push('\n');
        }
        Ok(output.into_bytes())
    }
}
