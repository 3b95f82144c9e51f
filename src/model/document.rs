//! Document-level types.

use super::{Paragraph, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identity of a body element.
///
/// Ids are handed out on insertion and stay valid until the element itself
/// is removed, no matter how many elements are inserted or removed around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

/// A block-level element of the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// A paragraph
    Paragraph(Paragraph),

    /// A table
    Table(Table),
}

impl Element {
    /// Get the paragraph, if this element is one.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Element::Paragraph(p) => Some(p),
            Element::Table(_) => None,
        }
    }

    /// Get the paragraph mutably, if this element is one.
    pub fn as_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self {
            Element::Paragraph(p) => Some(p),
            Element::Table(_) => None,
        }
    }

    /// Get plain text content of the element.
    pub fn plain_text(&self) -> String {
        match self {
            Element::Paragraph(p) => p.plain_text(),
            Element::Table(t) => t.plain_text(),
        }
    }
}

impl From<Paragraph> for Element {
    fn from(p: Paragraph) -> Self {
        Element::Paragraph(p)
    }
}

impl From<Table> for Element {
    fn from(t: Table) -> Self {
        Element::Table(t)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    id: ElementId,
    element: Element,
}

/// A template or filled document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "DocumentRepr", into = "DocumentRepr")]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    body: Vec<Slot>,
    next_id: u64,
}

/// Serialized shape of a document: ids are runtime-only.
#[derive(Serialize, Deserialize)]
struct DocumentRepr {
    #[serde(default)]
    metadata: Metadata,

    #[serde(default)]
    body: Vec<Element>,
}

impl From<DocumentRepr> for Document {
    fn from(repr: DocumentRepr) -> Self {
        let mut doc = Document::new();
        doc.metadata = repr.metadata;
        for element in repr.body {
            doc.push(element);
        }
        doc
    }
}

impl From<Document> for DocumentRepr {
    fn from(doc: Document) -> Self {
        Self {
            metadata: doc.metadata,
            body: doc.body.into_iter().map(|slot| slot.element).collect(),
        }
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            body: Vec::new(),
            next_id: 0,
        }
    }

    /// Create a document from body elements.
    pub fn from_elements<E: Into<Element>>(elements: impl IntoIterator<Item = E>) -> Self {
        let mut doc = Self::new();
        for element in elements {
            doc.push(element);
        }
        doc
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn position(&self, id: ElementId) -> Option<usize> {
        self.body.iter().position(|slot| slot.id == id)
    }

    /// Append an element to the end of the body.
    pub fn push(&mut self, element: impl Into<Element>) -> ElementId {
        let id = self.allocate_id();
        self.body.push(Slot {
            id,
            element: element.into(),
        });
        id
    }

    /// Append a paragraph to the end of the body.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) -> ElementId {
        self.push(paragraph)
    }

    /// Append a table to the end of the body.
    pub fn add_table(&mut self, table: Table) -> ElementId {
        self.push(table)
    }

    /// Insert an element immediately after `anchor`, or at the start of the
    /// body when `anchor` is `None`.
    ///
    /// Returns `None` if `anchor` does not name an element of this document.
    pub fn insert_after(
        &mut self,
        anchor: Option<ElementId>,
        element: impl Into<Element>,
    ) -> Option<ElementId> {
        let index = match anchor {
            Some(anchor) => self.position(anchor)? + 1,
            None => 0,
        };
        let id = self.allocate_id();
        self.body.insert(
            index,
            Slot {
                id,
                element: element.into(),
            },
        );
        Some(id)
    }

    /// Remove an element from the body.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.position(id)?;
        Some(self.body.remove(index).element)
    }

    /// Check whether `id` names an element of this document.
    pub fn contains(&self, id: ElementId) -> bool {
        self.position(id).is_some()
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.body
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| &slot.element)
    }

    /// Get an element mutably by id.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.body
            .iter_mut()
            .find(|slot| slot.id == id)
            .map(|slot| &mut slot.element)
    }

    /// Get a paragraph by id.
    pub fn paragraph(&self, id: ElementId) -> Option<&Paragraph> {
        self.get(id).and_then(Element::as_paragraph)
    }

    /// Get a paragraph mutably by id.
    pub fn paragraph_mut(&mut self, id: ElementId) -> Option<&mut Paragraph> {
        self.get_mut(id).and_then(Element::as_paragraph_mut)
    }

    /// Get the element preceding `id` in the body.
    pub fn previous(&self, id: ElementId) -> Option<ElementId> {
        let index = self.position(id)?;
        index
            .checked_sub(1)
            .map(|prev| self.body[prev].id)
    }

    /// Snapshot of all body element ids in document order.
    pub fn ids(&self) -> Vec<ElementId> {
        self.body.iter().map(|slot| slot.id).collect()
    }

    /// Snapshot of the body paragraph ids in document order.
    pub fn paragraph_ids(&self) -> Vec<ElementId> {
        self.body
            .iter()
            .filter(|slot| matches!(slot.element, Element::Paragraph(_)))
            .map(|slot| slot.id)
            .collect()
    }

    /// Id of the last body element.
    pub fn last_id(&self) -> Option<ElementId> {
        self.body.last().map(|slot| slot.id)
    }

    /// Iterate over body elements with their ids.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.body.iter().map(|slot| (slot.id, &slot.element))
    }

    /// Iterate over body paragraphs (tables excluded).
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|slot| slot.element.as_paragraph())
    }

    /// Iterate over body tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|slot| match &slot.element {
            Element::Table(t) => Some(t),
            Element::Paragraph(_) => None,
        })
    }

    /// Visit every paragraph, body paragraphs and table cell paragraphs alike,
    /// in document order.
    pub fn for_each_paragraph_mut(&mut self, mut f: impl FnMut(&mut Paragraph)) {
        for slot in &mut self.body {
            match &mut slot.element {
                Element::Paragraph(p) => f(p),
                Element::Table(t) => t.paragraphs_mut().for_each(&mut f),
            }
        }
    }

    /// Get the number of body elements.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Get plain text content of the entire document, one element per line.
    pub fn plain_text(&self) -> String {
        self.body
            .iter()
            .map(|slot| slot.element.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Document {
    /// Documents compare by metadata and body content; ids are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata
            && self.body.len() == other.body.len()
            && self
                .body
                .iter()
                .zip(&other.body)
                .all(|(a, b)| a.element == b.element)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Document subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Creation date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}
