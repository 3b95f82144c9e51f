//! Document model types for template content.
//!
//! The model is a small rich-text tree: a document is an ordered body of
//! block elements (paragraphs and tables), paragraphs are made of styled
//! text runs. Body elements carry a stable [`ElementId`] so that structural
//! edits never invalidate references held by the template engine.

mod document;
mod paragraph;
mod table;

pub use document::{Document, Element, ElementId, Metadata};
pub use paragraph::{
    Alignment, Indent, Numbering, Paragraph, ParagraphFormat, Spacing, TabAlignment, TabLeader,
    TabStop, TextRun, TextStyle,
};
pub use table::{Table, TableCell, TableRow};
