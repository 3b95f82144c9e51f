//! Template substitution engine.
//!
//! Placeholder syntax:
//!
//! - `{{NAME}}`: scalar, or list when `NAME` maps to a list of scalars
//! - `{{#NAME}}` … `{{/NAME}}`: repeating block, one copy per record
//! - `*text*` / `**text**` inside substituted values: emphasis
//!
//! # Example
//!
//! ```
//! use docfill::model::{Document, Paragraph};
//! use docfill::template::fill;
//! use docfill::TemplateData;
//!
//! let mut doc = Document::from_elements([Paragraph::with_text("Hello {{NAME}}")]);
//! let data = TemplateData::from_json_str(r#"{"NAME": "*Jane*"}"#).unwrap();
//!
//! let report = fill(&mut doc, &data);
//! assert!(report.is_complete());
//! assert_eq!(doc.plain_text(), "Hello Jane");
//! ```

pub mod block;
mod fill;
pub mod list;
pub mod markup;
mod options;
pub mod splice;

pub use block::{expand_block, expand_blocks, BlockStats};
pub use fill::{
    expand_lists, fill, fill_scalars, fill_with_options, trim_trailing_empty,
    unresolved_placeholders, FillReport,
};
pub use list::{expand_list, expand_list_paragraph};
pub use options::FillOptions;
pub use splice::replace_in_paragraph;
