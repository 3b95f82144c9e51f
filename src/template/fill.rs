//! The fill pipeline.
//!
//! Stages run in a fixed order because each one relies on the paragraphs
//! produced by the previous one:
//!
//! 1. repeating blocks, to a fixed point
//! 2. list placeholders in body paragraphs
//! 3. scalar placeholders in body paragraphs and table cells
//! 4. trailing empty paragraph trim
//!
//! Every stage reads element ids from the document afresh.

use super::block::{self, BlockStats};
use super::{list, splice, FillOptions};
use crate::data::{placeholder, TemplateData};
use crate::model::{Document, Element, Paragraph};
use chrono::Utc;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static ANY_PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([#/]?\w+)\}\}").unwrap());

/// Summary of what a fill changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Block expansion statistics
    pub blocks: BlockStats,

    /// Number of list placeholders expanded outside blocks
    pub lists_expanded: usize,

    /// Number of sibling paragraphs inserted for list items outside blocks
    pub list_paragraphs_inserted: usize,

    /// Number of scalar placeholder occurrences replaced outside blocks
    pub scalars_replaced: usize,

    /// Number of trailing empty paragraphs removed
    pub trimmed: usize,

    /// Placeholders and markers still present after the fill
    pub unresolved: Vec<String>,
}

impl FillReport {
    /// Check whether the fill modified the document.
    pub fn changed(&self) -> bool {
        self.blocks.expanded > 0
            || self.lists_expanded > 0
            || self.scalars_replaced > 0
            || self.trimmed > 0
    }

    /// Check whether every placeholder was resolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Fill `doc` with `data` using default options.
pub fn fill(doc: &mut Document, data: &TemplateData) -> FillReport {
    fill_with_options(doc, data, &FillOptions::default())
}

/// Fill `doc` with `data`.
///
/// Never fails: placeholders without data and malformed blocks are left in
/// the document as literal text and listed in [`FillReport::unresolved`].
pub fn fill_with_options(
    doc: &mut Document,
    data: &TemplateData,
    options: &FillOptions,
) -> FillReport {
    let mut report = FillReport {
        blocks: block::expand_blocks(doc, data),
        ..Default::default()
    };
    debug!(
        "blocks: {} expanded, {} paragraph(s) generated",
        report.blocks.expanded, report.blocks.generated
    );

    let (lists, inserted) = expand_lists(doc, data);
    report.lists_expanded = lists;
    report.list_paragraphs_inserted = inserted;
    debug!("lists: {} expanded, {} paragraph(s) inserted", lists, inserted);

    report.scalars_replaced = fill_scalars(doc, data, options.fill_tables);
    debug!("scalars: {} occurrence(s) replaced", report.scalars_replaced);

    if options.trim_trailing_empty {
        report.trimmed = trim_trailing_empty(doc);
    }

    report.unresolved = unresolved_placeholders(doc);
    if !report.unresolved.is_empty() {
        warn!(
            "unresolved placeholders left in document: {}",
            report.unresolved.join(", ")
        );
    }

    if options.stamp_modified && report.changed() {
        doc.metadata.modified = Some(Utc::now());
    }

    report
}

/// Expand every list-valued data entry in body paragraphs.
///
/// Returns `(placeholders expanded, paragraphs inserted)`. The id snapshot is
/// taken once; inserted siblings are not part of it and are never rescanned.
pub fn expand_lists(doc: &mut Document, data: &TemplateData) -> (usize, usize) {
    let mut expanded = 0;
    let mut inserted = 0;

    for id in doc.paragraph_ids() {
        for (key, items) in data.lists() {
            let token = placeholder(key);
            if !doc.paragraph(id).is_some_and(|p| p.contains(&token)) {
                continue;
            }
            inserted += list::expand_list(doc, id, key, items).len();
            expanded += 1;
        }
    }

    (expanded, inserted)
}

/// Substitute every scalar data entry, optionally inside tables too.
///
/// Returns the number of occurrences replaced.
pub fn fill_scalars(doc: &mut Document, data: &TemplateData, include_tables: bool) -> usize {
    let scalars: Vec<(String, &str)> = data
        .texts()
        .map(|(key, text)| (placeholder(key), text))
        .collect();
    if scalars.is_empty() {
        return 0;
    }

    let fill_one = |paragraph: &mut Paragraph| {
        splice::replace_all(
            paragraph,
            scalars.iter().map(|(token, text)| (token.as_str(), *text)),
        )
    };

    let mut replaced = 0;
    if include_tables {
        doc.for_each_paragraph_mut(|p| replaced += fill_one(p));
    } else {
        for id in doc.paragraph_ids() {
            if let Some(p) = doc.paragraph_mut(id) {
                replaced += fill_one(p);
            }
        }
    }
    replaced
}

/// Remove empty paragraphs from the end of the body. Interior empty
/// paragraphs and trailing tables stop the trim.
///
/// Returns the number of paragraphs removed.
pub fn trim_trailing_empty(doc: &mut Document) -> usize {
    let mut removed = 0;
    while let Some(id) = doc.last_id() {
        match doc.paragraph(id) {
            Some(p) if p.is_empty() => {
                doc.remove(id);
                removed += 1;
            }
            _ => break,
        }
    }
    removed
}

/// Placeholder names (with `#`/`/` prefix for block markers) still present
/// anywhere in the document, in document order, without duplicates.
pub fn unresolved_placeholders(doc: &Document) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    let mut collect = |paragraph: &Paragraph| {
        let text = paragraph.plain_text();
        for caps in ANY_PLACEHOLDER_REGEX.captures_iter(&text) {
            let name = caps[1].to_string();
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    };

    for (_, element) in doc.elements() {
        match element {
            Element::Paragraph(p) => collect(p),
            Element::Table(t) => t.paragraphs().for_each(&mut collect),
        }
    }
    names
}
