//! Repeating block expansion.
//!
//! A block is delimited by a paragraph containing `{{#NAME}}` and the nearest
//! following paragraph containing `{{/NAME}}`. The paragraphs in between form
//! the block template; they are rendered once per record of the `NAME` data
//! entry and spliced in where the block used to be.

use super::{list, splice};
use crate::data::{block_close, placeholder, Record, TemplateData, Value};
use crate::model::{Document, ElementId, Paragraph};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static OPEN_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{#(\w+)\}\}").unwrap());

/// Statistics from expanding all blocks of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockStats {
    /// Number of blocks expanded
    pub expanded: usize,

    /// Number of paragraphs generated from block templates
    pub generated: usize,

    /// Names of blocks left in the document as literal text
    pub inert: Vec<String>,
}

/// Expand the block opened by paragraph `open_id`.
///
/// Returns the ids of the generated paragraphs in document order, or `None`
/// when the block is left inert (unknown open id, or no closing marker after
/// it). Tables between the markers are not part of the template and stay
/// where they are.
pub fn expand_block(
    doc: &mut Document,
    open_id: ElementId,
    name: &str,
    records: &[Record],
) -> Option<Vec<ElementId>> {
    let close_token = block_close(name);
    let ids = doc.ids();
    let open_pos = ids.iter().position(|&id| id == open_id)?;

    let mut template_ids = Vec::new();
    let mut close_id = None;
    for &id in &ids[open_pos + 1..] {
        let Some(paragraph) = doc.paragraph(id) else {
            continue;
        };
        if paragraph.contains(&close_token) {
            close_id = Some(id);
            break;
        }
        template_ids.push(id);
    }
    let close_id = close_id?;

    let anchor = doc.previous(open_id);
    doc.remove(open_id);
    let template: Vec<Paragraph> = template_ids
        .into_iter()
        .filter_map(|id| doc.remove(id))
        .filter_map(|element| element.as_paragraph().cloned())
        .collect();
    doc.remove(close_id);

    let mut generated = Vec::with_capacity(records.len() * template.len());
    let mut anchor = anchor;
    for record in records {
        for paragraph in &template {
            for rendered in render_record(paragraph, record) {
                let id = doc.insert_after(anchor, rendered)?;
                generated.push(id);
                anchor = Some(id);
            }
        }
    }

    debug!(
        "expanded block '{}' with {} record(s) into {} paragraph(s)",
        name,
        records.len(),
        generated.len()
    );
    Some(generated)
}

/// Render one template paragraph for one record.
///
/// If the paragraph holds a list-valued field of the record, the list is
/// expanded in place and the result is the paragraph followed by one sibling
/// per remaining item. Scalar fields are substituted either way; fields the
/// record does not define are left as they are.
pub fn render_record(template: &Paragraph, record: &Record) -> Vec<Paragraph> {
    let mut paragraph = template.clone();

    let list_field = record.iter().find_map(|(key, value)| {
        value
            .as_list()
            .filter(|_| template.contains(&placeholder(key)))
            .map(|items| (key.as_str(), items))
    });

    for (key, value) in record {
        if let Value::Text(text) = value {
            splice::replace_in_paragraph(&mut paragraph, &placeholder(key), text);
        }
    }

    match list_field {
        Some((key, items)) => {
            let siblings = list::expand_list_paragraph(&mut paragraph, key, items);
            std::iter::once(paragraph).chain(siblings).collect()
        }
        None => vec![paragraph],
    }
}

/// Expand every block whose name maps to records, until none is left.
///
/// The scan restarts from the top after each expansion. Paragraphs produced
/// by an expansion are never treated as block openers, so values that happen
/// to contain markers cannot make the loop run forever.
pub fn expand_blocks(doc: &mut Document, data: &TemplateData) -> BlockStats {
    let mut stats = BlockStats::default();
    let mut generated: HashSet<ElementId> = HashSet::new();
    let mut unclosed: HashSet<(ElementId, String)> = HashSet::new();

    while let Some((open_id, name, records)) = next_block(doc, data, &generated, &unclosed) {
        match expand_block(doc, open_id, &name, records) {
            Some(ids) => {
                stats.expanded += 1;
                stats.generated += ids.len();
                generated.extend(ids);
            }
            None => {
                warn!("block '{}' has no closing marker, leaving it as text", name);
                unclosed.insert((open_id, name));
            }
        }
    }

    stats.inert = open_marker_names(doc);
    for name in &stats.inert {
        if data.records(name).is_none() {
            warn!(
                "block '{}' has no record list in the data, leaving it as text",
                name
            );
        }
    }
    stats
}

fn next_block<'d>(
    doc: &Document,
    data: &'d TemplateData,
    generated: &HashSet<ElementId>,
    unclosed: &HashSet<(ElementId, String)>,
) -> Option<(ElementId, String, &'d [Record])> {
    for (id, element) in doc.elements() {
        if generated.contains(&id) {
            continue;
        }
        let Some(paragraph) = element.as_paragraph() else {
            continue;
        };
        let text = paragraph.plain_text();
        for caps in OPEN_MARKER_REGEX.captures_iter(&text) {
            let name = &caps[1];
            if unclosed.contains(&(id, name.to_string())) {
                continue;
            }
            if let Some(records) = data.records(name) {
                return Some((id, name.to_string(), records));
            }
        }
    }
    None
}

/// Names of all opening markers still present in body paragraphs, in
/// document order, without duplicates.
pub fn open_marker_names(doc: &Document) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for paragraph in doc.paragraphs() {
        let text = paragraph.plain_text();
        for caps in OPEN_MARKER_REGEX.captures_iter(&text) {
            let name = caps[1].to_string();
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }
    names
}
